use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

/// Asset pipeline stages. Each stage starts only after the previous one resolved,
/// successfully or not.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    LoadingSettings,
    FetchingEnvironment,
    LoadingModel,
    Running,
}

pub fn transition_to_fetching_environment(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.settings.is_resolved() {
        println!("→ Transitioning to FetchingEnvironment state");
        next_state.set(AppState::FetchingEnvironment);
    }
}

pub fn transition_to_loading_model(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.environment.is_resolved() {
        println!("→ Transitioning to LoadingModel state");
        next_state.set(AppState::LoadingModel);
    }
}

// Final transition; a failed model still leaves a lit, rendering scene
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.model.is_resolved() {
        println!("→ Asset pipeline finished, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
