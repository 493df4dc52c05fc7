use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::asset_paths::SETTINGS_PATH;

use crate::engine::assets::viewer_settings::ViewerSettings;
use crate::engine::loading::progress::{LoadingProgress, StageStatus};
use crate::error::{AssetError, AssetResult};

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<ViewerSettings>>,
}

// Kick off the settings request; everything else waits on it
pub fn start_loading(mut loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(SETTINGS_PATH));
}

// Adopt the settings file, or keep the defaults when it is missing or malformed
pub fn load_settings_system(
    mut loading_progress: ResMut<LoadingProgress>,
    loader: Res<SettingsLoader>,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<ViewerSettings>>,
    mut commands: Commands,
) {
    if loading_progress.settings.is_resolved() {
        return;
    }

    let Some(handle) = &loader.handle else {
        return;
    };

    let outcome = resolve_settings(
        settings_assets.get(handle),
        asset_server.get_load_state(handle),
    );

    match outcome {
        Some(Ok(settings)) => {
            info!("✓ Viewer settings loaded from {}", SETTINGS_PATH);
            commands.insert_resource(settings);
            loading_progress.settings = StageStatus::Loaded;
        }
        Some(Err(err)) => {
            warn!("{}, continuing with built-in defaults", err);
            loading_progress.settings = StageStatus::Failed;
        }
        None => {}
    }
}

/// `None` while the file is still in flight.
fn resolve_settings(
    loaded: Option<&ViewerSettings>,
    state: Option<LoadState>,
) -> Option<AssetResult<ViewerSettings>> {
    if let Some(settings) = loaded {
        return Some(Ok(settings.clone()));
    }

    match state {
        Some(LoadState::Failed(err)) => Some(Err(AssetError::Settings {
            path: SETTINGS_PATH.to_string(),
            reason: err.to_string(),
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::AssetLoadError;
    use bevy::asset::io::AssetReaderError;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn missing_file() -> LoadState {
        LoadState::Failed(Arc::new(AssetLoadError::AssetReaderError(
            AssetReaderError::NotFound(PathBuf::from(SETTINGS_PATH)),
        )))
    }

    #[test]
    fn loaded_file_is_adopted() {
        let mut custom = ViewerSettings::default();
        custom.model_path = "models/Other.gltf".to_string();

        let outcome = resolve_settings(Some(&custom), Some(LoadState::Loaded));
        assert_eq!(outcome, Some(Ok(custom)));
    }

    #[test]
    fn missing_file_is_a_settings_error() {
        let outcome = resolve_settings(None, Some(missing_file()));
        assert!(matches!(
            outcome,
            Some(Err(AssetError::Settings { ref path, .. })) if path == SETTINGS_PATH
        ));
    }

    #[test]
    fn in_flight_file_keeps_waiting() {
        assert_eq!(resolve_settings(None, Some(LoadState::Loading)), None);
        assert_eq!(resolve_settings(None, Some(LoadState::NotLoaded)), None);
        assert_eq!(resolve_settings(None, None), None);
    }
}
