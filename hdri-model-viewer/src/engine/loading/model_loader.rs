use bevy::asset::RecursiveDependencyLoadState;
use bevy::gltf::Gltf;
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::engine::animation::tween::OrientationTween;
use crate::engine::assets::viewer_settings::ViewerSettings;
use crate::engine::loading::progress::{LoadingProgress, StageStatus};
use crate::engine::scene::controller::SceneController;
use crate::error::{AssetError, AssetResult};

#[derive(Resource, Default)]
pub struct ModelLoader {
    handle: Option<Handle<Gltf>>,
}

/// Root entity of the loaded glTF scene.
#[derive(Component)]
pub struct LoadedModel;

pub fn start_model_load(
    mut loader: ResMut<ModelLoader>,
    asset_server: Res<AssetServer>,
    settings: Res<ViewerSettings>,
) {
    info!("Loading glTF model: {}", settings.model_path);
    loader.handle = Some(asset_server.load(settings.model_path.clone()));
}

// Attach the model once it and everything it references has loaded
pub fn check_model_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    loader: Res<ModelLoader>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    settings: Res<ViewerSettings>,
    mut controller: ResMut<SceneController>,
    mut commands: Commands,
) {
    if loading_progress.model.is_resolved() {
        return;
    }

    let Some(handle) = &loader.handle else {
        return;
    };

    let outcome = resolve_model_scene(
        asset_server.get_recursive_dependency_load_state(handle),
        || gltfs.get(handle).and_then(first_scene),
        &settings.model_path,
    );

    if let Some(outcome) = outcome {
        attach_model(
            outcome,
            &settings,
            &mut controller,
            &mut loading_progress,
            &mut commands,
        );
    }
}

fn first_scene(gltf: &Gltf) -> Option<Handle<Scene>> {
    gltf.default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
}

/// Scene to spawn once the file and its dependencies are in, `None` while still loading.
fn resolve_model_scene(
    state: Option<RecursiveDependencyLoadState>,
    scene: impl FnOnce() -> Option<Handle<Scene>>,
    path: &str,
) -> Option<AssetResult<Handle<Scene>>> {
    match state {
        Some(RecursiveDependencyLoadState::Loaded) => {
            Some(scene().ok_or_else(|| AssetError::Model {
                path: path.to_string(),
                reason: "file contains no scenes".to_string(),
            }))
        }
        Some(RecursiveDependencyLoadState::Failed(err)) => Some(Err(AssetError::Model {
            path: path.to_string(),
            reason: err.to_string(),
        })),
        _ => None,
    }
}

// A failed model leaves the slot empty; the scene stays lit but static
fn attach_model(
    outcome: AssetResult<Handle<Scene>>,
    settings: &ViewerSettings,
    controller: &mut SceneController,
    loading_progress: &mut LoadingProgress,
    commands: &mut Commands,
) {
    match outcome {
        Ok(_) if controller.model.get().is_some() => {
            warn!("Model already attached, ignoring second scene");
        }
        Ok(scene) => {
            let model = spawn_model(commands, scene, settings);
            controller.model.set(model);
            println!("✓ Model attached to scene");
            loading_progress.model = StageStatus::Loaded;
        }
        Err(err) => {
            error!("Failed to load glTF model: {}", err);
            loading_progress.model = StageStatus::Failed;
        }
    }
}

pub fn spawn_model(
    commands: &mut Commands,
    scene: Handle<Scene>,
    settings: &ViewerSettings,
) -> Entity {
    commands
        .spawn((
            SceneRoot(scene),
            Transform::default(),
            OrientationTween::new(
                settings.interaction.tween_duration_secs,
                settings.interaction.easing,
            ),
            LoadedModel,
        ))
        .observe(enable_mesh_shadows)
        .id()
}

// glTF meshes may arrive opted out of shadows; every mesh in the model both casts and receives
fn enable_mesh_shadows(
    trigger: Trigger<SceneInstanceReady>,
    children: Query<&Children>,
    meshes: Query<(), With<Mesh3d>>,
    mut commands: Commands,
) {
    let mesh_count = clear_shadow_opt_outs(trigger.target(), &children, &meshes, &mut commands);
    info!("Model instance ready, shadows enabled on {} meshes", mesh_count);
}

fn clear_shadow_opt_outs(
    root: Entity,
    children: &Query<&Children>,
    meshes: &Query<(), With<Mesh3d>>,
    commands: &mut Commands,
) -> usize {
    let mut mesh_count = 0;
    for entity in children.iter_descendants(root) {
        if meshes.contains(entity) {
            commands
                .entity(entity)
                .remove::<(NotShadowCaster, NotShadowReceiver)>();
            mesh_count += 1;
        }
    }
    mesh_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::AssetLoadError;
    use bevy::asset::io::AssetReaderError;
    use std::path::PathBuf;
    use std::sync::Arc;

    const MODEL_PATH: &str = "models/Missing.gltf";

    fn not_found() -> RecursiveDependencyLoadState {
        RecursiveDependencyLoadState::Failed(Arc::new(AssetLoadError::AssetReaderError(
            AssetReaderError::NotFound(PathBuf::from(MODEL_PATH)),
        )))
    }

    #[test]
    fn loaded_file_yields_its_scene() {
        let scene = Handle::<Scene>::default();
        let outcome = resolve_model_scene(
            Some(RecursiveDependencyLoadState::Loaded),
            || Some(scene.clone()),
            MODEL_PATH,
        );
        assert_eq!(outcome, Some(Ok(scene)));
    }

    #[test]
    fn loaded_file_without_scenes_is_an_error() {
        let outcome = resolve_model_scene(
            Some(RecursiveDependencyLoadState::Loaded),
            || None,
            MODEL_PATH,
        );
        assert_eq!(
            outcome,
            Some(Err(AssetError::Model {
                path: MODEL_PATH.to_string(),
                reason: "file contains no scenes".to_string(),
            }))
        );
    }

    #[test]
    fn failed_load_is_a_model_error() {
        let outcome = resolve_model_scene(Some(not_found()), || None, MODEL_PATH);
        assert!(matches!(
            outcome,
            Some(Err(AssetError::Model { ref path, .. })) if path == MODEL_PATH
        ));
    }

    #[test]
    fn pending_load_keeps_waiting() {
        for state in [
            None,
            Some(RecursiveDependencyLoadState::NotLoaded),
            Some(RecursiveDependencyLoadState::Loading),
        ] {
            let outcome = resolve_model_scene(state, || Some(Handle::default()), MODEL_PATH);
            assert_eq!(outcome, None);
        }
    }

    #[derive(Resource, Default)]
    struct PendingOutcome(Option<AssetResult<Handle<Scene>>>);

    fn apply_pending_outcome(
        mut pending: ResMut<PendingOutcome>,
        settings: Res<ViewerSettings>,
        mut controller: ResMut<SceneController>,
        mut loading_progress: ResMut<LoadingProgress>,
        mut commands: Commands,
    ) {
        if let Some(outcome) = pending.0.take() {
            attach_model(
                outcome,
                &settings,
                &mut controller,
                &mut loading_progress,
                &mut commands,
            );
        }
    }

    fn attach_app() -> App {
        let mut app = App::new();
        app.init_resource::<PendingOutcome>()
            .init_resource::<ViewerSettings>()
            .init_resource::<SceneController>()
            .init_resource::<LoadingProgress>()
            .add_systems(Update, apply_pending_outcome);
        app
    }

    fn post(app: &mut App, outcome: AssetResult<Handle<Scene>>) {
        app.world_mut().resource_mut::<PendingOutcome>().0 = Some(outcome);
        app.update();
    }

    fn model_count(app: &mut App) -> usize {
        let mut models = app
            .world_mut()
            .query_filtered::<Entity, With<LoadedModel>>();
        models.iter(app.world()).count()
    }

    #[test]
    fn failed_model_leaves_slot_empty() {
        let mut app = attach_app();
        let failure = resolve_model_scene(Some(not_found()), || None, MODEL_PATH);
        post(&mut app, failure.unwrap());

        assert_eq!(app.world().resource::<SceneController>().model.get(), None);
        assert_eq!(
            app.world().resource::<LoadingProgress>().model,
            StageStatus::Failed
        );
        assert_eq!(model_count(&mut app), 0);
    }

    #[test]
    fn loaded_model_fills_slot_exactly_once() {
        let mut app = attach_app();
        post(&mut app, Ok(Handle::default()));

        let first = app.world().resource::<SceneController>().model.get();
        let Some(model) = first else {
            panic!("model slot not filled");
        };
        assert!(app.world().get::<OrientationTween>(model).is_some());
        assert_eq!(
            app.world().resource::<LoadingProgress>().model,
            StageStatus::Loaded
        );

        post(&mut app, Ok(Handle::default()));
        assert_eq!(app.world().resource::<SceneController>().model.get(), first);
        assert_eq!(model_count(&mut app), 1);
    }

    #[derive(Component)]
    struct Root;

    #[derive(Resource, Default)]
    struct Cleared(usize);

    fn clear_from_root(
        roots: Query<Entity, With<Root>>,
        children: Query<&Children>,
        meshes: Query<(), With<Mesh3d>>,
        mut cleared: ResMut<Cleared>,
        mut commands: Commands,
    ) {
        for root in &roots {
            cleared.0 += clear_shadow_opt_outs(root, &children, &meshes, &mut commands);
        }
    }

    #[test]
    fn shadow_opt_outs_are_cleared_on_every_mesh() {
        let mut app = App::new();
        app.init_resource::<Cleared>()
            .add_systems(Update, clear_from_root);

        let root = app.world_mut().spawn(Root).id();
        let mesh = app
            .world_mut()
            .spawn((
                Mesh3d(Handle::default()),
                NotShadowCaster,
                NotShadowReceiver,
                ChildOf(root),
            ))
            .id();
        let non_mesh = app
            .world_mut()
            .spawn((NotShadowCaster, ChildOf(mesh)))
            .id();

        app.update();

        let world = app.world();
        assert_eq!(world.resource::<Cleared>().0, 1);
        assert!(world.get::<NotShadowCaster>(mesh).is_none());
        assert!(world.get::<NotShadowReceiver>(mesh).is_none());
        assert!(world.get::<NotShadowCaster>(non_mesh).is_some());
    }
}
