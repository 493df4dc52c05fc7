use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::assets::viewer_settings::ViewerSettings;
use crate::engine::camera::resize::{handle_window_resize, init_viewport};
use crate::engine::camera::scene_camera::setup_scene;
use crate::engine::core::window_config::create_window_config;
use crate::engine::interaction::pointer::map_pointer_to_orientation;
use crate::engine::render::color_shift::ColorShiftPlugin;
use crate::engine::scene::controller::SceneController;
use crate::engine::systems::pixel_ratio::clamp_pixel_ratio;
use crate::engine::systems::render_loop::RenderLoopPlugin;
// Loading
use crate::engine::loading::environment_loader::{
    EnvironmentJob, receive_environment, start_environment_fetch,
};
use crate::engine::loading::model_loader::{ModelLoader, check_model_loading, start_model_load};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::settings_loader::{SettingsLoader, load_settings_system, start_loading};
// Transitions
use crate::engine::core::app_state::{
    AppState, transition_to_fetching_environment, transition_to_loading_model,
    transition_to_running,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, spawn_fps_overlay};
#[cfg(target_arch = "wasm32")]
use crate::engine::systems::fps_tracking::fps_log_system;

const LOG_FILTER: &str = "wgpu=error,naga=warn,hdri_model_viewer=info";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers ViewerSettings as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ViewerSettings>::new(&["json"]))
        .add_plugins(ColorShiftPlugin)
        .add_plugins(RenderLoopPlugin)
        // No ambient fill until the environment stage resolves
        .insert_resource(AmbientLight::NONE);

    // Initialise resources early
    app.init_resource::<ViewerSettings>()
        .init_resource::<SceneController>()
        .init_resource::<LoadingProgress>()
        .init_resource::<SettingsLoader>()
        .init_resource::<EnvironmentJob>()
        .init_resource::<ModelLoader>();

    // Strictly sequential pipeline: settings, environment, model
    app.add_systems(Startup, (init_viewport, start_loading))
        .add_systems(
            Update,
            (load_settings_system, transition_to_fetching_environment)
                .chain()
                .run_if(in_state(AppState::LoadingSettings)),
        )
        .add_systems(
            OnEnter(AppState::FetchingEnvironment),
            (setup_scene, start_environment_fetch).chain(),
        )
        .add_systems(
            Update,
            (receive_environment, transition_to_loading_model)
                .chain()
                .run_if(in_state(AppState::FetchingEnvironment)),
        )
        .add_systems(OnEnter(AppState::LoadingModel), start_model_load)
        .add_systems(
            Update,
            (check_model_loading, transition_to_running)
                .chain()
                .run_if(in_state(AppState::LoadingModel)),
        );

    // Interaction and resize run in every state; the pointer mapper no-ops until a model exists
    app.add_systems(
        Update,
        (
            clamp_pixel_ratio,
            handle_window_resize,
            map_pointer_to_orientation,
        )
            .chain(),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_fps_overlay)
            .add_systems(Update, fps_text_update_system);
    }

    #[cfg(target_arch = "wasm32")]
    {
        app.add_systems(Update, fps_log_system);
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
