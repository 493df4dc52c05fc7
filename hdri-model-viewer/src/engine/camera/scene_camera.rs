use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::render::view::{ColorGrading, ColorGradingGlobal, Msaa};

use crate::engine::assets::viewer_settings::ViewerSettings;
use crate::engine::render::color_shift::ColorShiftSettings;
use crate::engine::scene::controller::{SceneController, Viewport};

#[derive(Component)]
pub struct SceneCamera;

pub fn perspective_for(settings: &ViewerSettings, viewport: Viewport) -> PerspectiveProjection {
    PerspectiveProjection {
        fov: settings.camera.fov_degrees.to_radians(),
        aspect_ratio: viewport.aspect_ratio().unwrap_or(1.0),
        near: settings.camera.near,
        far: settings.camera.far,
    }
}

pub fn spawn_scene_camera(
    commands: &mut Commands,
    settings: &ViewerSettings,
    viewport: Viewport,
) -> Entity {
    let render = &settings.render;
    commands
        .spawn((
            Camera3d::default(),
            Camera {
                // Transparent so the page behind the canvas shows through
                clear_color: ClearColorConfig::Custom(Color::NONE),
                ..default()
            },
            Projection::Perspective(perspective_for(settings, viewport)),
            Transform::from_xyz(0.0, 0.0, settings.camera.distance).looking_at(Vec3::ZERO, Vec3::Y),
            Msaa::Sample4,
            Tonemapping::AcesFitted,
            ColorGrading {
                // Linear exposure multiplier expressed in stops
                global: ColorGradingGlobal {
                    exposure: render.tone_mapping_exposure.log2(),
                    ..default()
                },
                ..default()
            },
            ColorShiftSettings::new(render.color_shift_amount, render.color_shift_angle, viewport),
            SceneCamera,
        ))
        .id()
}

// Runs once settings are resolved so the camera picks up any overrides
pub fn setup_scene(
    mut commands: Commands,
    settings: Res<ViewerSettings>,
    controller: Res<SceneController>,
) {
    spawn_scene_camera(&mut commands, &settings, controller.viewport);
    println!("=== HDRI MODEL VIEWER ===");
}
