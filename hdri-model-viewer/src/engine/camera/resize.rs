use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::engine::camera::scene_camera::SceneCamera;
use crate::engine::render::color_shift::ColorShiftSettings;
use crate::engine::scene::controller::{SceneController, Viewport};

pub fn init_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut controller: ResMut<SceneController>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    controller.viewport = Viewport::new(window.width(), window.height());
    info!(
        "Viewport {}x{}",
        controller.viewport.width, controller.viewport.height
    );
}

/// Keep viewport, camera projection and the post-processing chain in step with the window.
/// All three are updated together or not at all.
pub fn handle_window_resize(
    mut resize_events: EventReader<WindowResized>,
    mut controller: ResMut<SceneController>,
    mut cameras: Query<(&mut Projection, &mut ColorShiftSettings), With<SceneCamera>>,
) {
    // Only the final size of a burst matters
    let Some(resized) = resize_events.read().last() else {
        return;
    };

    let viewport = Viewport::new(resized.width, resized.height);
    let Some(aspect_ratio) = viewport.aspect_ratio() else {
        debug!("Ignoring resize to {}x{}", resized.width, resized.height);
        return;
    };

    controller.viewport = viewport;
    for (mut projection, mut color_shift) in &mut cameras {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = aspect_ratio;
        }
        color_shift.resize(viewport);
    }
}
