use bevy::prelude::*;
use bevy::winit::WinitSettings;

use crate::engine::animation::tween::advance_orientation_tweens;

/// Redraw every display refresh for the life of the page, advancing tweens each frame.
///
/// The winit runner paces frames with vsync (`requestAnimationFrame` in the browser) and
/// never stops on its own; it ends only when the window or tab goes away.
pub struct RenderLoopPlugin;

impl Plugin for RenderLoopPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(WinitSettings::game())
            .add_systems(Update, advance_orientation_tweens);
    }
}
