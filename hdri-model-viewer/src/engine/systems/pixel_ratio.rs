use bevy::prelude::*;

use crate::engine::assets::viewer_settings::ViewerSettings;

/// Scale factor override that caps the device pixel ratio at `max`, or `None` to keep the native ratio.
pub fn capped_scale_factor(base: f32, max: f32) -> Option<f32> {
    (max > 0.0 && base > max).then_some(max)
}

// High-DPI phones report 3x or more; rendering at that density costs far more than it shows
pub fn clamp_pixel_ratio(mut windows: Query<&mut Window>, settings: Res<ViewerSettings>) {
    for mut window in &mut windows {
        let wanted = capped_scale_factor(
            window.resolution.base_scale_factor(),
            settings.camera.max_pixel_ratio,
        );
        if window.resolution.scale_factor_override() != wanted {
            info!(
                "Pixel ratio {} capped to {:?}",
                window.resolution.base_scale_factor(),
                wanted
            );
            window.resolution.set_scale_factor_override(wanted);
        }
    }
}
