use bevy::prelude::*;

use crate::engine::scene::controller::Viewport;

/// Pointer position as offsets from the viewport centre, each in `[-0.5, 0.5]` when
/// the pointer is inside the viewport. `None` for a zero-sized viewport.
pub fn pointer_fractions(position: Vec2, viewport: Viewport) -> Option<Vec2> {
    if viewport.is_empty() {
        return None;
    }
    Some(Vec2::new(
        position.x / viewport.width - 0.5,
        position.y / viewport.height - 0.5,
    ))
}

/// Target rotation for a pointer position: `x` about the model's X axis, `y` about its Y axis.
///
/// Axes are crossed: horizontal pointer travel turns the model about its vertical (Y)
/// axis and vertical travel tilts it about X.
pub fn target_rotation(position: Vec2, viewport: Viewport, rotation_range: f32) -> Option<Vec2> {
    let fractions = pointer_fractions(position, viewport)?;
    Some(Vec2::new(
        fractions.y * rotation_range,
        fractions.x * rotation_range,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::interaction::ROTATION_RANGE;
    use std::f32::consts::PI;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };

    #[test]
    fn corners_map_to_exact_half_offsets() {
        assert_eq!(
            pointer_fractions(Vec2::new(1280.0, 720.0), VIEWPORT),
            Some(Vec2::new(0.5, 0.5))
        );
        assert_eq!(
            pointer_fractions(Vec2::ZERO, VIEWPORT),
            Some(Vec2::new(-0.5, -0.5))
        );
        assert_eq!(
            pointer_fractions(Vec2::new(640.0, 360.0), VIEWPORT),
            Some(Vec2::ZERO)
        );
    }

    #[test]
    fn rotation_stays_within_half_the_range() {
        let bound = PI * 0.3 * 0.5;
        for x in (0..=1280).step_by(64) {
            for y in (0..=720).step_by(48) {
                let target =
                    target_rotation(Vec2::new(x as f32, y as f32), VIEWPORT, ROTATION_RANGE)
                        .unwrap();
                assert!(target.x.abs() <= bound + 1e-6);
                assert!(target.y.abs() <= bound + 1e-6);
            }
        }
    }

    #[test]
    fn horizontal_pointer_turns_about_vertical_axis() {
        // Far right, vertically centred: pure Y-axis rotation
        let target = target_rotation(Vec2::new(1280.0, 360.0), VIEWPORT, ROTATION_RANGE).unwrap();
        assert_eq!(target.x, 0.0);
        assert!((target.y - ROTATION_RANGE * 0.5).abs() < 1e-6);

        // Top, horizontally centred: pure X-axis rotation
        let target = target_rotation(Vec2::new(640.0, 0.0), VIEWPORT, ROTATION_RANGE).unwrap();
        assert!((target.x + ROTATION_RANGE * 0.5).abs() < 1e-6);
        assert_eq!(target.y, 0.0);
    }

    #[test]
    fn degenerate_viewport_produces_no_target() {
        let empty = Viewport::new(0.0, 720.0);
        assert_eq!(pointer_fractions(Vec2::new(10.0, 10.0), empty), None);
        assert_eq!(target_rotation(Vec2::new(10.0, 10.0), empty, ROTATION_RANGE), None);
    }
}
