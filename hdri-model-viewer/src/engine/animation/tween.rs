use bevy::prelude::*;
use serde::Deserialize;

/// Easing curves for orientation tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic ease-out, fast start then settling: `1 - (1 - t)^2`
    #[default]
    QuadOut,
    CubicOut,
}

impl Easing {
    /// Map normalised progress `t` onto eased progress. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Interpolates a model's X/Y rotation angles toward a target.
///
/// `x` is the rotation about the model's X axis and `y` about its Y axis, in radians.
/// A new target rebases the start at the current value and restarts the clock, so
/// the angle never jumps when the pointer moves mid-flight.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrientationTween {
    start: Vec2,
    current: Vec2,
    target: Vec2,
    elapsed: f32,
    duration: f32,
    easing: Easing,
    retargets: u32,
}

impl OrientationTween {
    pub fn new(duration: f32, easing: Easing) -> Self {
        let duration = duration.max(0.0);
        Self {
            start: Vec2::ZERO,
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            elapsed: duration,
            duration,
            easing,
            retargets: 0,
        }
    }

    /// Redirect the tween toward `target` starting from wherever it is now.
    pub fn retarget(&mut self, target: Vec2) {
        self.start = self.current;
        self.target = target;
        self.elapsed = 0.0;
        self.retargets += 1;
    }

    /// Step the tween by `delta` seconds and return the new angles.
    pub fn advance(&mut self, delta: f32) -> Vec2 {
        if self.duration <= 0.0 {
            self.current = self.target;
            return self.current;
        }

        self.elapsed = (self.elapsed + delta.max(0.0)).min(self.duration);
        let progress = self.easing.apply(self.elapsed / self.duration);
        self.current = self.start.lerp(self.target, progress);
        self.current
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration && self.current == self.target
    }

    /// Number of times the tween has been redirected since creation.
    pub fn retargets(&self) -> u32 {
        self.retargets
    }
}

/// Euler XYZ rotation with no roll, matching how the angles are produced.
pub fn rotation_from_angles(angles: Vec2) -> Quat {
    Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, 0.0)
}

/// Advance every orientation tween by the frame delta and write the model rotation.
pub fn advance_orientation_tweens(
    time: Res<Time>,
    mut tweens: Query<(&mut OrientationTween, &mut Transform)>,
) {
    let delta = time.delta_secs();
    for (mut tween, mut transform) in &mut tweens {
        if tween.is_settled() {
            continue;
        }
        let angles = tween.advance(delta);
        transform.rotation = rotation_from_angles(angles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const EPS: f32 = 1e-5;

    #[test]
    fn quad_out_matches_power2_out_curve() {
        assert_eq!(Easing::QuadOut.apply(0.0), 0.0);
        assert_eq!(Easing::QuadOut.apply(1.0), 1.0);
        assert!((Easing::QuadOut.apply(0.5) - 0.75).abs() < EPS);
        assert_eq!(Easing::QuadOut.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
    }

    #[test]
    fn new_tween_is_settled_at_rest() {
        let tween = OrientationTween::new(0.9, Easing::QuadOut);
        assert!(tween.is_settled());
        assert_eq!(tween.current(), Vec2::ZERO);
        assert_eq!(tween.retargets(), 0);
    }

    #[test]
    fn reaches_target_after_duration_and_clamps() {
        let mut tween = OrientationTween::new(1.0, Easing::Linear);
        tween.retarget(Vec2::new(0.4, -0.2));

        let half = tween.advance(0.5);
        assert!((half - Vec2::new(0.2, -0.1)).length() < EPS);

        let end = tween.advance(10.0);
        assert_eq!(end, Vec2::new(0.4, -0.2));
        assert!(tween.is_settled());
    }

    #[test]
    fn retarget_rebases_from_current_value_without_jumping() {
        let mut tween = OrientationTween::new(1.0, Easing::Linear);
        tween.retarget(Vec2::new(1.0, 0.0));
        let midway = tween.advance(0.5);

        tween.retarget(Vec2::new(-1.0, 0.0));
        assert_eq!(tween.current(), midway);

        // Restarted clock: a tiny step only moves a tiny distance from the rebased start.
        let nudged = tween.advance(0.01);
        assert!((nudged.x - midway.x).abs() < 0.05);
        assert_eq!(tween.target(), Vec2::new(-1.0, 0.0));
        assert_eq!(tween.retargets(), 2);
    }

    #[test]
    fn zero_duration_snaps_to_target() {
        let mut tween = OrientationTween::new(0.0, Easing::QuadOut);
        tween.retarget(Vec2::new(0.3, 0.3));
        assert_eq!(tween.advance(0.0), Vec2::new(0.3, 0.3));
    }

    #[test]
    fn advance_system_writes_model_rotation() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_systems(Update, advance_orientation_tweens);

        let mut tween = OrientationTween::new(0.9, Easing::QuadOut);
        tween.retarget(Vec2::new(0.2, -0.3));
        let model = app.world_mut().spawn((tween, Transform::default())).id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(1));
        app.update();

        let transform = app.world().get::<Transform>(model).unwrap();
        let expected = rotation_from_angles(Vec2::new(0.2, -0.3));
        assert!(transform.rotation.angle_between(expected) < 1e-4);
    }
}
