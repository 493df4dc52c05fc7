use std::f32::consts::PI;

/// Full angular sweep of the model across the viewport (3/10 of a half-turn).
/// Each axis travels at most half of this either side of centre.
pub const ROTATION_RANGE: f32 = PI * 0.3;

/// Seconds for the model to settle on a new pointer target
pub const TWEEN_DURATION_SECS: f32 = 0.9;
