/// Vertical field of view in degrees
pub const FOV_DEGREES: f32 = 40.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Camera sits on +Z looking back at the origin
pub const CAMERA_DISTANCE: f32 = 3.5;

/// Upper bound applied to the device pixel ratio
pub const MAX_PIXEL_RATIO: f32 = 2.0;
