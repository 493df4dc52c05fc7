/// UV offset of the red and blue channels in the colour shift pass
pub const COLOR_SHIFT_AMOUNT: f32 = 0.003;

/// Direction of the colour shift in radians (0 = horizontal)
pub const COLOR_SHIFT_ANGLE: f32 = 0.0;

/// Linear exposure multiplier applied before ACES tonemapping
pub const TONE_MAPPING_EXPOSURE: f32 = 1.1;

/// Brightness of the white ambient light added once the environment is installed
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

/// Intensity of the image based lighting from the HDR environment
pub const ENVIRONMENT_INTENSITY: f32 = 900.0;

/// Edge length in texels of the specular environment cubemap faces
pub const SPECULAR_FACE_SIZE: u32 = 256;

/// Edge length in texels of the diffuse environment cubemap faces
pub const DIFFUSE_FACE_SIZE: u32 = 16;
