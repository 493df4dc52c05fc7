//! Post-processing for the scene camera.

/// RGB split post-processing pass.
///
/// Fullscreen shader pass that samples red and blue at opposite offsets around the pixel.
pub mod color_shift;
