//! Asset data for the viewer scene.
//!
//! Runtime settings, HDR environment conversion, and background fetching of
//! remote files.

/// Equirectangular HDR decoding and cubemap resampling for image based lighting.
pub mod environment_map;

/// Platform-specific HTTP retrieval with a mailbox hand-off to the main schedule.
pub mod fetch;

/// Viewer settings asset with compiled-in defaults and JSON overrides.
pub mod viewer_settings;
