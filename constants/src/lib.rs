//! Compiled-in defaults for the viewer.
//!
//! Every value here can be overridden at runtime through `viewer_settings.json`.

pub mod asset_paths;
pub mod camera;
pub mod interaction;
pub mod render_settings;
