//! Asset loading stages for the viewer scene.
//!
//! Settings, then environment, then model. Every stage ends in a typed outcome that
//! is recorded in [`progress::LoadingProgress`] and drives the state transitions.

/// Environment map fetch and installation of image based lighting.
pub mod environment_loader;

/// glTF model loading, scene attachment and shadow setup.
///
/// A load failure is logged and leaves the scene running without a model.
pub mod model_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// Optional `viewer_settings.json` loading with fallback to defaults.
pub mod settings_loader;
