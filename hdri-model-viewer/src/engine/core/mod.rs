//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the post-processing pass, the staged asset pipeline,
/// and platform-specific configurations.
pub mod app_setup;

/// Asset pipeline state machine and its transitions.
///
/// Moves from settings through environment and model loading to the running scene.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
