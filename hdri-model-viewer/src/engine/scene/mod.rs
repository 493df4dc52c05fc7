//! Scene state and lighting.

/// Shared viewport and model slot read by interaction systems.
pub mod controller;

/// Ambient and image based lighting helpers.
pub mod lighting;
