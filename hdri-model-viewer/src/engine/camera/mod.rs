//! Scene camera and viewport synchronisation.
//!
//! Spawns the perspective camera with its post-processing settings and keeps the
//! projection and colour shift pass in step with the window size.

/// Window resize handling and initial viewport capture.
pub mod resize;

/// Scene camera spawning with tonemapping, MSAA and colour shift.
pub mod scene_camera;
