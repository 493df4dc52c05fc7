//! Per-frame runtime systems.
//!
//! Continuous redraw, pixel ratio limits and frame rate reporting.

/// FPS overlay for native builds and periodic console reporting for the web.
pub mod fps_tracking;

/// Device pixel ratio cap applied to every window.
pub mod pixel_ratio;

/// Continuous render loop configuration and per-frame tween advance.
pub mod render_loop;
