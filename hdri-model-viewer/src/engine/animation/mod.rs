//! Time-based interpolation of model orientation.
//!
//! Replaces a retargetable tween library with an explicit state machine that the
//! render loop advances once per frame.

/// Orientation tween component, easing curves and the per-frame advance system.
pub mod tween;
