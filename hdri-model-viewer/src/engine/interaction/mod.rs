//! Pointer-driven model orientation.
//!
//! The pointer position across the viewport picks a target tilt for the model; the
//! model's orientation tween then eases toward it.

/// Pure mapping from pointer position to target rotation angles.
pub mod orientation;

/// Cursor event handling that retargets the model's tween.
pub mod pointer;
