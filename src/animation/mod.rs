//! Animation module - time-driven motion along curves
//!
//! This module provides:
//! - `AnimationClock`: monotonic elapsed time, pausable
//! - `PathAnimator`: elapsed time → segment, parameter and frame on a looping path
//! - `Rig`: parts posed from the animated transform (airplane body and propeller)

mod animator;
mod clock;
mod rig;

pub use animator::{AnimatorError, PathAnimator};
pub use clock::AnimationClock;
pub use rig::{Rig, RigError, RigPart, Spin};
