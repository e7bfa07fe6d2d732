//! Input mapping: raw keys and pointer motion become [`Action`]s.
//!
//! # Invariants
//! - Window-system events never reach the camera directly; the host
//!   translates them into actions first.
//! - Pointer drags over the control panel are filtered out by the host.

pub mod action;
pub mod drag;

pub use action::{Action, action_for_key};
pub use drag::{DragTracker, PointerButton};
