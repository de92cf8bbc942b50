//! Input: host events, gamepad snapshots and the first-person camera
//! controller they drive.
//!
//! # Invariants
//! - A missing gamepad contributes zero to every axis.
//! - Jumps fire only within epsilon of the floor.
//! - The camera never ends a frame below the floor.

pub mod controller;
pub mod event;

pub use controller::{CameraController, StepReport};
pub use event::{GamepadSnapshot, InputEvent, InputQueue, Key};

pub fn crate_info() -> &'static str {
    "viewport-input v0.1.0"
}
