//! Input layer: raw device events mapped to shared boolean intents.
//!
//! # Invariants
//! - Keyboard and joystick produce the same six intents; the simulation
//!   core never sees raw input events.
//! - The fire intent is edge-triggered: the targeting system clears it
//!   after processing, the input layer only sets it.

pub mod control;

pub use control::{ControlState, Intent, JOYSTICK_DEADZONE};
