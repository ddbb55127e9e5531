//! Control core for an LED-matrix clock radio.
//!
//! Everything between the buttons and the pixels: a table-driven menu
//! state machine, a small widget toolkit drawing into a 24×16 framebuffer,
//! the screens built from those widgets, persisted alarm and preset
//! records, radio and sleep-timer control, and the control loop tying it
//! together. Hardware is reached only through the traits in [`platform`],
//! so the whole crate runs on the host under `cargo test`.
//!
//! The firmware binary (`src/main.rs`, feature `embedded`) wires these
//! traits to an nRF52840 with an SSD1306 OLED standing in for the matrix.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

// ═══════════════════════════════════════════════════════════════════════════
// Foundation
// ═══════════════════════════════════════════════════════════════════════════

pub mod config;
pub mod error;
pub mod platform;

// ═══════════════════════════════════════════════════════════════════════════
// Model
// ═══════════════════════════════════════════════════════════════════════════

pub mod alarm;
pub mod radio;
pub mod state_machine;
pub mod station;
pub mod storage;

// ═══════════════════════════════════════════════════════════════════════════
// UI and control loop
// ═══════════════════════════════════════════════════════════════════════════

pub mod dispatcher;
pub mod ui;

#[cfg(test)]
mod mock;

pub use dispatcher::ClockRadio;
pub use error::Error;
pub use state_machine::{Attributes, State, StateMachine};
pub use ui::{Buttons, Dispatch, Event};
