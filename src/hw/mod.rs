//! Board adapters implementing the core's platform traits.

pub mod nvm;
pub mod oled;
pub mod soft_clock;
pub mod tuner;
