//! Unified error type for the clock-radio core.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Storage
    /// The non-volatile store rejected a read or write.
    Storage,

    /// A record slot index beyond the fixed table size.
    InvalidSlot,

    // UI
    /// A setup screen already holds its maximum number of widgets.
    TooManyWidgets,
}
