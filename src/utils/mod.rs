//! Utility Module
//!
//! - [`Timer`]: frame clock handing out `dt` and the monotonic "now" that
//!   pointer throttling and rotation settling are keyed on.

pub mod time;

pub use time::Timer;
