//! Pointer Input
//!
//! Platform-independent pointer events consumed by the rotation driver, a
//! sample [`Throttle`], and (with the `winit` feature) a translator from
//! winit window events.

pub mod throttle;
#[cfg(feature = "winit")]
pub mod winit_adapter;

use std::time::Duration;

use glam::Vec2;

pub use throttle::Throttle;
#[cfg(feature = "winit")]
pub use winit_adapter::PointerTracker;

/// Primary-button pointer input, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Vec2 },
    /// `time` is measured from any fixed origin, e.g. application start.
    Move { position: Vec2, time: Duration },
    Up,
}
