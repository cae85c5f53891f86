//! Focus and Rotation Control
//!
//! [`ViewPositioner`] moves a showcase object from its resting place into
//! view in front of the camera and back again, announcing each phase on its
//! [`FocusEvent`] channel. While an object is in view a [`RotationDriver`]
//! lets the user spin it with the pointer.
//!
//! ```text
//!  Free ──move_to_view──▶ Transitioning ──lift starts──▶ Focused
//!   ▲                                                      │
//!   └──return completes── Returning ◀──return_to_original──┘
//! ```

pub mod positioner;
pub mod rotation;

pub use positioner::ViewPositioner;
pub use rotation::RotationDriver;

/// Notifications emitted by [`ViewPositioner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusEvent {
    /// The object started moving into view and rotation input is live.
    OnCamera,
    /// A return was requested. Emitted before the object is restored.
    OutCamera,
    /// The object is back at its initial position.
    OutCameraComplete,
}

impl FocusEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OnCamera => "guitar_on_camera",
            Self::OutCamera => "guitar_out_camera",
            Self::OutCameraComplete => "guitar_out_camera_complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewTransitionState {
    #[default]
    Free,
    Transitioning,
    Focused,
    Returning,
}
