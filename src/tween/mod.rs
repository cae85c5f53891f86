//! Tween Collaborator
//!
//! A small position-only animation runner standing in for a full timeline:
//! `to` tweens with easing, start/complete notifications and cancel-by-target.
//! Callers react to [`TweenEvent`]s returned from [`Tweener::advance`] rather
//! than registering closures, so handlers can take `&mut` state freely.

pub mod easing;
pub mod tweener;

pub use easing::Ease;
pub use tweener::{PositionTarget, Tween, TweenEngine, TweenEvent, TweenId, Tweener};
