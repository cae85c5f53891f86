use glam::Vec3;

use crate::scene::transform::Transform;

/// Camera collaborator.
///
/// Only the transform matters here; projection belongs to the renderer. The
/// camera may itself be animated (scroll-linked motion), so consumers sample
/// it every frame instead of caching it.
#[derive(Debug, Clone, Default)]
pub struct Camera {
    pub transform: Transform,
}

impl Camera {
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}
