use std::time::Duration;

use glam::{Vec2, Vec3};

use crate::config::RotationSettings;
use crate::input::{PointerEvent, Throttle};
use crate::scene::{ObjectId, SceneGraph};

/// Pointer-driven rotation of one focused object.
///
/// Drag input rotates the object directly (with the pitch clamped); releasing
/// the pointer captures a momentum target the object settles toward in
/// [`RotationDriver::update`]. One driver exists per focus session.
#[derive(Debug, Clone)]
pub struct RotationDriver {
    object: ObjectId,
    drag_sensitivity: f32,
    release_speed: f32,
    release_offset: f32,
    damping: f32,
    pitch_limit: f32,

    active: bool,
    disposed: bool,
    previous: Vec2,
    delta: Vec2,
    /// (pitch, yaw) the object settles toward while the pointer is up.
    target_rotation: Vec2,
    /// Rotation at session start, restored by [`RotationDriver::stop_movement`].
    initial_rotation: Vec3,
    throttle: Throttle<Vec2>,
}

impl RotationDriver {
    /// Binds a driver to `object`, starting from its current rotation.
    #[must_use]
    pub fn new(object: ObjectId, initial_rotation: Vec3, settings: &RotationSettings) -> Self {
        Self {
            object,
            drag_sensitivity: settings.drag_sensitivity,
            release_speed: settings.release_speed,
            release_offset: settings.release_offset,
            damping: settings.damping,
            pitch_limit: settings.pitch_limit.abs(),
            active: false,
            disposed: false,
            previous: Vec2::ZERO,
            delta: Vec2::ZERO,
            target_rotation: Vec2::new(initial_rotation.x, initial_rotation.y),
            initial_rotation,
            throttle: Throttle::new(settings.throttle_interval()),
        }
    }

    #[must_use]
    pub fn object(&self) -> ObjectId {
        self.object
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// (pitch, yaw) momentum target.
    #[must_use]
    pub fn target_rotation(&self) -> Vec2 {
        self.target_rotation
    }

    #[must_use]
    pub fn initial_rotation(&self) -> Vec3 {
        self.initial_rotation
    }

    pub fn handle(&mut self, event: PointerEvent, scene: &mut SceneGraph) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position, time } => self.pointer_move(position, time, scene),
            PointerEvent::Up => self.pointer_up(scene),
        }
    }

    pub fn pointer_down(&mut self, position: Vec2) {
        if self.disposed {
            return;
        }
        self.active = true;
        self.previous = position;
        self.throttle.reset();
    }

    pub fn pointer_move(&mut self, position: Vec2, now: Duration, scene: &mut SceneGraph) {
        if self.disposed {
            return;
        }
        if let Some(position) = self.throttle.offer(now, position) {
            self.apply_drag(position, scene);
        }
    }

    pub fn pointer_up(&mut self, scene: &SceneGraph) {
        if self.disposed {
            return;
        }
        self.active = false;
        // A trailing sample arriving after release would have no effect.
        self.throttle.reset();

        let Some(transform) = scene.transform(self.object) else {
            return;
        };
        let rotation = transform.rotation;
        let pitch = rotation.x + self.delta.y * self.release_speed + self.release_offset;
        let yaw = rotation.y + self.delta.x * self.release_speed + self.release_offset;
        self.target_rotation = Vec2::new(self.clamp_pitch(pitch), yaw);
    }

    /// Per-frame step: releases a due throttled sample and, while the pointer
    /// is up, settles the rotation toward the momentum target.
    pub fn update(&mut self, dt: f32, now: Duration, scene: &mut SceneGraph) {
        if let Some(position) = self.throttle.flush(now) {
            self.apply_drag(position, scene);
        }
        if self.active {
            return;
        }

        // Same fraction per frame at 60 fps regardless of the actual rate.
        let retention = (1.0 - self.damping).powf(dt.max(0.0) * 60.0);
        let factor = 1.0 - retention;
        let target = self.target_rotation;
        if let Some(transform) = scene.transform_mut(self.object) {
            let rotation = &mut transform.rotation;
            rotation.x += (target.x - rotation.x) * factor;
            rotation.y += (target.y - rotation.y) * factor;
        }
    }

    /// Stops accepting pointer input.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.active = false;
        self.throttle.reset();
    }

    /// Zeroes every motion coefficient and puts the object back at the
    /// rotation it had when the session started, rather than zeroing pitch
    /// and yaw, so a pre-rotated object keeps its resting pose.
    pub fn stop_movement(&mut self, scene: &mut SceneGraph) {
        self.delta = Vec2::ZERO;
        self.release_speed = 0.0;
        self.release_offset = 0.0;
        self.damping = 0.0;
        self.target_rotation = Vec2::new(self.initial_rotation.x, self.initial_rotation.y);
        if let Some(transform) = scene.transform_mut(self.object) {
            transform.rotation = self.initial_rotation;
        }
    }

    fn apply_drag(&mut self, position: Vec2, scene: &mut SceneGraph) {
        if !self.active {
            return;
        }
        self.delta = position - self.previous;
        self.previous = position;

        let limit = self.pitch_limit;
        let Some(transform) = scene.transform_mut(self.object) else {
            return;
        };
        let rotation = &mut transform.rotation;
        let target_yaw = rotation.y + self.delta.x * self.drag_sensitivity;
        let target_pitch =
            (rotation.x + self.delta.y * self.drag_sensitivity).clamp(-limit, limit);

        rotation.y += (target_yaw - rotation.y) * self.damping;
        // Only the target is clamped, so a pitch outside the limit eases back.
        rotation.x += (target_pitch - rotation.x) * self.damping;
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(-self.pitch_limit, self.pitch_limit)
    }
}
