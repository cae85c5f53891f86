use glam::Vec3;
use slotmap::{SlotMap, new_key_type};

use crate::scene::{ObjectId, SceneGraph};
use crate::tween::easing::Ease;

new_key_type! {
    pub struct TweenId;
}

/// Destination of a position tween. Axes left as `None` are not animated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionTarget {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl PositionTarget {
    #[must_use]
    pub fn all(v: Vec3) -> Self {
        Self {
            x: Some(v.x),
            y: Some(v.y),
            z: Some(v.z),
        }
    }

    #[must_use]
    pub fn yz(y: f32, z: f32) -> Self {
        Self {
            x: None,
            y: Some(y),
            z: Some(z),
        }
    }

    /// Final value given the position at tween start.
    #[must_use]
    pub fn resolve(&self, from: Vec3) -> Vec3 {
        Vec3::new(
            self.x.unwrap_or(from.x),
            self.y.unwrap_or(from.y),
            self.z.unwrap_or(from.z),
        )
    }
}

/// A fire-and-forget position animation request.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    pub target: ObjectId,
    pub to: PositionTarget,
    /// Seconds.
    pub duration: f32,
    pub ease: Ease,
}

impl Tween {
    pub const DEFAULT_DURATION: f32 = 0.5;

    #[must_use]
    pub fn to(target: ObjectId, to: PositionTarget) -> Self {
        Self {
            target,
            to,
            duration: Self::DEFAULT_DURATION,
            ease: Ease::default(),
        }
    }

    #[must_use]
    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    #[must_use]
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Lifecycle notifications reported by [`Tweener::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenEvent {
    Started { id: TweenId, target: ObjectId },
    Completed { id: TweenId, target: ObjectId },
    /// The target left the scene before the tween finished.
    Orphaned { id: TweenId, target: ObjectId },
}

impl TweenEvent {
    #[must_use]
    pub fn id(&self) -> TweenId {
        match self {
            Self::Started { id, .. } | Self::Completed { id, .. } | Self::Orphaned { id, .. } => {
                *id
            }
        }
    }
}

/// The contract the focus controller schedules animations through.
pub trait TweenEngine {
    /// Schedules a tween. It starts on the next frame.
    fn to(&mut self, tween: Tween) -> TweenId;

    /// Cancels every tween animating `target`. Killed tweens report no
    /// further events. Returns how many were removed.
    fn kill_tweens_of(&mut self, target: ObjectId) -> usize;

    fn is_tweening(&self, target: ObjectId) -> bool;
}

#[derive(Debug)]
struct ActiveTween {
    request: Tween,
    elapsed: f32,
    from: Option<Vec3>,
}

/// Frame-driven tween runner.
///
/// Each call to [`Tweener::advance`] starts pending tweens (capturing their
/// start position), steps every running tween by `dt` and writes positions
/// into the scene. Tweens run in scheduling order.
#[derive(Debug, Default)]
pub struct Tweener {
    tweens: SlotMap<TweenId, ActiveTween>,
    order: Vec<TweenId>,
}

impl Tweener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn advance(&mut self, dt: f32, scene: &mut SceneGraph) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        let mut finished = Vec::new();

        for &id in &self.order {
            let Some(tween) = self.tweens.get_mut(id) else {
                continue;
            };
            let target = tween.request.target;
            let Some(transform) = scene.transform_mut(target) else {
                log::debug!("Dropping tween {id:?}: target object no longer exists");
                events.push(TweenEvent::Orphaned { id, target });
                finished.push(id);
                continue;
            };

            let from = match tween.from {
                Some(from) => from,
                None => {
                    let from = transform.position;
                    tween.from = Some(from);
                    events.push(TweenEvent::Started { id, target });
                    from
                }
            };

            tween.elapsed += dt.max(0.0);
            let end = tween.request.to.resolve(from);
            let progress = if tween.request.duration > 0.0 {
                (tween.elapsed / tween.request.duration).min(1.0)
            } else {
                1.0
            };

            if progress >= 1.0 {
                // Land exactly on the destination, free of lerp rounding.
                transform.position = end;
                events.push(TweenEvent::Completed { id, target });
                finished.push(id);
            } else {
                transform.position = from.lerp(end, tween.request.ease.apply(progress));
            }
        }

        for id in finished {
            self.tweens.remove(id);
        }
        self.order.retain(|id| self.tweens.contains_key(*id));

        events
    }
}

impl TweenEngine for Tweener {
    fn to(&mut self, tween: Tween) -> TweenId {
        let id = self.tweens.insert(ActiveTween {
            request: tween,
            elapsed: 0.0,
            from: None,
        });
        self.order.push(id);
        id
    }

    fn kill_tweens_of(&mut self, target: ObjectId) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|_, t| t.request.target != target);
        self.order.retain(|id| self.tweens.contains_key(*id));
        before - self.tweens.len()
    }

    fn is_tweening(&self, target: ObjectId) -> bool {
        self.tweens.values().any(|t| t.request.target == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Camera, SceneObject, Transform};

    fn scene_with_object() -> (SceneGraph, ObjectId) {
        let mut scene = SceneGraph::new(Camera::default());
        let id = scene.add(SceneObject::new("probe", Transform::default()));
        (scene, id)
    }

    #[test]
    fn reports_start_then_completion_and_lands_exactly() {
        let (mut scene, id) = scene_with_object();
        let mut tweener = Tweener::new();
        let goal = Vec3::new(0.1, -7.3, 2.9);
        let tid = tweener.to(Tween::to(id, PositionTarget::all(goal)).duration(1.0));

        let events = tweener.advance(0.25, &mut scene);
        assert_eq!(events, vec![TweenEvent::Started { id: tid, target: id }]);

        let mut completed = false;
        for _ in 0..10 {
            for e in tweener.advance(0.25, &mut scene) {
                completed |= matches!(e, TweenEvent::Completed { .. });
            }
        }
        assert!(completed);
        assert_eq!(scene.transform(id).unwrap().position, goal);
        assert!(tweener.is_empty());
    }

    #[test]
    fn partial_targets_leave_other_axes_alone() {
        let (mut scene, id) = scene_with_object();
        scene.transform_mut(id).unwrap().position = Vec3::new(4.0, 0.0, 0.0);
        let mut tweener = Tweener::new();
        tweener.to(Tween::to(id, PositionTarget::yz(1.0, 1.0)).duration(0.0));
        tweener.advance(0.016, &mut scene);
        assert_eq!(scene.transform(id).unwrap().position, Vec3::new(4.0, 1.0, 1.0));
    }

    #[test]
    fn removed_target_reports_orphaned_tween() {
        let (mut scene, id) = scene_with_object();
        let mut tweener = Tweener::new();
        let tid = tweener.to(Tween::to(id, PositionTarget::all(Vec3::X)).duration(1.0));
        tweener.advance(0.25, &mut scene);

        scene.remove(id);
        let events = tweener.advance(0.25, &mut scene);

        assert_eq!(events, vec![TweenEvent::Orphaned { id: tid, target: id }]);
        assert!(tweener.is_empty());
    }

    #[test]
    fn killed_tweens_stop_and_stay_silent() {
        let (mut scene, id) = scene_with_object();
        let mut tweener = Tweener::new();
        tweener.to(Tween::to(id, PositionTarget::all(Vec3::X)).duration(1.0));
        tweener.advance(0.5, &mut scene);
        let frozen = scene.transform(id).unwrap().position;

        assert_eq!(tweener.kill_tweens_of(id), 1);
        assert!(!tweener.is_tweening(id));
        assert!(tweener.advance(1.0, &mut scene).is_empty());
        assert_eq!(scene.transform(id).unwrap().position, frozen);
    }
}
