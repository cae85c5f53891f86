use std::time::Duration;

use glam::Vec3;

use crate::config::{FocusSettings, RotationSettings};
use crate::events::EventChannel;
use crate::focus::{FocusEvent, RotationDriver, ViewTransitionState};
use crate::input::PointerEvent;
use crate::scene::{Camera, ObjectId, SceneGraph};
use crate::tween::{PositionTarget, Tween, TweenEngine, TweenEvent, TweenId, Tweener};

#[derive(Debug, Clone, Copy, PartialEq)]
struct FocusSession {
    object: ObjectId,
    initial_position: Vec3,
}

/// Moves an object into view and back.
///
/// The positioner never caches the camera: [`ViewPositioner::update`] must be
/// called every frame so the target frame reflects the live camera position.
/// Tween lifecycle events are fed back through
/// [`ViewPositioner::handle_tween_event`], which drives the state machine.
pub struct ViewPositioner {
    settings: FocusSettings,
    rotation: RotationSettings,
    target_frame: Vec3,
    state: ViewTransitionState,
    events: EventChannel<FocusEvent>,
    driver: Option<RotationDriver>,
    session: Option<FocusSession>,

    lift: Option<TweenId>,
    approach: Option<TweenId>,
    retreat: Option<TweenId>,
}

impl Default for ViewPositioner {
    fn default() -> Self {
        Self::new(FocusSettings::default(), RotationSettings::default())
    }
}

impl ViewPositioner {
    #[must_use]
    pub fn new(settings: FocusSettings, rotation: RotationSettings) -> Self {
        Self {
            settings,
            rotation,
            target_frame: Vec3::ZERO,
            state: ViewTransitionState::Free,
            events: EventChannel::new(),
            driver: None,
            session: None,
            lift: None,
            approach: None,
            retreat: None,
        }
    }

    pub fn events(&mut self) -> &mut EventChannel<FocusEvent> {
        &mut self.events
    }

    #[must_use]
    pub fn state(&self) -> ViewTransitionState {
        self.state
    }

    #[must_use]
    pub fn settings(&self) -> &FocusSettings {
        &self.settings
    }

    /// Camera position sampled by the last [`ViewPositioner::update`].
    #[must_use]
    pub fn target_frame(&self) -> Vec3 {
        self.target_frame
    }

    #[must_use]
    pub fn driver(&self) -> Option<&RotationDriver> {
        self.driver.as_ref()
    }

    /// Object of the current or last unfinished session.
    #[must_use]
    pub fn focused_object(&self) -> Option<ObjectId> {
        self.session.map(|s| s.object)
    }

    pub fn update(&mut self, camera: &Camera) {
        self.target_frame = camera.position();
    }

    /// Starts the move into view.
    ///
    /// Returns `false` and leaves everything untouched unless the positioner
    /// is free, `object` exists and the camera frame is past the entry depth.
    pub fn move_to_view(
        &mut self,
        object: ObjectId,
        initial_position: Vec3,
        scene: &SceneGraph,
        tweens: &mut impl TweenEngine,
    ) -> bool {
        if self.state != ViewTransitionState::Free {
            log::debug!("move_to_view ignored while {:?}", self.state);
            return false;
        }
        if !scene.contains(object) {
            log::debug!("move_to_view ignored: object {object:?} is not in the scene");
            return false;
        }
        if self.target_frame.z >= self.settings.entry_depth_threshold {
            log::debug!(
                "move_to_view ignored: camera depth {} not past {}",
                self.target_frame.z,
                self.settings.entry_depth_threshold
            );
            return false;
        }

        let offset = self.settings.lift_offset;
        let lift_to = PositionTarget {
            x: (offset.x != 0.0).then_some(initial_position.x + offset.x),
            y: Some(initial_position.y + offset.y),
            z: Some(initial_position.z + offset.z),
        };
        let lift = tweens.to(
            Tween::to(object, lift_to)
                .duration(self.settings.lift_duration)
                .ease(self.settings.lift_ease),
        );

        self.lift = Some(lift);
        self.approach = None;
        self.retreat = None;
        self.session = Some(FocusSession {
            object,
            initial_position,
        });
        self.state = ViewTransitionState::Transitioning;
        log::info!("Moving {object:?} into view");
        true
    }

    /// Sends `object` back to `initial_position`, interrupting any transition.
    ///
    /// `guitar_out_camera` is emitted and the rotation driver stopped before
    /// the return tween is scheduled.
    pub fn return_to_original(
        &mut self,
        object: ObjectId,
        initial_position: Vec3,
        scene: &mut SceneGraph,
        tweens: &mut impl TweenEngine,
    ) -> bool {
        if !scene.contains(object) {
            log::debug!("return_to_original ignored: object {object:?} is not in the scene");
            return false;
        }

        let killed = tweens.kill_tweens_of(object);
        if killed > 0 {
            log::debug!("Cancelled {killed} tween(s) on {object:?}");
        }
        self.lift = None;
        self.approach = None;

        self.events.emit(FocusEvent::OutCamera);

        if let Some(mut driver) = self.driver.take() {
            driver.dispose();
            driver.stop_movement(scene);
        }

        let retreat = tweens.to(
            Tween::to(object, PositionTarget::all(initial_position))
                .duration(self.settings.return_duration)
                .ease(self.settings.return_ease),
        );
        self.retreat = Some(retreat);
        self.session = Some(FocusSession {
            object,
            initial_position,
        });
        self.state = ViewTransitionState::Returning;
        log::info!("Returning {object:?} to {initial_position}");
        true
    }

    pub fn handle_tween_event(
        &mut self,
        event: TweenEvent,
        scene: &SceneGraph,
        tweens: &mut impl TweenEngine,
    ) {
        match event {
            TweenEvent::Started { id, target } if self.lift == Some(id) => {
                self.on_lift_started(target, scene);
            }
            TweenEvent::Completed { id, target } if self.lift == Some(id) => {
                self.lift = None;
                let frame = self.target_frame;
                let destination =
                    Vec3::new(frame.x, frame.y, frame.z - self.settings.camera_depth_offset);
                self.approach = Some(
                    tweens.to(
                        Tween::to(target, PositionTarget::all(destination))
                            .duration(self.settings.approach_duration)
                            .ease(self.settings.approach_ease),
                    ),
                );
            }
            TweenEvent::Completed { id, .. } if self.approach == Some(id) => {
                self.approach = None;
            }
            TweenEvent::Completed { id, .. } if self.retreat == Some(id) => {
                self.retreat = None;
                self.session = None;
                self.state = ViewTransitionState::Free;
                self.events.emit(FocusEvent::OutCameraComplete);
            }
            TweenEvent::Orphaned { id, .. }
                if [self.lift, self.approach, self.retreat].contains(&Some(id)) =>
            {
                self.abandon_session();
            }
            _ => {}
        }
    }

    pub fn handle_tween_events(
        &mut self,
        events: impl IntoIterator<Item = TweenEvent>,
        scene: &SceneGraph,
        tweens: &mut impl TweenEngine,
    ) {
        for event in events {
            self.handle_tween_event(event, scene, tweens);
        }
    }

    /// Forwards pointer input to the rotation driver, if one is installed.
    pub fn pointer(&mut self, event: PointerEvent, scene: &mut SceneGraph) {
        if let Some(driver) = self.driver.as_mut() {
            driver.handle(event, scene);
        }
    }

    /// Steps the rotation driver. A session whose object has left the scene
    /// is abandoned here, even when no tween is left to report it.
    pub fn update_driver(&mut self, dt: f32, now: Duration, scene: &mut SceneGraph) {
        if self.session.is_some_and(|s| !scene.contains(s.object)) {
            self.abandon_session();
        }
        if let Some(driver) = self.driver.as_mut() {
            driver.update(dt, now, scene);
        }
    }

    /// One frame: samples the camera, advances tweens, reacts to their events
    /// and steps the rotation driver.
    pub fn frame(&mut self, dt: f32, now: Duration, scene: &mut SceneGraph, tweener: &mut Tweener) {
        self.update(&scene.camera);
        let events = tweener.advance(dt, scene);
        self.handle_tween_events(events, scene, tweener);
        self.update_driver(dt, now, scene);
    }

    /// Ends the session without an object to restore. Handshake events the
    /// session still owes are emitted so subscribers always see a pair.
    fn abandon_session(&mut self) {
        let previous = self.state;
        self.lift = None;
        self.approach = None;
        self.retreat = None;
        self.session = None;
        if let Some(mut driver) = self.driver.take() {
            driver.dispose();
        }
        self.state = ViewTransitionState::Free;
        log::warn!("Focused object left the scene while {previous:?}; session abandoned");

        match previous {
            ViewTransitionState::Focused => {
                self.events.emit(FocusEvent::OutCamera);
                self.events.emit(FocusEvent::OutCameraComplete);
            }
            ViewTransitionState::Returning => self.events.emit(FocusEvent::OutCameraComplete),
            ViewTransitionState::Free | ViewTransitionState::Transitioning => {}
        }
    }

    fn on_lift_started(&mut self, target: ObjectId, scene: &SceneGraph) {
        if self.state != ViewTransitionState::Transitioning {
            return;
        }
        let Some(transform) = scene.transform(target) else {
            return;
        };
        self.driver = Some(RotationDriver::new(
            target,
            transform.rotation,
            &self.rotation,
        ));
        self.state = ViewTransitionState::Focused;
        self.events.emit(FocusEvent::OnCamera);
    }
}
