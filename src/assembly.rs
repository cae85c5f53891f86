//! Scene Assembly Gate
//!
//! Waits for the coordinator's `ready` and then builds the dependent scene
//! objects exactly once, in declaration order, out of the frozen store.

use flume::Receiver;
use serde::{Deserialize, Serialize};

use crate::assets::{LoadEvent, ResourceCoordinator, ResourceStore};
use crate::errors::AssemblyError;
use crate::events::EventChannel;
use crate::scene::{ObjectId, SceneGraph, SceneObject, Transform};

/// One object built from loaded resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSpec {
    pub name: String,
    /// Store name of the scene bundle.
    pub model: String,
    /// Store names of the textures, in material slot order.
    #[serde(default)]
    pub textures: Vec<String>,
    #[serde(default)]
    pub transform: Transform,
}

impl PropSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            textures: Vec::new(),
            transform: Transform::default(),
        }
    }

    #[must_use]
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.textures.push(texture.into());
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    fn build(&self, store: &ResourceStore) -> Result<SceneObject, AssemblyError> {
        let model = store.scene_bundle(&self.model)?;
        let textures = self
            .textures
            .iter()
            .map(|name| store.texture(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SceneObject {
            name: self.name.clone(),
            transform: self.transform,
            model: Some(model),
            textures,
        })
    }
}

#[derive(Debug)]
enum AssemblyState {
    Waiting,
    Assembled(Vec<(String, ObjectId)>),
    Failed,
}

pub struct SceneAssembly {
    events: Receiver<LoadEvent>,
    props: Vec<PropSpec>,
    state: AssemblyState,
}

impl SceneAssembly {
    /// Subscribes to `ready`. Must happen before loading starts.
    pub fn new(ready: &mut EventChannel<LoadEvent>, props: Vec<PropSpec>) -> Self {
        Self {
            events: ready.channel(),
            props,
            state: AssemblyState::Waiting,
        }
    }

    /// Drains pending events and assembles on the first `ready`.
    ///
    /// Returns `Ok(true)` on the call that assembled. On failure, objects
    /// already inserted during this pass are removed again and the gate stays
    /// failed; it never retries.
    pub fn poll(&mut self, scene: &mut SceneGraph) -> Result<bool, AssemblyError> {
        let events: Vec<LoadEvent> = self.events.try_iter().collect();
        let mut assembled = false;
        for event in events {
            if !matches!(self.state, AssemblyState::Waiting) {
                log::debug!("Scene assembly already ran; ignoring '{}'", event.name());
                continue;
            }
            let LoadEvent::Ready(store) = event;
            assembled |= self.run(&store, scene)?;
        }
        Ok(assembled)
    }

    /// Assembles straight from a coordinator that has already reported ready.
    ///
    /// Same once-only rule as [`Self::poll`]; fails with
    /// [`AssemblyError::NotReady`] while the coordinator is still loading.
    pub fn assemble_from(
        &mut self,
        coordinator: &ResourceCoordinator,
        scene: &mut SceneGraph,
    ) -> Result<bool, AssemblyError> {
        let store = coordinator.store().ok_or(AssemblyError::NotReady)?;
        if !matches!(self.state, AssemblyState::Waiting) {
            return Ok(false);
        }
        // The queued `ready` refers to the same store.
        self.events.try_iter().for_each(drop);
        self.run(store, scene)
    }

    fn run(&mut self, store: &ResourceStore, scene: &mut SceneGraph) -> Result<bool, AssemblyError> {
        match Self::assemble(&self.props, store, scene) {
            Ok(objects) => {
                log::info!("Assembled {} scene objects", objects.len());
                self.state = AssemblyState::Assembled(objects);
                Ok(true)
            }
            Err(err) => {
                log::error!("Scene assembly aborted: {err}");
                self.state = AssemblyState::Failed;
                Err(err)
            }
        }
    }

    fn assemble(
        props: &[PropSpec],
        store: &ResourceStore,
        scene: &mut SceneGraph,
    ) -> Result<Vec<(String, ObjectId)>, AssemblyError> {
        let mut built = Vec::with_capacity(props.len());
        for prop in props {
            match prop.build(store) {
                Ok(object) => {
                    if object.model.as_ref().is_some_and(|m| m.requires_decoder()) {
                        log::debug!("'{}' uses compressed geometry", prop.name);
                    }
                    built.push((prop.name.clone(), scene.add(object)));
                }
                Err(err) => {
                    for (_, id) in built {
                        scene.remove(id);
                    }
                    return Err(err);
                }
            }
        }
        Ok(built)
    }

    #[must_use]
    pub fn is_assembled(&self) -> bool {
        matches!(self.state, AssemblyState::Assembled(_))
    }

    #[must_use]
    pub fn has_failed(&self) -> bool {
        matches!(self.state, AssemblyState::Failed)
    }

    /// Built objects in declaration order. Empty until assembled.
    #[must_use]
    pub fn objects(&self) -> &[(String, ObjectId)] {
        match &self.state {
            AssemblyState::Assembled(objects) => objects,
            _ => &[],
        }
    }

    #[must_use]
    pub fn object(&self, name: &str) -> Option<ObjectId> {
        self.objects()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }
}
