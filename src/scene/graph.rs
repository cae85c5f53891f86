use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::assets::{SceneBundle, Texture};
use crate::scene::camera::Camera;
use crate::scene::transform::Transform;

new_key_type! {
    /// Handle to an object living in a [`SceneGraph`].
    pub struct ObjectId;
}

/// An object inserted by scene assembly.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    pub model: Option<Arc<SceneBundle>>,
    pub textures: Vec<Arc<Texture>>,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            model: None,
            textures: Vec::new(),
        }
    }
}

/// Minimal scene graph collaborator.
///
/// Flat object pool plus the active camera. Objects are addressed by
/// [`ObjectId`]; names are kept for lookup from configuration.
#[derive(Default)]
pub struct SceneGraph {
    objects: SlotMap<ObjectId, SceneObject>,
    by_name: FxHashMap<String, ObjectId>,
    pub camera: Camera,
}

impl SceneGraph {
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: SlotMap::default(),
            by_name: FxHashMap::default(),
            camera,
        }
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let name = object.name.clone();
        let id = self.objects.insert(object);
        if self.by_name.insert(name.clone(), id).is_some() {
            log::warn!("Scene object name '{name}' is reused; lookups now resolve to the newest");
        }
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let object = self.objects.remove(id)?;
        if self.by_name.get(&object.name) == Some(&id) {
            self.by_name.remove(&object.name);
        }
        Some(object)
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn transform(&self, id: ObjectId) -> Option<&Transform> {
        self.objects.get(id).map(|o| &o.transform)
    }

    pub fn transform_mut(&mut self, id: ObjectId) -> Option<&mut Transform> {
        self.objects.get_mut(id).map(|o| &mut o.transform)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter()
    }
}
