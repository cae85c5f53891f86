use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::assets::registry::AssetKind;
use crate::assets::resource::{DecoderConfig, Resource, SceneBundle, Texture};
use crate::errors::AssemblyError;

/// Resolved resources keyed by descriptor name.
///
/// Write-once: a name is absent until its load completes and is never
/// reassigned afterwards. Once loading finishes the coordinator freezes the
/// store behind an `Arc`, so readers only ever see the final set.
#[derive(Debug, Default)]
pub struct ResourceStore {
    entries: FxHashMap<String, Resource>,
}

impl ResourceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Stores `resource` under `name` unless the name is already taken.
    /// Returns whether the entry was inserted.
    pub fn insert(&mut self, name: &str, resource: Resource) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(name.to_owned(), resource);
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&Resource, AssemblyError> {
        self.entries
            .get(name)
            .ok_or_else(|| AssemblyError::MissingResource(name.to_owned()))
    }

    pub fn texture(&self, name: &str) -> Result<Arc<Texture>, AssemblyError> {
        match self.require(name)? {
            Resource::Texture(t) => Ok(Arc::clone(t)),
            other => Err(mismatch(name, AssetKind::Texture, other)),
        }
    }

    pub fn scene_bundle(&self, name: &str) -> Result<Arc<SceneBundle>, AssemblyError> {
        match self.require(name)? {
            Resource::SceneBundle(b) => Ok(Arc::clone(b)),
            other => Err(mismatch(name, AssetKind::SceneBundle, other)),
        }
    }

    pub fn decoder_config(&self, name: &str) -> Result<Arc<DecoderConfig>, AssemblyError> {
        match self.require(name)? {
            Resource::DecoderConfig(c) => Ok(Arc::clone(c)),
            other => Err(mismatch(name, AssetKind::DecoderConfig, other)),
        }
    }
}

fn mismatch(name: &str, expected: AssetKind, found: &Resource) -> AssemblyError {
    AssemblyError::KindMismatch {
        name: name.to_owned(),
        expected,
        found: found.kind(),
    }
}
