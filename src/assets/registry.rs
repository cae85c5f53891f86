use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Which loader backend resolves an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssetKind {
    /// Decoder configuration for compressed geometry. Resolves immediately.
    DecoderConfig,
    /// An image decoded into a texture.
    Texture,
    /// A glTF document.
    SceneBundle,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DecoderConfig => "decoder-config",
            Self::Texture => "texture",
            Self::SceneBundle => "scene-bundle",
        };
        f.write_str(name)
    }
}

impl FromStr for AssetKind {
    type Err = ();

    /// Accepts both the crate's names and the loader names used by web
    /// manifests (`DracoLoader`, `TextureLoader`, `GLTFLoader`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DecoderConfig" | "DracoLoader" => Ok(Self::DecoderConfig),
            "Texture" | "TextureLoader" => Ok(Self::Texture),
            "SceneBundle" | "GLTFLoader" => Ok(Self::SceneBundle),
            _ => Err(()),
        }
    }
}

/// Static declaration of one loadable asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AssetDescriptor {
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub name: String,
    pub path: String,
}

impl AssetDescriptor {
    #[must_use]
    pub fn new(kind: AssetKind, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            path: path.into(),
        }
    }

    #[must_use]
    pub fn texture(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(AssetKind::Texture, name, path)
    }

    #[must_use]
    pub fn scene_bundle(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(AssetKind::SceneBundle, name, path)
    }

    #[must_use]
    pub fn decoder_config(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(AssetKind::DecoderConfig, name, path)
    }
}

/// Descriptor as written in a manifest, before the kind is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAssetDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub path: String,
}

impl TryFrom<RawAssetDescriptor> for AssetDescriptor {
    type Error = ConfigError;

    fn try_from(raw: RawAssetDescriptor) -> Result<Self, Self::Error> {
        let kind = raw.kind.parse().map_err(|()| ConfigError::UnknownKind {
            name: raw.name.clone(),
            kind: raw.kind.clone(),
        })?;
        Ok(Self {
            kind,
            name: raw.name,
            path: raw.path,
        })
    }
}

/// Ordered, immutable set of asset descriptors.
///
/// Cheap to clone. Names are unique; construction rejects duplicates.
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    descriptors: Arc<[AssetDescriptor]>,
}

impl AssetRegistry {
    pub fn new(descriptors: impl IntoIterator<Item = AssetDescriptor>) -> Result<Self, ConfigError> {
        let descriptors: Vec<AssetDescriptor> = descriptors.into_iter().collect();
        let mut seen = FxHashSet::default();
        for descriptor in &descriptors {
            if !seen.insert(descriptor.name.as_str()) {
                return Err(ConfigError::DuplicateAsset(descriptor.name.clone()));
            }
        }
        Ok(Self {
            descriptors: descriptors.into(),
        })
    }

    /// Validates manifest entries, failing on the first unknown kind.
    pub fn from_raw(raw: impl IntoIterator<Item = RawAssetDescriptor>) -> Result<Self, ConfigError> {
        let descriptors = raw
            .into_iter()
            .map(AssetDescriptor::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(descriptors)
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.descriptors.iter()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AssetDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name.as_str())
    }
}
