use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::registry::AssetKind;

/// Decoder configuration for compressed geometry.
///
/// Nothing is fetched for it: the loader only records where the decoder
/// lives so that scene bundles using compressed meshes can find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    pub decoder_path: PathBuf,
}

/// A decoded RGBA8 image.
#[derive(Clone)]
pub struct Texture {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Texture {
    #[must_use]
    pub fn new(label: impl Into<String>, width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            width,
            height,
            data,
        }
    }

    /// CPU image decoding.
    pub fn decode(bytes: &[u8], label: &str) -> anyhow::Result<Self> {
        use image::GenericImageView;

        let img = image::load_from_memory(bytes)
            .map_err(|e| anyhow::anyhow!("Failed to decode image {label}: {e}"))?;
        let (width, height) = img.dimensions();
        Ok(Self::new(label, width, height, img.to_rgba8().into_vec()))
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("label", &self.label)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Summary of a parsed glTF document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneBundle {
    pub label: String,
    pub scenes: usize,
    pub meshes: usize,
    /// Names of the named nodes, in document order.
    pub nodes: Vec<String>,
    pub extensions_required: Vec<String>,
}

impl SceneBundle {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.nodes = nodes.into_iter().map(Into::into).collect();
        self
    }

    /// Parses a `.gltf` / `.glb` payload.
    pub fn parse(bytes: &[u8], label: &str) -> anyhow::Result<Self> {
        let gltf = gltf::Gltf::from_slice(bytes)
            .map_err(|e| anyhow::anyhow!("Failed to parse glTF {label}: {e}"))?;
        let document = &gltf.document;
        Ok(Self {
            label: label.to_string(),
            scenes: document.scenes().count(),
            meshes: document.meshes().count(),
            nodes: document
                .nodes()
                .filter_map(|n| n.name().map(str::to_owned))
                .collect(),
            extensions_required: document
                .extensions_required()
                .map(str::to_owned)
                .collect(),
        })
    }

    /// Whether meshes in this bundle need the geometry decoder.
    #[must_use]
    pub fn requires_decoder(&self) -> bool {
        self.extensions_required
            .iter()
            .any(|e| e == "KHR_draco_mesh_compression")
    }
}

/// A resolved resource. Closed over the loader kinds.
#[derive(Debug, Clone)]
pub enum Resource {
    DecoderConfig(Arc<DecoderConfig>),
    Texture(Arc<Texture>),
    SceneBundle(Arc<SceneBundle>),
}

impl Resource {
    #[must_use]
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::DecoderConfig(_) => AssetKind::DecoderConfig,
            Self::Texture(_) => AssetKind::Texture,
            Self::SceneBundle(_) => AssetKind::SceneBundle,
        }
    }
}

impl From<DecoderConfig> for Resource {
    fn from(value: DecoderConfig) -> Self {
        Self::DecoderConfig(Arc::new(value))
    }
}

impl From<Texture> for Resource {
    fn from(value: Texture) -> Self {
        Self::Texture(Arc::new(value))
    }
}

impl From<SceneBundle> for Resource {
    fn from(value: SceneBundle) -> Self {
        Self::SceneBundle(Arc::new(value))
    }
}
