//! Loader Backends
//!
//! One backend per [`AssetKind`]. A backend answers a descriptor with either
//! an immediate resource or a future that resolves later; the coordinator
//! treats both as exactly one completion.

use std::path::PathBuf;

use futures::FutureExt;
use futures::future::BoxFuture;
use rustc_hash::FxHashMap;

use crate::assets::registry::{AssetDescriptor, AssetKind};
use crate::assets::resource::{DecoderConfig, Resource};

#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use crate::assets::io::FileAssetReader;
#[cfg(not(target_arch = "wasm32"))]
use crate::assets::resource::{SceneBundle, Texture};

/// What a backend hands back for one descriptor.
pub enum LoadRequest {
    /// Already resolved; counted while the coordinator is still dispatching.
    Immediate(Resource),
    /// Resolves asynchronously.
    Deferred(BoxFuture<'static, anyhow::Result<Resource>>),
}

impl LoadRequest {
    pub fn deferred(
        future: impl Future<Output = anyhow::Result<Resource>> + Send + 'static,
    ) -> Self {
        Self::Deferred(future.boxed())
    }
}

pub trait LoaderBackend {
    fn kind(&self) -> AssetKind;

    fn load(&self, descriptor: &AssetDescriptor) -> LoadRequest;
}

/// Backends by kind.
#[derive(Default)]
pub struct LoaderBackends {
    backends: FxHashMap<AssetKind, Box<dyn LoaderBackend>>,
}

impl LoaderBackends {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the decoder, texture and scene-bundle backends reading from
    /// `root`.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn file_backed(root: impl AsRef<std::path::Path>) -> Self {
        let reader = Arc::new(FileAssetReader::new(root));
        Self::new()
            .with(DecoderConfigBackend::new(reader.root_path()))
            .with(TextureBackend::new(Arc::clone(&reader)))
            .with(SceneBundleBackend::new(reader))
    }

    #[must_use]
    pub fn with(mut self, backend: impl LoaderBackend + 'static) -> Self {
        self.register(backend);
        self
    }

    /// Registers a backend, replacing any previous one for the same kind.
    pub fn register(&mut self, backend: impl LoaderBackend + 'static) {
        let kind = backend.kind();
        if self.backends.insert(kind, Box::new(backend)).is_some() {
            log::debug!("Replaced loader backend for {kind}");
        }
    }

    #[must_use]
    pub fn get(&self, kind: AssetKind) -> Option<&dyn LoaderBackend> {
        self.backends
            .get(&kind)
            .map(|backend| &**backend as &dyn LoaderBackend)
    }
}

/// Records the decoder location. Never fetches anything.
#[derive(Debug, Clone, Default)]
pub struct DecoderConfigBackend {
    root: PathBuf,
}

impl DecoderConfigBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LoaderBackend for DecoderConfigBackend {
    fn kind(&self) -> AssetKind {
        AssetKind::DecoderConfig
    }

    fn load(&self, descriptor: &AssetDescriptor) -> LoadRequest {
        let decoder_path = self.root.join(descriptor.path.trim_start_matches('/'));
        log::debug!(
            "Decoder for '{}' configured at {}",
            descriptor.name,
            decoder_path.display()
        );
        LoadRequest::Immediate(DecoderConfig { decoder_path }.into())
    }
}

/// Reads image files and decodes them off the async thread.
#[cfg(not(target_arch = "wasm32"))]
pub struct TextureBackend {
    reader: Arc<FileAssetReader>,
}

#[cfg(not(target_arch = "wasm32"))]
impl TextureBackend {
    #[must_use]
    pub fn new(reader: Arc<FileAssetReader>) -> Self {
        Self { reader }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LoaderBackend for TextureBackend {
    fn kind(&self) -> AssetKind {
        AssetKind::Texture
    }

    fn load(&self, descriptor: &AssetDescriptor) -> LoadRequest {
        let reader = Arc::clone(&self.reader);
        let path = descriptor.path.clone();
        let label = descriptor.name.clone();
        LoadRequest::deferred(async move {
            let bytes = reader.read_bytes(&path).await?;
            let texture =
                tokio::task::spawn_blocking(move || Texture::decode(&bytes, &label)).await??;
            Ok(texture.into())
        })
    }
}

/// Reads glTF documents.
#[cfg(not(target_arch = "wasm32"))]
pub struct SceneBundleBackend {
    reader: Arc<FileAssetReader>,
}

#[cfg(not(target_arch = "wasm32"))]
impl SceneBundleBackend {
    #[must_use]
    pub fn new(reader: Arc<FileAssetReader>) -> Self {
        Self { reader }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LoaderBackend for SceneBundleBackend {
    fn kind(&self) -> AssetKind {
        AssetKind::SceneBundle
    }

    fn load(&self, descriptor: &AssetDescriptor) -> LoadRequest {
        let reader = Arc::clone(&self.reader);
        let path = descriptor.path.clone();
        let label = descriptor.name.clone();
        LoadRequest::deferred(async move {
            let bytes = reader.read_bytes(&path).await?;
            let bundle =
                tokio::task::spawn_blocking(move || SceneBundle::parse(&bytes, &label)).await??;
            Ok(bundle.into())
        })
    }
}

/// Serves resources that are already in memory, e.g. embedded assets.
///
/// Every request resolves asynchronously (on first poll) so it exercises the
/// same path as a real fetch.
pub struct MemoryBackend {
    kind: AssetKind,
    resources: FxHashMap<String, Resource>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            resources: FxHashMap::default(),
        }
    }

    /// Adds a resource served for the descriptor path `path`.
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, resource: impl Into<Resource>) -> Self {
        self.resources.insert(path.into(), resource.into());
        self
    }
}

impl LoaderBackend for MemoryBackend {
    fn kind(&self) -> AssetKind {
        self.kind
    }

    fn load(&self, descriptor: &AssetDescriptor) -> LoadRequest {
        let found = self.resources.get(&descriptor.path).cloned();
        let path = descriptor.path.clone();
        LoadRequest::deferred(async move {
            found.ok_or_else(|| anyhow::anyhow!("No in-memory resource at '{path}'"))
        })
    }
}
