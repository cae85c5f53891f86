//! Asset Loading
//!
//! - [`AssetRegistry`]: what must load.
//! - [`LoaderBackends`]: how each kind loads.
//! - [`ResourceCoordinator`]: drives the loads and emits `ready` once.
//! - [`ResourceStore`]: what loaded, by name.

pub mod backends;
pub mod coordinator;
#[cfg(not(target_arch = "wasm32"))]
pub mod io;
pub mod registry;
pub mod resource;
pub mod store;

pub use backends::{DecoderConfigBackend, LoadRequest, LoaderBackend, LoaderBackends, MemoryBackend};
#[cfg(not(target_arch = "wasm32"))]
pub use backends::{SceneBundleBackend, TextureBackend};
pub use coordinator::{LoadEvent, LoadProgress, PendingLoads, ResourceCoordinator};
#[cfg(not(target_arch = "wasm32"))]
pub use io::FileAssetReader;
pub use registry::{AssetDescriptor, AssetKind, AssetRegistry, RawAssetDescriptor};
pub use resource::{DecoderConfig, Resource, SceneBundle, Texture};
pub use store::ResourceStore;
