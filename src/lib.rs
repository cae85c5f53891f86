#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assembly;
pub mod assets;
pub mod config;
pub mod errors;
pub mod events;
pub mod focus;
pub mod input;
pub mod scene;
pub mod tween;
pub mod utils;

pub use assembly::{PropSpec, SceneAssembly};
pub use assets::{
    AssetDescriptor, AssetKind, AssetRegistry, LoadEvent, LoadProgress, LoaderBackend,
    LoaderBackends, Resource, ResourceCoordinator, ResourceStore,
};
pub use config::{FocusSettings, RotationSettings, SceneManifest};
pub use errors::{AssemblyError, ConfigError, LoadError, Result, VitrineError};
pub use events::{EventChannel, SubscriptionId};
pub use focus::{FocusEvent, RotationDriver, ViewPositioner, ViewTransitionState};
pub use input::PointerEvent;
pub use scene::{Camera, ObjectId, SceneGraph, SceneObject, Transform};
pub use tween::{Ease, Tween, TweenEngine, TweenEvent, Tweener};
pub use utils::Timer;
