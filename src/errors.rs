//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The top-level error type [`VitrineError`] groups three families:
//! - [`ConfigError`]: the declared asset set or a manifest is malformed.
//!   Always fatal, raised before any load request is issued.
//! - [`LoadError`]: a load request failed or a completion could not be
//!   accounted for.
//! - [`AssemblyError`]: scene assembly could not pull a resource it needs.
//!
//! None of these are retried. A load that simply never completes is not an
//! error; it shows up as a coordinator that stays in the loading state (see
//! [`crate::assets::ResourceCoordinator::pending`]).
//!
//! ```rust,ignore
//! use vitrine::errors::Result;
//!
//! fn boot() -> Result<()> {
//!     let registry = AssetRegistry::new(descriptors)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::assets::AssetKind;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum VitrineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// Configuration defects. These indicate a programming or content mistake and
/// abort startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Two descriptors share a name.
    #[error("Duplicate asset name in registry: {0}")]
    DuplicateAsset(String),

    /// A manifest declared a loader kind that does not exist.
    #[error("Unknown asset kind '{kind}' for asset '{name}'")]
    UnknownKind {
        /// The asset that declared it
        name: String,
        /// The unrecognised kind string
        kind: String,
    },

    /// No backend is registered for a kind the registry uses.
    #[error("There was no loader available for {kind:?} (asset '{name}')")]
    NoLoader { kind: AssetKind, name: String },

    /// Manifest JSON could not be parsed.
    #[error("Manifest parse error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Manifest or settings file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while resources are being fetched.
#[derive(Error, Debug)]
pub enum LoadError {
    /// `start` was called on a coordinator that is already loading or ready.
    #[error("Loading has already been started")]
    AlreadyStarted,

    /// A completion arrived for a name the registry does not declare.
    #[error("Completion for unknown asset: {0}")]
    UnknownAsset(String),

    /// A backend failed to produce the resource.
    #[error("Failed to load asset '{name}': {source}")]
    Backend {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// Every pending request finished but the registry is not fully resolved.
    #[error("Loading finished with {loaded}/{total} assets resolved")]
    Incomplete { loaded: usize, total: usize },
}

/// Failures while building scene objects out of the resolved store.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// The store has no entry under this name.
    #[error("Resource '{0}' is missing from the resolved store")]
    MissingResource(String),

    /// The entry exists but holds a different kind of resource.
    #[error("Resource '{name}' is a {found:?}, expected {expected:?}")]
    KindMismatch {
        name: String,
        expected: AssetKind,
        found: AssetKind,
    },

    /// Assembly was attempted before the coordinator reported ready.
    #[error("Resources are not ready")]
    NotReady,
}

/// Alias for `Result<T, VitrineError>`.
pub type Result<T> = std::result::Result<T, VitrineError>;
