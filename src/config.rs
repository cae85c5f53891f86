//! Configuration
//!
//! Tuning for the focus controller and the scene manifest (assets to load and
//! props to build from them). Every field has a default, so a manifest only
//! needs to spell out what differs.
//!
//! ```json
//! {
//!   "assets": [
//!     { "type": "GLTFLoader", "name": "model_guitar_1", "path": "models/guitar.glb" },
//!     { "type": "TextureLoader", "name": "texture_base_1", "path": "textures/base.jpg" }
//!   ],
//!   "props": [
//!     { "name": "guitar", "model": "model_guitar_1", "textures": ["texture_base_1"] }
//!   ],
//!   "focus": { "entry_depth_threshold": -39.0 },
//!   "rotation": { "damping": 0.05 }
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::assembly::PropSpec;
use crate::assets::{AssetRegistry, RawAssetDescriptor};
use crate::errors::ConfigError;
use crate::tween::Ease;

/// Timing and geometry of the move-into-view transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusSettings {
    /// The transition is accepted only while the camera frame's z is below
    /// this value.
    pub entry_depth_threshold: f32,
    /// Offset from the initial position the first leg moves to.
    pub lift_offset: Vec3,
    pub lift_duration: f32,
    pub lift_ease: Ease,
    /// Distance kept in front of the camera at the end of the second leg.
    pub camera_depth_offset: f32,
    pub approach_duration: f32,
    pub approach_ease: Ease,
    pub return_duration: f32,
    pub return_ease: Ease,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            entry_depth_threshold: -39.0,
            lift_offset: Vec3::new(0.0, 1.0, 1.0),
            lift_duration: 1.0,
            lift_ease: Ease::POWER1_OUT,
            camera_depth_offset: 5.0,
            approach_duration: 1.5,
            approach_ease: Ease::POWER4_IN_OUT,
            return_duration: 2.5,
            return_ease: Ease::POWER1_OUT,
        }
    }
}

/// Pointer rotation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    /// Radians of target rotation per pixel dragged.
    pub drag_sensitivity: f32,
    /// Radians per pixel of the last drag delta added on release.
    pub release_speed: f32,
    /// Constant radians added to both axes on release.
    pub release_offset: f32,
    /// Fraction of the remaining distance covered per step.
    pub damping: f32,
    /// Symmetric pitch clamp in radians.
    pub pitch_limit: f32,
    pub throttle_ms: u64,
}

impl RotationSettings {
    #[must_use]
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.2,
            release_speed: 0.005,
            release_offset: 0.1,
            damping: 0.035,
            pitch_limit: std::f32::consts::FRAC_PI_4,
            throttle_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneManifest {
    #[serde(skip_serializing)]
    pub assets: Vec<RawAssetDescriptor>,
    pub props: Vec<PropSpec>,
    pub focus: FocusSettings,
    pub rotation: RotationSettings,
}

impl SceneManifest {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let manifest = Self::from_json(&json)?;
        log::info!(
            "Loaded manifest {} ({} assets, {} props)",
            path.display(),
            manifest.assets.len(),
            manifest.props.len()
        );
        Ok(manifest)
    }

    /// Validates the asset list into a registry.
    pub fn registry(&self) -> Result<AssetRegistry, ConfigError> {
        AssetRegistry::from_raw(self.assets.iter().cloned())
    }
}
