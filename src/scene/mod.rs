//! Scene Collaborator
//!
//! The smallest scene model the asset and focus systems need: objects with a
//! position/rotation/scale [`Transform`], addressed through [`ObjectId`]s,
//! plus one live [`Camera`]. Rendering is someone else's job.

pub mod camera;
pub mod graph;
pub mod transform;

pub use camera::Camera;
pub use graph::{ObjectId, SceneGraph, SceneObject};
pub use transform::Transform;
