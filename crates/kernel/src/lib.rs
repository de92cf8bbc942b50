//! Scene kernel: the class registry and the object tree it constrains.
//!
//! # Invariants
//! - Only creatable classes are instantiated by the factory.
//! - Only movable classes receive children through the factory.
//! - The `Game`/`Workspace` pair exists from construction and is never removed.
//! - Children keep creation order.

pub mod class;
pub mod description;
pub mod scene;

pub use class::{ClassDescriptor, ClassName, class_descriptor};
pub use description::{PartDescription, SceneDescription, SceneFileError};
pub use scene::{
    NodeId, PartOverrides, PartProperties, Properties, Scene, SceneError, SceneEvent, SceneObject,
};

pub fn crate_info() -> &'static str {
    "viewport-kernel v0.1.0"
}
