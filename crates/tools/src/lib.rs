//! Developer tooling: scene inspector.
//!
//! # Invariants
//! - Tools only read the scene.

mod inspector;

pub use inspector::{PartInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "viewport-tools v0.1.0"
}
