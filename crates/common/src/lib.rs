//! Shared types for the viewport: rotation math, camera pose, surface size,
//! flat colours and the tunable configuration.
//!
//! # Invariants
//! - Math helpers are pure.
//! - Every tunable constant of the viewport lives in [`ViewportConfig`].

pub mod config;
pub mod math;
pub mod types;

pub use config::{ConfigError, LookConfig, MovementConfig, ViewportConfig};
pub use math::{rotate, to_radians};
pub use types::{Camera, Color, SurfaceSize};
