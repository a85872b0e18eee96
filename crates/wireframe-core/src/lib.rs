//! Procedural wireframe loaders.
//!
//! Three loading-screen animations share one pipeline: a cached point set is
//! morphed, rotated and projected for the current clock value, connected by
//! distance thresholds and handed to a [`render::RenderSurface`] as line and
//! point primitives. A [`driver::Driver`] advances the clock on host timers.

pub mod animator;
pub mod config;
pub mod connectivity;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod keyframes;
pub mod math;
pub mod morph;
pub mod render;
pub mod transform;
pub mod tree;

pub use animator::{Animator, BrainLoader, Frame, PolyhedronLoader, Tick};
pub use config::{BrainConfig, DriverConfig, LoaderConfig, TreeConfig};
pub use error::{ConfigError, Result};
pub use geometry::{Shape, Solid};
pub use tree::TreeLoader;
