//! Stroke data model and tube geometry.
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGB color and the nine-entry stroke palette
//! - [`Stroke`]: a committed or in-progress 3D polyline with its geometry
//! - [`StrokeStore`]: bounded, oldest-first history of committed strokes
//! - [`GeometryBuilder`]: sweeps polylines into capped tubes for the renderer

pub mod color;
pub mod store;
pub mod stroke;
pub mod tube;

// Re-export commonly used types at module level
pub use color::{Color, NamedColor, PALETTE};
pub use store::StrokeStore;
pub use stroke::{PhysicsState, Stroke, StrokeId};
pub use tube::{GeometryBuilder, TubeMesh};
