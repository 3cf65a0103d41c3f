//! Library exports for the artplay stroke core.
//!
//! Exposes the stroke store, the interaction state machine and the engine
//! traits so that a renderer front end can drive the core, alongside the
//! configuration types shared with the CLI and the schema dumper.

pub mod config;
pub mod demo;
pub mod draw;
pub mod engine;
pub mod input;
pub mod physics;
pub mod score;
pub mod util;

pub use config::Config;
