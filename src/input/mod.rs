//! Input handling and interaction state machine.
//!
//! This module translates host pointer, keyboard and controller events into
//! stroke actions. It maintains the interaction mode, brush parameters (color,
//! width), and the authoring and grab sessions that sit on top of the stroke
//! store.

pub mod events;
pub mod mode;
pub mod modifiers;
pub mod sampler;
pub mod state;

// Re-export commonly used types at module level
pub use events::{
    ControllerButton, ControllerPose, FrameInput, FrameOutput, Key, PointerButton, PointerSample,
};
pub use mode::InteractionMode;
pub use sampler::{ControllerSampler, WidthStep};
pub use state::{CoreEvent, InputSource, InputState};

// Re-export for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use modifiers::Modifiers;
