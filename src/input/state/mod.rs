mod actions;
mod authoring;
mod controller;
mod core;
mod grab;
mod mouse;

pub use authoring::{Authoring, DEFAULT_SMOOTHING_DISTANCE};
pub use self::core::{CoreEvent, InputSource, InputState};
pub use grab::{
    GrabEngine, GrabSession, MotionHistory, MotionSample, Release, ThrowSettings,
    project_at_distance,
};
