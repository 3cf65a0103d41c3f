//! Generic input event types for cross-platform compatibility.

use glam::Vec3;

use crate::engine::Ray;

/// Generic key representation.
///
/// Platform layers map their native key codes to these values before handing
/// them to [`InputState`](super::InputState).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Escape,
    Return,
    Backspace,
    Tab,
    Space,
    Shift,
    Ctrl,
    Alt,
    /// Meta/Command key; treated as Ctrl for shortcuts
    Meta,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used when matching against configured keybindings.
    pub fn binding_name(&self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Backspace => Some("Backspace".to_string()),
            Key::Tab => Some("Tab".to_string()),
            Key::Space => Some("Space".to_string()),
            Key::Shift | Key::Ctrl | Key::Alt | Key::Meta | Key::Unknown => None,
        }
    }
}

/// Pointer button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button or single touch (draw / grab)
    Primary,
    /// Right mouse button (momentary camera control)
    Secondary,
    /// Middle mouse button (currently unused)
    Middle,
}

/// A pointer position resolved against the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Pick ray from the viewpoint through the pointer
    pub ray: Ray,
    /// Where the ray meets the drawing surface, if it does
    pub surface_point: Option<Vec3>,
    /// Event time in seconds
    pub timestamp: f64,
}

impl PointerSample {
    pub fn new(ray: Ray, surface_point: Option<Vec3>, timestamp: f64) -> Self {
        Self {
            ray,
            surface_point,
            timestamp,
        }
    }
}

/// World-space pose of a tracked controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerPose {
    pub position: Vec3,
    /// Unit pointing direction
    pub forward: Vec3,
}

impl ControllerPose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.normalize_or_zero(),
        }
    }
}

/// Face buttons on the drawing controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerButton {
    /// Undo the newest stroke
    A,
    /// Toggles the palette menu (handled by the UI layer)
    B,
}

/// Per-frame input for [`InputState::tick`](super::InputState::tick).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Frame time in seconds, on the same clock as pointer timestamps
    pub now: f64,
    /// Drawing controller pose, when one is tracked
    pub controller: Option<ControllerPose>,
    /// Camera look direction, used for locomotion
    pub camera_forward: Vec3,
}

/// What a frame asks of the camera collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameOutput {
    /// Translation to apply to the camera this frame
    pub locomotion: Vec3,
}
