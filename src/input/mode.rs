//! Interaction mode selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which input stream the primary button drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Primary drag paints a stroke
    #[default]
    Draw,
    /// Primary drag picks up and throws a stroke
    Grab,
    /// Primary drag moves the camera
    Navigate,
}

impl InteractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Draw => "draw",
            InteractionMode::Grab => "grab",
            InteractionMode::Navigate => "navigate",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionMode {
    type Err = String;

    /// Accepts the mode names plus the "orbit" and "smash" aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draw" => Ok(InteractionMode::Draw),
            "grab" | "smash" => Ok(InteractionMode::Grab),
            "navigate" | "orbit" => Ok(InteractionMode::Navigate),
            other => Err(format!(
                "Unknown interaction mode '{}' (expected draw, grab or navigate)",
                other
            )),
        }
    }
}
