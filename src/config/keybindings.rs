//! Keybinding configuration types and parsing.
//!
//! Every keyboard-driven action of a drawing session can be rebound in the
//! `[keybindings]` section of the config file.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // History
    Undo,
    ClearAll,

    // Interaction modes
    DrawMode,
    GrabMode,
    NavigateMode,
    /// Ends the in-progress stroke or drops the held stroke
    Cancel,

    // Brush
    IncreaseWidth,
    DecreaseWidth,
    TogglePhysicsOnDrop,

    /// Select the palette entry at this index
    SetColor(usize),
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Z" or "Escape".
    /// Modifiers can appear in any order and may be separated by spaces
    /// ("Shift + Ctrl + W"). "Meta", "Cmd" and "Super" count as Ctrl.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "meta" | "cmd" | "super" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into empty parts around the '+' key itself
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z", "U"]
/// grab_mode = ["G"]
/// set_color = [["1"], ["2"], ["3"]]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_clear_all")]
    pub clear_all: Vec<String>,

    #[serde(default = "default_draw_mode")]
    pub draw_mode: Vec<String>,

    #[serde(default = "default_grab_mode")]
    pub grab_mode: Vec<String>,

    #[serde(default = "default_navigate_mode")]
    pub navigate_mode: Vec<String>,

    #[serde(default = "default_cancel")]
    pub cancel: Vec<String>,

    #[serde(default = "default_increase_width")]
    pub increase_width: Vec<String>,

    #[serde(default = "default_decrease_width")]
    pub decrease_width: Vec<String>,

    #[serde(default = "default_toggle_physics_on_drop")]
    pub toggle_physics_on_drop: Vec<String>,

    /// Bindings per palette entry, in palette order
    #[serde(default = "default_set_color")]
    pub set_color: Vec<Vec<String>>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            clear_all: default_clear_all(),
            draw_mode: default_draw_mode(),
            grab_mode: default_grab_mode(),
            navigate_mode: default_navigate_mode(),
            cancel: default_cancel(),
            increase_width: default_increase_width(),
            decrease_width: default_decrease_width(),
            toggle_physics_on_drop: default_toggle_physics_on_drop(),
            set_color: default_set_color(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let fixed: [(&[String], Action); 9] = [
            (self.undo.as_slice(), Action::Undo),
            (self.clear_all.as_slice(), Action::ClearAll),
            (self.draw_mode.as_slice(), Action::DrawMode),
            (self.grab_mode.as_slice(), Action::GrabMode),
            (self.navigate_mode.as_slice(), Action::NavigateMode),
            (self.cancel.as_slice(), Action::Cancel),
            (self.increase_width.as_slice(), Action::IncreaseWidth),
            (self.decrease_width.as_slice(), Action::DecreaseWidth),
            (self.toggle_physics_on_drop.as_slice(), Action::TogglePhysicsOnDrop),
        ];
        let colors = self
            .set_color
            .iter()
            .enumerate()
            .map(|(index, bindings)| (bindings.as_slice(), Action::SetColor(index)));

        for (bindings, action) in fixed.into_iter().chain(colors) {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_clear_all() -> Vec<String> {
    vec!["C".to_string()]
}

fn default_draw_mode() -> Vec<String> {
    vec!["D".to_string()]
}

fn default_grab_mode() -> Vec<String> {
    vec!["G".to_string()]
}

fn default_navigate_mode() -> Vec<String> {
    vec!["O".to_string()]
}

fn default_cancel() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_increase_width() -> Vec<String> {
    vec!["+".to_string(), "=".to_string()]
}

fn default_decrease_width() -> Vec<String> {
    vec!["-".to_string(), "_".to_string()]
}

fn default_toggle_physics_on_drop() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_set_color() -> Vec<Vec<String>> {
    (1..=9).map(|digit| vec![digit.to_string()]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_key() {
        let binding = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(!binding.shift);
    }

    #[test]
    fn test_parse_meta_counts_as_ctrl() {
        let binding = KeyBinding::parse("Meta+Z").unwrap();
        assert_eq!(binding, KeyBinding::parse("Ctrl+Z").unwrap());
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(KeyBinding::parse("+").unwrap().key, "+");
        let binding = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl);
    }

    #[test]
    fn test_parse_with_spaces_and_any_order() {
        let a = KeyBinding::parse("Ctrl + Shift + W").unwrap();
        let b = KeyBinding::parse("Shift+Ctrl+W").unwrap();
        assert_eq!(a, b);
        assert!(a.ctrl && a.shift && !a.alt);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn test_matches() {
        let binding = KeyBinding::parse("Ctrl+Z").unwrap();
        assert!(binding.matches("Z", true, false, false));
        assert!(binding.matches("z", true, false, false)); // Case insensitive
        assert!(!binding.matches("z", false, false, false)); // Missing ctrl
        assert!(!binding.matches("y", true, false, false)); // Wrong key
    }

    #[test]
    fn test_build_action_map_defaults() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();

        let lookup = |s: &str| map.get(&KeyBinding::parse(s).unwrap()).copied();
        assert_eq!(lookup("Ctrl+Z"), Some(Action::Undo));
        assert_eq!(lookup("G"), Some(Action::GrabMode));
        assert_eq!(lookup("Escape"), Some(Action::Cancel));
        assert_eq!(lookup("="), Some(Action::IncreaseWidth));
        assert_eq!(lookup("1"), Some(Action::SetColor(0)));
        assert_eq!(lookup("9"), Some(Action::SetColor(8)));
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let mut config = KeybindingsConfig::default();
        config.clear_all = vec!["Ctrl+Z".to_string()];

        let err_msg = config.build_action_map().unwrap_err();
        assert!(err_msg.contains("Duplicate keybinding"));
        assert!(err_msg.contains("Ctrl+Z"));
    }

    #[test]
    fn test_duplicate_between_color_slots() {
        let mut config = KeybindingsConfig::default();
        config.set_color[4] = vec!["1".to_string()];
        assert!(config.build_action_map().is_err());
    }

    #[test]
    fn test_keybindings_from_toml() {
        let config: KeybindingsConfig = toml::from_str(
            r#"
            undo = ["U"]
            set_color = [["F1"], ["F2"]]
            "#,
        )
        .unwrap();
        let map = config.build_action_map().unwrap();
        assert_eq!(
            map.get(&KeyBinding::parse("U").unwrap()),
            Some(&Action::Undo)
        );
        assert_eq!(
            map.get(&KeyBinding::parse("F2").unwrap()),
            Some(&Action::SetColor(1))
        );
        // Unspecified actions keep their defaults
        assert_eq!(
            map.get(&KeyBinding::parse("G").unwrap()),
            Some(&Action::GrabMode)
        );
    }
}
