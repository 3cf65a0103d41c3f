use crate::config::Action;
use crate::engine::{Engine, EngineError};
use crate::input::{events::Key, mode::InteractionMode};

use super::InputState;

impl<E: Engine> InputState<E> {
    /// Processes a key press event.
    ///
    /// Modifier keys only update modifier state. Every other key is looked up
    /// in the configured keybindings together with the held modifiers; unbound
    /// keys are ignored.
    pub fn on_key_press(&mut self, key: Key) -> Result<(), EngineError> {
        if self.modifiers.update(key, true) {
            return Ok(());
        }

        let Some(key_str) = key.binding_name() else {
            return Ok(());
        };
        match self.find_action(&key_str) {
            Some(action) => self.handle_action(action),
            None => Ok(()),
        }
    }

    /// Processes a key release event.
    pub fn on_key_release(&mut self, key: Key) {
        self.modifiers.update(key, false);
    }

    /// Runs a keybinding action.
    pub fn handle_action(&mut self, action: Action) -> Result<(), EngineError> {
        log::debug!("Action: {:?}", action);
        match action {
            Action::Undo => self.undo(),
            Action::ClearAll => self.clear_all(),
            Action::DrawMode => self.set_mode(InteractionMode::Draw),
            Action::GrabMode => self.set_mode(InteractionMode::Grab),
            Action::NavigateMode => self.set_mode(InteractionMode::Navigate),
            Action::Cancel => {
                let ended = self.end_stroke();
                ended.and(self.release_grab())
            }
            Action::IncreaseWidth => {
                self.adjust_width(self.width_step);
                Ok(())
            }
            Action::DecreaseWidth => {
                self.adjust_width(-self.width_step);
                Ok(())
            }
            Action::TogglePhysicsOnDrop => {
                self.set_physics_on_drop(!self.physics_on_drop);
                Ok(())
            }
            Action::SetColor(index) => {
                self.set_color(index);
                Ok(())
            }
        }
    }
}
