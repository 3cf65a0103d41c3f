use crate::engine::{Engine, EngineError};
use crate::input::{
    events::{PointerButton, PointerSample},
    mode::InteractionMode,
};

use super::grab::project_at_distance;
use super::{InputSource, InputState};

impl<E: Engine> InputState<E> {
    /// Processes a pointer button press.
    ///
    /// # Behavior
    /// - Primary in Draw mode: starts a stroke where the ray meets the drawing surface
    /// - Primary in Grab mode: picks up the committed stroke under the pointer
    /// - Secondary: momentarily hands drags to the camera
    pub fn on_pointer_press(&mut self, button: PointerButton, sample: &PointerSample) {
        match button {
            PointerButton::Primary => {
                self.primary_held = true;
                if self.touch_count > 1 {
                    return;
                }
                match self.mode {
                    InteractionMode::Draw => {
                        if let Some(point) = sample.surface_point {
                            self.begin_stroke_from(InputSource::Pointer, point);
                        }
                    }
                    InteractionMode::Grab => {
                        self.try_grab_with_ray(&sample.ray, InputSource::Pointer, None);
                    }
                    InteractionMode::Navigate => {}
                }
            }
            PointerButton::Secondary => {
                self.secondary_held = true;
            }
            PointerButton::Middle => {}
        }
    }

    /// Processes pointer motion.
    ///
    /// While drawing, the surface point is offered to the stroke. While
    /// holding a stroke grabbed by the pointer, the stroke follows the ray at
    /// the depth it was picked at.
    pub fn on_pointer_motion(&mut self, sample: &PointerSample) -> Result<(), EngineError> {
        if self.owns_authoring(InputSource::Pointer) {
            if let Some(point) = sample.surface_point {
                self.add_point(point)?;
            }
            return Ok(());
        }

        if self.grab_source == Some(InputSource::Pointer)
            && let Some(distance) = self.grab.grab_distance()
        {
            let anchor = project_at_distance(sample.ray.origin, sample.ray.direction, distance);
            if let Some(target) = self.grab.target_for_anchor(anchor) {
                self.grab.move_to(&mut self.engine, target, sample.timestamp)?;
            }
        }
        Ok(())
    }

    /// Processes a pointer button release: ends the pointer's stroke or throws
    /// the held one.
    pub fn on_pointer_release(&mut self, button: PointerButton) -> Result<(), EngineError> {
        match button {
            PointerButton::Primary => {
                self.primary_held = false;
                let ended = self.end_pointer_stroke();
                let released = if self.grab_source == Some(InputSource::Pointer) {
                    self.release_grab()
                } else {
                    Ok(())
                };
                ended.and(released)
            }
            PointerButton::Secondary => {
                self.secondary_held = false;
                Ok(())
            }
            PointerButton::Middle => Ok(()),
        }
    }

    /// The pointer left the view: end everything it was driving.
    pub fn on_pointer_leave(&mut self) -> Result<(), EngineError> {
        self.primary_held = false;
        self.secondary_held = false;
        self.touch_count = 0;

        let ended = self.end_pointer_stroke();
        let released = if self.grab_source == Some(InputSource::Pointer) {
            self.release_grab()
        } else {
            Ok(())
        };
        ended.and(released)
    }

    /// Records the number of active touches.
    ///
    /// A second finger hands the gesture to the camera and ends any stroke in
    /// progress.
    pub fn on_touch(&mut self, count: u32) -> Result<(), EngineError> {
        self.touch_count = count;
        if count > 1 {
            log::debug!("Multi-touch ({count}), camera takes over");
            return self.end_pointer_stroke();
        }
        Ok(())
    }

    fn end_pointer_stroke(&mut self) -> Result<(), EngineError> {
        if self.owns_authoring(InputSource::Pointer) {
            self.end_stroke()
        } else {
            Ok(())
        }
    }
}
