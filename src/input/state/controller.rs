use glam::Vec2;

use crate::engine::{Engine, EngineError, Ray};
use crate::input::{
    events::{ControllerButton, ControllerPose, FrameInput, FrameOutput},
    mode::InteractionMode,
    sampler::WidthStep,
};

use super::{CoreEvent, InputSource, InputState};

impl<E: Engine> InputState<E> {
    /// Trigger press starts a stroke at the brush tip, release ends it.
    ///
    /// A stroke started by the pointer is left alone.
    pub fn on_trigger(&mut self, pressed: bool, pose: ControllerPose) -> Result<(), EngineError> {
        self.last_controller = Some(pose);
        self.trigger_held = pressed;

        if pressed {
            if self.mode == InteractionMode::Draw {
                let tip = self.sampler.tip_position(&pose);
                self.begin_stroke_from(InputSource::Controller, tip);
            }
            Ok(())
        } else if self.owns_authoring(InputSource::Controller) {
            self.end_stroke()
        } else {
            Ok(())
        }
    }

    /// Grip press picks up the stroke the controller points at; release throws it.
    pub fn on_grip(&mut self, pressed: bool, pose: ControllerPose) -> Result<(), EngineError> {
        self.last_controller = Some(pose);

        if pressed {
            let ray = Ray::with_length(pose.position, pose.forward, self.sampler.pick_length());
            self.try_grab_with_ray(&ray, InputSource::Controller, Some(pose.position));
            Ok(())
        } else if self.grab_source == Some(InputSource::Controller) {
            self.release_grab()
        } else {
            Ok(())
        }
    }

    /// Face buttons. B belongs to the UI layer (palette menu) and is ignored here.
    pub fn on_controller_button(&mut self, button: ControllerButton) -> Result<(), EngineError> {
        match button {
            ControllerButton::A => self.undo(),
            ControllerButton::B => Ok(()),
        }
    }

    /// Records a thumbstick deflection; a hard vertical push steps the brush width.
    pub fn on_thumbstick(&mut self, axes: Vec2, now: f64) {
        match self.sampler.set_thumbstick(axes, now) {
            Some(WidthStep::Increase) => self.adjust_width(self.width_step),
            Some(WidthStep::Decrease) => self.adjust_width(-self.width_step),
            None => {}
        }
    }

    /// Per-frame update.
    ///
    /// Feeds the controller tip to a trigger-held stroke and the controller
    /// position to a grip-held stroke, checks the score zone, and returns the
    /// locomotion the camera should apply.
    pub fn tick(&mut self, frame: FrameInput) -> Result<FrameOutput, EngineError> {
        if let Some(pose) = frame.controller {
            self.last_controller = Some(pose);

            if self.trigger_held && self.owns_authoring(InputSource::Controller) {
                let tip = self.sampler.tip_position(&pose);
                self.add_point(tip)?;
            }

            if self.grab_source == Some(InputSource::Controller)
                && let Some(target) = self.grab.target_for_anchor(pose.position)
            {
                self.grab.move_to(&mut self.engine, target, frame.now)?;
            }
        }

        if let Some(zone) = self.score_zone {
            for id in zone.check(&mut self.store, &self.engine) {
                self.emit(CoreEvent::Scored(id));
            }
        }

        Ok(FrameOutput {
            locomotion: self.sampler.locomotion(frame.camera_forward),
        })
    }
}
