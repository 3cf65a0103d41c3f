//! Application state: mode, sessions, brush settings and the stroke store.

use super::authoring::Authoring;
use super::grab::{GrabEngine, ThrowSettings};
use crate::config::{Action, Config, KeyBinding, MAX_WIDTH, MIN_WIDTH};
use crate::draw::{Color, GeometryBuilder, PhysicsState, Stroke, StrokeId, StrokeStore, color};
use crate::engine::{Engine, EngineError, Ray};
use crate::input::{
    events::ControllerPose, mode::InteractionMode, modifiers::Modifiers,
    sampler::ControllerSampler,
};
use crate::physics::{PhysicsAttachments, PhysicsKind};
use crate::score::ScoreZone;
use anyhow::anyhow;
use glam::Vec3;
use std::collections::HashMap;

/// Notifications for collaborators (UI, audio, score display).
///
/// Queued in order of occurrence and drained with [`InputState::take_events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreEvent {
    StrokeCommitted(StrokeId),
    /// An authoring session ended with too few points to keep
    StrokeDiscarded,
    StrokeEvicted(StrokeId),
    StrokeUndone(StrokeId),
    /// Every stroke was removed; score displays reset on this
    Cleared,
    StrokeGrabbed(StrokeId),
    StrokeReleased {
        id: StrokeId,
        /// Applied launch velocity, zero when set down as static
        velocity: Vec3,
    },
    ModeChanged(InteractionMode),
    Scored(StrokeId),
}

/// Which input stream started the current stroke or grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Pointer,
    Controller,
}

/// Main input state containing the whole drawing session.
///
/// Owns the engine, the committed strokes, the physics side-table and at most
/// one authoring and one grab session. Pointer, keyboard and controller events
/// all funnel into this struct; collaborators read back [`CoreEvent`]s and
/// [`InputState::camera_control_enabled`].
pub struct InputState<E: Engine> {
    pub(crate) engine: E,
    pub(crate) store: StrokeStore,
    pub(crate) attachments: PhysicsAttachments,
    pub(crate) authoring: Authoring,
    pub(crate) grab: GrabEngine,
    pub(crate) grab_source: Option<InputSource>,
    /// Stream that started the stroke being drawn; `None` for API-driven strokes
    pub(crate) authoring_source: Option<InputSource>,
    pub(crate) sampler: ControllerSampler,
    pub(crate) score_zone: Option<ScoreZone>,
    pub(crate) mode: InteractionMode,
    /// Color captured by the next stroke
    pub current_color: Color,
    /// Tube radius captured by the next stroke
    pub current_width: f32,
    pub width_step: f32,
    /// Whether fast releases turn strokes into dynamic bodies
    pub physics_on_drop: bool,
    pub modifiers: Modifiers,
    pub(crate) primary_held: bool,
    pub(crate) secondary_held: bool,
    pub(crate) touch_count: u32,
    pub(crate) trigger_held: bool,
    /// Most recent controller pose seen by `tick` or a button event
    pub(crate) last_controller: Option<ControllerPose>,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    events: Vec<CoreEvent>,
    next_id: u64,
}

impl<E: Engine> InputState<E> {
    /// Builds the state from a validated config, taking ownership of `engine`.
    pub fn from_config(engine: E, config: &Config) -> anyhow::Result<Self> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(|e| anyhow!("Invalid keybindings: {e}"))?;

        let drawing = &config.drawing;
        let score_zone = config.score.enabled.then(|| {
            ScoreZone::new(Vec3::from_array(config.score.center), config.score.radius)
        });

        Ok(Self {
            engine,
            store: StrokeStore::new(drawing.max_strokes),
            attachments: PhysicsAttachments::new(
                config.physics.restitution,
                config.physics.friction,
            ),
            authoring: Authoring::new(
                drawing.smoothing_distance,
                GeometryBuilder::new(drawing.tessellation),
            ),
            grab: GrabEngine::new(ThrowSettings::from_config(&config.throw)),
            grab_source: None,
            authoring_source: None,
            sampler: ControllerSampler::from_config(&config.controller),
            score_zone,
            mode: InteractionMode::default(),
            current_color: drawing.default_color.to_color(),
            current_width: drawing.default_width.clamp(MIN_WIDTH, MAX_WIDTH),
            width_step: drawing.width_step,
            physics_on_drop: config.throw.physics_on_drop,
            modifiers: Modifiers::new(),
            primary_held: false,
            secondary_held: false,
            touch_count: 0,
            trigger_held: false,
            last_controller: None,
            action_map,
            events: Vec::new(),
            next_id: 1,
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine access for the host loop (rendering, stepping physics).
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn attachments(&self) -> &PhysicsAttachments {
        &self.attachments
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_authoring(&self) -> bool {
        self.authoring.is_active()
    }

    /// The stroke being drawn, if any.
    pub fn authoring_stroke(&self) -> Option<&Stroke> {
        self.authoring.current()
    }

    pub fn authoring_source(&self) -> Option<InputSource> {
        self.authoring_source
    }

    pub fn held_stroke(&self) -> Option<StrokeId> {
        self.grab.held()
    }

    pub fn grab_source(&self) -> Option<InputSource> {
        self.grab_source
    }

    /// Viewpoint-to-object distance recorded when the current grab started.
    pub fn grab_distance(&self) -> Option<f32> {
        self.grab.grab_distance()
    }

    pub fn score_zone(&self) -> Option<&ScoreZone> {
        self.score_zone.as_ref()
    }

    /// Drains queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    /// Looks up an action for a key and the current modifiers.
    ///
    /// Symbols such as `+` and `_` already encode shift in the character, so
    /// shift is ignored for them.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        let shifted_symbol = key_str.chars().count() == 1
            && key_str.chars().all(|c| !c.is_alphanumeric());
        let shift = self.modifiers.shift && !shifted_symbol;

        for (binding, action) in &self.action_map {
            if binding.matches(key_str, self.modifiers.ctrl, shift, self.modifiers.alt) {
                return Some(*action);
            }
        }
        None
    }

    /// Starts a stroke at `position` with the current color and width.
    ///
    /// Ignored outside Draw mode, while a stroke is already being drawn, while
    /// a stroke is held, or when `position` is not finite.
    pub fn begin_stroke(&mut self, position: Vec3) -> bool {
        if self.mode != InteractionMode::Draw
            || self.authoring.is_active()
            || self.grab.is_holding()
            || !position.is_finite()
        {
            return false;
        }

        let id = StrokeId(self.next_id);
        let stroke = Stroke::new(id, position, self.current_color, self.current_width);
        if !self.authoring.begin(stroke) {
            return false;
        }
        self.next_id += 1;
        true
    }

    /// Starts a stroke on behalf of an input stream; only that stream feeds
    /// and ends it afterwards.
    pub(crate) fn begin_stroke_from(&mut self, source: InputSource, position: Vec3) -> bool {
        let started = self.begin_stroke(position);
        if started {
            self.authoring_source = Some(source);
        }
        started
    }

    /// Whether `source` may feed or end the stroke being drawn.
    pub(crate) fn owns_authoring(&self, source: InputSource) -> bool {
        self.authoring.is_active() && self.authoring_source.is_none_or(|owner| owner == source)
    }

    /// Offers a sample to the stroke being drawn. Returns whether it was kept.
    pub fn add_point(&mut self, position: Vec3) -> Result<bool, EngineError> {
        match self.authoring.add_point(&mut self.engine, position) {
            Ok(accepted) => Ok(accepted),
            Err(err) => {
                log::warn!("Dropped stroke sample at {position:?}: {err}");
                Err(err)
            }
        }
    }

    /// Ends the stroke being drawn.
    ///
    /// Strokes with a tube become static bodies and join the store; anything
    /// shorter is released and reported as discarded. If the static body
    /// cannot be attached the stroke is released and the error returned.
    pub fn end_stroke(&mut self) -> Result<(), EngineError> {
        self.authoring_source = None;
        let Some(mut stroke) = self.authoring.finish() else {
            return Ok(());
        };

        let Some(geometry) = stroke.geometry().filter(|_| stroke.is_committable()) else {
            stroke.release(&mut self.engine, &mut self.attachments);
            log::debug!("Discarded stroke {:?} with {} points", stroke.id, stroke.points().len());
            self.emit(CoreEvent::StrokeDiscarded);
            return Ok(());
        };

        if let Err(err) = self
            .attachments
            .attach(&mut self.engine, geometry, PhysicsKind::Static)
        {
            log::warn!("Failed to attach physics to stroke {:?}: {err}", stroke.id);
            stroke.release(&mut self.engine, &mut self.attachments);
            return Err(err);
        }
        stroke.physics = PhysicsState::Static;

        let id = stroke.id;
        let points = stroke.points().len();
        if let Some(mut evicted) = self.store.commit(stroke) {
            evicted.release(&mut self.engine, &mut self.attachments);
            log::info!("Evicted oldest stroke {:?}", evicted.id);
            self.emit(CoreEvent::StrokeEvicted(evicted.id));
        }
        log::info!("Stroke {id:?} saved with {points} points");
        self.emit(CoreEvent::StrokeCommitted(id));
        Ok(())
    }

    /// Tries to pick up the committed stroke hit by `ray`.
    ///
    /// `anchor` is the input position the stroke follows while held: the hit
    /// point for pointer drags (pass `None`), the controller for grip grabs.
    pub fn try_grab_with_ray(
        &mut self,
        ray: &Ray,
        source: InputSource,
        anchor: Option<Vec3>,
    ) -> Option<StrokeId> {
        if self.mode != InteractionMode::Grab || self.grab.is_holding() {
            return None;
        }

        let store = &self.store;
        let hit = self
            .engine
            .pick(ray, &|geometry| store.contains_geometry(geometry))?;
        let anchor = anchor.unwrap_or(hit.point);

        let id = self.grab.try_grab(
            &mut self.engine,
            &mut self.attachments,
            &mut self.store,
            &hit,
            ray.origin,
            anchor,
        )?;
        self.grab_source = Some(source);
        log::info!("Picked up stroke {id:?}");
        self.emit(CoreEvent::StrokeGrabbed(id));
        Some(id)
    }

    /// Lets go of the held stroke, throwing it if it was moving fast enough.
    pub fn release_grab(&mut self) -> Result<(), EngineError> {
        self.grab_source = None;
        let released = self.grab.release(
            &mut self.engine,
            &mut self.attachments,
            &mut self.store,
            self.physics_on_drop,
        );

        match released {
            Ok(Some(release)) => {
                if release.dynamic {
                    log::info!(
                        "Threw stroke {:?} at {:.2} units/s",
                        release.id,
                        release.velocity.length()
                    );
                } else {
                    log::info!("Set down stroke {:?}", release.id);
                }
                self.emit(CoreEvent::StrokeReleased {
                    id: release.id,
                    velocity: release.velocity,
                });
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => {
                log::warn!("Released stroke left without physics: {err}");
                Err(err)
            }
        }
    }

    /// Removes the newest stroke. A held stroke is set down first.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        let released = self.release_grab();
        if let Some(mut stroke) = self.store.undo() {
            stroke.release(&mut self.engine, &mut self.attachments);
            log::info!("Undid stroke {:?}", stroke.id);
            self.emit(CoreEvent::StrokeUndone(stroke.id));
        }
        released
    }

    /// Removes every committed stroke.
    pub fn clear_all(&mut self) -> Result<(), EngineError> {
        let released = self.release_grab();
        let strokes = self.store.drain();
        let count = strokes.len();
        for mut stroke in strokes {
            stroke.release(&mut self.engine, &mut self.attachments);
        }
        log::info!("Cleared {count} strokes");
        self.emit(CoreEvent::Cleared);
        released
    }

    /// Switches interaction mode.
    ///
    /// Any stroke being drawn is ended and any held stroke released before the
    /// switch, whether or not the mode actually changes. Both are attempted
    /// even if the first fails; the first error is returned.
    pub fn set_mode(&mut self, mode: InteractionMode) -> Result<(), EngineError> {
        let ended = self.end_stroke();
        let released = self.release_grab();

        if self.mode != mode {
            log::info!("Interaction mode: {} -> {}", self.mode, mode);
            self.mode = mode;
            self.emit(CoreEvent::ModeChanged(mode));
        }
        ended.and(released)
    }

    /// Whether the camera collaborator should respond to pointer drags.
    pub fn camera_control_enabled(&self) -> bool {
        if self.secondary_held || self.touch_count > 1 {
            return true;
        }
        match self.mode {
            InteractionMode::Navigate => true,
            InteractionMode::Draw | InteractionMode::Grab => !self.primary_held,
        }
    }

    /// Selects a palette color by index. Out-of-range indices are ignored.
    pub fn set_color(&mut self, index: usize) {
        if let Some(entry) = color::palette_entry(index) {
            self.current_color = entry.color;
            log::info!("Color: {}", entry.name);
        }
    }

    /// Sets the brush width, clamped to the supported range.
    pub fn set_brush_width(&mut self, width: f32) {
        if !width.is_finite() {
            return;
        }
        self.current_width = width.clamp(MIN_WIDTH, MAX_WIDTH);
        log::debug!("Brush width: {:.3}", self.current_width);
    }

    /// Adjusts the brush width by `delta`, clamped to the supported range.
    pub fn adjust_width(&mut self, delta: f32) {
        self.set_brush_width(self.current_width + delta);
    }

    pub fn set_physics_on_drop(&mut self, enabled: bool) {
        self.physics_on_drop = enabled;
        log::info!(
            "Physics on drop {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }
}
