//! The single in-progress stroke: begin, resampled accumulation, finish.

use glam::Vec3;

use crate::draw::{GeometryBuilder, Stroke};
use crate::engine::{EngineError, MeshBackend};

/// Default minimum spacing between accepted points.
pub const DEFAULT_SMOOTHING_DISTANCE: f32 = 0.01;

/// Authoring state machine: `Idle` when no stroke is held, `Authoring` otherwise.
#[derive(Debug)]
pub struct Authoring {
    stroke: Option<Stroke>,
    smoothing_distance: f32,
    builder: GeometryBuilder,
}

impl Default for Authoring {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_DISTANCE, GeometryBuilder::default())
    }
}

impl Authoring {
    pub fn new(smoothing_distance: f32, builder: GeometryBuilder) -> Self {
        Self {
            stroke: None,
            smoothing_distance,
            builder,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stroke.is_some()
    }

    /// The in-progress stroke, if any.
    pub fn current(&self) -> Option<&Stroke> {
        self.stroke.as_ref()
    }

    pub fn smoothing_distance(&self) -> f32 {
        self.smoothing_distance
    }

    /// Starts a session with `stroke`. Returns false (and drops nothing) when
    /// a session is already running; the offered stroke holds no geometry yet.
    pub fn begin(&mut self, stroke: Stroke) -> bool {
        if self.stroke.is_some() {
            return false;
        }
        log::debug!("Stroke {:?} started at {:?}", stroke.id, stroke.last_point());
        self.stroke = Some(stroke);
        true
    }

    /// Offers a new sample. Returns whether it was accepted.
    ///
    /// Non-finite samples and samples closer than the smoothing distance to
    /// the last accepted point are dropped. An accepted sample rebuilds the
    /// whole tube; the previous tube is disposed once its replacement exists.
    /// If the rebuild fails the sample is dropped again and the previous tube
    /// stays.
    pub fn add_point<B: MeshBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        position: Vec3,
    ) -> Result<bool, EngineError> {
        let Some(stroke) = self.stroke.as_mut() else {
            return Ok(false);
        };
        if !position.is_finite() {
            log::warn!("Ignoring non-finite stroke sample {position:?}");
            return Ok(false);
        }
        let Some(last) = stroke.last_point() else {
            return Ok(false);
        };
        if last.distance(position) <= self.smoothing_distance {
            return Ok(false);
        }

        stroke.push_point(position);
        let rebuilt = match self.builder.build(
            backend,
            stroke.points(),
            stroke.color(),
            stroke.width(),
        ) {
            Ok(rebuilt) => rebuilt,
            Err(err) => {
                stroke.pop_point();
                return Err(err);
            }
        };

        if let Some(handle) = rebuilt
            && let Some(previous) = stroke.replace_geometry(handle)
        {
            backend.dispose_mesh(previous);
        }
        Ok(true)
    }

    /// Ends the session and hands the stroke to the caller for commit or discard.
    pub fn finish(&mut self) -> Option<Stroke> {
        self.stroke.take()
    }
}
