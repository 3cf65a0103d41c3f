//! Scripted headless session used by `artplay --demo`.
//!
//! Draws a few strokes on a vertical drawing plane, picks one up, flicks it
//! sideways, lets the headless physics settle it on the ground, then exercises
//! undo and clear. The report is printed by the binary and checked by the CLI
//! tests.

use std::fmt;

use anyhow::{Context, Result};
use glam::Vec3;

use crate::config::Config;
use crate::draw::StrokeId;
use crate::engine::{HeadlessEngine, MeshBackend, Ray};
use crate::input::{
    CoreEvent, FrameInput, InputState, InteractionMode, PointerButton, PointerSample,
};

/// Viewpoint the scripted pointer looks from.
const EYE: Vec3 = Vec3::new(0.0, 1.5, 3.0);
/// Physics runs at 60 Hz for this long after the throw.
const SETTLE_SECONDS: f32 = 3.0;
const FRAME: f32 = 1.0 / 60.0;

/// What happened during a demo run.
#[derive(Debug, Clone, Default)]
pub struct DemoReport {
    pub committed: usize,
    pub evicted: usize,
    pub discarded: usize,
    /// Stroke thrown and its launch velocity (zero when it was set down)
    pub thrown: Option<(StrokeId, Vec3)>,
    /// Where the thrown stroke's center ended up
    pub resting_center: Option<Vec3>,
    pub scored: usize,
    pub undone: Option<StrokeId>,
    /// Strokes left when the store was cleared
    pub cleared: usize,
    pub live_meshes: usize,
    pub live_bodies: usize,
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Committed {} strokes ({} evicted, {} discarded)",
            self.committed, self.evicted, self.discarded
        )?;
        match self.thrown {
            Some((id, velocity)) if velocity != Vec3::ZERO => writeln!(
                f,
                "Thrown stroke {} at {:.2} units/s",
                id.0,
                velocity.length()
            )?,
            Some((id, _)) => writeln!(f, "Set down stroke {} without throwing", id.0)?,
            None => writeln!(f, "Nothing was picked up")?,
        }
        if let Some(center) = self.resting_center {
            writeln!(
                f,
                "Came to rest at ({:.2}, {:.2}, {:.2})",
                center.x, center.y, center.z
            )?;
        }
        if self.scored > 0 {
            writeln!(f, "Scored {} times", self.scored)?;
        }
        if let Some(id) = self.undone {
            writeln!(f, "Undid stroke {}", id.0)?;
        }
        writeln!(f, "Cleared {} strokes", self.cleared)?;
        write!(
            f,
            "Live meshes: {}, live bodies: {}",
            self.live_meshes, self.live_bodies
        )
    }
}

fn surface(point: Vec3, timestamp: f64) -> PointerSample {
    PointerSample::new(Ray::new(EYE, point - EYE), Some(point), timestamp)
}

fn aim(target: Vec3, timestamp: f64) -> PointerSample {
    PointerSample::new(Ray::new(EYE, target - EYE), None, timestamp)
}

/// Drags the pointer along `points` on the drawing plane.
fn draw_path(
    state: &mut InputState<HeadlessEngine>,
    points: &[Vec3],
    clock: &mut f64,
) -> Result<()> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };
    state.on_pointer_press(PointerButton::Primary, &surface(*first, *clock));
    for point in rest {
        *clock += f64::from(FRAME);
        state.on_pointer_motion(&surface(*point, *clock))?;
    }
    state.on_pointer_release(PointerButton::Primary)?;
    Ok(())
}

/// Points along a horizontal arc on the `z = 0` plane.
fn arc(center: Vec3, radius: f32, samples: usize) -> Vec<Vec3> {
    (0..=samples)
        .map(|i| {
            let angle = std::f32::consts::PI * i as f32 / samples as f32;
            center + Vec3::new(radius * angle.cos(), radius * angle.sin() * 0.5, 0.0)
        })
        .collect()
}

fn tally(report: &mut DemoReport, events: Vec<CoreEvent>) {
    for event in events {
        log::debug!("Event: {:?}", event);
        match event {
            CoreEvent::StrokeCommitted(_) => report.committed += 1,
            CoreEvent::StrokeEvicted(_) => report.evicted += 1,
            CoreEvent::StrokeDiscarded => report.discarded += 1,
            CoreEvent::StrokeReleased { id, velocity } => report.thrown = Some((id, velocity)),
            CoreEvent::Scored(_) => report.scored += 1,
            CoreEvent::StrokeUndone(id) => report.undone = Some(id),
            CoreEvent::StrokeGrabbed(_) | CoreEvent::Cleared | CoreEvent::ModeChanged(_) => {}
        }
    }
}

/// Runs the scripted session against a fresh [`HeadlessEngine`].
pub fn run_demo(config: &Config) -> Result<DemoReport> {
    let mut state = InputState::from_config(HeadlessEngine::new(), config)
        .context("Failed to set up demo session")?;
    let mut report = DemoReport::default();
    let mut clock = 0.0_f64;

    // Three arcs side by side, then a stray click that is too short to keep
    for (i, x) in [-0.8_f32, 0.0, 0.8].into_iter().enumerate() {
        state.set_color(i + 1);
        draw_path(&mut state, &arc(Vec3::new(x, 1.5, 0.0), 0.25, 24), &mut clock)?;
    }
    draw_path(&mut state, &[Vec3::new(0.0, 0.5, 0.0)], &mut clock)?;
    tally(&mut report, state.take_events());

    // Pick up the newest stroke and flick it to the right
    state.set_mode(InteractionMode::Grab)?;
    let target = state
        .store()
        .iter()
        .last()
        .and_then(|stroke| stroke.geometry())
        .and_then(|geometry| state.engine().world_center(geometry))
        .context("Demo has no stroke to pick up")?;
    state.on_pointer_press(PointerButton::Primary, &aim(target, clock));
    let held = state.held_stroke();
    for step in 1..=6 {
        clock += f64::from(FRAME);
        let offset = Vec3::new(0.03 * step as f32, 0.01 * step as f32, 0.0);
        state.on_pointer_motion(&aim(target + offset, clock))?;
    }
    state.on_pointer_release(PointerButton::Primary)?;
    tally(&mut report, state.take_events());

    // Let the headless physics settle the throw
    let gravity = Vec3::from_array(config.physics.gravity);
    let frames = (SETTLE_SECONDS / FRAME).round() as usize;
    for _ in 0..frames {
        clock += f64::from(FRAME);
        state
            .engine_mut()
            .step(FRAME, gravity, config.physics.ground_height);
        state.tick(FrameInput {
            dt: FRAME,
            now: clock,
            controller: None,
            camera_forward: (target - EYE).normalize_or_zero(),
        })?;
    }
    tally(&mut report, state.take_events());

    report.resting_center = held
        .and_then(|id| state.store().get(id))
        .and_then(|stroke| stroke.geometry())
        .and_then(|geometry| state.engine().world_center(geometry));

    state.undo()?;
    tally(&mut report, state.take_events());

    report.cleared = state.store().len();
    state.clear_all()?;
    tally(&mut report, state.take_events());

    report.live_meshes = state.engine().live_meshes();
    report.live_bodies = state.engine().live_bodies();
    log::info!("Demo finished after {:.2}s of simulated time", clock);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_throws_and_cleans_up() {
        let report = run_demo(&Config::default()).unwrap();
        assert_eq!(report.committed, 3);
        assert_eq!(report.discarded, 1);

        let (_, velocity) = report.thrown.unwrap();
        assert!(velocity.length() > 1.0);
        let rest = report.resting_center.unwrap();
        assert!(rest.y < 1.0);

        assert_eq!(report.cleared, 2);
        assert_eq!(report.live_meshes, 0);
        assert_eq!(report.live_bodies, 0);
        assert!(report.to_string().contains("Thrown stroke"));
    }

    #[test]
    fn demo_respects_store_bound() {
        let mut config = Config::default();
        config.drawing.max_strokes = 2;
        let report = run_demo(&config).unwrap();
        assert_eq!(report.evicted, 1);
        assert_eq!(report.cleared, 1);
    }

    #[test]
    fn demo_without_physics_on_drop_sets_stroke_down() {
        let mut config = Config::default();
        config.throw.physics_on_drop = false;
        let report = run_demo(&config).unwrap();
        assert_eq!(report.thrown.unwrap().1, Vec3::ZERO);
        assert!(report.to_string().contains("Set down stroke"));
    }
}
