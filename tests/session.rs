use artplay::Config;
use artplay::draw::{Color, GeometryBuilder, PhysicsState, StrokeId};
use artplay::engine::{HeadlessEngine, MeshBackend};
use artplay::input::{
    ControllerPose, CoreEvent, FrameInput, InputState, InteractionMode,
};
use artplay::physics::{PhysicsAttachments, PhysicsKind};
use glam::Vec3;

fn session() -> InputState<HeadlessEngine> {
    InputState::from_config(HeadlessEngine::new(), &Config::default()).unwrap()
}

fn frame(now: f64, pose: ControllerPose) -> FrameInput {
    FrameInput {
        dt: 1.0 / 60.0,
        now,
        controller: Some(pose),
        camera_forward: Vec3::NEG_Z,
    }
}

fn commit_segment(state: &mut InputState<HeadlessEngine>, from: Vec3, to: Vec3) {
    assert!(state.begin_stroke(from));
    assert!(state.add_point(to).unwrap());
    state.end_stroke().unwrap();
}

/// Grips the stroke in front of the controller, moves it, and lets go.
fn throw_with_grip(state: &mut InputState<HeadlessEngine>) -> Vec<CoreEvent> {
    let pose = |p: Vec3| ControllerPose::new(p, Vec3::NEG_Z);
    state.on_grip(true, pose(Vec3::new(0.0, 1.0, 1.0))).unwrap();
    assert!(state.held_stroke().is_some());

    // One sideways sample, then four samples of (0, 0, 0.5)
    let path = [
        Vec3::new(0.3, 1.0, 1.0),
        Vec3::new(0.3, 1.0, 1.5),
        Vec3::new(0.3, 1.0, 2.0),
        Vec3::new(0.3, 1.0, 2.5),
        Vec3::new(0.3, 1.0, 3.0),
    ];
    for (i, p) in path.into_iter().enumerate() {
        state.tick(frame(i as f64 * 0.016, pose(p))).unwrap();
    }
    state.on_grip(false, pose(Vec3::new(0.3, 1.0, 3.0))).unwrap();
    state.take_events()
}

#[test]
fn scenario_a_resampled_stroke_commits_static() {
    let mut state = session();
    assert!(state.begin_stroke(Vec3::ZERO));
    for z in [0.02, 0.05, 0.11] {
        assert!(state.add_point(Vec3::new(0.0, 0.0, z)).unwrap());
    }
    state.end_stroke().unwrap();

    let stroke = state.store().get(StrokeId(1)).unwrap();
    assert_eq!(stroke.points().len(), 4);
    assert_eq!(stroke.physics, PhysicsState::Static);
    let (desc, _) = state
        .engine()
        .body_state(stroke.geometry().unwrap())
        .unwrap();
    assert_eq!(desc.mass, 0.0);
}

#[test]
fn scenario_b_short_stroke_is_discarded() {
    let mut state = session();
    assert!(state.begin_stroke(Vec3::ZERO));
    assert!(!state.add_point(Vec3::new(0.0, 0.0, 0.005)).unwrap());
    assert_eq!(state.authoring_stroke().unwrap().points().len(), 1);
    state.end_stroke().unwrap();

    assert!(state.store().is_empty());
    assert_eq!(state.take_events(), vec![CoreEvent::StrokeDiscarded]);
    assert_eq!(state.engine().live_meshes(), 0);
}

#[test]
fn scenario_c_store_stays_bounded_at_one_hundred() {
    let mut state = session();
    for i in 0..100 {
        let x = i as f32;
        commit_segment(&mut state, Vec3::new(x, 0.0, 0.0), Vec3::new(x, 0.5, 0.0));
    }
    assert_eq!(state.store().len(), 100);
    state.take_events();

    commit_segment(&mut state, Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 2.5, 0.0));
    assert_eq!(state.store().len(), 100);
    assert_eq!(state.store().ids().first(), Some(&StrokeId(2)));
    assert_eq!(state.store().ids().last(), Some(&StrokeId(101)));
    assert_eq!(
        state.take_events(),
        vec![
            CoreEvent::StrokeEvicted(StrokeId(1)),
            CoreEvent::StrokeCommitted(StrokeId(101)),
        ]
    );
    assert_eq!(state.engine().live_meshes(), 100);
    assert_eq!(state.engine().live_bodies(), 100);
}

#[test]
fn scenario_d_fast_release_throws_dynamic() {
    let mut state = session();
    commit_segment(&mut state, Vec3::new(-0.2, 1.0, 0.0), Vec3::new(0.2, 1.0, 0.0));
    state.set_mode(InteractionMode::Grab).unwrap();
    state.take_events();

    let events = throw_with_grip(&mut state);
    let Some(CoreEvent::StrokeReleased { id, velocity }) = events.last().copied() else {
        panic!("expected a release, got {events:?}");
    };
    assert!((velocity - Vec3::new(0.0, 0.0, 100.0)).length() < 1e-3);
    assert!((velocity.length() - 100.0).abs() < 1e-3);

    let geometry = state.store().get(id).unwrap().geometry().unwrap();
    let (desc, applied) = state.engine().body_state(geometry).unwrap();
    assert!(desc.mass > 0.0);
    assert_eq!(applied, velocity);
}

#[test]
fn scenario_e_release_without_physics_on_drop_stays_static() {
    let mut state = session();
    commit_segment(&mut state, Vec3::new(-0.2, 1.0, 0.0), Vec3::new(0.2, 1.0, 0.0));
    state.set_physics_on_drop(false);
    state.set_mode(InteractionMode::Grab).unwrap();

    throw_with_grip(&mut state);
    let stroke = state.store().get(StrokeId(1)).unwrap();
    assert_eq!(stroke.physics, PhysicsState::Static);
    let (desc, _) = state
        .engine()
        .body_state(stroke.geometry().unwrap())
        .unwrap();
    assert_eq!(desc.mass, 0.0);
}

#[test]
fn undo_is_inverse_of_commit() {
    let mut state = session();
    commit_segment(&mut state, Vec3::ZERO, Vec3::X);
    let before = state.store().ids();
    let (meshes, bodies) = (state.engine().live_meshes(), state.engine().live_bodies());

    commit_segment(&mut state, Vec3::Y, Vec3::ONE);
    state.undo().unwrap();

    assert_eq!(state.store().ids(), before);
    assert_eq!(state.engine().live_meshes(), meshes);
    assert_eq!(state.engine().live_bodies(), bodies);
}

#[test]
fn authoring_and_grab_are_mutually_exclusive() {
    let mut state = session();
    commit_segment(&mut state, Vec3::new(-0.2, 1.0, 0.0), Vec3::new(0.2, 1.0, 0.0));

    // Drawing: grip does nothing
    assert!(state.begin_stroke(Vec3::new(0.0, 2.0, 0.0)));
    state
        .on_grip(true, ControllerPose::new(Vec3::new(0.0, 1.0, 1.0), Vec3::NEG_Z))
        .unwrap();
    assert_eq!(state.held_stroke(), None);

    // Holding: drawing cannot start
    state.set_mode(InteractionMode::Grab).unwrap();
    state
        .on_grip(true, ControllerPose::new(Vec3::new(0.0, 1.0, 1.0), Vec3::NEG_Z))
        .unwrap();
    assert!(state.held_stroke().is_some());
    assert!(!state.begin_stroke(Vec3::ZERO));
    assert!(!state.is_authoring());
}

#[test]
fn repeated_attach_keeps_one_body() {
    let mut engine = HeadlessEngine::new();
    let mut attachments = PhysicsAttachments::default();
    let geometry = GeometryBuilder::default()
        .build(&mut engine, &[Vec3::ZERO, Vec3::X], Color::WHITE, 0.05)
        .unwrap()
        .unwrap();

    attachments
        .attach(&mut engine, geometry, PhysicsKind::Static)
        .unwrap();
    attachments
        .attach(&mut engine, geometry, PhysicsKind::Dynamic { mass: 0.15 })
        .unwrap();
    attachments
        .attach(&mut engine, geometry, PhysicsKind::Static)
        .unwrap();

    assert_eq!(engine.bodies_for(geometry), 1);
    assert_eq!(attachments.attachment_count(), 1);
    assert!(engine.contains_mesh(geometry));
    assert_eq!(engine.translation(geometry), Some(Vec3::ZERO));
}

#[test]
fn thrown_stroke_falls_and_scores_once() {
    let mut config = Config::default();
    config.score.enabled = true;
    config.score.center = [0.0, 0.2, 0.0];
    config.score.radius = 0.5;
    let mut state = InputState::from_config(HeadlessEngine::new(), &config).unwrap();

    commit_segment(&mut state, Vec3::new(-0.2, 1.0, 0.0), Vec3::new(0.2, 1.0, 0.0));
    state.set_mode(InteractionMode::Grab).unwrap();
    let pose = |y: f32| ControllerPose::new(Vec3::new(0.0, y, 1.0), Vec3::NEG_Z);
    state.on_grip(true, pose(1.0)).unwrap();
    for i in 1..=4 {
        state
            .tick(frame(i as f64 * 0.016, pose(1.0 - 0.01 * i as f32)))
            .unwrap();
    }
    state.on_grip(false, pose(0.96)).unwrap();
    state.take_events();

    let gravity = Vec3::from_array(config.physics.gravity);
    let mut scored = Vec::new();
    for i in 0..180 {
        state.engine_mut().step(1.0 / 60.0, gravity, 0.0);
        let output = state
            .tick(FrameInput {
                dt: 1.0 / 60.0,
                now: 1.0 + i as f64 / 60.0,
                controller: None,
                camera_forward: Vec3::NEG_Z,
            })
            .unwrap();
        assert_eq!(output.locomotion, Vec3::ZERO);
        scored.extend(state.take_events());
    }
    assert_eq!(scored, vec![CoreEvent::Scored(StrokeId(1))]);
}
