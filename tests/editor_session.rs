//! End-to-end editing loop: load, pick, drag, commit, rebuild.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use approx::assert_relative_eq;
use soleform::contour::ContourModel;
use soleform::handles::{to_planform, HandleId};
use soleform::interaction::{HandleState, InteractionEvent};
use soleform::math::{Point2, Point3, Vector3};
use soleform::scene::SceneNode;
use soleform::view::PerspectiveCamera;
use soleform::EditorSession;

fn square() -> ContourModel {
    ContourModel::new(
        vec![
            Point2::new(-50.0, -50.0),
            Point2::new(50.0, -50.0),
            Point2::new(50.0, 50.0),
            Point2::new(-50.0, 50.0),
        ],
        vec![],
    )
}

/// Session with the camera looking straight down, toe towards screen top.
fn top_down_session() -> EditorSession {
    let mut session = EditorSession::with_defaults();
    *session.camera_mut() = PerspectiveCamera {
        position: Point3::new(0.0, 5.0, 0.0),
        target: Point3::origin(),
        up: -Vector3::z(),
        fov_y: 45.0,
        aspect: 1.0,
    };
    session.load_contour(square());
    session
}

fn handle_ndc(session: &EditorSession, id: HandleId) -> Point2 {
    let p = session.handles().unwrap().get(id).current_position;
    session.camera().project(&p).unwrap()
}

/// Drags `id` so that its grab point moves by `delta` in scene space.
fn drag_by(session: &mut EditorSession, id: HandleId, delta: Vector3) -> InteractionEvent {
    let start = handle_ndc(session, id);
    assert_eq!(session.pointer_down(&start), InteractionEvent::DragStarted(id));
    let grab = *session.controller().drag_session().unwrap().plane.origin();
    let end = session.camera().project(&(grab + delta)).unwrap();
    session.pointer_move(&end);
    session.pointer_up()
}

#[test]
fn square_handles_are_derived_on_bounds() {
    let session = top_down_session();
    let config = session.config().clone();
    let handles = session.handles().unwrap();
    let at = |id| to_planform(&handles.get(id).current_position, &config);
    assert_relative_eq!(at(HandleId::Toe), Point2::new(0.0, 50.0), epsilon = 1e-9);
    assert_relative_eq!(at(HandleId::Heel), Point2::new(0.0, -50.0), epsilon = 1e-9);
    assert_relative_eq!(at(HandleId::Left), Point2::new(-50.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(at(HandleId::Right), Point2::new(50.0, 0.0), epsilon = 1e-9);
}

#[test]
fn toe_drag_stretches_front_half() {
    let mut session = top_down_session();
    let before = session.contour().unwrap().clone();
    let scale = session.config().unit_scale;

    let event = drag_by(&mut session, HandleId::Toe, Vector3::new(0.0, 0.0, -10.0 * scale));
    match event {
        InteractionEvent::Commit { handle, delta } => {
            assert_eq!(handle, HandleId::Toe);
            assert_relative_eq!(-delta.z / scale, 10.0, epsilon = 1e-6);
        }
        other => panic!("expected commit, got {other:?}"),
    }

    let after = session.contour().unwrap();
    assert_eq!(session.contour_version(), 2);
    for (old, new) in before.outer().iter().zip(after.outer()) {
        assert_eq!(new.x, old.x);
        if old.y >= 0.0 {
            assert_relative_eq!(new.y, old.y + 10.0 * old.y / 50.0, epsilon = 1e-6);
        } else {
            assert_eq!(new.y, old.y);
        }
    }

    // shell and handles follow the new version
    assert_eq!(session.shell().vertex_count(), 10);
    let toe = session.handles().unwrap().get(HandleId::Toe);
    assert_eq!(toe.current_position, toe.original_position);
    let toe_y = to_planform(&toe.current_position, session.config()).y;
    assert_relative_eq!(toe_y, 60.0, epsilon = 1e-6);
    assert_eq!(session.handle_state(HandleId::Toe), HandleState::Idle);
}

#[test]
fn click_without_move_commits_identity() {
    let mut session = top_down_session();
    let before = session.contour().unwrap().clone();
    let start = handle_ndc(&session, HandleId::Right);
    session.pointer_down(&start);
    let event = session.pointer_up();
    assert_eq!(
        event,
        InteractionEvent::Commit {
            handle: HandleId::Right,
            delta: Vector3::zeros()
        }
    );
    assert_eq!(session.contour().unwrap(), &before);
}

#[test]
fn only_one_drag_at_a_time() {
    let mut session = top_down_session();
    let toe = handle_ndc(&session, HandleId::Toe);
    let heel = handle_ndc(&session, HandleId::Heel);
    session.pointer_down(&toe);
    assert_eq!(session.pointer_down(&heel), InteractionEvent::None);

    let dragging: Vec<HandleId> = HandleId::ALL
        .into_iter()
        .filter(|&id| session.handle_state(id) == HandleState::Dragging)
        .collect();
    assert_eq!(dragging, vec![HandleId::Toe]);

    session.pointer_up();
    assert!(HandleId::ALL
        .iter()
        .all(|&id| session.handle_state(id) != HandleState::Dragging));
}

#[test]
fn handle_marker_follows_drag_before_commit() {
    let mut session = top_down_session();
    let start = handle_ndc(&session, HandleId::Left);
    session.pointer_down(&start);
    let grab = *session.controller().drag_session().unwrap().plane.origin();
    let end = session
        .camera()
        .project(&(grab + Vector3::new(-0.1, 0.0, 0.0)))
        .unwrap();
    session.pointer_move(&end);

    // contour untouched until release
    assert_eq!(session.contour_version(), 1);
    let node = session.handle_node(HandleId::Left).unwrap();
    match session.scene().node(node).unwrap() {
        SceneNode::Handle { position, .. } => assert_relative_eq!(position.x, -0.6, epsilon = 1e-6),
        other => panic!("expected handle node, got {other:?}"),
    }

    session.pointer_up();
    let b = session.contour().unwrap().bounds().unwrap();
    assert_relative_eq!(b.min_x, -60.0, epsilon = 1e-6);
    assert_relative_eq!(b.max_x, 50.0, epsilon = 1e-9);
}

#[test]
fn commit_releases_superseded_resources() {
    let mut session = top_down_session();
    let live = session.scene().live_count();
    drag_by(&mut session, HandleId::Heel, Vector3::new(0.0, 0.0, 0.05));
    assert_eq!(session.scene().live_count(), live);
    assert_eq!(session.scene().disposed_count(), live);
}

#[test]
fn loads_contour_file() {
    let path = std::env::temp_dir().join("soleform_editor_session_contour.json");
    std::fs::write(
        &path,
        r#"{"outPoints":[{"x":-40,"y":-100},{"x":40,"y":-100},{"x":30,"y":120}],"inPoints":[],"l":220,"w":80}"#,
    )
    .unwrap();
    let mut session = EditorSession::with_defaults();
    session.load_contour_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(session.shell().triangle_count(), 12);
    assert_eq!(session.contour().unwrap().length_hint(), Some(220.0));
}
