//! Builds an insole shell, drags the toe handle once and prints mesh stats.
//!
//! Usage:
//! ```text
//! cargo run --example shell_dump                       # built-in outline
//! cargo run --example shell_dump -- path/to/foot.json  # contour source file
//! ```

use soleform::handles::HandleId;
use soleform::interaction::InteractionEvent;
use soleform::math::{Point3, Vector3};
use soleform::view::PerspectiveCamera;
use soleform::{EditorSession, Result};
use tracing::{info, warn};

const SAMPLE_CONTOUR: &str = r#"{
    "outPoints": [
        {"x": -30, "y": -120}, {"x": 0, "y": -128}, {"x": 30, "y": -120},
        {"x": 42, "y": -40}, {"x": 48, "y": 40}, {"x": 40, "y": 110},
        {"x": 10, "y": 130}, {"x": -25, "y": 118}, {"x": -42, "y": 60},
        {"x": -38, "y": -40}
    ],
    "inPoints": [
        {"x": -20, "y": -100}, {"x": 20, "y": -100},
        {"x": 30, "y": 90}, {"x": -15, "y": 100}
    ],
    "l": 258,
    "w": 90
}"#;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for soleform.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("shell_dump=info".parse().unwrap_or_default())
        .add_directive("soleform=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut session = EditorSession::with_defaults();
    match std::env::args().nth(1) {
        Some(path) => session.load_contour_file(path)?,
        None => session.load_contour_json(SAMPLE_CONTOUR)?,
    }
    report(&session, "initial");

    // Top-down view so the drag plane is the handle plane.
    *session.camera_mut() = PerspectiveCamera {
        position: Point3::new(0.0, 6.0, 0.0),
        target: Point3::origin(),
        up: -Vector3::z(),
        ..PerspectiveCamera::default()
    };

    let Some(toe) = session.handles().map(|h| h.get(HandleId::Toe).current_position) else {
        warn!("contour too small for handles");
        return Ok(());
    };
    let start = session.camera().project(&toe)?;
    if session.pointer_down(&start) == InteractionEvent::None {
        warn!("toe handle not under the pointer");
        return Ok(());
    }
    let grab = session
        .controller()
        .drag_session()
        .map_or(toe, |d| *d.plane.origin());
    let end = session.camera().project(&(grab - Vector3::z() * 0.2))?;
    session.pointer_move(&end);
    if let InteractionEvent::Commit { handle, delta } = session.pointer_up() {
        info!(%handle, dz = delta.z, "drag committed");
    }
    report(&session, "after toe drag");

    session.update_params(|p| p.set_heel_thickness(40.0));
    session.tick(1.0 / 60.0);
    report(&session, "thicker heel");
    Ok(())
}

fn report(session: &EditorSession, label: &str) {
    let shell = session.shell();
    let bounds = session.contour().and_then(soleform::contour::ContourModel::bounds);
    info!(
        label,
        vertices = shell.vertex_count(),
        triangles = shell.triangle_count(),
        live_nodes = session.scene().live_count(),
        ?bounds,
        "shell"
    );
}
