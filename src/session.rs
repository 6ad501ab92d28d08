//! The editor session: sole owner of the current contour version, shell
//! parameters, handles and the scene resources built from them.
//!
//! Events are handled one at a time on the caller's thread. A committed drag
//! rebuilds the shell inside the pointer-up handler; parameter edits only
//! bump a version token, and the next [`tick`](EditorSession::tick) rebuilds
//! when the token differs from the one the current shell was built for.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::contour::{ContourData, ContourModel, LoadContour};
use crate::error::Result;
use crate::handles::{HandleId, HandleSet};
use crate::interaction::{HandleState, InteractionController, InteractionEvent};
use crate::math::{Point2, Vector3};
use crate::operations::Deform;
use crate::params::{EditorConfig, MeshParameters};
use crate::scene::{
    NodeId, SceneNode, SceneSink, SceneStore, DEFAULT_SHELL_COLOR, HANDLE_DRAG_COLOR,
    HANDLE_HOVER_COLOR, HANDLE_IDLE_COLOR, INNER_LINE_COLOR, OUTER_LINE_COLOR,
};
use crate::tessellation::{BuildShell, ContourLines, TriangleMesh};
use crate::view::{CameraMotion, MoveKey, PerspectiveCamera};

/// Whether the operator can interact, or an external generation step is
/// running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Interactive,
    /// Handle picking and camera motion are suspended.
    Generating,
}

/// Version pair a shell was built from.
type BuildToken = (u64, u64);

/// Scene nodes currently owned by the session.
#[derive(Debug, Default)]
struct OwnedNodes {
    shell: Option<NodeId>,
    handles: Vec<(HandleId, NodeId)>,
    lines: Vec<NodeId>,
    reference: Option<NodeId>,
}

/// Interactive insole editor.
pub struct EditorSession<S: SceneSink = SceneStore> {
    config: EditorConfig,
    params: MeshParameters,
    contour: Option<ContourModel>,
    contour_version: u64,
    params_version: u64,
    built: Option<BuildToken>,
    shell: TriangleMesh,
    handles: Option<HandleSet>,
    controller: InteractionController,
    camera: PerspectiveCamera,
    motion: CameraMotion,
    mode: EditorMode,
    scene: S,
    nodes: OwnedNodes,
}

impl<S: SceneSink> EditorSession<S> {
    /// Creates a session with no contour loaded.
    #[must_use]
    pub fn new(config: EditorConfig, params: MeshParameters, scene: S) -> Self {
        let controller = InteractionController::new(config.handle_radius);
        Self {
            config,
            params,
            contour: None,
            contour_version: 0,
            params_version: 0,
            built: None,
            shell: TriangleMesh::default(),
            handles: None,
            controller,
            camera: PerspectiveCamera::default(),
            motion: CameraMotion::default(),
            mode: EditorMode::Interactive,
            scene,
            nodes: OwnedNodes::default(),
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn params(&self) -> &MeshParameters {
        &self.params
    }

    #[must_use]
    pub fn contour(&self) -> Option<&ContourModel> {
        self.contour.as_ref()
    }

    /// Number of contour versions adopted so far.
    #[must_use]
    pub fn contour_version(&self) -> u64 {
        self.contour_version
    }

    /// Number of parameter edits so far.
    #[must_use]
    pub fn params_version(&self) -> u64 {
        self.params_version
    }

    /// The current shell. Stale after a parameter edit until the next tick.
    #[must_use]
    pub fn shell(&self) -> &TriangleMesh {
        &self.shell
    }

    #[must_use]
    pub fn handles(&self) -> Option<&HandleSet> {
        self.handles.as_ref()
    }

    #[must_use]
    pub fn handle_state(&self, id: HandleId) -> HandleState {
        self.controller.state(id)
    }

    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Whether the host should let pointer input orbit the camera.
    #[must_use]
    pub fn camera_input_enabled(&self) -> bool {
        self.mode == EditorMode::Interactive && !self.controller.is_dragging()
    }

    #[must_use]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Scene node holding the current shell, if one is built.
    #[must_use]
    pub fn shell_node(&self) -> Option<NodeId> {
        self.nodes.shell
    }

    /// Scene node of a handle marker.
    #[must_use]
    pub fn handle_node(&self, id: HandleId) -> Option<NodeId> {
        self.nodes
            .handles
            .iter()
            .find_map(|&(hid, node)| (hid == id).then_some(node))
    }

    // --- Contour versions ---

    /// Adopts a contour as the current version and rebuilds everything
    /// derived from it.
    pub fn load_contour(&mut self, contour: ContourModel) {
        info!(
            outer = contour.outer().len(),
            inner = contour.inner().len(),
            "adopting contour"
        );
        self.adopt(contour);
    }

    /// Parses the contour source format and adopts it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed. The session is left as it
    /// was.
    pub fn load_contour_json(&mut self, json: &str) -> Result<()> {
        let data = ContourData::from_json(json).inspect_err(|e| {
            warn!("error loading contour data: {e}");
        })?;
        self.load_contour(ContourModel::from(data));
        Ok(())
    }

    /// Loads a contour file and adopts it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. The session is
    /// left as it was.
    pub fn load_contour_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let contour = LoadContour::new(path).execute().inspect_err(|e| {
            warn!("error loading contour file: {e}");
        })?;
        self.adopt(contour);
        Ok(())
    }

    fn adopt(&mut self, contour: ContourModel) {
        self.contour = Some(contour);
        self.contour_version += 1;
        self.controller.reset();
        self.rebuild_shell();
        self.rebuild_handles();
        self.rebuild_lines();
    }

    // --- Parameters ---

    /// Replaces the shell parameters. The shell is rebuilt on the next tick;
    /// the contour and handles are untouched.
    pub fn set_params(&mut self, params: MeshParameters) {
        if params != self.params {
            self.params = params;
            self.params_version += 1;
        }
    }

    /// Edits the shell parameters in place; see [`set_params`](Self::set_params).
    pub fn update_params(&mut self, edit: impl FnOnce(&mut MeshParameters)) {
        let mut params = self.params.clone();
        edit(&mut params);
        self.set_params(params);
    }

    // --- Pointer and keyboard input ---

    /// Pointer moved to `ndc` (normalized device coordinates).
    pub fn pointer_move(&mut self, ndc: &Point2) -> InteractionEvent {
        let Some(handles) = self.handles.as_mut() else {
            return InteractionEvent::None;
        };
        let event = self.controller.pointer_move(&self.camera, ndc, handles);
        self.sync_handle_nodes();
        event
    }

    /// Pointer pressed at `ndc`. A second press while a drag is open is
    /// ignored.
    pub fn pointer_down(&mut self, ndc: &Point2) -> InteractionEvent {
        let Some(handles) = self.handles.as_ref() else {
            warn!("picking ignored: no contour loaded");
            return InteractionEvent::None;
        };
        let event = match self.controller.pointer_down(&self.camera, ndc, handles) {
            Ok(event) => event,
            Err(e) => {
                debug!("pointer down rejected: {e}");
                InteractionEvent::None
            }
        };
        self.sync_handle_nodes();
        event
    }

    /// Pointer released. Commits the drag, if one is open, by deforming the
    /// contour and rebuilding shell and handles before returning.
    pub fn pointer_up(&mut self) -> InteractionEvent {
        let Some(handles) = self.handles.as_ref() else {
            return InteractionEvent::None;
        };
        let event = self.controller.pointer_up(handles);
        if let InteractionEvent::Commit { handle, delta } = event {
            self.commit(handle, delta);
        }
        event
    }

    pub fn key(&mut self, key: MoveKey, pressed: bool) {
        self.motion.set_key(key, pressed);
    }

    fn commit(&mut self, handle: HandleId, delta: Vector3) {
        let Some(contour) = self.contour.as_ref() else {
            warn!("contour not ready, dropping commit");
            self.sync_handle_nodes();
            return;
        };
        let next = Deform::new(handle, delta, self.config.unit_scale).execute(contour);
        info!(%handle, dx = delta.x, dz = delta.z, "committing deformation");
        self.adopt(next);
    }

    // --- Frame loop ---

    /// Requests or ends the external generation mode. Takes effect at the
    /// next tick.
    pub fn set_generating(&mut self, generating: bool) {
        self.mode = if generating {
            EditorMode::Generating
        } else {
            EditorMode::Interactive
        };
    }

    /// Per-frame update. Applies the current mode, integrates camera motion
    /// when interactive, and rebuilds the shell if the parameter token moved.
    ///
    /// Returns `true` if the shell was rebuilt.
    pub fn tick(&mut self, dt: f64) -> bool {
        let interactive = self.mode == EditorMode::Interactive;
        if self.controller.picking_enabled() != interactive {
            self.controller.set_picking_enabled(interactive);
            self.sync_handle_nodes();
        }
        if interactive {
            self.motion.integrate(
                &mut self.camera,
                dt,
                self.config.move_speed,
                self.config.move_damping,
            );
        }

        if self.contour.is_some() && self.built != Some(self.token()) {
            self.rebuild_shell();
            self.apply_line_visibility();
            return true;
        }
        false
    }

    // --- Reference mesh ---

    /// Replaces the imported reference mesh, releasing the previous one.
    pub fn set_reference_mesh(&mut self, mesh: Option<TriangleMesh>) {
        if let Some(old) = self.nodes.reference.take() {
            self.release(old);
        }
        self.nodes.reference = mesh.map(|mesh| self.scene.insert(SceneNode::Reference { mesh }));
    }

    // --- Scene bookkeeping ---

    fn token(&self) -> BuildToken {
        (self.contour_version, self.params_version)
    }

    fn rebuild_shell(&mut self) {
        let Some(contour) = self.contour.as_ref() else {
            return;
        };
        self.shell = BuildShell::new(&self.params, self.config.unit_scale).execute(contour);
        self.built = Some(self.token());

        if let Some(old) = self.nodes.shell.take() {
            self.release(old);
        }
        let node = SceneNode::Shell {
            mesh: self.shell.clone(),
            color: self.params.surface_rgb().unwrap_or(DEFAULT_SHELL_COLOR),
            wireframe: self.params.wireframe_enabled,
        };
        self.nodes.shell = Some(self.scene.insert(node));
    }

    fn rebuild_handles(&mut self) {
        for (_, old) in std::mem::take(&mut self.nodes.handles) {
            self.release(old);
        }
        self.handles = self
            .contour
            .as_ref()
            .and_then(|c| HandleSet::derive(c, &self.config));
        let Some(handles) = self.handles.as_ref() else {
            return;
        };
        for handle in handles.iter() {
            let node = self.scene.insert(SceneNode::Handle {
                id: handle.id,
                position: handle.current_position,
                radius: self.config.handle_radius,
                color: HANDLE_IDLE_COLOR,
            });
            self.nodes.handles.push((handle.id, node));
        }
    }

    fn rebuild_lines(&mut self) {
        for old in std::mem::take(&mut self.nodes.lines) {
            self.release(old);
        }
        let Some(contour) = self.contour.as_ref() else {
            return;
        };
        let lines = ContourLines::trace(
            contour,
            self.config.unit_scale,
            self.config.contour_overlay_elevation,
        );
        let visible = self.params.contours_visible;
        let colored = [(lines.inner, INNER_LINE_COLOR), (lines.outer, OUTER_LINE_COLOR)];
        for (line, color) in colored {
            if let Some(line) = line {
                let node = self.scene.insert(SceneNode::ContourLine {
                    line,
                    color,
                    visible,
                });
                self.nodes.lines.push(node);
            }
        }
    }

    fn apply_line_visibility(&mut self) {
        let show = self.params.contours_visible;
        for &id in &self.nodes.lines {
            match self.scene.node_mut(id) {
                Ok(SceneNode::ContourLine { visible, .. }) => *visible = show,
                Ok(_) => {}
                Err(e) => warn!("contour overlay missing: {e}"),
            }
        }
    }

    fn sync_handle_nodes(&mut self) {
        let Some(handles) = self.handles.as_ref() else {
            return;
        };
        for &(id, node) in &self.nodes.handles {
            let target_color = match self.controller.state(id) {
                HandleState::Idle => HANDLE_IDLE_COLOR,
                HandleState::Hovered => HANDLE_HOVER_COLOR,
                HandleState::Dragging => HANDLE_DRAG_COLOR,
            };
            match self.scene.node_mut(node) {
                Ok(SceneNode::Handle {
                    position, color, ..
                }) => {
                    *position = handles.get(id).current_position;
                    *color = target_color;
                }
                Ok(_) => {}
                Err(e) => warn!(handle = %id, "handle marker missing: {e}"),
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        if let Err(e) = self.scene.dispose(id) {
            warn!("failed to release scene node: {e}");
        }
    }
}

impl EditorSession<SceneStore> {
    /// Creates a session with default configuration and an in-memory scene.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(
            EditorConfig::default(),
            MeshParameters::default(),
            SceneStore::new(),
        )
    }
}
