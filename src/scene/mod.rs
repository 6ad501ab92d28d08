//! Scene resources the core allocates in the external renderer's tree.
//!
//! The renderer owns the scene; the core only adds nodes, edits the ones it
//! added, and disposes them once superseded. [`SceneSink`] is that boundary,
//! and [`SceneStore`] is an in-memory implementation backed by an arena.

use slotmap::SlotMap;
use tracing::trace;

use crate::error::{Result, SceneError};
use crate::handles::HandleId;
use crate::math::Point3;
use crate::tessellation::{Polyline, TriangleMesh};

slotmap::new_key_type! {
    /// Unique identifier for a node the core placed in the scene.
    pub struct NodeId;
}

/// Handle colour when idle.
pub const HANDLE_IDLE_COLOR: u32 = 0xff_00_00;
/// Handle colour while hovered.
pub const HANDLE_HOVER_COLOR: u32 = 0xff_ff_00;
/// Handle colour while dragged.
pub const HANDLE_DRAG_COLOR: u32 = 0xff_aa_00;
/// Inner contour overlay colour.
pub const INNER_LINE_COLOR: u32 = 0xff_44_44;
/// Outer contour overlay colour.
pub const OUTER_LINE_COLOR: u32 = 0x44_44_ff;
/// Fallback shell colour when the configured one does not parse.
pub const DEFAULT_SHELL_COLOR: u32 = 0xe6_7e_22;

/// A renderable resource placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// The insole shell, in shell space.
    Shell {
        mesh: TriangleMesh,
        color: u32,
        wireframe: bool,
    },
    /// A handle marker sphere, in scene space.
    Handle {
        id: HandleId,
        position: Point3,
        radius: f64,
        color: u32,
    },
    /// A contour overlay line, in shell space.
    ContourLine {
        line: Polyline,
        color: u32,
        visible: bool,
    },
    /// An imported reference mesh unrelated to the editable shell.
    Reference { mesh: TriangleMesh },
}

/// The core's view of the external scene tree.
pub trait SceneSink {
    /// Adds a node and returns its ID.
    fn insert(&mut self, node: SceneNode) -> NodeId;

    /// Removes a node and releases its geometry and material.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if the ID is not live.
    fn dispose(&mut self, id: NodeId) -> Result<SceneNode>;

    /// Returns a mutable reference to a live node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if the ID is not live.
    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode>;
}

/// Arena-backed scene that counts disposals, so leaks are observable.
#[derive(Debug, Default)]
pub struct SceneStore {
    nodes: SlotMap<NodeId, SceneNode>,
    disposed: usize,
}

impl SceneStore {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to a live node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NodeNotFound`] if the ID is not live.
    pub fn node(&self, id: NodeId) -> Result<&SceneNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| SceneError::NodeNotFound(format!("{id:?}")).into())
    }

    /// Number of live nodes.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes disposed so far.
    #[must_use]
    pub fn disposed_count(&self) -> usize {
        self.disposed
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter()
    }
}

impl SceneSink for SceneStore {
    fn insert(&mut self, node: SceneNode) -> NodeId {
        self.nodes.insert(node)
    }

    fn dispose(&mut self, id: NodeId) -> Result<SceneNode> {
        let node = self
            .nodes
            .remove(id)
            .ok_or_else(|| SceneError::NodeNotFound(format!("{id:?}")))?;
        self.disposed += 1;
        trace!(?id, "disposed scene node");
        Ok(node)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| SceneError::NodeNotFound(format!("{id:?}")).into())
    }
}
