use tracing::{debug, info, warn};

use crate::error::{InteractionError, Result};
use crate::geometry::{Plane, Ray};
use crate::handles::{HandleId, HandleSet};
use crate::math::intersect_3d::ray_plane_intersect;
use crate::math::{Point2, Vector3};
use crate::view::RayCaster;

use super::picking::pick_handle;

/// Interaction state of a single handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleState {
    #[default]
    Idle,
    Hovered,
    Dragging,
}

/// Pointer cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// A handle is under the pointer.
    Pointer,
}

/// The live drag of one handle, from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub handle: HandleId,
    /// Plane through the pick point facing the viewer.
    pub plane: Plane,
    /// Pick point minus handle position at grab time.
    pub grab_offset: Vector3,
}

/// What a pointer event changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    /// Nothing changed.
    None,
    /// The hovered handle changed.
    HoverChanged {
        previous: Option<HandleId>,
        current: Option<HandleId>,
    },
    /// A drag session was opened on the handle.
    DragStarted(HandleId),
    /// The dragged handle was repositioned.
    DragMoved(HandleId),
    /// The drag was released; the displacement must be committed.
    Commit { handle: HandleId, delta: Vector3 },
}

/// Hover, selection and drag state machine for the four handles.
///
/// At most one handle is hovered and at most one is dragged; both facts are
/// held as single optional values so the per-handle states can never
/// disagree.
#[derive(Debug, Clone)]
pub struct InteractionController {
    hovered: Option<HandleId>,
    drag: Option<DragSession>,
    picking_enabled: bool,
    pick_radius: f64,
}

impl InteractionController {
    /// Creates a controller picking against spheres of `pick_radius`.
    #[must_use]
    pub fn new(pick_radius: f64) -> Self {
        Self {
            hovered: None,
            drag: None,
            picking_enabled: true,
            pick_radius,
        }
    }

    /// Current state of one handle.
    #[must_use]
    pub fn state(&self, id: HandleId) -> HandleState {
        if self.drag.is_some_and(|d| d.handle == id) {
            HandleState::Dragging
        } else if self.hovered == Some(id) {
            HandleState::Hovered
        } else {
            HandleState::Idle
        }
    }

    #[must_use]
    pub fn hovered(&self) -> Option<HandleId> {
        self.hovered
    }

    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        if self.hovered.is_some() {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        }
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn picking_enabled(&self) -> bool {
        self.picking_enabled
    }

    /// Enables or disables picking. Disabling clears any hover; an open drag
    /// is left to finish on release.
    pub fn set_picking_enabled(&mut self, enabled: bool) -> InteractionEvent {
        self.picking_enabled = enabled;
        if enabled {
            InteractionEvent::None
        } else {
            self.set_hovered(None)
        }
    }

    /// Drops hover and any open drag without committing. Used when a new
    /// handle set replaces the old one.
    pub fn reset(&mut self) {
        self.hovered = None;
        self.drag = None;
    }

    /// Pointer moved to `ndc`.
    ///
    /// While dragging, the handle follows the ray's intersection with the
    /// drag plane and hover is frozen. Otherwise hover tracks the nearest
    /// handle under the pointer.
    pub fn pointer_move<C: RayCaster>(
        &mut self,
        caster: &C,
        ndc: &Point2,
        handles: &mut HandleSet,
    ) -> InteractionEvent {
        let Some(ray) = cast(caster, ndc) else {
            return InteractionEvent::None;
        };

        if let Some(session) = self.drag {
            return match ray_plane_intersect(&ray, &session.plane).point(&ray) {
                Some(hit) => {
                    handles.set_current_position(session.handle, hit - session.grab_offset);
                    InteractionEvent::DragMoved(session.handle)
                }
                None => InteractionEvent::None,
            };
        }

        if !self.picking_enabled {
            return InteractionEvent::None;
        }
        let hit = pick_handle(&ray, handles, self.pick_radius).map(|h| h.handle);
        self.set_hovered(hit)
    }

    /// Pointer pressed at `ndc`. Opens a drag session on the nearest handle
    /// under the pointer; a miss changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::DragInProgress`] if a drag is already
    /// open. The existing session is left untouched.
    pub fn pointer_down<C: RayCaster>(
        &mut self,
        caster: &C,
        ndc: &Point2,
        handles: &HandleSet,
    ) -> Result<InteractionEvent> {
        if let Some(session) = self.drag {
            return Err(InteractionError::DragInProgress(session.handle.name()).into());
        }
        if !self.picking_enabled {
            return Ok(InteractionEvent::None);
        }
        let Some(ray) = cast(caster, ndc) else {
            return Ok(InteractionEvent::None);
        };
        let Some(hit) = pick_handle(&ray, handles, self.pick_radius) else {
            return Ok(InteractionEvent::None);
        };

        let plane = Plane::from_normal_and_point(-caster.view_direction(), hit.point)?;
        let grab_offset = hit.point - handles.get(hit.handle).current_position;
        self.hovered = None;
        self.drag = Some(DragSession {
            handle: hit.handle,
            plane,
            grab_offset,
        });
        info!(handle = %hit.handle, "selected handle");
        Ok(InteractionEvent::DragStarted(hit.handle))
    }

    /// Pointer released. Closes the drag session, if any, and reports the
    /// handle's accumulated displacement for commit.
    pub fn pointer_up(&mut self, handles: &HandleSet) -> InteractionEvent {
        let Some(session) = self.drag.take() else {
            return InteractionEvent::None;
        };
        let delta = handles.get(session.handle).displacement();
        debug!(handle = %session.handle, ?delta, "released handle");
        InteractionEvent::Commit {
            handle: session.handle,
            delta,
        }
    }

    fn set_hovered(&mut self, current: Option<HandleId>) -> InteractionEvent {
        if self.hovered == current {
            return InteractionEvent::None;
        }
        let previous = std::mem::replace(&mut self.hovered, current);
        InteractionEvent::HoverChanged { previous, current }
    }
}

fn cast<C: RayCaster>(caster: &C, ndc: &Point2) -> Option<Ray> {
    match caster.cast(ndc) {
        Ok(ray) => Some(ray),
        Err(e) => {
            warn!("cannot cast pick ray: {e}");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::contour::ContourModel;
    use crate::math::Point3;
    use crate::params::EditorConfig;
    use crate::SoleformError;
    use approx::assert_relative_eq;

    /// Orthographic caster looking straight down; NDC maps 1:1 to scene XZ.
    struct TopDown;

    impl RayCaster for TopDown {
        fn cast(&self, ndc: &Point2) -> Result<Ray> {
            Ray::new(Point3::new(ndc.x, 5.0, -ndc.y), -Vector3::y())
        }

        fn view_direction(&self) -> Vector3 {
            -Vector3::y()
        }
    }

    fn handles() -> HandleSet {
        let contour = ContourModel::new(
            vec![
                Point2::new(-50.0, -50.0),
                Point2::new(50.0, -50.0),
                Point2::new(50.0, 50.0),
                Point2::new(-50.0, 50.0),
            ],
            vec![],
        );
        HandleSet::derive(&contour, &EditorConfig::default()).unwrap()
    }

    /// NDC position directly above a handle for the `TopDown` caster.
    fn over(set: &HandleSet, id: HandleId) -> Point2 {
        let p = set.get(id).current_position;
        Point2::new(p.x, -p.z)
    }

    fn controller() -> InteractionController {
        InteractionController::new(EditorConfig::default().handle_radius)
    }

    fn assert_single_drag(ctl: &InteractionController) {
        let dragging = HandleId::ALL
            .iter()
            .filter(|&&id| ctl.state(id) == HandleState::Dragging)
            .count();
        assert!(dragging <= 1);
    }

    // ── Hover ──────────────────────────────────────────────────

    #[test]
    fn hover_enters_and_leaves() {
        let mut set = handles();
        let mut ctl = controller();
        let at_toe = over(&set, HandleId::Toe);

        let ev = ctl.pointer_move(&TopDown, &at_toe, &mut set);
        assert_eq!(
            ev,
            InteractionEvent::HoverChanged {
                previous: None,
                current: Some(HandleId::Toe)
            }
        );
        assert_eq!(ctl.state(HandleId::Toe), HandleState::Hovered);
        assert_eq!(ctl.cursor(), CursorHint::Pointer);

        assert_eq!(ctl.pointer_move(&TopDown, &at_toe, &mut set), InteractionEvent::None);

        ctl.pointer_move(&TopDown, &Point2::new(0.0, 0.0), &mut set);
        assert_eq!(ctl.state(HandleId::Toe), HandleState::Idle);
        assert!(ctl.hovered().is_none());
        assert_eq!(ctl.cursor(), CursorHint::Default);
    }

    #[test]
    fn hovering_a_new_handle_clears_the_old() {
        let mut set = handles();
        let mut ctl = controller();
        ctl.pointer_move(&TopDown, &over(&set, HandleId::Left), &mut set);
        let ev = ctl.pointer_move(&TopDown, &over(&set, HandleId::Right), &mut set);
        assert_eq!(
            ev,
            InteractionEvent::HoverChanged {
                previous: Some(HandleId::Left),
                current: Some(HandleId::Right)
            }
        );
        assert_eq!(ctl.state(HandleId::Left), HandleState::Idle);
    }

    // ── Drag lifecycle ─────────────────────────────────────────

    #[test]
    fn press_on_miss_opens_no_session() {
        let set = handles();
        let mut ctl = controller();
        let ev = ctl.pointer_down(&TopDown, &Point2::new(0.0, 0.0), &set).unwrap();
        assert_eq!(ev, InteractionEvent::None);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn drag_session_uses_view_facing_plane_and_grab_offset() {
        let set = handles();
        let mut ctl = controller();
        let ev = ctl.pointer_down(&TopDown, &over(&set, HandleId::Heel), &set).unwrap();
        assert_eq!(ev, InteractionEvent::DragStarted(HandleId::Heel));
        let session = ctl.drag_session().unwrap();
        assert_relative_eq!(*session.plane.plane_normal(), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(session.grab_offset.y, 0.03, epsilon = 1e-9);
        assert_eq!(ctl.state(HandleId::Heel), HandleState::Dragging);
    }

    #[test]
    fn dragging_moves_handle_without_jump() {
        let mut set = handles();
        let mut ctl = controller();
        let start = over(&set, HandleId::Right);
        ctl.pointer_down(&TopDown, &start, &set).unwrap();

        let ev = ctl.pointer_move(&TopDown, &Point2::new(start.x + 0.2, start.y), &mut set);
        assert_eq!(ev, InteractionEvent::DragMoved(HandleId::Right));
        let handle = set.get(HandleId::Right);
        assert_relative_eq!(handle.displacement().x, 0.2, epsilon = 1e-9);
        assert_relative_eq!(handle.displacement().y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn release_reports_displacement() {
        let mut set = handles();
        let mut ctl = controller();
        let start = over(&set, HandleId::Toe);
        ctl.pointer_down(&TopDown, &start, &set).unwrap();
        ctl.pointer_move(&TopDown, &Point2::new(start.x, start.y + 0.1), &mut set);
        match ctl.pointer_up(&set) {
            InteractionEvent::Commit { handle, delta } => {
                assert_eq!(handle, HandleId::Toe);
                assert_relative_eq!(delta.z, -0.1, epsilon = 1e-9);
            }
            other => panic!("expected commit, got {other:?}"),
        }
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.state(HandleId::Toe), HandleState::Idle);
    }

    #[test]
    fn click_without_move_commits_zero_delta() {
        let set = handles();
        let mut ctl = controller();
        ctl.pointer_down(&TopDown, &over(&set, HandleId::Left), &set).unwrap();
        assert_eq!(
            ctl.pointer_up(&set),
            InteractionEvent::Commit {
                handle: HandleId::Left,
                delta: Vector3::zeros()
            }
        );
    }

    #[test]
    fn release_without_session_is_noop() {
        let set = handles();
        let mut ctl = controller();
        assert_eq!(ctl.pointer_up(&set), InteractionEvent::None);
    }

    #[test]
    fn second_drag_is_rejected() {
        let set = handles();
        let mut ctl = controller();
        ctl.pointer_down(&TopDown, &over(&set, HandleId::Toe), &set).unwrap();
        let err = ctl.pointer_down(&TopDown, &over(&set, HandleId::Heel), &set).unwrap_err();
        assert!(matches!(
            err,
            SoleformError::Interaction(InteractionError::DragInProgress("toe"))
        ));
        assert_eq!(ctl.state(HandleId::Toe), HandleState::Dragging);
        assert_eq!(ctl.state(HandleId::Heel), HandleState::Idle);
        assert_single_drag(&ctl);
    }

    #[test]
    fn hover_frozen_while_dragging() {
        let mut set = handles();
        let mut ctl = controller();
        ctl.pointer_move(&TopDown, &over(&set, HandleId::Toe), &mut set);
        ctl.pointer_down(&TopDown, &over(&set, HandleId::Toe), &set).unwrap();
        assert!(ctl.hovered().is_none());
        let at_left = over(&set, HandleId::Left);
        ctl.pointer_move(&TopDown, &at_left, &mut set);
        assert_eq!(ctl.state(HandleId::Left), HandleState::Idle);
        assert_single_drag(&ctl);
    }

    // ── Picking toggle ─────────────────────────────────────────

    #[test]
    fn disabled_picking_ignores_pointer() {
        let mut set = handles();
        let mut ctl = controller();
        ctl.pointer_move(&TopDown, &over(&set, HandleId::Toe), &mut set);
        let ev = ctl.set_picking_enabled(false);
        assert!(matches!(ev, InteractionEvent::HoverChanged { current: None, .. }));

        let ev = ctl.pointer_down(&TopDown, &over(&set, HandleId::Toe), &set).unwrap();
        assert_eq!(ev, InteractionEvent::None);
        assert_eq!(ctl.pointer_move(&TopDown, &over(&set, HandleId::Toe), &mut set), InteractionEvent::None);
    }
}
