//! The four semantic control handles derived from a contour version.
//!
//! Handles live in scene space: the shell is displayed lying flat, so a
//! planform point `(x, y)` appears at `(x * s, elevation, -y * s)` where `s`
//! is the unit scale.

use std::fmt;

use crate::contour::ContourModel;
use crate::math::{Point2, Point3, Vector3};
use crate::params::EditorConfig;

/// Semantic identity of a control handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleId {
    Toe,
    Heel,
    Left,
    Right,
}

impl HandleId {
    /// All handle identities in derivation order.
    pub const ALL: [HandleId; 4] = [HandleId::Toe, HandleId::Heel, HandleId::Left, HandleId::Right];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Toe => "toe",
            Self::Heel => "heel",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Toe => 0,
            Self::Heel => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A draggable control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub id: HandleId,
    /// Scene-space position, moved while dragging.
    pub current_position: Point3,
    /// Scene-space position snapshotted when the handle set was derived.
    pub original_position: Point3,
}

impl Handle {
    /// Accumulated displacement since derivation.
    #[must_use]
    pub fn displacement(&self) -> Vector3 {
        self.current_position - self.original_position
    }
}

/// Exactly four live handles, one per [`HandleId`].
///
/// Replaced wholesale whenever a new contour version is adopted; the only
/// in-place edit is repositioning a handle during a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleSet {
    handles: [Handle; 4],
}

impl HandleSet {
    /// Derives the four handles from contour bounds.
    ///
    /// Returns `None` for an empty contour.
    #[must_use]
    pub fn derive(contour: &ContourModel, config: &EditorConfig) -> Option<Self> {
        let b = contour.bounds()?;
        let mid_y = b.center_y();
        let planform = |id: HandleId| match id {
            HandleId::Toe => Point2::new(0.0, b.max_y),
            HandleId::Heel => Point2::new(0.0, b.min_y),
            HandleId::Left => Point2::new(b.min_x, mid_y),
            HandleId::Right => Point2::new(b.max_x, mid_y),
        };
        let handles = HandleId::ALL.map(|id| {
            let position = to_scene(&planform(id), config);
            Handle {
                id,
                current_position: position,
                original_position: position,
            }
        });
        Some(Self { handles })
    }

    #[must_use]
    pub fn get(&self, id: HandleId) -> &Handle {
        &self.handles[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.handles.iter()
    }

    /// Moves a handle during a drag. The original position is left untouched.
    pub(crate) fn set_current_position(&mut self, id: HandleId, position: Point3) {
        self.handles[id.index()].current_position = position;
    }
}

/// Maps a planform point to scene space at handle elevation.
#[must_use]
pub fn to_scene(point: &Point2, config: &EditorConfig) -> Point3 {
    Point3::new(
        point.x * config.unit_scale,
        config.handle_elevation,
        -point.y * config.unit_scale,
    )
}

/// Inverse of [`to_scene`], dropping the elevation.
#[must_use]
pub fn to_planform(point: &Point3, config: &EditorConfig) -> Point2 {
    Point2::new(point.x / config.unit_scale, -point.z / config.unit_scale)
}
