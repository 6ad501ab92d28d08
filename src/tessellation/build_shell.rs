// Ring indices are u32; contours large enough to overflow are not realistic.
#![allow(clippy::cast_possible_truncation)]

use tracing::{debug, warn};

use crate::contour::ContourModel;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point3;
use crate::operations::ThicknessField;
use crate::params::MeshParameters;

use super::TriangleMesh;

/// Builds the closed insole shell from a contour version.
///
/// Layout of the vertex buffer for a combined loop of `n` points:
///
/// ```text
/// 0            bottom apex
/// 1 ..= n      bottom ring (z = 0)
/// n + 1        top apex
/// n + 2 ..= 2n + 1   top ring (z = thickness)
/// ```
///
/// Both caps are fans from their apex; the side wall is one quad per ring
/// edge. Windings are chosen from the loop orientation so every face points
/// out of the shell.
pub struct BuildShell<'a> {
    params: &'a MeshParameters,
    unit_scale: f64,
}

impl<'a> BuildShell<'a> {
    /// Creates a new `BuildShell` operation.
    #[must_use]
    pub fn new(params: &'a MeshParameters, unit_scale: f64) -> Self {
        Self { params, unit_scale }
    }

    /// Executes the build. Contours with fewer than three points yield an
    /// empty mesh.
    #[must_use]
    pub fn execute(&self, contour: &ContourModel) -> TriangleMesh {
        let ring = contour.combined();
        let n = ring.len();
        let bounds = match contour.bounds() {
            Some(b) if n >= 3 => b,
            _ => {
                warn!(points = n, "degenerate contour, building empty shell");
                return TriangleMesh::default();
            }
        };

        let s = self.unit_scale;
        let field = ThicknessField::new(self.params, bounds);
        let mid_y = bounds.center_y() * s;
        let ccw = signed_area_2d(&ring) > 0.0;

        let mut mesh = TriangleMesh {
            vertices: Vec::with_capacity(2 * n + 2),
            normals: Vec::new(),
            indices: Vec::with_capacity(4 * n),
        };

        // Bottom apex + ring
        mesh.vertices.push(Point3::new(0.0, mid_y, 0.0));
        mesh.vertices
            .extend(ring.iter().map(|p| Point3::new(p.x * s, p.y * s, 0.0)));

        // Top apex + ring
        let top_apex_z = self.params.heel_thickness * 0.5 * s;
        mesh.vertices.push(Point3::new(0.0, mid_y, top_apex_z));
        mesh.vertices.extend(
            ring.iter()
                .map(|p| Point3::new(p.x * s, p.y * s, field.thickness(p) * s)),
        );

        let n32 = n as u32;
        let bottom_apex = 0;
        let top_apex = n32 + 1;
        let bottom = |i: u32| 1 + i;
        let top = |i: u32| top_apex + 1 + i;

        for i in 0..n32 {
            let j = (i + 1) % n32;
            let (bi, bj) = (bottom(i), bottom(j));
            if ccw {
                mesh.indices.push([bottom_apex, bj, bi]);
            } else {
                mesh.indices.push([bottom_apex, bi, bj]);
            }
        }

        for i in 0..n32 {
            let j = (i + 1) % n32;
            let (ti, tj) = (top(i), top(j));
            if ccw {
                mesh.indices.push([top_apex, ti, tj]);
            } else {
                mesh.indices.push([top_apex, tj, ti]);
            }
        }

        // Side wall, split on the bottom(j)-top(i) diagonal
        for i in 0..n32 {
            let j = (i + 1) % n32;
            let (bi, bj, ti, tj) = (bottom(i), bottom(j), top(i), top(j));
            if ccw {
                mesh.indices.push([bi, bj, ti]);
                mesh.indices.push([bj, tj, ti]);
            } else {
                mesh.indices.push([bi, ti, bj]);
                mesh.indices.push([bj, ti, tj]);
            }
        }

        mesh.compute_vertex_normals();

        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "built insole shell"
        );
        mesh
    }
}
