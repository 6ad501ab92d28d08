mod build_shell;
mod contour_lines;

pub use build_shell::BuildShell;
pub use contour_lines::ContourLines;

use crate::math::{Point3, Vector3, TOLERANCE};

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

/// A triangle mesh. The insole shell is one of these, rebuilt on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Smooth per-vertex normals, parallel to `vertices`.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Recomputes smooth normals from the current triangle set.
    ///
    /// Face normals are accumulated unnormalized, so larger triangles weigh
    /// more. Vertices touched only by degenerate triangles get `+Z`.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];
        for tri in &self.indices {
            let [a, b, c] = tri.map(|i| i as usize);
            let (pa, pb, pc) = (self.vertices[a], self.vertices[b], self.vertices[c]);
            let face = (pb - pa).cross(&(pc - pa));
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        for n in &mut normals {
            let len = n.norm();
            *n = if len < TOLERANCE { Vector3::z() } else { *n / len };
        }
        self.normals = normals;
    }

    /// Unnormalized face normal of triangle `index`.
    #[must_use]
    pub fn face_normal(&self, index: usize) -> Vector3 {
        let [a, b, c] = self.indices[index].map(|i| self.vertices[i as usize]);
        (b - a).cross(&(c - a))
    }

    /// Interleaved `xyz` positions for upload to a vertex buffer.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn position_buffer(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }

    /// Interleaved `xyz` normals for upload to a vertex buffer.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn normal_buffer(&self) -> Vec<f32> {
        self.normals
            .iter()
            .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
            .collect()
    }

    /// Flat triangle-list index buffer.
    #[must_use]
    pub fn index_buffer(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }
}

/// Maps a point from shell space (contour plane = XY, thickness = +Z) into
/// scene space, where the shell lies flat with +Y up. Equivalent to a
/// -90° rotation about X.
#[must_use]
pub fn shell_to_scene(point: &Point3) -> Point3 {
    Point3::new(point.x, point.z, -point.y)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn single_triangle() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![],
            indices: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn normals_follow_winding() {
        let mut mesh = single_triangle();
        mesh.compute_vertex_normals();
        assert_eq!(mesh.normals.len(), 3);
        for n in &mesh.normals {
            assert!((n.z - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn flat_buffers_have_expected_lengths() {
        let mut mesh = single_triangle();
        mesh.compute_vertex_normals();
        assert_eq!(mesh.position_buffer().len(), 9);
        assert_eq!(mesh.normal_buffer().len(), 9);
        assert_eq!(mesh.index_buffer(), vec![0, 1, 2]);
    }

    #[test]
    fn empty_mesh_reports_empty() {
        let mesh = TriangleMesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn shell_to_scene_lays_flat() {
        let p = shell_to_scene(&Point3::new(1.0, 2.0, 3.0));
        assert_eq!(p, Point3::new(1.0, 3.0, -2.0));
    }
}
