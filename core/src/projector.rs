//! Converts simulation state into renderable vertex attributes.

use bevy::math::Vec3;

use crate::constants::NORMAL_EPSILON;
use crate::grid::GridField;
use crate::mesh::MeshTopology;

/// Writes pressure-driven heights into the mesh and, optionally, per-cell
/// shading data back into the field.
#[derive(Debug, Clone, Copy)]
pub struct GeometryProjector {
    /// Factor converting pressure into vertex z.
    pub height_scale: f64,
}

impl GeometryProjector {
    pub fn new(height_scale: f64) -> Self {
        Self { height_scale }
    }

    /// Sets every vertex z to `pressure * height_scale`.
    pub fn project_heights(&self, field: &GridField, mesh: &mut MeshTopology) {
        debug_assert_eq!(field.cell_count(), mesh.vertex_count());

        for y in 0..field.height() {
            for x in 0..field.width() {
                let z = field.pressure(x, y) * self.height_scale;
                mesh.set_height(x, y, z as f32);
            }
        }
    }

    /// Derives a smoothed normal and the mean corner height for every quad.
    ///
    /// The quad (v1, v2, v3, v4) is covered by four overlapping triangles
    /// (v1 v2 v3), (v3 v4 v1), (v1 v2 v4) and (v4 v3 v2). Their normals are
    /// averaged and the result is normalized. Results are stored at the quad's
    /// lower-left cell; the last row and column stay zero.
    pub fn project_normals_and_averages(&self, field: &mut GridField, mesh: &MeshTopology) {
        let width = field.width();
        let height = field.height();
        let (normals, averages) = field.shading_buffers_mut();

        for y in 0..height - 1 {
            for x in 0..width - 1 {
                let v1 = Vec3::from(mesh.vertex_at(x, y));
                let v2 = Vec3::from(mesh.vertex_at(x + 1, y));
                let v3 = Vec3::from(mesh.vertex_at(x + 1, y + 1));
                let v4 = Vec3::from(mesh.vertex_at(x, y + 1));

                let n1 = triangle_normal(v1, v2, v3);
                let n2 = triangle_normal(v3, v4, v1);
                let n3 = triangle_normal(v1, v2, v4);
                let n4 = triangle_normal(v4, v3, v2);

                let idx = y * width + x;
                normals[idx] = ((n1 + n2 + n3 + n4) / 4.0).normalize_or_zero();
                averages[idx] = (v1.z + v2.z + v3.z + v4.z) / 4.0;
            }
        }
    }
}

/// Mean of the unit normals anchored at each corner of the triangle.
fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (anchored_normal(a, b, c) + anchored_normal(b, a, c) + anchored_normal(c, a, b)) / 3.0
}

/// Unit normal of the edges leaving `anchor`; zero when they are colinear.
fn anchored_normal(anchor: Vec3, p: Vec3, q: Vec3) -> Vec3 {
    let cross = (anchor - p).cross(anchor - q);
    let length = cross.length();
    if length < NORMAL_EPSILON || !length.is_finite() {
        return Vec3::ZERO;
    }
    cross / length
}
