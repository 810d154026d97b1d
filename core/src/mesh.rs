//! Static quad mesh over the wave lattice.
//!
//! ## Mesh Structure
//! - One vertex per lattice cell, laid out on the normalized square
//! - One quad per interior cell, wound (cell, right, upper right, upper)
//! - Positions and colors are separate attribute buffers; only position z
//!   changes after construction
//!
//! ```text
//!      3   4   5
//!      *---*---*
//!      |   |   |
//!      | 0 | 1 |
//!      |   |   |
//!      *---*---*
//!      0   1   2
//! ```

use crate::error::{WaveError, WaveResult};

/// Vertex and index buffers for the lattice surface.
#[derive(Debug, Clone)]
pub struct MeshTopology {
    width: usize,
    height: usize,
    /// Vertex positions, one per lattice cell (row-major).
    positions: Vec<[f32; 3]>,
    /// Vertex colors, fixed at build time.
    colors: Vec<[f32; 3]>,
    /// Quad indices into `positions`, one record per interior cell.
    quads: Vec<[u32; 4]>,
}

impl MeshTopology {
    /// Builds the vertex grid and quad index list for a `width` x `height` lattice.
    pub fn build(width: usize, height: usize) -> WaveResult<Self> {
        if width < 2 || height < 2 {
            return Err(WaveError::InvalidGridSize { width, height });
        }

        let vertex_count = width * height;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut colors = Vec::with_capacity(vertex_count);

        let half_w = (width / 2) as f32;
        let half_h = (height / 2) as f32;

        for y in 0..height {
            for x in 0..width {
                positions.push([
                    (x as f32 - half_w) / half_w,
                    (y as f32 - half_h) / half_h,
                    0.0,
                ]);
                colors.push(vertex_color(x, y, width, height));
            }
        }

        let quad_w = width - 1;
        let quad_h = height - 1;
        let mut quads = Vec::with_capacity(quad_w * quad_h);
        for y in 0..quad_h {
            for x in 0..quad_w {
                let base = (y * width + x) as u32;
                let above = ((y + 1) * width + x) as u32;
                quads.push([base, base + 1, above + 1, above]);
            }
        }

        Ok(Self {
            width,
            height,
            positions,
            colors,
            quads,
        })
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "vertex ({x}, {y}) outside {}x{} mesh",
            self.width,
            self.height
        );
        y * self.width + x
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    #[inline]
    pub fn vertex_at(&self, x: usize, y: usize) -> [f32; 3] {
        self.positions[self.idx(x, y)]
    }

    #[inline]
    pub fn color_at(&self, x: usize, y: usize) -> [f32; 3] {
        self.colors[self.idx(x, y)]
    }

    #[inline]
    pub(crate) fn set_height(&mut self, x: usize, y: usize, z: f32) {
        let idx = self.idx(x, y);
        self.positions[idx][2] = z;
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn quads(&self) -> &[[u32; 4]] {
        &self.quads
    }

    /// Quad list flattened for quad-primitive draw calls (4 indices per quad).
    pub fn flat_quad_indices(&self) -> Vec<u32> {
        self.quads.iter().flatten().copied().collect()
    }

    /// Each quad split along its (cell, upper right) diagonal into two
    /// counter-clockwise triangles.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.quads.len() * 6);
        for &[a, b, c, d] in &self.quads {
            indices.extend_from_slice(&[a, b, c, c, d, a]);
        }
        indices
    }
}

/// Checkerboard red channel with green/blue ramps across the lattice.
fn vertex_color(x: usize, y: usize, width: usize, height: usize) -> [f32; 3] {
    let red = if (x % 4 < 2) ^ (y % 4 < 2) { 0.0 } else { 1.0 };
    let fx = x as f32 / width as f32;
    let fy = y as f32 / height as f32;
    [red, fy, 1.0 - (fx + fy) / 2.0]
}
