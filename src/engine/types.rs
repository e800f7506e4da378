/// Core geometric types shared by the generator, the voxel rasterizer
/// and the JS boundary.

use serde::{Deserialize, Serialize};

/// 3D vector with f64 precision.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3D {
    pub const ORIGIN: Vec3D = Vec3D { x: 0.0, y: 0.0, z: 0.0 };

    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline(always)]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// 3×3 rotation matrix, row-major.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug)]
pub struct Matrix3 {
    pub m: [[f64; 3]; 3],
}

/// A surviving cube of the sponge.
///
/// `depth` is the recursion level the cell was finalized at, so every
/// cell of one generation shares the same depth and `size`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Center in the root cube's frame
    pub center: Vec3D,
    /// Edge length
    pub size: f64,
    pub depth: u32,
}

impl Cell {
    /// Axis-aligned bounds as (min, max) corners.
    pub fn bounds(&self) -> (Vec3D, Vec3D) {
        let h = self.size * 0.5;
        (
            Vec3D::new(self.center.x - h, self.center.y - h, self.center.z - h),
            Vec3D::new(self.center.x + h, self.center.y + h, self.center.z + h),
        )
    }
}

/// Pack cells as `[x, y, z, size, x, y, z, size, ...]` for instanced meshes.
pub fn flatten_cells(cells: &[Cell]) -> Vec<f64> {
    let mut out = Vec::with_capacity(cells.len() * 4);
    for c in cells {
        out.extend_from_slice(&[c.center.x, c.center.y, c.center.z, c.size]);
    }
    out
}

/// Inverse of [`flatten_cells`]. Trailing values that do not form a full
/// quadruple are ignored; depth is not carried by the flat layout.
pub fn cells_from_flat(data: &[f64]) -> Vec<Cell> {
    data.chunks_exact(4)
        .map(|q| Cell {
            center: Vec3D::new(q[0], q[1], q[2]),
            size: q[3],
            depth: 0,
        })
        .collect()
}
