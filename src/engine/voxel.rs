/// Voxel field rasterizer.
///
/// Paints cells into a dense `resolution^3` occupancy grid over the
/// normalized cube `[-0.5, 0.5]^3`. Marking is a monotonic OR, so the
/// result does not depend on cell order or on repeated passes.

use crate::engine::generator::{self, GenerationRequest};
use crate::engine::types::Cell;
use crate::error::{Result, SpongeError};

/// Slack applied before flooring/ceiling so cell faces that sit on a
/// voxel boundary are not smeared into the neighbour by rounding noise.
const BOUNDARY_EPS: f64 = 1e-9;

/// Dense occupancy grid, indexed `(ix * res + iy) * res + iz`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelField {
    pub resolution: usize,
    /// 0 = empty, 1 = solid
    pub data: Vec<u8>,
}

impl VoxelField {
    pub fn empty(resolution: usize) -> Result<Self> {
        if resolution == 0 {
            return Err(SpongeError::invalid("voxel resolution must be >= 1"));
        }
        let len = resolution
            .checked_mul(resolution)
            .and_then(|r2| r2.checked_mul(resolution))
            .ok_or_else(|| {
                SpongeError::invalid(format!("voxel resolution {resolution} is too large"))
            })?;
        Ok(Self { resolution, data: vec![0; len] })
    }

    /// Edge length of one voxel in the normalized frame.
    #[inline]
    pub fn voxel_size(&self) -> f64 {
        1.0 / self.resolution as f64
    }

    #[inline(always)]
    pub fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        (ix * self.resolution + iy) * self.resolution + iz
    }

    /// Out-of-range coordinates read as empty.
    pub fn is_solid(&self, ix: usize, iy: usize, iz: usize) -> bool {
        let r = self.resolution;
        ix < r && iy < r && iz < r && self.data[self.index(ix, iy, iz)] != 0
    }

    pub fn solid_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Fraction of voxels marked solid.
    pub fn fill_ratio(&self) -> f64 {
        self.solid_count() as f64 / self.data.len() as f64
    }

    /// Mark every voxel overlapped by `cell`.
    pub fn paint(&mut self, cell: &Cell) {
        let (lo, hi) = cell.bounds();
        let Some((x0, x1)) = self.index_span(lo.x, hi.x) else { return };
        let Some((y0, y1)) = self.index_span(lo.y, hi.y) else { return };
        let Some((z0, z1)) = self.index_span(lo.z, hi.z) else { return };

        let res = self.resolution;
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                let base = (ix * res + iy) * res;
                self.data[base + z0..=base + z1].fill(1);
            }
        }
    }

    /// Inclusive voxel range whose interiors overlap `[lo, hi]` on one axis,
    /// clamped to the grid. `None` when the span misses the grid entirely.
    fn index_span(&self, lo: f64, hi: f64) -> Option<(usize, usize)> {
        let vs = self.voxel_size();
        let max = (self.resolution - 1) as f64;
        let a = ((lo + 0.5) / vs + BOUNDARY_EPS).floor();
        let b = ((hi + 0.5) / vs - BOUNDARY_EPS).ceil() - 1.0;
        if b < 0.0 || a > max {
            return None;
        }
        let a = a.clamp(0.0, max) as usize;
        // a cell thinner than the slack still claims the voxel it sits in
        let b = b.clamp(0.0, max).max(a as f64) as usize;
        Some((a, b))
    }
}

/// Rasterize a cell list into a fresh field.
pub fn rasterize(cells: &[Cell], resolution: usize) -> Result<VoxelField> {
    let mut field = VoxelField::empty(resolution)?;
    for cell in cells {
        field.paint(cell);
    }
    log::debug!(
        "rasterized {} cells at {}^3: {} solid voxels",
        cells.len(),
        resolution,
        field.solid_count()
    );
    Ok(field)
}

/// Generate and rasterize in one step.
pub fn build_voxel_field(request: &GenerationRequest, resolution: usize) -> Result<VoxelField> {
    let cells = generator::generate(request)?;
    rasterize(&cells, resolution)
}
