/// Recursive position generator.
///
/// Walks the implicit subdivision tree with an explicit worklist and
/// returns the surviving leaf cells. Cell count is `kept^order`, so the
/// generator can be told to refuse anything above a ceiling before it
/// allocates.

use serde::{Deserialize, Serialize};

use crate::engine::rule::SurvivalRule;
use crate::engine::types::{Cell, Vec3D};
use crate::error::{Result, SpongeError};

/// Upper bound on the up-front allocation; larger outputs grow as needed.
const MAX_PREALLOC: u64 = 1 << 20;

/// Parameters for one generator invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub order: u32,
    pub subdivision_factor: u32,
    pub rule: SurvivalRule,
    pub root_size: f64,
    pub root_center: Vec3D,
    /// Refuse requests predicted to produce more cells than this
    pub max_cells: Option<u64>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            order: 0,
            subdivision_factor: 3,
            rule: SurvivalRule::Menger,
            root_size: 1.0,
            root_center: Vec3D::ORIGIN,
            max_cells: None,
        }
    }
}

impl GenerationRequest {
    pub fn new(order: u32) -> Self {
        Self { order, ..Default::default() }
    }

    pub fn with_factor(mut self, factor: u32) -> Self {
        self.subdivision_factor = factor;
        self
    }

    pub fn with_rule(mut self, rule: SurvivalRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_root(mut self, size: f64, center: Vec3D) -> Self {
        self.root_size = size;
        self.root_center = center;
        self
    }

    pub fn with_max_cells(mut self, ceiling: u64) -> Self {
        self.max_cells = Some(ceiling);
        self
    }

    /// Reject degenerate geometry. Never clamps.
    pub fn validate(&self) -> Result<()> {
        if self.subdivision_factor < 2 {
            return Err(SpongeError::invalid(format!(
                "subdivision factor must be >= 2, got {}",
                self.subdivision_factor
            )));
        }
        if !self.root_size.is_finite() || self.root_size <= 0.0 {
            return Err(SpongeError::invalid(format!(
                "root size must be a positive finite number, got {}",
                self.root_size
            )));
        }
        if !self.root_center.is_finite() {
            return Err(SpongeError::invalid("root center must be finite"));
        }
        Ok(())
    }

    /// `kept^order`, saturating at `u64::MAX`.
    pub fn predicted_cell_count(&self) -> u64 {
        self.rule
            .kept_count(self.subdivision_factor)
            .checked_pow(self.order)
            .unwrap_or(u64::MAX)
    }

    /// Edge length of every cell this request produces.
    pub fn leaf_size(&self) -> f64 {
        self.root_size / f64::from(self.subdivision_factor).powf(f64::from(self.order))
    }

    fn check_capacity(&self) -> Result<u64> {
        let requested = self.predicted_cell_count();
        if let Some(ceiling) = self.max_cells {
            if requested > ceiling {
                log::warn!(
                    "refusing order {} ({}): {} cells over ceiling {}",
                    self.order,
                    self.rule.name(),
                    requested,
                    ceiling
                );
                return Err(SpongeError::CapacityExceeded { requested, ceiling });
            }
        }
        Ok(requested)
    }
}

/// Pending subtree on the worklist.
#[derive(Clone, Copy)]
struct Pending {
    center: Vec3D,
    size: f64,
    remaining: u32,
}

/// Generate every surviving cell for `request`.
///
/// Enumeration order is deterministic but carries no meaning.
pub fn generate(request: &GenerationRequest) -> Result<Vec<Cell>> {
    request.validate()?;
    let predicted = request.check_capacity()?;

    if request.order == 0 {
        return Ok(vec![root_cell(request)]);
    }

    let root = Pending {
        center: request.root_center,
        size: request.root_size,
        remaining: request.order,
    };
    let cells = expand(request, vec![root], predicted);

    log::debug!(
        "generated {} cells (order {}, factor {}, {})",
        cells.len(),
        request.order,
        request.subdivision_factor,
        request.rule.name()
    );
    Ok(cells)
}

/// Generate the slice of the sponge owned by one worker.
///
/// Top-level children are dealt out round-robin: worker `w` of `n` owns
/// the children whose index `i` satisfies `i % n == w`. The union over
/// all workers equals [`generate`]. At order 0 the root belongs to
/// worker 0.
pub fn generate_partition(
    request: &GenerationRequest,
    worker_id: u32,
    worker_count: u32,
) -> Result<Vec<Cell>> {
    request.validate()?;
    if worker_count == 0 {
        return Err(SpongeError::invalid("worker count must be >= 1"));
    }
    if worker_id >= worker_count {
        return Err(SpongeError::invalid(format!(
            "worker id {worker_id} out of range for {worker_count} workers"
        )));
    }
    let predicted = request.check_capacity()?;

    if request.order == 0 {
        return Ok(if worker_id == 0 {
            vec![root_cell(request)]
        } else {
            Vec::new()
        });
    }

    let offsets = request.rule.kept_offsets(request.subdivision_factor);
    let child_size = request.root_size / f64::from(request.subdivision_factor);
    let roots: Vec<Pending> = offsets
        .iter()
        .enumerate()
        .filter(|(i, _)| *i as u32 % worker_count == worker_id)
        .map(|(_, o)| Pending {
            center: offset_center(&request.root_center, o, child_size),
            size: child_size,
            remaining: request.order - 1,
        })
        .collect();

    let share = predicted / u64::from(worker_count) + 1;
    let cells = expand(request, roots, share);
    log::debug!(
        "worker {}/{} generated {} cells (order {})",
        worker_id,
        worker_count,
        cells.len(),
        request.order
    );
    Ok(cells)
}

fn expand(request: &GenerationRequest, mut stack: Vec<Pending>, size_hint: u64) -> Vec<Cell> {
    let factor = f64::from(request.subdivision_factor);
    let offsets = request.rule.kept_offsets(request.subdivision_factor);
    let mut out = Vec::with_capacity(size_hint.min(MAX_PREALLOC) as usize);

    while let Some(p) = stack.pop() {
        if p.remaining == 0 {
            out.push(Cell { center: p.center, size: p.size, depth: request.order });
            continue;
        }
        let child_size = p.size / factor;
        for o in &offsets {
            stack.push(Pending {
                center: offset_center(&p.center, o, child_size),
                size: child_size,
                remaining: p.remaining - 1,
            });
        }
    }
    out
}

fn root_cell(request: &GenerationRequest) -> Cell {
    Cell { center: request.root_center, size: request.root_size, depth: 0 }
}

#[inline(always)]
fn offset_center(center: &Vec3D, offset: &Vec3D, child_size: f64) -> Vec3D {
    Vec3D::new(
        center.x + offset.x * child_size,
        center.y + offset.y * child_size,
        center.z + offset.z * child_size,
    )
}
