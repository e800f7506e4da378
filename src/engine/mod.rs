/// Sponge engine: rule evaluation, cell generation, voxel rasterization
/// and point membership.

pub mod generator;
pub mod membership;
pub mod rule;
pub mod types;
pub mod voxel;
