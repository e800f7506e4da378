/// Analytic formula set.
///
/// Aggregate properties of the sponge computed straight from the order,
/// without enumerating cells. The physical quantities are display labels
/// over the same exponential laws, parameterized by a few tunable
/// constants.

pub mod scaling;
pub mod sponge;

use serde::{Deserialize, Serialize};

/// Tunable constants for the physical analogies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaConstants {
    /// Base thermal conductivity
    pub k0: f64,
    /// Temperature difference across the sample
    pub delta_t: f64,
    /// Optical attenuation coefficient
    pub mu: f64,
    /// Base optical path length
    #[serde(rename = "L0")]
    pub l0: f64,
    /// Incident intensity
    #[serde(rename = "I0")]
    pub i0: f64,
    /// Scattering coefficient per unit area
    pub scatter_k: f64,
}

impl Default for FormulaConstants {
    fn default() -> Self {
        Self {
            k0: 1.0,
            delta_t: 1.0,
            mu: 0.12,
            l0: 1.0,
            i0: 1.0,
            scatter_k: 0.05,
        }
    }
}

/// Every derived quantity at one order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaContext {
    pub n: u32,
    pub constants: FormulaConstants,

    /// Cube count
    #[serde(rename = "N")]
    pub cube_count: f64,
    /// Edge length
    #[serde(rename = "l")]
    pub edge_length: f64,
    /// Volume
    #[serde(rename = "V")]
    pub volume: f64,
    pub removed_volume: f64,
    /// Surface area
    #[serde(rename = "A")]
    pub surface_area: f64,
    pub surface_to_volume: f64,
    /// Similarity dimension
    #[serde(rename = "D")]
    pub dimension: f64,

    /// Density, equal to the volume fraction
    pub rho: f64,
    /// Porosity
    pub phi: f64,
    pub holes: f64,
    pub holes_total: f64,

    pub k_eff: f64,
    pub r_eff: f64,
    pub l_opt: f64,
    /// Optical transmittance
    #[serde(rename = "T")]
    pub transmittance: f64,
    pub i_out: f64,
    pub phi_heat: f64,
}

/// Build the full formula record for order `n`.
pub fn formulas(n: u32, constants: &FormulaConstants) -> FormulaContext {
    let c = *constants;

    let cube_count = sponge::cube_count(n);
    let edge_length = sponge::edge_length(n);
    let volume = sponge::volume(n);
    let surface_area = sponge::surface_area(n);

    let k_eff = c.k0 * volume;
    let l_opt = c.l0 * sponge::FACTOR.powf(f64::from(n));

    FormulaContext {
        n,
        constants: c,
        cube_count,
        edge_length,
        volume,
        removed_volume: sponge::removed_volume(n),
        surface_area,
        surface_to_volume: sponge::surface_to_volume(n),
        dimension: sponge::fractal_dimension(),
        rho: volume,
        phi: 1.0 - volume,
        holes: sponge::holes_at_step(n),
        holes_total: sponge::total_holes(n),
        k_eff,
        r_eff: (3.0f64 / 20.0).powf(f64::from(n)),
        l_opt,
        transmittance: (-c.mu * l_opt).exp(),
        i_out: c.i0 / (1.0 + c.scatter_k * surface_area),
        phi_heat: k_eff * surface_area * (c.delta_t / edge_length),
    }
}

/// Formula record as JSON for the UI text panels.
pub fn formulas_json(n: u32, constants: &FormulaConstants) -> serde_json::Result<String> {
    serde_json::to_string(&formulas(n, constants))
}
