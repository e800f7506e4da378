use wasm_bindgen::prelude::*;

pub mod config;
pub mod engine;
pub mod error;
pub mod formulas;
pub mod logging;
pub mod math;
pub mod render;
pub mod variants;

pub use engine::generator::GenerationRequest;
pub use engine::rule::SurvivalRule;
pub use engine::types::{Cell, Vec3D};
pub use engine::voxel::VoxelField;
pub use error::{Result, SpongeError};

/// Initialize the WASM module (call once from JS).
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(log::LevelFilter::Info);
}

/// Generate sponge cells.
///
/// Returns a Float64Array of `[x, y, z, size]` quadruples, one per cell.
/// `rule` takes the picker names (`"menger"`, `"center-only"`, ...).
#[wasm_bindgen]
pub fn generate(
    order: f64,
    subdivision_factor: u32,
    rule: &str,
    root_size: f64,
    cx: f64,
    cy: f64,
    cz: f64,
) -> std::result::Result<js_sys::Float64Array, JsError> {
    let request = GenerationRequest {
        order: error::order_from_f64(order)?,
        subdivision_factor,
        rule: SurvivalRule::from_name(rule)?,
        root_size,
        root_center: Vec3D::new(cx, cy, cz),
        max_cells: None,
    };
    let cells = engine::generator::generate(&request)?;
    Ok(to_float64_array(&engine::types::flatten_cells(&cells)))
}

/// Generate cells from a flat request buffer.
///
/// `params`: `[order, factor, rule_id, root_size, cx, cy, cz, max_cells]`
#[wasm_bindgen]
pub fn generate_from_buffer(
    params: &[f64],
) -> std::result::Result<js_sys::Float64Array, JsError> {
    let request = config::request_from_buffer(params)?;
    let cells = engine::generator::generate(&request)?;
    Ok(to_float64_array(&engine::types::flatten_cells(&cells)))
}

/// Generate the share of cells owned by one Web Worker.
///
/// Concatenating the results of every `worker_id` in `0..worker_count`
/// yields the full sponge.
#[wasm_bindgen]
pub fn generate_partition(
    params: &[f64],
    worker_id: u32,
    worker_count: u32,
) -> std::result::Result<js_sys::Float64Array, JsError> {
    let request = config::request_from_buffer(params)?;
    let cells = engine::generator::generate_partition(&request, worker_id, worker_count)?;
    Ok(to_float64_array(&engine::types::flatten_cells(&cells)))
}

/// Cell count a request would produce, without generating it.
#[wasm_bindgen]
pub fn predicted_cell_count(params: &[f64]) -> std::result::Result<f64, JsError> {
    Ok(config::request_from_buffer(params)?.predicted_cell_count() as f64)
}

/// Voxelize a classic sponge of `order` at `resolution` voxels per axis.
///
/// Returns `resolution^3` bytes indexed `(ix * res + iy) * res + iz`.
#[wasm_bindgen]
pub fn rasterize(
    order: f64,
    resolution: u32,
) -> std::result::Result<js_sys::Uint8Array, JsError> {
    let request = GenerationRequest::new(error::order_from_f64(order)?);
    let field = engine::voxel::build_voxel_field(&request, resolution as usize)?;
    Ok(js_sys::Uint8Array::from(field.data.as_slice()))
}

/// Voxelize an arbitrary flat cell list (`[x, y, z, size]*`).
#[wasm_bindgen]
pub fn rasterize_cells(
    cells: &[f64],
    resolution: u32,
) -> std::result::Result<js_sys::Uint8Array, JsError> {
    let cells = engine::types::cells_from_flat(cells);
    let field = engine::voxel::rasterize(&cells, resolution as usize)?;
    Ok(js_sys::Uint8Array::from(field.data.as_slice()))
}

/// Analytic formula record for `order` as JSON.
///
/// `constants`: `[k0, deltaT, mu, L0, I0, scatterK]`, missing entries default
#[wasm_bindgen]
pub fn formulas_json(order: f64, constants: &[f64]) -> std::result::Result<String, JsError> {
    let n = error::order_from_f64(order)?;
    let constants = config::constants_from_buffer(constants);
    Ok(formulas::formulas_json(n, &constants)?)
}

/// Cap `order` for a render tier (0 = mobile low, 1 = mobile high,
/// 2 = desktop low, 3 = desktop high). Returns the JSON `OrderClamp`.
#[wasm_bindgen]
pub fn clamp_order(order: f64, tier: u32) -> std::result::Result<String, JsError> {
    let tier = config::RenderTier::from_id(tier)?;
    let clamp = config::clamp_order(error::order_from_f64(order)?, tier);
    Ok(serde_json::to_string(&clamp)?)
}

/// Render one ASCII frame of the rotating sponge.
#[wasm_bindgen]
pub fn render_ascii(width: u32, height: u32, level: u32, t: f64) -> String {
    render::ascii::render_frame(&render::ascii::AsciiParams {
        width,
        height,
        level,
        t,
        ..Default::default()
    })
}

/// Sierpinski carpet squares as `[x, y, size]*`.
#[wasm_bindgen]
pub fn carpet(iter: u32) -> js_sys::Float64Array {
    let flat: Vec<f64> = variants::carpet(iter)
        .iter()
        .flat_map(|s| [s.x, s.y, s.size])
        .collect();
    to_float64_array(&flat)
}

/// Cantor segments as `[x, width, level]*`.
#[wasm_bindgen]
pub fn cantor(iter: u32) -> js_sys::Float64Array {
    let flat: Vec<f64> = variants::cantor(iter)
        .iter()
        .flat_map(|s| [s.x, s.width, f64::from(s.level)])
        .collect();
    to_float64_array(&flat)
}

/// Chaos-game triangle points as `[x, y]*`.
#[wasm_bindgen]
pub fn chaos_triangle(iter: u32, seed: u32) -> js_sys::Float64Array {
    let flat: Vec<f64> = variants::chaos_triangle(iter, u64::from(seed))
        .iter()
        .flat_map(|p| [p.x, p.y])
        .collect();
    to_float64_array(&flat)
}

fn to_float64_array(data: &[f64]) -> js_sys::Float64Array {
    js_sys::Float64Array::from(data)
}
