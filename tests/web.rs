//! Browser smoke tests for the exported surface.
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn generate_returns_packed_cells() {
    let cells = menger_wasm::generate(1.0, 3, "menger", 1.0, 0.0, 0.0, 0.0).unwrap();
    assert_eq!(cells.length(), 20 * 4);
    let center_only = menger_wasm::generate(1.0, 3, "center-only", 1.0, 0.0, 0.0, 0.0).unwrap();
    assert_eq!(center_only.length(), 26 * 4);
}

#[wasm_bindgen_test]
fn generate_rejects_bad_order() {
    assert!(menger_wasm::generate(-1.0, 3, "menger", 1.0, 0.0, 0.0, 0.0).is_err());
    assert!(menger_wasm::generate(1.5, 3, "menger", 1.0, 0.0, 0.0, 0.0).is_err());
}

#[wasm_bindgen_test]
fn partitions_add_up() {
    let params = [2.0, 3.0, 0.0, 1.0];
    let total: u32 = (0..4)
        .map(|w| menger_wasm::generate_partition(&params, w, 4).unwrap().length())
        .sum();
    assert_eq!(total, 400 * 4);
}

#[wasm_bindgen_test]
fn capacity_ceiling_throws() {
    let params = [5.0, 3.0, 0.0, 1.0, 0.0, 0.0, 0.0, 160000.0];
    assert!(menger_wasm::generate_from_buffer(&params).is_err());
    assert_eq!(menger_wasm::predicted_cell_count(&params).unwrap(), 3_200_000.0);
}

#[wasm_bindgen_test]
fn voxel_center_is_empty() {
    let data = menger_wasm::rasterize(2.0, 27).unwrap().to_vec();
    let idx = |x: usize, y: usize, z: usize| (x * 27 + y) * 27 + z;
    assert_eq!(data[idx(13, 13, 13)], 0);
    assert_eq!(data[idx(0, 0, 0)], 1);
}

#[wasm_bindgen_test]
fn formulas_and_clamp_are_json() {
    let json = menger_wasm::formulas_json(2.0, &[]).unwrap();
    assert!(json.contains("\"N\":400.0"));
    let clamp = menger_wasm::clamp_order(5.0, 0).unwrap();
    assert!(clamp.contains("\"approximated\":true"));
}
