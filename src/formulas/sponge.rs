/// Closed-form scaling laws of the classic Menger sponge (factor 3,
/// 20 of 27 sub-cubes kept). All functions take the order `n`.

/// Sub-cubes kept per step.
pub const KEPT: f64 = 20.0;
/// Linear subdivision factor.
pub const FACTOR: f64 = 3.0;
/// Sub-cubes removed per step (center + six face centers).
pub const REMOVED_PER_STEP: f64 = 7.0;

/// `N(n) = 20^n`
#[inline]
pub fn cube_count(n: u32) -> f64 {
    KEPT.powf(f64::from(n))
}

/// `20^n` as an integer, `None` once it no longer fits in a u64.
pub fn cube_count_exact(n: u32) -> Option<u64> {
    20u64.checked_pow(n)
}

/// `l(n) = 3^-n`
#[inline]
pub fn edge_length(n: u32) -> f64 {
    FACTOR.powf(-f64::from(n))
}

/// `V(n) = (20/27)^n`
#[inline]
pub fn volume(n: u32) -> f64 {
    (KEPT / 27.0).powf(f64::from(n))
}

#[inline]
pub fn removed_volume(n: u32) -> f64 {
    1.0 - volume(n)
}

/// `A(n) = 6 (20/9)^n`
#[inline]
pub fn surface_area(n: u32) -> f64 {
    6.0 * (KEPT / 9.0).powf(f64::from(n))
}

/// `A/V = 6 * 3^n`
#[inline]
pub fn surface_to_volume(n: u32) -> f64 {
    6.0 * FACTOR.powf(f64::from(n))
}

/// Similarity dimension `ln 20 / ln 3`, independent of the order.
#[inline]
pub fn fractal_dimension() -> f64 {
    KEPT.ln() / FACTOR.ln()
}

/// Holes opened at step `n`: `7 * 20^(n-1)`, none before the first step.
pub fn holes_at_step(n: u32) -> f64 {
    if n == 0 {
        0.0
    } else {
        REMOVED_PER_STEP * KEPT.powf(f64::from(n) - 1.0)
    }
}

/// Holes opened up to and including step `n`: `7 (20^n - 1) / 19`.
pub fn total_holes(n: u32) -> f64 {
    REMOVED_PER_STEP * (KEPT.powf(f64::from(n)) - 1.0) / (KEPT - 1.0)
}
