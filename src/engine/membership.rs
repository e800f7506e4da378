/// Point membership testing.
///
/// Answers "is this point solid?" without enumerating cells, by peeling
/// off one base-`factor` digit per axis per level and asking the rule
/// about the digit triple. Used by the ASCII ray marcher.

use crate::engine::rule::SurvivalRule;
use crate::engine::types::Vec3D;

/// Membership for a point of the unit cube `[0, 1)^3`.
pub fn is_solid(p: &Vec3D, level: u32, rule: SurvivalRule, factor: u32) -> bool {
    let inside = |v: f64| (0.0..1.0).contains(&v);
    if !(inside(p.x) && inside(p.y) && inside(p.z)) {
        return false;
    }
    if factor < 2 {
        // no subdivision to carve
        return true;
    }
    let f = f64::from(factor);
    let (mut x, mut y, mut z) = (p.x, p.y, p.z);
    for _ in 0..level {
        let (dx, nx) = split_digit(x, f, factor);
        let (dy, ny) = split_digit(y, f, factor);
        let (dz, nz) = split_digit(z, f, factor);
        if !rule.keeps(dx, dy, dz, factor) {
            return false;
        }
        x = nx;
        y = ny;
        z = nz;
    }
    true
}

/// Membership for a point of the generator's frame `[-0.5, 0.5)^3`.
#[inline]
pub fn is_solid_centered(p: &Vec3D, level: u32, rule: SurvivalRule, factor: u32) -> bool {
    is_solid(&Vec3D::new(p.x + 0.5, p.y + 0.5, p.z + 0.5), level, rule, factor)
}

/// Leading digit of `v` in base `factor` and the remaining fraction.
#[inline(always)]
fn split_digit(v: f64, f: f64, factor: u32) -> (u32, f64) {
    let scaled = v * f;
    let digit = (scaled.floor() as u32).min(factor - 1);
    (digit, scaled - f64::from(digit))
}
