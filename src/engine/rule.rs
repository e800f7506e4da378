/// Subdivision rule evaluator.
///
/// Decides whether a sub-cell of one subdivision step survives. Grid
/// coordinates run over `0..factor` per axis; the "center" of an axis is
/// `(factor - 1) / 2`, which only lands on a grid line for odd factors.
/// For even factors no sub-cell sits on a center, so both rules keep
/// every sub-cell.

use serde::{Deserialize, Serialize};

use crate::engine::types::Vec3D;
use crate::error::{Result, SpongeError};

const MAX_OFFSET_PREALLOC: u64 = 1 << 16;

/// Carving rule applied at every subdivision step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurvivalRule {
    /// Remove the center and the six face centers (classic Menger sponge).
    #[default]
    Menger,
    /// Remove only the center sub-cube.
    CenterOnly,
}

impl SurvivalRule {
    /// Parse from the names used by the UI pickers.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "menger" | "remove center + faces" => Ok(SurvivalRule::Menger),
            "center-only" | "center_only" | "remove center" => Ok(SurvivalRule::CenterOnly),
            other => Err(SpongeError::invalid(format!("unknown survival rule {other:?}"))),
        }
    }

    /// Numeric id used in flat parameter buffers.
    pub fn from_id(id: u32) -> Result<Self> {
        match id {
            0 => Ok(SurvivalRule::Menger),
            1 => Ok(SurvivalRule::CenterOnly),
            _ => Err(SpongeError::invalid(format!("unknown survival rule id {id}"))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SurvivalRule::Menger => "menger",
            SurvivalRule::CenterOnly => "center-only",
        }
    }

    /// Keep/remove decision for grid coordinates in `0..factor`.
    #[inline]
    pub fn keeps(&self, x: u32, y: u32, z: u32, factor: u32) -> bool {
        let centered = u32::from(is_center(x, factor))
            + u32::from(is_center(y, factor))
            + u32::from(is_center(z, factor));
        match self {
            SurvivalRule::Menger => centered < 2,
            SurvivalRule::CenterOnly => centered < 3,
        }
    }

    /// Number of sub-cells kept per subdivision step, saturating at
    /// `u64::MAX`.
    pub fn kept_count(&self, factor: u32) -> u64 {
        let f = u64::from(factor);
        let Some(total) = f.checked_mul(f).and_then(|sq| sq.checked_mul(f)) else {
            return u64::MAX;
        };
        if factor % 2 == 0 {
            return total;
        }
        match self {
            // one center line per axis pair: 3 * (f - 1) face-line cells + the center
            SurvivalRule::Menger => total - (3 * (f - 1) + 1),
            SurvivalRule::CenterOnly => total - 1,
        }
    }

    /// Centered lattice offsets (`axis - (factor - 1) / 2`) of the kept
    /// sub-cells, in x-major order.
    pub fn kept_offsets(&self, factor: u32) -> Vec<Vec3D> {
        let c = (f64::from(factor) - 1.0) * 0.5;
        let hint = self.kept_count(factor).min(MAX_OFFSET_PREALLOC);
        let mut out = Vec::with_capacity(hint as usize);
        for x in 0..factor {
            for y in 0..factor {
                for z in 0..factor {
                    if self.keeps(x, y, z, factor) {
                        out.push(Vec3D::new(
                            f64::from(x) - c,
                            f64::from(y) - c,
                            f64::from(z) - c,
                        ));
                    }
                }
            }
        }
        out
    }
}

#[inline(always)]
fn is_center(a: u32, factor: u32) -> bool {
    // a == (factor - 1) / 2 without leaving the integers
    2 * u64::from(a) + 1 == u64::from(factor)
}

/// Menger rule in signed-offset form (`dx, dy, dz` in `{-1, 0, 1}`):
/// a sub-cube is removed iff `|dx| + |dy| + |dz| <= 1`.
#[inline]
pub fn menger_keeps_offset(dx: i32, dy: i32, dz: i32) -> bool {
    dx.abs() + dy.abs() + dz.abs() > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_form_matches_center_count_form() {
        for x in 0..3u32 {
            for y in 0..3u32 {
                for z in 0..3u32 {
                    let by_ones = SurvivalRule::Menger.keeps(x, y, z, 3);
                    let by_offset = menger_keeps_offset(x as i32 - 1, y as i32 - 1, z as i32 - 1);
                    assert_eq!(by_ones, by_offset, "disagreement at ({x}, {y}, {z})");
                }
            }
        }
    }

    #[test]
    fn test_menger_keeps_twenty() {
        assert_eq!(SurvivalRule::Menger.kept_offsets(3).len(), 20);
        assert_eq!(SurvivalRule::Menger.kept_count(3), 20);
        assert!(!SurvivalRule::Menger.keeps(1, 1, 1, 3));
        assert!(!SurvivalRule::Menger.keeps(1, 1, 0, 3));
        assert!(SurvivalRule::Menger.keeps(1, 0, 0, 3));
        assert!(SurvivalRule::Menger.keeps(0, 0, 0, 3));
    }

    #[test]
    fn test_center_only_keeps_twenty_six() {
        assert_eq!(SurvivalRule::CenterOnly.kept_offsets(3).len(), 26);
        assert_eq!(SurvivalRule::CenterOnly.kept_count(3), 26);
        assert!(!SurvivalRule::CenterOnly.keeps(1, 1, 1, 3));
        assert!(SurvivalRule::CenterOnly.keeps(1, 1, 0, 3));
    }

    #[test]
    fn test_kept_count_matches_enumeration() {
        for rule in [SurvivalRule::Menger, SurvivalRule::CenterOnly] {
            for factor in 2..=7 {
                assert_eq!(
                    rule.kept_offsets(factor).len() as u64,
                    rule.kept_count(factor),
                    "{rule:?} factor {factor}"
                );
            }
        }
    }

    #[test]
    fn test_even_factor_has_no_center() {
        assert_eq!(SurvivalRule::Menger.kept_count(2), 8);
        assert_eq!(SurvivalRule::Menger.kept_count(4), 64);
        let offs = SurvivalRule::Menger.kept_offsets(2);
        assert!(offs.iter().all(|o| o.x.abs() == 0.5 && o.y.abs() == 0.5 && o.z.abs() == 0.5));
    }

    #[test]
    fn test_huge_factor_does_not_overflow() {
        assert_eq!(SurvivalRule::Menger.kept_count(3_000_000), u64::MAX);
        assert_eq!(SurvivalRule::CenterOnly.kept_count(u32::MAX), u64::MAX);
        // 2_000_001^3 still fits in a u64
        let f = 2_000_001u64;
        assert_eq!(SurvivalRule::CenterOnly.kept_count(2_000_001), f * f * f - 1);

        let mid = u32::MAX / 2;
        assert!(!SurvivalRule::Menger.keeps(mid, mid, 0, u32::MAX));
        assert!(SurvivalRule::CenterOnly.keeps(mid, mid, 0, u32::MAX));
        assert!(!SurvivalRule::CenterOnly.keeps(mid, mid, mid, u32::MAX));
    }

    #[test]
    fn test_offsets_are_centered() {
        let offs = SurvivalRule::Menger.kept_offsets(5);
        let sum = offs
            .iter()
            .fold(Vec3D::ORIGIN, |a, o| Vec3D::new(a.x + o.x, a.y + o.y, a.z + o.z));
        assert!(sum.x.abs() < 1e-12 && sum.y.abs() < 1e-12 && sum.z.abs() < 1e-12);
        assert!(offs.iter().all(|o| o.x.abs() <= 2.0));
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(SurvivalRule::from_name("menger"), Ok(SurvivalRule::Menger));
        assert_eq!(SurvivalRule::from_name("Remove center + faces"), Ok(SurvivalRule::Menger));
        assert_eq!(SurvivalRule::from_name("center-only"), Ok(SurvivalRule::CenterOnly));
        assert_eq!(SurvivalRule::from_name("Remove center"), Ok(SurvivalRule::CenterOnly));
        assert!(SurvivalRule::from_name("cantor").is_err());
        assert_eq!(SurvivalRule::from_id(1), Ok(SurvivalRule::CenterOnly));
        assert!(SurvivalRule::from_id(7).is_err());
    }
}
