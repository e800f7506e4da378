/// Scaling laws for any (rule, factor) pair.
///
/// The classic sponge is the `(Menger, 3)` instance; the builder screen's
/// other combinations grow by the same exponential laws with different
/// bases.

use serde::Serialize;

use crate::engine::rule::SurvivalRule;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScalingLaw {
    pub rule: SurvivalRule,
    pub factor: u32,
    /// Sub-cells kept per step
    pub kept: u64,
}

impl ScalingLaw {
    pub fn new(rule: SurvivalRule, factor: u32) -> Self {
        Self { rule, factor, kept: rule.kept_count(factor) }
    }

    pub fn cell_count(&self, n: u32) -> f64 {
        (self.kept as f64).powf(f64::from(n))
    }

    pub fn edge_length(&self, n: u32) -> f64 {
        f64::from(self.factor).powf(-f64::from(n))
    }

    /// Fraction of the root volume left after `n` steps.
    pub fn volume(&self, n: u32) -> f64 {
        let f = f64::from(self.factor);
        (self.kept as f64 / (f * f * f)).powf(f64::from(n))
    }

    /// `ln(kept) / ln(factor)`; 3 when nothing is removed.
    pub fn dimension(&self) -> f64 {
        (self.kept as f64).ln() / f64::from(self.factor).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generator::{generate, GenerationRequest};
    use crate::formulas::sponge;

    #[test]
    fn test_menger_instance_matches_table() {
        let law = ScalingLaw::new(SurvivalRule::Menger, 3);
        assert_eq!(law.kept, 20);
        for n in 0..6 {
            assert_eq!(law.cell_count(n), sponge::cube_count(n));
            assert!((law.volume(n) - sponge::volume(n)).abs() < 1e-15);
            assert!((law.edge_length(n) - sponge::edge_length(n)).abs() < 1e-15);
        }
        assert!((law.dimension() - sponge::fractal_dimension()).abs() < 1e-15);
    }

    #[test]
    fn test_center_only_dimension() {
        let law = ScalingLaw::new(SurvivalRule::CenterOnly, 3);
        assert_eq!(law.kept, 26);
        assert!((law.dimension() - 26f64.ln() / 3f64.ln()).abs() < 1e-12);
        assert!((ScalingLaw::new(SurvivalRule::Menger, 2).dimension() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_counts_match_enumeration() {
        for rule in [SurvivalRule::Menger, SurvivalRule::CenterOnly] {
            for factor in [2u32, 3, 4] {
                let law = ScalingLaw::new(rule, factor);
                for n in 0..=2 {
                    let req = GenerationRequest::new(n).with_factor(factor).with_rule(rule);
                    let cells = generate(&req).unwrap();
                    assert_eq!(cells.len() as f64, law.cell_count(n), "{rule:?} f={factor} n={n}");
                    let occupied: f64 = cells.iter().map(|c| c.size.powi(3)).sum();
                    assert!((occupied - law.volume(n)).abs() < 1e-9);
                }
            }
        }
    }
}
