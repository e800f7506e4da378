/// Request configuration decoded from the JS side, plus the display-tier
/// order caps applied before the generator is called.
///
/// The generator itself never clamps; the caps here are rendering policy.

use serde::{Deserialize, Serialize};

use crate::engine::generator::GenerationRequest;
use crate::engine::rule::SurvivalRule;
use crate::engine::types::Vec3D;
use crate::error::{order_from_f64, Result, SpongeError};
use crate::formulas::FormulaConstants;

/// Device/display class of the consuming screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderTier {
    MobileLow,
    MobileHigh,
    DesktopLow,
    DesktopHigh,
}

impl RenderTier {
    pub fn from_flags(mobile: bool, low_graphics: bool) -> Self {
        match (mobile, low_graphics) {
            (true, true) => RenderTier::MobileLow,
            (true, false) => RenderTier::MobileHigh,
            (false, true) => RenderTier::DesktopLow,
            (false, false) => RenderTier::DesktopHigh,
        }
    }

    pub fn from_id(id: u32) -> Result<Self> {
        match id {
            0 => Ok(RenderTier::MobileLow),
            1 => Ok(RenderTier::MobileHigh),
            2 => Ok(RenderTier::DesktopLow),
            3 => Ok(RenderTier::DesktopHigh),
            _ => Err(SpongeError::invalid(format!("unknown render tier id {id}"))),
        }
    }

    /// Highest order rendered as instanced cubes on this tier.
    pub fn max_order(&self) -> u32 {
        match self {
            RenderTier::MobileLow => 2,
            RenderTier::MobileHigh => 3,
            RenderTier::DesktopLow => 3,
            RenderTier::DesktopHigh => 4,
        }
    }

    /// True when the UI should show the "level approximated" notice.
    ///
    /// Follows the tier cap, so mobile tiers warn one order earlier than
    /// the desktop tier with the same graphics setting.
    pub fn performance_notice(&self, order: u32) -> bool {
        order > self.max_order()
    }
}

/// Outcome of capping a requested order to a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderClamp {
    pub requested: u32,
    pub effective: u32,
    pub approximated: bool,
}

pub fn clamp_order(order: u32, tier: RenderTier) -> OrderClamp {
    let effective = order.min(tier.max_order());
    if effective != order {
        log::warn!("order {order} capped to {effective} for {tier:?}; level approximated");
    }
    OrderClamp { requested: order, effective, approximated: effective != order }
}

/// Decode a generation request from a flat buffer.
///
/// Layout: `[order, factor, rule_id, root_size, cx, cy, cz, max_cells]`.
/// Missing trailing entries take their defaults; `max_cells == 0` means
/// no ceiling.
pub fn request_from_buffer(data: &[f64]) -> Result<GenerationRequest> {
    let defaults = GenerationRequest::default();
    let at = |i: usize, fallback: f64| data.get(i).copied().unwrap_or(fallback);

    let order = match data.first() {
        Some(&v) => order_from_f64(v)?,
        None => defaults.order,
    };
    let subdivision_factor = integer_field(
        "subdivision factor",
        at(1, f64::from(defaults.subdivision_factor)),
    )?;
    let rule = SurvivalRule::from_id(integer_field("rule id", at(2, 0.0))?)?;
    let max_cells = match at(7, 0.0) {
        v if v == 0.0 => None,
        v if v.is_finite() && v > 0.0 && v.fract() == 0.0 => Some(v as u64),
        v => {
            return Err(SpongeError::invalid(format!(
                "cell ceiling must be a positive integer, got {v}"
            )))
        }
    };

    let request = GenerationRequest {
        order,
        subdivision_factor,
        rule,
        root_size: at(3, defaults.root_size),
        root_center: Vec3D::new(at(4, 0.0), at(5, 0.0), at(6, 0.0)),
        max_cells,
    };
    request.validate()?;
    Ok(request)
}

/// Decode formula constants from `[k0, deltaT, mu, L0, I0, scatterK]`.
pub fn constants_from_buffer(data: &[f64]) -> FormulaConstants {
    let d = FormulaConstants::default();
    let at = |i: usize, fallback: f64| {
        data.get(i).copied().filter(|v| v.is_finite()).unwrap_or(fallback)
    };
    FormulaConstants {
        k0: at(0, d.k0),
        delta_t: at(1, d.delta_t),
        mu: at(2, d.mu),
        l0: at(3, d.l0),
        i0: at(4, d.i0),
        scatter_k: at(5, d.scatter_k),
    }
}

fn integer_field(name: &str, v: f64) -> Result<u32> {
    if !v.is_finite() || v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
        return Err(SpongeError::invalid(format!(
            "{name} must be a non-negative integer, got {v}"
        )));
    }
    Ok(v as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_caps() {
        assert_eq!(RenderTier::from_flags(true, true).max_order(), 2);
        assert_eq!(RenderTier::from_flags(true, false).max_order(), 3);
        assert_eq!(RenderTier::from_flags(false, true).max_order(), 3);
        assert_eq!(RenderTier::from_flags(false, false).max_order(), 4);
        assert_eq!(RenderTier::from_id(3), Ok(RenderTier::DesktopHigh));
        assert!(RenderTier::from_id(4).is_err());
    }

    #[test]
    fn test_clamp_order() {
        let c = clamp_order(5, RenderTier::DesktopHigh);
        assert_eq!(c, OrderClamp { requested: 5, effective: 4, approximated: true });
        let c = clamp_order(2, RenderTier::MobileLow);
        assert!(!c.approximated);
        assert_eq!(c.effective, 2);
        assert!(RenderTier::DesktopLow.performance_notice(4));
        assert!(!RenderTier::DesktopLow.performance_notice(3));
        assert!(RenderTier::MobileLow.performance_notice(3));
        assert!(!RenderTier::DesktopHigh.performance_notice(4));
        assert!(RenderTier::DesktopHigh.performance_notice(5));
    }

    #[test]
    fn test_request_from_buffer() {
        let req = request_from_buffer(&[2.0, 3.0, 1.0, 2.0, 0.5, 0.0, -0.5, 1000.0]).unwrap();
        assert_eq!(req.order, 2);
        assert_eq!(req.rule, SurvivalRule::CenterOnly);
        assert_eq!(req.root_size, 2.0);
        assert_eq!(req.root_center, Vec3D::new(0.5, 0.0, -0.5));
        assert_eq!(req.max_cells, Some(1000));

        let req = request_from_buffer(&[3.0]).unwrap();
        assert_eq!(req, GenerationRequest::new(3));
        assert_eq!(request_from_buffer(&[]).unwrap(), GenerationRequest::default());
    }

    #[test]
    fn test_request_from_buffer_rejects() {
        assert!(request_from_buffer(&[-1.0]).is_err());
        assert!(request_from_buffer(&[1.5]).is_err());
        assert!(request_from_buffer(&[1.0, 1.0]).is_err());
        assert!(request_from_buffer(&[1.0, 3.0, 5.0]).is_err());
        assert!(request_from_buffer(&[1.0, 3.0, 0.0, 0.0]).is_err());
        assert!(request_from_buffer(&[1.0, 3.0, 0.0, 1.0, 0.0, 0.0, 0.0, -4.0]).is_err());
    }

    #[test]
    fn test_constants_from_buffer() {
        assert_eq!(constants_from_buffer(&[]), FormulaConstants::default());
        let c = constants_from_buffer(&[2.0, f64::NAN, 0.5]);
        assert_eq!(c.k0, 2.0);
        assert_eq!(c.delta_t, 1.0);
        assert_eq!(c.mu, 0.5);
        assert_eq!(c.scatter_k, 0.05);
    }
}
