/// Error types for the sponge engine.
///
/// Generation is pure computation, so the only failures are requests
/// rejected at the boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpongeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("capacity exceeded: {requested} cells requested, ceiling is {ceiling}")]
    CapacityExceeded { requested: u64, ceiling: u64 },
}

pub type Result<T> = std::result::Result<T, SpongeError>;

impl SpongeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SpongeError::InvalidArgument(msg.into())
    }
}

/// Validate an order coming from JS as a float.
///
/// Negative, fractional and non-finite values are rejected, never rounded.
/// Orders above `i32::MAX` are out of range.
pub fn order_from_f64(order: f64) -> Result<u32> {
    if !order.is_finite() {
        return Err(SpongeError::invalid(format!("order must be finite, got {order}")));
    }
    if order < 0.0 {
        return Err(SpongeError::invalid(format!("order must be >= 0, got {order}")));
    }
    if order.fract() != 0.0 {
        return Err(SpongeError::invalid(format!("order must be an integer, got {order}")));
    }
    if order > f64::from(i32::MAX) {
        return Err(SpongeError::invalid(format!("order {order} is out of range")));
    }
    Ok(order as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_from_f64() {
        assert_eq!(order_from_f64(0.0), Ok(0));
        assert_eq!(order_from_f64(3.0), Ok(3));
        assert!(matches!(order_from_f64(-1.0), Err(SpongeError::InvalidArgument(_))));
        assert!(matches!(order_from_f64(1.5), Err(SpongeError::InvalidArgument(_))));
        assert!(matches!(order_from_f64(f64::NAN), Err(SpongeError::InvalidArgument(_))));
        assert!(matches!(order_from_f64(f64::INFINITY), Err(SpongeError::InvalidArgument(_))));
        assert_eq!(order_from_f64(2_147_483_647.0), Ok(2_147_483_647));
        assert!(matches!(order_from_f64(2_147_483_648.0), Err(SpongeError::InvalidArgument(_))));
    }

    #[test]
    fn test_capacity_message_names_both_counts() {
        let err = SpongeError::CapacityExceeded { requested: 3_200_000, ceiling: 160_000 };
        let msg = err.to_string();
        assert!(msg.contains("3200000"));
        assert!(msg.contains("160000"));
    }
}
