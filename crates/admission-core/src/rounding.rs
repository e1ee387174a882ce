//! Rounding policies applied to computed percentages.
//!
//! A policy is configuration, not code: it is persisted with the course's
//! admission criteria and applied exactly once, right before the threshold
//! comparison it belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of decimal places a `Decimals` policy may request.
pub const MAX_DECIMALS: u8 = 10;

/// Scaled values are snapped to this many fractional digits before the final
/// rounding step, so that decimal ties like `1.005` round as written.
const TIE_SNAP_DIGITS: i32 = 9;

/// How a percentage is rounded before it is compared against a threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingPolicy {
    /// Compare the raw value.
    #[default]
    None,
    /// Ceiling.
    UpNearestInteger,
    /// Floor.
    DownNearestInteger,
    /// Round half away from zero to `decimals` places.
    Decimals { decimals: u8 },
}

impl RoundingPolicy {
    /// The persisted tag for this policy (e.g. `"UP_NEAREST_INTEGER"`).
    pub fn as_tag(&self) -> &'static str {
        match self {
            RoundingPolicy::None => "NONE",
            RoundingPolicy::UpNearestInteger => "UP_NEAREST_INTEGER",
            RoundingPolicy::DownNearestInteger => "DOWN_NEAREST_INTEGER",
            RoundingPolicy::Decimals { .. } => "DECIMALS",
        }
    }

    /// Apply the policy to `value`.
    ///
    /// Total over finite inputs, including negative and >100 percentages.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            RoundingPolicy::None => value,
            RoundingPolicy::UpNearestInteger => value.ceil(),
            RoundingPolicy::DownNearestInteger => value.floor(),
            RoundingPolicy::Decimals { decimals } => round_half_away_from_zero(value, decimals),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingPolicy::None => write!(f, "no rounding"),
            RoundingPolicy::UpNearestInteger => write!(f, "rounded up to integer"),
            RoundingPolicy::DownNearestInteger => write!(f, "rounded down to integer"),
            RoundingPolicy::Decimals { decimals } => write!(f, "rounded to {decimals} decimal(s)"),
        }
    }
}

fn round_half_away_from_zero(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals.min(MAX_DECIMALS)));
    let scaled = value * factor;
    let snap = 10f64.powi(TIE_SNAP_DIGITS);
    let snapped = (scaled * snap).round() / snap;
    if !snapped.is_finite() {
        return value;
    }
    // f64::round already breaks ties away from zero.
    snapped.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f64; 12] = [
        0.0, -0.0, 0.4, 49.1, 49.5, 50.0, 70.9, 99.999, 100.0, 133.3, -12.7, 1e12,
    ];

    #[test]
    fn none_is_identity() {
        for v in SAMPLES {
            assert_eq!(RoundingPolicy::None.apply(v).to_bits(), v.to_bits());
        }
    }

    #[test]
    fn up_nearest_integer_bounds() {
        for v in SAMPLES {
            let r = RoundingPolicy::UpNearestInteger.apply(v);
            assert!(r >= v, "{r} < {v}");
            assert!(r - v < 1.0, "{r} - {v} >= 1");
        }
        assert_eq!(RoundingPolicy::UpNearestInteger.apply(49.1), 50.0);
    }

    #[test]
    fn down_nearest_integer_bounds() {
        for v in SAMPLES {
            let r = RoundingPolicy::DownNearestInteger.apply(v);
            assert!(r <= v, "{r} > {v}");
            assert!(v - r < 1.0, "{v} - {r} >= 1");
        }
        assert_eq!(RoundingPolicy::DownNearestInteger.apply(70.9), 70.0);
    }

    #[test]
    fn decimals_zero_rounds_half_up() {
        let p = RoundingPolicy::Decimals { decimals: 0 };
        assert_eq!(p.apply(49.5), 50.0);
        assert_eq!(p.apply(49.4), 49.0);
        assert_eq!(p.apply(-49.5), -50.0);
    }

    #[test]
    fn decimals_handles_binary_representation_ties() {
        let p = RoundingPolicy::Decimals { decimals: 2 };
        assert_eq!(p.apply(1.005), 1.01);
        assert_eq!(p.apply(66.666_666), 66.67);
        assert_eq!(p.apply(66.664), 66.66);
    }

    #[test]
    fn decimals_is_total_for_huge_values() {
        let p = RoundingPolicy::Decimals { decimals: 10 };
        assert_eq!(p.apply(1e300), 1e300);
        assert_eq!(p.apply(-1e300), -1e300);
    }

    #[test]
    fn serde_shape_matches_persisted_config() {
        let json = serde_json::to_string(&RoundingPolicy::Decimals { decimals: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"DECIMALS","decimals":2}"#);
        let json = serde_json::to_string(&RoundingPolicy::UpNearestInteger).unwrap();
        assert_eq!(json, r#"{"type":"UP_NEAREST_INTEGER"}"#);
    }
}
