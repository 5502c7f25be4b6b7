//! Named curve bundle.

use std::collections::HashMap;

use super::{CurveEnum, YieldCurve};
use crate::market_data::error::MarketDataError;

/// Container of yield curves keyed by name.
///
/// Instruments refer to their discounting and forward projection curves by
/// name; pricing methods query discount factors through
/// [`discount_factor`](CurveSet::discount_factor).
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveEnum, CurveSet};
///
/// let curves = CurveSet::new()
///     .with_curve("EUR-DSC", CurveEnum::flat(0.01))
///     .with_curve("EUR-E6M", CurveEnum::flat(0.015));
/// let df = curves.discount_factor("EUR-DSC", 2.0).unwrap();
/// assert!((df - (-0.02_f64).exp()).abs() < 1e-15);
/// assert!(curves.discount_factor("USD-DSC", 2.0).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveSet {
    curves: HashMap<String, CurveEnum>,
}

impl CurveSet {
    /// Empty curve set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_curve(mut self, name: impl Into<String>, curve: impl Into<CurveEnum>) -> Self {
        self.insert(name, curve);
        self
    }

    /// Insert or replace a curve.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, curve: impl Into<CurveEnum>) {
        self.curves.insert(name.into(), curve.into());
    }

    /// Curve by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&CurveEnum> {
        self.curves.get(name)
    }

    /// Curve by name, or `MarketDataError::CurveNotFound`.
    pub fn get_or_err(&self, name: &str) -> Result<&CurveEnum, MarketDataError> {
        self.curves
            .get(name)
            .ok_or_else(|| MarketDataError::CurveNotFound {
                name: name.to_string(),
            })
    }

    /// Discount factor of curve `name` at time `t`.
    pub fn discount_factor(&self, name: &str, t: f64) -> Result<f64, MarketDataError> {
        self.get_or_err(name)?.discount_factor(t)
    }

    /// Whether a curve with this name exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    /// Number of curves.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the set holds no curve.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Copy of the set with curve `name` shifted in parallel by `shift`.
    pub fn with_parallel_shift(&self, name: &str, shift: f64) -> Result<Self, MarketDataError> {
        let shifted = self.get_or_err(name)?.shifted(shift);
        let mut out = self.clone();
        out.insert(name, shifted);
        Ok(out)
    }

    /// Curve names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_is_empty() {
        let curves = CurveSet::new();
        assert!(curves.is_empty());
        assert_eq!(curves.len(), 0);
    }

    #[test]
    fn test_insert_replaces() {
        let mut curves = CurveSet::new();
        curves.insert("DSC", CurveEnum::flat(0.01));
        curves.insert("DSC", CurveEnum::flat(0.02));
        assert_eq!(curves.len(), 1);
        assert_relative_eq!(
            curves.get("DSC").unwrap().zero_rate(1.0).unwrap(),
            0.02,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_missing_curve_error_carries_name() {
        let curves = CurveSet::new().with_curve("DSC", CurveEnum::flat(0.01));
        assert_eq!(
            curves.discount_factor("FWD", 1.0),
            Err(MarketDataError::CurveNotFound {
                name: "FWD".to_string()
            })
        );
    }

    #[test]
    fn test_parallel_shift_touches_only_named_curve() {
        let curves = CurveSet::new()
            .with_curve("DSC", CurveEnum::flat(0.01))
            .with_curve("FWD", CurveEnum::flat(0.02));
        let bumped = curves.with_parallel_shift("FWD", 1e-4).unwrap();
        assert_eq!(
            bumped.discount_factor("DSC", 3.0).unwrap(),
            curves.discount_factor("DSC", 3.0).unwrap()
        );
        assert_relative_eq!(
            bumped.get("FWD").unwrap().zero_rate(3.0).unwrap(),
            0.0201,
            epsilon = 1e-15
        );
        assert!(curves.with_parallel_shift("XXX", 1e-4).is_err());
    }
}
