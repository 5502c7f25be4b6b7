//! Point sensitivities to yield curves.

use std::collections::BTreeMap;

/// Times closer than this are merged by [`CurveSensitivity::cleaned`].
const TIME_MERGE_TOLERANCE: f64 = 1e-12;

/// Sensitivity of a value to the continuously-compounded zero rates of
/// named curves.
///
/// Each curve maps to a list of `(time, amount)` pairs where `amount` is
/// `∂value/∂z(time)`. The sum of a curve's amounts is the sensitivity to a
/// parallel shift of that curve.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::CurveSensitivity;
///
/// let a = CurveSensitivity::from_points("DSC", vec![(1.0, -2.0)]);
/// let b = CurveSensitivity::from_points("DSC", vec![(1.0, -0.5), (2.0, 1.0)]);
/// let total = a.plus(&b).cleaned();
/// assert_eq!(total.points("DSC"), Some(&[(1.0, -2.5), (2.0, 1.0)][..]));
/// assert_eq!(total.parallel_total("DSC"), -1.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveSensitivity {
    sensitivities: BTreeMap<String, Vec<(f64, f64)>>,
}

impl CurveSensitivity {
    /// Empty sensitivity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sensitivity to a single curve.
    pub fn from_points(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        let mut out = Self::new();
        out.sensitivities.insert(name.into(), points);
        out
    }

    /// Append one `(time, amount)` point to curve `name`.
    pub fn add_point(&mut self, name: &str, time: f64, amount: f64) {
        self.sensitivities
            .entry(name.to_string())
            .or_default()
            .push((time, amount));
    }

    /// Concatenation of both point lists, curve by curve.
    pub fn plus(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (name, points) in &other.sensitivities {
            out.sensitivities
                .entry(name.clone())
                .or_default()
                .extend_from_slice(points);
        }
        out
    }

    /// Every amount scaled by `factor`.
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(name, points)| {
                    let scaled = points.iter().map(|&(t, a)| (t, a * factor)).collect();
                    (name.clone(), scaled)
                })
                .collect(),
        }
    }

    /// Points sorted by time with equal times merged.
    pub fn cleaned(&self) -> Self {
        let mut out = Self::new();
        for (name, points) in &self.sensitivities {
            let mut sorted = points.clone();
            sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut merged: Vec<(f64, f64)> = Vec::with_capacity(sorted.len());
            for (t, amount) in sorted {
                match merged.last_mut() {
                    Some(last) if (t - last.0).abs() < TIME_MERGE_TOLERANCE => last.1 += amount,
                    _ => merged.push((t, amount)),
                }
            }
            out.sensitivities.insert(name.clone(), merged);
        }
        out
    }

    /// Points of curve `name`.
    pub fn points(&self, name: &str) -> Option<&[(f64, f64)]> {
        self.sensitivities.get(name).map(Vec::as_slice)
    }

    /// Sum of the amounts of curve `name` (zero when absent).
    pub fn parallel_total(&self, name: &str) -> f64 {
        self.points(name)
            .map(|points| points.iter().map(|&(_, a)| a).sum())
            .unwrap_or(0.0)
    }

    /// Curve names in sorted order.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.sensitivities.keys().map(String::as_str)
    }

    /// Whether no curve has been recorded.
    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_keeps_curves_separate() {
        let a = CurveSensitivity::from_points("DSC", vec![(1.0, 1.0)]);
        let b = CurveSensitivity::from_points("FWD", vec![(2.0, 3.0)]);
        let sum = a.plus(&b);
        assert_eq!(sum.curve_names().collect::<Vec<_>>(), vec!["DSC", "FWD"]);
        assert_eq!(sum.parallel_total("FWD"), 3.0);
    }

    #[test]
    fn test_multiplied_by() {
        let s = CurveSensitivity::from_points("DSC", vec![(1.0, 2.0), (3.0, -1.0)]);
        let scaled = s.multiplied_by(-0.5);
        assert_eq!(scaled.points("DSC"), Some(&[(1.0, -1.0), (3.0, 0.5)][..]));
    }

    #[test]
    fn test_cleaned_sorts_and_merges() {
        let mut s = CurveSensitivity::new();
        s.add_point("DSC", 5.0, 1.0);
        s.add_point("DSC", 1.0, 2.0);
        s.add_point("DSC", 5.0, 0.5);
        let cleaned = s.cleaned();
        assert_eq!(cleaned.points("DSC"), Some(&[(1.0, 2.0), (5.0, 1.5)][..]));
    }

    #[test]
    fn test_missing_curve_total_is_zero() {
        assert_eq!(CurveSensitivity::new().parallel_total("DSC"), 0.0);
        assert!(CurveSensitivity::new().is_empty());
    }
}
