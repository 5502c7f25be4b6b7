//! SABR parameter sensitivities bucketed by (expiry, maturity).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use pricer_models::models::sabr::SabrParameter;

/// Smile point a sensitivity is attached to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SabrBucket {
    /// Option expiry (years)
    pub expiry: f64,
    /// Underlying swap maturity (years)
    pub maturity: f64,
}

impl Eq for SabrBucket {}

impl PartialOrd for SabrBucket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SabrBucket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.expiry
            .total_cmp(&other.expiry)
            .then(self.maturity.total_cmp(&other.maturity))
    }
}

#[inline]
fn slot(parameter: SabrParameter) -> usize {
    match parameter {
        SabrParameter::Alpha => 0,
        SabrParameter::Rho => 1,
        SabrParameter::Nu => 2,
    }
}

/// Present value sensitivities to alpha, rho and nu per smile point.
///
/// # Example
///
/// ```
/// use pricer_models::models::sabr::SabrParameter;
/// use pricer_pricing::sensitivity::SabrSensitivity;
///
/// let mut s = SabrSensitivity::new();
/// s.add(5.0, 10.0, SabrParameter::Alpha, 120.0);
/// s.add(5.0, 10.0, SabrParameter::Alpha, 30.0);
/// assert_eq!(s.get(5.0, 10.0, SabrParameter::Alpha), 150.0);
/// assert_eq!(s.get(5.0, 10.0, SabrParameter::Nu), 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SabrSensitivity {
    buckets: BTreeMap<SabrBucket, [f64; 3]>,
}

impl SabrSensitivity {
    /// Empty sensitivity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the `parameter` sensitivity at `(expiry, maturity)`.
    pub fn add(&mut self, expiry: f64, maturity: f64, parameter: SabrParameter, amount: f64) {
        self.buckets.entry(SabrBucket { expiry, maturity }).or_insert([0.0; 3])[slot(parameter)] += amount;
    }

    /// Sensitivity to `parameter` at `(expiry, maturity)`; zero when absent.
    pub fn get(&self, expiry: f64, maturity: f64, parameter: SabrParameter) -> f64 {
        self.buckets
            .get(&SabrBucket { expiry, maturity })
            .map_or(0.0, |values| values[slot(parameter)])
    }

    /// `(∂α, ∂ρ, ∂ν)` triples in bucket order.
    pub fn buckets(&self) -> impl Iterator<Item = (&SabrBucket, &[f64; 3])> {
        self.buckets.iter()
    }

    /// Sum of the `parameter` sensitivity over all buckets.
    pub fn total(&self, parameter: SabrParameter) -> f64 {
        self.buckets.values().map(|values| values[slot(parameter)]).sum()
    }

    /// Bucket-wise sum.
    pub fn plus(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (bucket, values) in &other.buckets {
            for parameter in SabrParameter::ALL {
                result.add(bucket.expiry, bucket.maturity, parameter, values[slot(parameter)]);
            }
        }
        result
    }

    /// Every amount scaled by `factor`.
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            buckets: self
                .buckets
                .iter()
                .map(|(bucket, values)| (*bucket, values.map(|v| v * factor)))
                .collect(),
        }
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no bucket is present.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
