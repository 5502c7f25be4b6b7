//! Payment frequency enumeration.

use std::fmt;
use std::str::FromStr;

/// Payment frequency of a regular leg.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Frequency;
///
/// let freq = Frequency::Quarterly;
/// assert_eq!(freq.periods_per_year(), 4);
/// assert_eq!(freq.accrual_fraction(), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    /// Once per year.
    Annual,
    /// Twice per year.
    SemiAnnual,
    /// Four times per year.
    Quarterly,
    /// Twelve times per year.
    Monthly,
}

impl Frequency {
    /// Number of payment periods per year.
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Length of one regular period in years.
    #[inline]
    pub fn accrual_fraction(&self) -> f64 {
        1.0 / self.periods_per_year() as f64
    }

    /// Frequency whose regular accrual is closest to `accrual` years.
    ///
    /// ```
    /// use pricer_models::schedules::Frequency;
    ///
    /// assert_eq!(Frequency::from_accrual(0.2514), Some(Frequency::Quarterly));
    /// assert_eq!(Frequency::from_accrual(0.0), None);
    /// ```
    pub fn from_accrual(accrual: f64) -> Option<Self> {
        if !(accrual > 0.0) {
            return None;
        }
        match (1.0 / accrual).round() as u32 {
            1 => Some(Frequency::Annual),
            2 => Some(Frequency::SemiAnnual),
            4 => Some(Frequency::Quarterly),
            12 => Some(Frequency::Monthly),
            _ => None,
        }
    }

    /// Standard name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = String;

    /// Parses "annual"/"1y", "semi-annual"/"6m", "quarterly"/"3m" or
    /// "monthly"/"1m" (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "annual" | "1y" | "12m" => Ok(Frequency::Annual),
            "semiannual" | "6m" => Ok(Frequency::SemiAnnual),
            "quarterly" | "3m" => Ok(Frequency::Quarterly),
            "monthly" | "1m" => Ok(Frequency::Monthly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
        assert_eq!(Frequency::SemiAnnual.periods_per_year(), 2);
        assert_eq!(Frequency::Quarterly.periods_per_year(), 4);
        assert_eq!(Frequency::Monthly.periods_per_year(), 12);
    }

    #[test]
    fn test_from_accrual_round_trip() {
        for freq in [
            Frequency::Annual,
            Frequency::SemiAnnual,
            Frequency::Quarterly,
            Frequency::Monthly,
        ] {
            assert_eq!(Frequency::from_accrual(freq.accrual_fraction()), Some(freq));
        }
        assert_eq!(Frequency::from_accrual(1.0 / 3.0), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Semi-Annual".parse::<Frequency>(), Ok(Frequency::SemiAnnual));
        assert_eq!("3M".parse::<Frequency>(), Ok(Frequency::Quarterly));
        assert!("fortnightly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Frequency::Quarterly), "Quarterly");
    }
}
