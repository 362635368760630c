use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Sub},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const GRAMS_PER_KG: u32 = 1000;
const MAX_FRACTION_DIGITS: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    #[error("Invalid weight \"{0}\".")]
    Invalid(String),
    #[error("Weight \"{0}\" has more than three decimal places.")]
    TooPrecise(String),
    #[error("Weight {0} is out of range.")]
    OutOfRange(String),
}

/// A non-negative mass stored as whole grams.
///
/// Every calculation in the crate happens on this integer representation, so
/// sums and differences are exact and no rounding is needed between steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(u32);

impl Weight {
    pub const ZERO: Weight = Weight(0);

    #[must_use]
    pub const fn from_grams(grams: u32) -> Self {
        Weight(grams)
    }

    #[must_use]
    pub const fn kg(kg: u32) -> Self {
        Weight(kg * GRAMS_PER_KG)
    }

    /// Rounds half away from zero to the nearest gram.
    ///
    /// # Errors
    /// If `kg` is negative, not finite, or too large to represent.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_from_kg(kg: f64) -> Result<Self, WeightError> {
        if !kg.is_finite() || kg < 0.0 {
            return Err(WeightError::OutOfRange(kg.to_string()));
        }
        let grams = (kg * f64::from(GRAMS_PER_KG)).round();
        if grams > f64::from(u32::MAX) {
            return Err(WeightError::OutOfRange(kg.to_string()));
        }
        Ok(Weight(grams as u32))
    }

    pub const fn grams(self) -> u32 {
        self.0
    }

    pub fn as_kg(self) -> f64 {
        f64::from(self.0) / f64::from(GRAMS_PER_KG)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_sub(self, other: Weight) -> Option<Weight> {
        self.0.checked_sub(other.0).map(Weight)
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Self) -> Self::Output {
        Weight(self.0 + rhs.0)
    }
}

impl Sub for Weight {
    type Output = Weight;

    fn sub(self, rhs: Self) -> Self::Output {
        Weight(self.0 - rhs.0)
    }
}

impl Mul<u32> for Weight {
    type Output = Weight;

    fn mul(self, rhs: u32) -> Self::Output {
        Weight(self.0 * rhs)
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Weight::ZERO, |acc, weight| acc + weight)
    }
}

impl Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / GRAMS_PER_KG;
        let fraction = self.0 % GRAMS_PER_KG;
        if fraction == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{fraction:03}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Weight {
    type Err = WeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_suffix("kg")
            .unwrap_or(trimmed)
            .trim_end();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(WeightError::Invalid(s.to_string()));
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(WeightError::TooPrecise(s.to_string()));
        }

        let whole: u32 = match whole {
            "" => 0,
            digits => digits
                .parse()
                .map_err(|_| WeightError::OutOfRange(s.to_string()))?,
        };
        let fraction: u32 = format!("{fraction:0<3}")
            .parse()
            .map_err(|_| WeightError::Invalid(s.to_string()))?;

        whole
            .checked_mul(GRAMS_PER_KG)
            .and_then(|grams| grams.checked_add(fraction))
            .map(Weight)
            .ok_or_else(|| WeightError::OutOfRange(s.to_string()))
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_kg())
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kg = f64::deserialize(deserializer)?;
        Weight::try_from_kg(kg).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_kilograms_exactly() {
        assert_eq!("82.5".parse::<Weight>().unwrap(), Weight::from_grams(82_500));
        assert_eq!("29.999".parse::<Weight>().unwrap(), Weight::from_grams(29_999));
        assert_eq!("100kg".parse::<Weight>().unwrap(), Weight::kg(100));
        assert_eq!(".5".parse::<Weight>().unwrap(), Weight::from_grams(500));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!("".parse::<Weight>(), Err(WeightError::Invalid(_))));
        assert!(matches!("-5".parse::<Weight>(), Err(WeightError::Invalid(_))));
        assert!(matches!("1.2.3".parse::<Weight>(), Err(WeightError::Invalid(_))));
        assert!(matches!("1.2345".parse::<Weight>(), Err(WeightError::TooPrecise(_))));
        assert!(matches!("99999999".parse::<Weight>(), Err(WeightError::OutOfRange(_))));
    }

    #[test]
    fn displays_without_trailing_zeros() {
        assert_eq!(Weight::kg(100).to_string(), "100");
        assert_eq!(Weight::from_grams(82_500).to_string(), "82.5");
        assert_eq!(Weight::from_grams(29_999).to_string(), "29.999");
        assert_eq!(Weight::from_grams(1_050).to_string(), "1.05");
    }

    #[test]
    fn converts_from_float_kilograms() {
        assert_eq!(Weight::try_from_kg(82.5).unwrap(), Weight::from_grams(82_500));
        assert_eq!(Weight::try_from_kg(2.25).unwrap(), Weight::from_grams(2_250));
        assert!(Weight::try_from_kg(-1.0).is_err());
        assert!(Weight::try_from_kg(f64::NAN).is_err());
    }
}
