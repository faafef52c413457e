use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::LimitError;

pub const MIN_EXPONENT: u32 = 2;
/// Largest exponent whose candidate, 2^31 − 1, is cheap to trial-divide.
pub const MAX_EXPONENT: u32 = 31;
pub const DEFAULT_EXPONENT: u32 = 31;

/// An exponent bound known to lie in `[MIN_EXPONENT, MAX_EXPONENT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExponentLimit(u32);

impl ExponentLimit {
    pub fn new(value: i64) -> Result<Self, LimitError> {
        if value < i64::from(MIN_EXPONENT) || value > i64::from(MAX_EXPONENT) {
            return Err(LimitError::OutOfRange {
                value,
                min: MIN_EXPONENT,
                max: MAX_EXPONENT,
            });
        }
        Ok(ExponentLimit(value as u32))
    }

    /// Saturates `value` into the supported range instead of rejecting it.
    pub fn clamped(value: i64) -> Self {
        let value = value.clamp(i64::from(MIN_EXPONENT), i64::from(MAX_EXPONENT));
        ExponentLimit(value as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// 2^p − 1 for this exponent; always fits since p ≤ 31.
    pub fn candidate(self) -> u64 {
        (1u64 << self.0) - 1
    }
}

impl Default for ExponentLimit {
    fn default() -> Self {
        ExponentLimit(DEFAULT_EXPONENT)
    }
}

impl FromStr for ExponentLimit {
    type Err = LimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| LimitError::NotAnInteger(s.to_string()))?;
        ExponentLimit::new(value)
    }
}

impl fmt::Display for ExponentLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
