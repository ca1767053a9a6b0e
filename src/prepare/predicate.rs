//! Validity predicates used to drop non-physical readings.

use serde::{Deserialize, Serialize};

/// A pure `value -> bool` filter applied to prepared series.
///
/// Missing values never pass, whatever the predicate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityPredicate {
    /// `value > 0`. Sensor fault sentinels in this domain are negative.
    #[default]
    Positive,
    /// `value >= 0`.
    NonNegative,
    /// `value > threshold`.
    GreaterThan(f64),
    /// Any finite value.
    Finite,
    /// Caller-supplied function. Not serializable.
    #[serde(skip)]
    Custom(fn(f64) -> bool),
}

impl ValidityPredicate {
    /// Whether `value` is a valid reading.
    pub fn test(&self, value: f64) -> bool {
        match self {
            Self::Positive => value > 0.0,
            Self::NonNegative => value >= 0.0,
            Self::GreaterThan(threshold) => value > *threshold,
            Self::Finite => value.is_finite(),
            Self::Custom(f) => f(value),
        }
    }

    /// Whether an optional reading is valid; `None` never is.
    pub fn accepts(&self, value: Option<f64>) -> bool {
        value.is_some_and(|v| self.test(v))
    }
}
