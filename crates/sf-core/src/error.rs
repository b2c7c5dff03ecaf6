//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From`, so `?` works across crate boundaries.

use thiserror::Error;

/// The base error type for `sf-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A configuration value violates its documented constraint.  Raised
    /// before any simulation process starts; values are never clamped.
    #[error("invalid parameter `{field}` = {value}: must be {constraint}")]
    InvalidParameter {
        field:      String,
        constraint: &'static str,
        value:      f64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn invalid(field: impl Into<String>, constraint: &'static str, value: f64) -> Self {
        CoreError::InvalidParameter { field: field.into(), constraint, value }
    }
}

/// Shorthand result type for all `sf-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;

// ── Constraint helpers ────────────────────────────────────────────────────────

/// `value` must be finite and strictly positive.
pub fn ensure_positive(field: &str, value: f64) -> CoreResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::invalid(field, "finite and > 0", value))
    }
}

/// `value` must be finite and ≥ 0.
pub fn ensure_non_negative(field: &str, value: f64) -> CoreResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CoreError::invalid(field, "finite and >= 0", value))
    }
}

/// `value` must be a probability in `[0, 1]`.
pub fn ensure_probability(field: &str, value: f64) -> CoreResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CoreError::invalid(field, "within [0, 1]", value))
    }
}
