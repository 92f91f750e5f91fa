//! Error handling for fee configuration

use rust_decimal::Decimal;

/// Configuration error type.
///
/// Only fee-configuration resolution can fail; the calculation engine itself
/// is total over clamped non-negative inputs and has no error returns.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} out of range: stored value {value} must be between 0 and 100")]
    FeePercentOutOfRange { field: &'static str, value: Decimal },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
