//! Program pricing and profitability engine.
//!
//! Computes patient-facing prices, itemized fee deductions, and brand profit
//! for telehealth program plans: the standard ongoing monthly charge, the
//! discounted first month, and prepaid multi-month plans. All calculations
//! are pure and deterministic; callers supply a cost snapshot and fee
//! configuration and receive a fresh breakdown on every call.

pub mod error;
pub mod pricing;

pub use error::ConfigError;
pub use pricing::round_cents;
