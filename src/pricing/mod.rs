//! Pricing engine module for program plans.
//!
//! Pure pricing and profitability calculations for the program quick-edit
//! view: standard monthly, discounted month 1, and prepaid multi-month plans.
//! Callers persist only raw inputs; every breakdown here is recomputed.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    max_discount_percent, round_cents, Month1Breakdown, MonthlyBreakdown, PrepayBreakdown,
};
pub use models::{FeeConfig, MultiMonthPlan, PricingInput, ProductCost};
pub use services::{quote_program, ProgramQuote};
