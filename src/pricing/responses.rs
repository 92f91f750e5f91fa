//! Serialize-only DTOs for computed breakdowns.
//!
//! What the dashboard receives after a quote computation. These are never
//! deserialized: breakdowns are derived values and cannot enter the system
//! from outside.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{Deductions, Month1Breakdown, MonthlyBreakdown, PrepayBreakdown};
use super::services::ProgramQuote;

/// Itemized deductions for one billing cycle.
#[derive(Debug, Clone, Serialize)]
pub struct DeductionsResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub cogs: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub telehealth_month1: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub card_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub merchant_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub platform_fee: Decimal,
}

impl From<&Deductions> for DeductionsResponse {
    fn from(deductions: &Deductions) -> Self {
        Self {
            cogs: deductions.cogs,
            telehealth_month1: deductions.telehealth_month1,
            card_fee: deductions.card_fee,
            merchant_fee: deductions.merchant_fee,
            platform_fee: deductions.platform_fee,
        }
    }
}

/// Standard ongoing monthly plan.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyBreakdownResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub customer_pays_total: Decimal,
    pub deductions: DeductionsResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub profit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub month1_profit: Decimal,
}

impl From<&MonthlyBreakdown> for MonthlyBreakdownResponse {
    fn from(breakdown: &MonthlyBreakdown) -> Self {
        Self {
            customer_pays_total: breakdown.customer_pays_total,
            deductions: DeductionsResponse::from(&breakdown.deductions),
            profit: breakdown.profit,
            month1_profit: breakdown.month1_profit,
        }
    }
}

/// First month under the month-1 discount.
#[derive(Debug, Clone, Serialize)]
pub struct Month1DiscountResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub effective_discount_percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub customer_pays_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discounted_fee: Decimal,
    pub deductions: DeductionsResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub profit: Decimal,
}

impl From<&Month1Breakdown> for Month1DiscountResponse {
    fn from(breakdown: &Month1Breakdown) -> Self {
        Self {
            effective_discount_percent: breakdown.effective_discount_percent,
            customer_pays_total: breakdown.customer_pays_total,
            discounted_fee: breakdown.discounted_fee,
            deductions: DeductionsResponse::from(&breakdown.deductions),
            profit: breakdown.profit,
        }
    }
}

/// One prepaid multi-month plan.
#[derive(Debug, Clone, Serialize)]
pub struct PrepayPlanResponse {
    pub months: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub effective_discount_percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discounted_monthly_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub customer_pays_upfront: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub effective_fee_per_month: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub card_fee_per_month: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub merchant_fee_per_month: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub platform_fee_per_month: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub profit_per_month: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub profit_total: Decimal,
}

impl From<&PrepayBreakdown> for PrepayPlanResponse {
    fn from(breakdown: &PrepayBreakdown) -> Self {
        Self {
            months: breakdown.months,
            effective_discount_percent: breakdown.effective_discount_percent,
            discounted_monthly_total: breakdown.discounted_monthly_total,
            customer_pays_upfront: breakdown.customer_pays_upfront,
            effective_fee_per_month: breakdown.effective_fee_per_month,
            card_fee_per_month: breakdown.card_fee_per_month,
            merchant_fee_per_month: breakdown.merchant_fee_per_month,
            platform_fee_per_month: breakdown.platform_fee_per_month,
            profit_per_month: breakdown.profit_per_month,
            profit_total: breakdown.profit_total,
        }
    }
}

/// Full quote payload for the quick-edit view.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramQuoteResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub max_discount_percent: Decimal,
    pub standard: MonthlyBreakdownResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_month1: Option<Month1DiscountResponse>,
    pub prepay: Vec<PrepayPlanResponse>,
}

impl From<&ProgramQuote> for ProgramQuoteResponse {
    fn from(quote: &ProgramQuote) -> Self {
        Self {
            max_discount_percent: quote.max_discount_percent,
            standard: MonthlyBreakdownResponse::from(&quote.standard),
            discounted_month1: quote
                .discounted_month1
                .as_ref()
                .map(Month1DiscountResponse::from),
            prepay: quote.prepay.iter().map(PrepayPlanResponse::from).collect(),
        }
    }
}
