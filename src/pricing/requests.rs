//! DTOs for the raw persisted pricing shape.
//!
//! Only raw inputs ever round-trip through storage; derived breakdowns are
//! recomputed from them plus the current fee configuration, never read back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{MultiMonthPlan, PricingInput};

/// Per-product pricing state as stored by the persistence sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramPricingRequest {
    pub product_id: Uuid,
    #[serde(with = "rust_decimal::serde::str")]
    pub non_medical_service_fee: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub monthly_discount_percent: Option<Decimal>,
    /// Fixed-true invariant of the stored shape: the monthly discount only
    /// ever applies to the first cycle. Carried for compatibility; the
    /// engine does not vary behavior on it.
    #[serde(default = "default_true")]
    pub monthly_discount_month1_only: bool,
    #[serde(default)]
    pub multi_month_plans: Vec<MultiMonthPlanRequest>,
}

/// One stored prepay plan entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiMonthPlanRequest {
    pub months: u32,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub discount_percent: Option<Decimal>,
}

fn default_true() -> bool {
    true
}

impl ProgramPricingRequest {
    /// Convert the stored shape into engine input.
    ///
    /// Missing discounts become zero, negatives are clamped, and plans with
    /// `months == 0` are dropped.
    pub fn into_input(self) -> PricingInput {
        PricingInput {
            non_medical_fee: self.non_medical_service_fee,
            monthly_discount_percent: self.monthly_discount_percent.unwrap_or(Decimal::ZERO),
            multi_month_plans: self
                .multi_month_plans
                .into_iter()
                .filter(|plan| plan.months > 0)
                .map(|plan| MultiMonthPlan {
                    months: plan.months,
                    discount_percent: plan.discount_percent.unwrap_or(Decimal::ZERO),
                })
                .collect(),
        }
        .normalized()
    }
}
