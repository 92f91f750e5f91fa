//! Domain input types for program pricing.
//!
//! These are the snapshots the engine consumes: a product's cost-of-goods
//! breakdown, the tenant's resolved fee configuration, and the editable
//! pricing state for one product.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// One sellable product's cost-of-goods breakdown, per month.
///
/// Supplied by the product catalog; immutable within a pricing computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCost {
    /// Medication/material cost per month.
    #[serde(with = "rust_decimal::serde::str")]
    pub product_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub shipping_cost: Decimal,
    /// Consult cost, charged only in month 1.
    #[serde(with = "rust_decimal::serde::str")]
    pub telehealth_cost: Decimal,
}

impl ProductCost {
    /// Medication + shipping. Telehealth is excluded: it is a one-time
    /// month-1 deduction, not a recurring cost of goods.
    pub fn total_cogs(&self) -> Decimal {
        self.product_cost + self.shipping_cost
    }

    /// Negative components are treated as zero, never rejected.
    pub fn clamped(&self) -> Self {
        Self {
            product_cost: self.product_cost.max(Decimal::ZERO),
            shipping_cost: self.shipping_cost.max(Decimal::ZERO),
            telehealth_cost: self.telehealth_cost.max(Decimal::ZERO),
        }
    }
}

/// Tenant-level fee percentages, resolved once per editing session and held
/// read-only for its duration. Both fields are decimal fractions in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Share of the non-medical fee retained by the platform.
    #[serde(with = "rust_decimal::serde::str")]
    pub platform_fee_percent: Decimal,
    /// Tenant's merchant payment-processing surcharge.
    #[serde(with = "rust_decimal::serde::str")]
    pub merchant_service_fee_percent: Decimal,
}

impl FeeConfig {
    /// Card network rate applied to every charged amount. Not configurable.
    pub const CARD_FEE_PERCENT: Decimal = dec!(0.029);
    /// Flat per-charge card processing cost. Not configurable.
    pub const CARD_FEE_FIXED: Decimal = dec!(0.30);

    /// Fallback platform fee when the tenant tier carries no override (15%).
    pub const DEFAULT_PLATFORM_FEE_PERCENT: Decimal = dec!(0.15);
    /// Fallback merchant fee when the tenant carries no override (2%).
    pub const DEFAULT_MERCHANT_FEE_PERCENT: Decimal = dec!(0.02);

    /// Build from stored whole-percent values (a stored `5` means 5%).
    pub fn try_from_stored(platform: Decimal, merchant: Decimal) -> crate::error::Result<Self> {
        Ok(Self {
            platform_fee_percent: stored_fraction("platform_fee_percent", platform)?,
            merchant_service_fee_percent: stored_fraction(
                "merchant_service_fee_percent",
                merchant,
            )?,
        })
    }

    /// Resolve fees from tenant settings JSON.
    ///
    /// Overrides are stored as whole percents under `platform_fee_percent`
    /// and `merchant_service_fee_percent`, as either JSON numbers or strings.
    /// A missing or invalid value falls back to the default for that field;
    /// resolution itself never fails.
    pub fn from_settings(settings: &serde_json::Value) -> Self {
        Self {
            platform_fee_percent: resolve_field(
                settings,
                "platform_fee_percent",
                Self::DEFAULT_PLATFORM_FEE_PERCENT,
            ),
            merchant_service_fee_percent: resolve_field(
                settings,
                "merchant_service_fee_percent",
                Self::DEFAULT_MERCHANT_FEE_PERCENT,
            ),
        }
    }
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            platform_fee_percent: Self::DEFAULT_PLATFORM_FEE_PERCENT,
            merchant_service_fee_percent: Self::DEFAULT_MERCHANT_FEE_PERCENT,
        }
    }
}

/// Range-check a stored whole-percent value and convert it to a fraction.
fn stored_fraction(field: &'static str, value: Decimal) -> crate::error::Result<Decimal> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(ConfigError::FeePercentOutOfRange { field, value });
    }
    Ok(value / dec!(100))
}

/// Read one whole-percent field from settings JSON, accepting either a
/// string ("5") or a number (5), the way tenant settings are actually stored.
fn percent_field(settings: &serde_json::Value, key: &str) -> Option<Decimal> {
    let value = settings.get(key)?;
    if let Some(s) = value.as_str() {
        return s.trim().parse::<Decimal>().ok();
    }
    value.as_f64().and_then(|f| Decimal::try_from(f).ok())
}

fn resolve_field(settings: &serde_json::Value, key: &'static str, default: Decimal) -> Decimal {
    match percent_field(settings, key) {
        Some(stored) => match stored_fraction(key, stored) {
            Ok(fraction) => fraction,
            Err(err) => {
                warn!(%err, "ignoring tenant fee override, using default");
                default
            }
        },
        None => default,
    }
}

/// One prepaid multi-month plan: N months billed as a single upfront charge
/// at an optionally discounted monthly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiMonthPlan {
    pub months: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_percent: Decimal,
}

/// One product's editable pricing state, as the brand admin types it.
///
/// This is the only shape a caller may persist; breakdowns are always
/// recomputed from it plus the current [`FeeConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// The fee the brand charges for non-medical services.
    #[serde(with = "rust_decimal::serde::str")]
    pub non_medical_fee: Decimal,
    /// Month-1-only discount on the standard monthly plan.
    #[serde(with = "rust_decimal::serde::str")]
    pub monthly_discount_percent: Decimal,
    /// Duplicate plan lengths are allowed; ordering is irrelevant.
    #[serde(default)]
    pub multi_month_plans: Vec<MultiMonthPlan>,
}

impl PricingInput {
    /// Clamp every numeric field to >= 0 and drop zero-month plans.
    ///
    /// The engine runs on every keystroke of a live form, so negative
    /// in-progress values are treated as zero rather than rejected.
    pub fn normalized(&self) -> Self {
        Self {
            non_medical_fee: self.non_medical_fee.max(Decimal::ZERO),
            monthly_discount_percent: self.monthly_discount_percent.max(Decimal::ZERO),
            multi_month_plans: self
                .multi_month_plans
                .iter()
                .filter(|plan| plan.months > 0)
                .map(|plan| MultiMonthPlan {
                    months: plan.months,
                    discount_percent: plan.discount_percent.max(Decimal::ZERO),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_total_cogs_excludes_telehealth() {
        let product = ProductCost {
            product_cost: dec!(40),
            shipping_cost: dec!(10),
            telehealth_cost: dec!(25),
        };
        assert_eq!(product.total_cogs(), dec!(50));
    }

    #[test]
    fn test_product_cost_clamped() {
        let product = ProductCost {
            product_cost: dec!(-5),
            shipping_cost: dec!(10),
            telehealth_cost: dec!(-0.01),
        };
        let clamped = product.clamped();
        assert_eq!(clamped.product_cost, dec!(0));
        assert_eq!(clamped.shipping_cost, dec!(10));
        assert_eq!(clamped.telehealth_cost, dec!(0));
    }

    #[test]
    fn test_fee_config_defaults() {
        let fees = FeeConfig::default();
        assert_eq!(fees.platform_fee_percent, dec!(0.15));
        assert_eq!(fees.merchant_service_fee_percent, dec!(0.02));
    }

    #[test]
    fn test_try_from_stored_whole_percents() {
        let fees = FeeConfig::try_from_stored(dec!(20), dec!(5)).unwrap();
        assert_eq!(fees.platform_fee_percent, dec!(0.20));
        assert_eq!(fees.merchant_service_fee_percent, dec!(0.05));
    }

    #[test]
    fn test_try_from_stored_out_of_range() {
        let err = FeeConfig::try_from_stored(dec!(150), dec!(2)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::FeePercentOutOfRange {
                field: "platform_fee_percent",
                value: dec!(150),
            }
        );

        assert!(FeeConfig::try_from_stored(dec!(15), dec!(-1)).is_err());
    }

    #[test]
    fn test_from_settings_number_and_string() {
        let fees = FeeConfig::from_settings(&json!({
            "platform_fee_percent": "20",
            "merchant_service_fee_percent": 3.5,
        }));
        assert_eq!(fees.platform_fee_percent, dec!(0.20));
        assert_eq!(fees.merchant_service_fee_percent, dec!(0.035));
    }

    #[test]
    fn test_from_settings_missing_falls_back() {
        let fees = FeeConfig::from_settings(&json!({}));
        assert_eq!(fees, FeeConfig::default());
    }

    #[test]
    fn test_from_settings_invalid_falls_back() {
        let fees = FeeConfig::from_settings(&json!({
            "platform_fee_percent": "not a number",
            "merchant_service_fee_percent": 250,
        }));
        assert_eq!(fees, FeeConfig::default());
    }

    #[test]
    fn test_normalized_clamps_and_filters() {
        let input = PricingInput {
            non_medical_fee: dec!(-10),
            monthly_discount_percent: dec!(-3),
            multi_month_plans: vec![
                MultiMonthPlan {
                    months: 0,
                    discount_percent: dec!(10),
                },
                MultiMonthPlan {
                    months: 3,
                    discount_percent: dec!(-5),
                },
            ],
        };
        let normalized = input.normalized();
        assert_eq!(normalized.non_medical_fee, dec!(0));
        assert_eq!(normalized.monthly_discount_percent, dec!(0));
        assert_eq!(normalized.multi_month_plans.len(), 1);
        assert_eq!(normalized.multi_month_plans[0].months, 3);
        assert_eq!(normalized.multi_month_plans[0].discount_percent, dec!(0));
    }

    #[test]
    fn test_duplicate_plan_lengths_allowed() {
        let input = PricingInput {
            non_medical_fee: dec!(100),
            monthly_discount_percent: dec!(0),
            multi_month_plans: vec![
                MultiMonthPlan {
                    months: 3,
                    discount_percent: dec!(5),
                },
                MultiMonthPlan {
                    months: 3,
                    discount_percent: dec!(10),
                },
            ],
        };
        assert_eq!(input.normalized().multi_month_plans.len(), 2);
    }
}
