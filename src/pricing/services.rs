//! Quote assembly for the program quick-edit view.
//!
//! One call computes everything the editing UI displays: the discount cap,
//! the standard monthly breakdown, the discounted first month when a monthly
//! discount is active, and a breakdown per configured prepay plan. Invoked on
//! every relevant input change, so it stays pure and allocation-light.

use rust_decimal::Decimal;
use tracing::debug;

use super::calculators::{
    clamp_discount, discounted_month1_breakdown, max_discount_percent, prepay_breakdown,
    standard_breakdown, Month1Breakdown, MonthlyBreakdown, PrepayBreakdown,
};
use super::models::{FeeConfig, PricingInput, ProductCost};

/// Complete computed quote for one product.
///
/// Read-only; recomputed on every input change and never persisted. When
/// `discounted_month1` is set, callers show both figures side by side
/// ("$X mo 1" / "$Y/mo after").
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramQuote {
    /// Cap applied to the monthly discount and to each plan's discount.
    pub max_discount_percent: Decimal,
    /// Ongoing monthly plan, no discount.
    pub standard: MonthlyBreakdown,
    /// First month under the monthly discount; absent when the effective
    /// discount is zero (months 2+ always follow `standard`).
    pub discounted_month1: Option<Month1Breakdown>,
    /// One entry per configured prepay plan, in input order.
    pub prepay: Vec<PrepayBreakdown>,
}

/// Compute the full quote for one product.
///
/// Inputs are normalized first (negatives clamped to zero, zero-month plans
/// dropped), so a half-typed form state never produces garbage figures.
pub fn quote_program(
    product: &ProductCost,
    fees: &FeeConfig,
    input: &PricingInput,
) -> ProgramQuote {
    let product = product.clamped();
    let input = input.normalized();

    let cap = max_discount_percent(input.non_medical_fee, &product, fees);
    debug!(
        fee = %input.non_medical_fee,
        max_discount = %cap,
        plans = input.multi_month_plans.len(),
        "computing program quote"
    );

    let standard = standard_breakdown(input.non_medical_fee, &product, fees);

    let effective_monthly = clamp_discount(input.monthly_discount_percent, cap);
    let discounted_month1 = if effective_monthly > Decimal::ZERO {
        Some(discounted_month1_breakdown(
            input.non_medical_fee,
            effective_monthly,
            &product,
            fees,
        ))
    } else {
        None
    };

    let prepay = input
        .multi_month_plans
        .iter()
        .map(|plan| prepay_breakdown(input.non_medical_fee, plan, &product, fees))
        .collect();

    ProgramQuote {
        max_discount_percent: cap,
        standard,
        discounted_month1,
        prepay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::MultiMonthPlan;
    use rust_decimal_macros::dec;

    fn scenario_product() -> ProductCost {
        ProductCost {
            product_cost: dec!(40),
            shipping_cost: dec!(10),
            telehealth_cost: dec!(25),
        }
    }

    fn scenario_input() -> PricingInput {
        PricingInput {
            non_medical_fee: dec!(100),
            monthly_discount_percent: dec!(10),
            multi_month_plans: vec![
                MultiMonthPlan {
                    months: 3,
                    discount_percent: dec!(10),
                },
                MultiMonthPlan {
                    months: 6,
                    discount_percent: dec!(15),
                },
            ],
        }
    }

    #[test]
    fn test_quote_assembles_all_variants() {
        let quote = quote_program(&scenario_product(), &FeeConfig::default(), &scenario_input());

        assert_eq!(quote.max_discount_percent, dec!(47.05));
        assert_eq!(quote.standard.profit, dec!(77.35));
        assert_eq!(quote.standard.month1_profit, dec!(52.35));

        let month1 = quote.discounted_month1.expect("discount active");
        assert_eq!(month1.effective_discount_percent, dec!(10));
        assert_eq!(month1.customer_pays_total, dec!(135.0));

        assert_eq!(quote.prepay.len(), 2);
        assert_eq!(quote.prepay[0].months, 3);
        assert_eq!(quote.prepay[1].months, 6);
        assert_eq!(quote.prepay[1].effective_discount_percent, dec!(15));
    }

    #[test]
    fn test_quote_no_discount_omits_month1_variant() {
        let input = PricingInput {
            monthly_discount_percent: dec!(0),
            ..scenario_input()
        };
        let quote = quote_program(&scenario_product(), &FeeConfig::default(), &input);
        assert!(quote.discounted_month1.is_none());
    }

    #[test]
    fn test_quote_capped_to_zero_omits_month1_variant() {
        // Scenario B: fee below the minimum, cap is 0, discount is inert
        let input = PricingInput {
            non_medical_fee: dec!(20),
            monthly_discount_percent: dec!(30),
            multi_month_plans: vec![],
        };
        let quote = quote_program(&scenario_product(), &FeeConfig::default(), &input);
        assert_eq!(quote.max_discount_percent, dec!(0));
        assert!(quote.discounted_month1.is_none());
    }

    #[test]
    fn test_quote_is_deterministic() {
        let product = scenario_product();
        let fees = FeeConfig::default();
        let input = scenario_input();
        let first = quote_program(&product, &fees, &input);
        let second = quote_program(&product, &fees, &input);
        assert_eq!(first, second);
    }

    #[test]
    fn test_quote_normalizes_garbage_input() {
        let input = PricingInput {
            non_medical_fee: dec!(-100),
            monthly_discount_percent: dec!(-10),
            multi_month_plans: vec![MultiMonthPlan {
                months: 0,
                discount_percent: dec!(10),
            }],
        };
        let quote = quote_program(&scenario_product(), &FeeConfig::default(), &input);
        assert_eq!(quote.standard.customer_pays_total, dec!(50));
        assert_eq!(quote.standard.profit, dec!(0));
        assert!(quote.discounted_month1.is_none());
        assert!(quote.prepay.is_empty());
    }
}
