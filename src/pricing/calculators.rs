//! Core pricing calculation functions.
//!
//! Pure functions for the program pricing math - no I/O, no hidden state.
//! The same deduction helper backs the standard monthly view, the discounted
//! first month, and prepaid multi-month plans, so the figures a brand admin
//! sees stay consistent no matter which field they edit.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::{FeeConfig, MultiMonthPlan, ProductCost};

/// Round a monetary amount to cents using half-up rounding.
///
/// Applied at each monetary derivation step, not only at the end, so the
/// intermediate figures match the cent-level numbers shown as a user types.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use program_pricing::pricing::round_cents;
///
/// assert_eq!(round_cents(dec!(4.655)), dec!(4.66));
/// assert_eq!(round_cents(dec!(1.234)), dec!(1.23));
/// assert_eq!(round_cents(dec!(2.995)), dec!(3.00));
/// ```
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// How the card network fee is charged for a billing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFee {
    /// One card transaction per billing cycle, rounded to cents.
    PerCharge,
    /// One card transaction on the full upfront amount of a prepay plan,
    /// amortized across the plan's months for per-month figures.
    AmortizedOver(u32),
}

/// Card processing fee (2.9% + $0.30) for the given charged amount.
pub fn card_fee(amount_charged: Decimal, mode: CardFee) -> Decimal {
    let raw = amount_charged * FeeConfig::CARD_FEE_PERCENT + FeeConfig::CARD_FEE_FIXED;
    match mode {
        CardFee::PerCharge => round_cents(raw),
        CardFee::AmortizedOver(months) if months > 0 => raw / Decimal::from(months),
        CardFee::AmortizedOver(_) => round_cents(raw),
    }
}

/// Largest discount percent (two decimal places) that keeps month-1 profit
/// above zero after the platform cut and the telehealth consult cost.
///
/// `min_fee_required` is the smallest non-medical fee that still yields at
/// least $0.01 after those two deductions; the headroom above it is converted
/// into a percentage of the full monthly total (fee + COGS) and floored to
/// two decimals so discounting at the cap never overshoots.
pub fn max_discount_percent(
    non_medical_fee: Decimal,
    product: &ProductCost,
    fees: &FeeConfig,
) -> Decimal {
    let monthly_total = non_medical_fee + product.total_cogs();

    // A platform fee of 100% leaves nothing to discount from.
    let platform_keep = Decimal::ONE - fees.platform_fee_percent;
    if platform_keep <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let min_fee_required = if product.telehealth_cost > Decimal::ZERO {
        product.telehealth_cost / platform_keep + dec!(0.01)
    } else {
        dec!(0.01)
    };

    if monthly_total <= Decimal::ZERO || non_medical_fee <= min_fee_required {
        return Decimal::ZERO;
    }

    let headroom = (non_medical_fee - min_fee_required) / monthly_total * dec!(100);
    headroom
        .round_dp_with_strategy(2, RoundingStrategy::ToZero)
        .max(Decimal::ZERO)
}

/// Clamp a requested discount to the cap. Applied to every discount before
/// use, whether typed by a user or loaded from storage.
pub fn clamp_discount(requested: Decimal, cap: Decimal) -> Decimal {
    requested.max(Decimal::ZERO).min(cap)
}

/// Itemized deductions for one billing cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Deductions {
    pub cogs: Decimal,
    /// Deducted from profit in month 1 only.
    pub telehealth_month1: Decimal,
    pub card_fee: Decimal,
    pub merchant_fee: Decimal,
    pub platform_fee: Decimal,
}

/// Breakdown of one monthly billing cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBreakdown {
    /// What the patient is charged for the cycle (fee + COGS).
    pub customer_pays_total: Decimal,
    pub deductions: Deductions,
    /// Net to the brand for an ongoing month, floored at zero.
    pub profit: Decimal,
    /// Net for the first month, after the one-time telehealth consult.
    pub month1_profit: Decimal,
}

/// Shared deduction math for one monthly cycle.
///
/// `fee_portion` is the part of `customer_pays_total` that is not COGS: the
/// full non-medical fee on the standard plan, or what remains of a discounted
/// total after COGS. The platform fee applies to the fee portion only; card
/// and merchant fees apply to the whole charged amount.
fn compute_monthly(
    customer_pays_total: Decimal,
    fee_portion: Decimal,
    product: &ProductCost,
    fees: &FeeConfig,
) -> MonthlyBreakdown {
    let card = card_fee(customer_pays_total, CardFee::PerCharge);
    let merchant = round_cents(customer_pays_total * fees.merchant_service_fee_percent);
    let platform = round_cents(fee_portion * fees.platform_fee_percent);

    let profit = (fee_portion - platform - merchant - card).max(Decimal::ZERO);
    let month1_profit = (profit - product.telehealth_cost).max(Decimal::ZERO);

    MonthlyBreakdown {
        customer_pays_total,
        deductions: Deductions {
            cogs: product.total_cogs(),
            telehealth_month1: product.telehealth_cost,
            card_fee: card,
            merchant_fee: merchant,
            platform_fee: platform,
        },
        profit,
        month1_profit,
    }
}

/// Standard ongoing monthly breakdown, no discount applied.
pub fn standard_breakdown(
    non_medical_fee: Decimal,
    product: &ProductCost,
    fees: &FeeConfig,
) -> MonthlyBreakdown {
    let monthly_total = non_medical_fee + product.total_cogs();
    compute_monthly(monthly_total, non_medical_fee, product, fees)
}

/// First billing cycle with the month-1 discount applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Month1Breakdown {
    /// The requested discount after clamping to the cap.
    pub effective_discount_percent: Decimal,
    /// Discounted total charged for month 1.
    pub customer_pays_total: Decimal,
    /// Fee remaining after COGS are carved out of the discounted total.
    pub discounted_fee: Decimal,
    pub deductions: Deductions,
    /// Month-1 profit, after the telehealth consult, floored at zero.
    pub profit: Decimal,
}

/// Breakdown of month 1 under the month-1-only discount.
///
/// The discount applies to the full monthly total (fee + COGS); COGS are
/// still owed at full price, so the discount comes out of the fee. Month 2
/// onward reverts to [`standard_breakdown`]. At zero discount this matches
/// the standard month-1 figures exactly.
pub fn discounted_month1_breakdown(
    non_medical_fee: Decimal,
    requested_discount: Decimal,
    product: &ProductCost,
    fees: &FeeConfig,
) -> Month1Breakdown {
    let cap = max_discount_percent(non_medical_fee, product, fees);
    let effective = clamp_discount(requested_discount, cap);

    let monthly_total = non_medical_fee + product.total_cogs();
    let discounted_total = monthly_total * (Decimal::ONE - effective / dec!(100));
    let discounted_fee = (discounted_total - product.total_cogs()).max(Decimal::ZERO);

    let cycle = compute_monthly(discounted_total, discounted_fee, product, fees);

    Month1Breakdown {
        effective_discount_percent: effective,
        customer_pays_total: discounted_total,
        discounted_fee,
        deductions: cycle.deductions,
        profit: cycle.month1_profit,
    }
}

/// Breakdown of one prepaid multi-month plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepayBreakdown {
    pub months: u32,
    /// The plan's requested discount after clamping to the cap.
    pub effective_discount_percent: Decimal,
    /// Discounted per-month rate shown to the patient.
    pub discounted_monthly_total: Decimal,
    /// The single upfront charge covering the whole plan.
    pub customer_pays_upfront: Decimal,
    /// Per-month fee remaining after COGS.
    pub effective_fee_per_month: Decimal,
    /// One card transaction on the upfront amount, amortized per month.
    pub card_fee_per_month: Decimal,
    pub merchant_fee_per_month: Decimal,
    pub platform_fee_per_month: Decimal,
    pub profit_per_month: Decimal,
    pub profit_total: Decimal,
}

/// Breakdown of a prepaid multi-month plan.
///
/// Unlike the standard month-1 discount, the plan discount applies to every
/// month uniformly. The whole plan is billed as one card transaction on the
/// upfront amount, so the card fee is incurred once and amortized across the
/// months for the per-month profit figure.
pub fn prepay_breakdown(
    non_medical_fee: Decimal,
    plan: &MultiMonthPlan,
    product: &ProductCost,
    fees: &FeeConfig,
) -> PrepayBreakdown {
    // Zero-month plans are filtered at the request boundary; a degenerate
    // input yields a zeroed breakdown rather than a division by zero.
    if plan.months == 0 {
        return PrepayBreakdown {
            months: 0,
            effective_discount_percent: Decimal::ZERO,
            discounted_monthly_total: Decimal::ZERO,
            customer_pays_upfront: Decimal::ZERO,
            effective_fee_per_month: Decimal::ZERO,
            card_fee_per_month: Decimal::ZERO,
            merchant_fee_per_month: Decimal::ZERO,
            platform_fee_per_month: Decimal::ZERO,
            profit_per_month: Decimal::ZERO,
            profit_total: Decimal::ZERO,
        };
    }

    let cap = max_discount_percent(non_medical_fee, product, fees);
    let effective = clamp_discount(plan.discount_percent, cap);
    let months = Decimal::from(plan.months);

    let monthly_total = non_medical_fee + product.total_cogs();
    let discounted_monthly_total = monthly_total * (Decimal::ONE - effective / dec!(100));
    let customer_pays_upfront = discounted_monthly_total * months;
    let effective_fee_per_month =
        (discounted_monthly_total - product.total_cogs()).max(Decimal::ZERO);

    let card_fee_per_month = card_fee(customer_pays_upfront, CardFee::AmortizedOver(plan.months));
    let merchant_fee_per_month = discounted_monthly_total * fees.merchant_service_fee_percent;
    let platform_fee_per_month = round_cents(effective_fee_per_month * fees.platform_fee_percent);

    let platform_keep = Decimal::ONE - fees.platform_fee_percent;
    let profit_per_month = (effective_fee_per_month * platform_keep
        - merchant_fee_per_month
        - card_fee_per_month)
        .max(Decimal::ZERO);

    PrepayBreakdown {
        months: plan.months,
        effective_discount_percent: effective,
        discounted_monthly_total,
        customer_pays_upfront,
        effective_fee_per_month,
        card_fee_per_month,
        merchant_fee_per_month,
        platform_fee_per_month,
        profit_per_month,
        profit_total: profit_per_month * months,
    }
}
