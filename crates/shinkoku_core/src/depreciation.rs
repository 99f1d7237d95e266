//! Annual depreciation of business assets.

use crate::model::{DepreciationInput, DepreciationMethod, DepreciationResult};

/// Straight-line: annual amount (cost ÷ life) prorated by business use and months.
pub fn calc_depreciation_straight_line(
    acquisition_cost: i64,
    useful_life: i64,
    business_use_ratio: i64,
    months: i64,
) -> i64 {
    if useful_life <= 0 || months <= 0 {
        return 0;
    }
    let annual = acquisition_cost / useful_life;
    annual * business_use_ratio * months / (100 * 12)
}

/// Declining-balance on the opening book value; `declining_rate` is in thousandths.
pub fn calc_depreciation_declining_balance(
    book_value: i64,
    declining_rate: i64,
    business_use_ratio: i64,
    months: i64,
) -> i64 {
    if book_value <= 0 || months <= 0 {
        return 0;
    }
    book_value * declining_rate * business_use_ratio * months / (1_000 * 100 * 12)
}

pub fn calc_depreciation(input: &DepreciationInput) -> DepreciationResult {
    let depreciation_amount = match input.method {
        DepreciationMethod::StraightLine => calc_depreciation_straight_line(
            input.acquisition_cost,
            input.useful_life,
            input.business_use_ratio,
            input.months,
        ),
        DepreciationMethod::DecliningBalance => calc_depreciation_declining_balance(
            input.book_value,
            input.declining_rate,
            input.business_use_ratio,
            input.months,
        ),
    };
    DepreciationResult {
        method: input.method,
        depreciation_amount,
        business_use_ratio: input.business_use_ratio,
        months: input.months,
    }
}
