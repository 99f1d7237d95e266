//! Housing-loan and dividend tax credits.

use crate::model::{HousingCategory, HousingLoanDetail};
use crate::rates::{
    DIVIDEND_CREDIT_HIGH_PERCENT, DIVIDEND_CREDIT_PERCENT, DIVIDEND_CREDIT_THRESHOLD,
    HOUSING_LOAN_LEGACY_CERTIFIED_LIMIT, HOUSING_LOAN_LEGACY_LAST_YEAR, HOUSING_LOAN_LEGACY_LIMIT,
    HOUSING_LOAN_LEGACY_RATE, HOUSING_LOAN_NEW_LIMITS, HOUSING_LOAN_NEW_LIMITS_CHILDCARE,
    HOUSING_LOAN_NEW_LIMITS_REDUCED, HOUSING_LOAN_PRE_R6_PERMIT_LIMIT, HOUSING_LOAN_RATE,
    HOUSING_LOAN_REDUCED_FROM_YEAR, HOUSING_LOAN_USED_GENERAL_LIMIT,
    HOUSING_LOAN_USED_QUALIFIED_LIMIT, apply_rate,
};

#[inline]
fn category_index(category: HousingCategory) -> usize {
    match category {
        HousingCategory::Certified => 0,
        HousingCategory::Zeh => 1,
        HousingCategory::EnergyEfficient => 2,
        HousingCategory::General => 3,
    }
}

#[inline]
fn housing_loan_rate(move_in_year: Option<i16>) -> (i64, i64) {
    match move_in_year {
        Some(year) if year <= HOUSING_LOAN_LEGACY_LAST_YEAR => HOUSING_LOAN_LEGACY_RATE,
        _ => HOUSING_LOAN_RATE,
    }
}

/// Eligible year-end balance ceiling for a housing loan.
///
/// Depends on the housing category, new versus used, move-in year and
/// (from 2024) whether the household is raising children.
pub fn housing_loan_balance_limit(detail: &HousingLoanDetail) -> i64 {
    let year = detail.move_in_year();

    if year <= HOUSING_LOAN_LEGACY_LAST_YEAR {
        return match (detail.is_new_construction, detail.housing_category) {
            (false, _) => HOUSING_LOAN_USED_GENERAL_LIMIT,
            (true, HousingCategory::Certified) => HOUSING_LOAN_LEGACY_CERTIFIED_LIMIT,
            (true, _) => HOUSING_LOAN_LEGACY_LIMIT,
        };
    }

    if !detail.is_new_construction {
        return match detail.housing_category {
            HousingCategory::General => HOUSING_LOAN_USED_GENERAL_LIMIT,
            _ => HOUSING_LOAN_USED_QUALIFIED_LIMIT,
        };
    }

    let table = if year < HOUSING_LOAN_REDUCED_FROM_YEAR {
        &HOUSING_LOAN_NEW_LIMITS
    } else if detail.is_childcare_household {
        &HOUSING_LOAN_NEW_LIMITS_CHILDCARE
    } else {
        &HOUSING_LOAN_NEW_LIMITS_REDUCED
    };
    let limit = table[category_index(detail.housing_category)];

    if limit == 0 && detail.has_pre_r6_building_permit {
        HOUSING_LOAN_PRE_R6_PERMIT_LIMIT
    } else {
        limit
    }
}

/// Housing-loan credit for the year.
///
/// With an itemised `detail`, its balance is capped at the program ceiling.
/// Otherwise `balance` is used as given, at the rate for `move_in_year`
/// (the legacy 1% program is still capped at its ¥40M ceiling).
pub fn calc_housing_loan_credit(
    balance: i64,
    detail: Option<&HousingLoanDetail>,
    move_in_year: Option<i16>,
) -> i64 {
    match detail {
        Some(detail) => {
            let eligible = detail
                .year_end_balance
                .clamp(0, housing_loan_balance_limit(detail));
            let (num, den) = housing_loan_rate(Some(detail.move_in_year()));
            apply_rate(eligible, num, den)
        }
        None => {
            if balance <= 0 {
                return 0;
            }
            let (num, den) = housing_loan_rate(move_in_year);
            let eligible = if (num, den) == HOUSING_LOAN_LEGACY_RATE {
                balance.min(HOUSING_LOAN_LEGACY_LIMIT)
            } else {
                balance
            };
            apply_rate(eligible, num, den)
        }
    }
}

/// Dividend credit on comprehensively taxed dividends.
///
/// 10% of the dividend, dropping to 5% on the part of the dividend that
/// sits above ¥10M of taxable income.
pub fn calc_dividend_tax_credit(dividend: i64, taxable_income: i64) -> i64 {
    if dividend <= 0 || taxable_income <= 0 {
        return 0;
    }
    let high_slice = if taxable_income > DIVIDEND_CREDIT_THRESHOLD {
        dividend.min(taxable_income - DIVIDEND_CREDIT_THRESHOLD)
    } else {
        0
    };
    let low_slice = dividend - high_slice;
    apply_rate(low_slice, DIVIDEND_CREDIT_PERCENT, 100)
        + apply_rate(high_slice, DIVIDEND_CREDIT_HIGH_PERCENT, 100)
}
