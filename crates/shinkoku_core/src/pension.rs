//! Public pension deduction and retirement (severance) income.

use crate::income_tax::{calc_income_tax_from_table, calc_reconstruction_tax};
use crate::model::{
    PensionDeductionInput, PensionDeductionResult, RetirementIncomeInput, RetirementIncomeResult,
};
use crate::rates::{
    PENSION_DEDUCTION_MAX, PENSION_OTHER_INCOME_ADJUSTMENTS, PENSION_OVER_65_BANDS,
    PENSION_UNDER_65_BANDS, RETIREMENT_BASE_AT_20, RETIREMENT_DEDUCTION_MIN,
    RETIREMENT_DISABILITY_ADDITION, RETIREMENT_PER_YEAR_AFTER_20, RETIREMENT_PER_YEAR_FIRST_20,
    RETIREMENT_SHORT_SERVICE_HALF_LIMIT, RETIREMENT_SHORT_SERVICE_YEARS, TAXABLE_INCOME_UNIT,
    apply_rate, floor_to,
};

/// Public pension deduction and the resulting taxable pension income.
///
/// The deduction shrinks by ¥100,000 (¥200,000) when other income
/// exceeds ¥10M (¥20M).
pub fn calc_pension_deduction(input: &PensionDeductionInput) -> PensionDeductionResult {
    let pension = input.pension_income;
    if pension <= 0 {
        return PensionDeductionResult {
            is_over_65: input.is_over_65,
            ..Default::default()
        };
    }

    let bands = if input.is_over_65 {
        &PENSION_OVER_65_BANDS
    } else {
        &PENSION_UNDER_65_BANDS
    };
    let base = bands
        .iter()
        .find(|(upper, _, _)| pension <= *upper)
        .map(|&(_, rate, fixed)| match rate {
            100 => pension,
            0 => fixed,
            rate => apply_rate(pension, rate, 100) + fixed,
        })
        .unwrap_or(PENSION_DEDUCTION_MAX);

    let other_income_adjustment = PENSION_OTHER_INCOME_ADJUSTMENTS
        .iter()
        .find(|(threshold, _)| input.other_income > *threshold)
        .map(|(_, reduction)| *reduction)
        .unwrap_or(0);

    let deduction_amount = (base - other_income_adjustment).max(0);

    PensionDeductionResult {
        pension_income: pension,
        deduction_amount,
        taxable_pension_income: (pension - deduction_amount).max(0),
        is_over_65: input.is_over_65,
        other_income_adjustment,
    }
}

/// Retirement income deduction for the years of service.
pub fn calc_retirement_income_deduction(
    years_of_service: i64,
    is_disability_retirement: bool,
) -> i64 {
    let base = if years_of_service <= 20 {
        (RETIREMENT_PER_YEAR_FIRST_20 * years_of_service).max(RETIREMENT_DEDUCTION_MIN)
    } else {
        RETIREMENT_BASE_AT_20 + RETIREMENT_PER_YEAR_AFTER_20 * (years_of_service - 20)
    };
    if is_disability_retirement {
        base + RETIREMENT_DISABILITY_ADDITION
    } else {
        base
    }
}

/// Taxable retirement income and its separately assessed tax.
///
/// Half of the excess over the deduction is taxed, except for short
/// service (five years or less): officers get no relief at all, and other
/// employees only on the first ¥3M of excess.
pub fn calc_retirement_income(input: &RetirementIncomeInput) -> RetirementIncomeResult {
    let years = input.years_of_service;
    let deduction = calc_retirement_income_deduction(years, input.is_disability_retirement);
    let excess = (input.severance_pay - deduction).max(0);
    let short_service = years <= RETIREMENT_SHORT_SERVICE_YEARS;

    let (taxable, half_taxation_applied) = if short_service && input.is_officer {
        (excess, false)
    } else if short_service && excess > RETIREMENT_SHORT_SERVICE_HALF_LIMIT {
        (
            RETIREMENT_SHORT_SERVICE_HALF_LIMIT / 2
                + (excess - RETIREMENT_SHORT_SERVICE_HALF_LIMIT),
            false,
        )
    } else {
        (excess / 2, true)
    };

    let income_tax = calc_income_tax_from_table(floor_to(taxable, TAXABLE_INCOME_UNIT));

    RetirementIncomeResult {
        severance_pay: input.severance_pay,
        retirement_income_deduction: deduction,
        taxable_retirement_income: taxable,
        years_of_service: years,
        is_officer: input.is_officer,
        half_taxation_applied,
        income_tax,
        reconstruction_tax: calc_reconstruction_tax(income_tax),
    }
}
