//! Basic deduction and salary-income deduction.

use crate::rates::{
    BASIC_DEDUCTION_TABLE, SALARY_DEDUCTION_BANDS, SALARY_DEDUCTION_MAX, SALARY_DEDUCTION_MIN,
    SALARY_DEDUCTION_MIN_BAND, apply_rate,
};

/// Basic deduction for the given total income.
///
/// Zero or negative income falls into the first (largest) band.
pub fn calc_basic_deduction(total_income: i64) -> i64 {
    BASIC_DEDUCTION_TABLE
        .iter()
        .find(|(upper, _)| total_income <= *upper)
        .map(|(_, deduction)| *deduction)
        .unwrap_or(0)
}

/// Salary-income deduction for gross salary revenue.
pub fn calc_salary_deduction(salary: i64) -> i64 {
    if salary <= 0 {
        return 0;
    }
    if salary <= SALARY_DEDUCTION_MIN_BAND {
        return SALARY_DEDUCTION_MIN;
    }
    SALARY_DEDUCTION_BANDS
        .iter()
        .find(|(upper, _, _)| salary <= *upper)
        .map(|(_, rate, addition)| apply_rate(salary, *rate, 100) + addition)
        .unwrap_or(SALARY_DEDUCTION_MAX)
}

/// Salary income after the salary-income deduction, never negative.
#[inline]
pub fn calc_salary_income(salary: i64) -> i64 {
    (salary - calc_salary_deduction(salary)).max(0)
}
