//! Pension, retirement and depreciation value objects.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError, non_negative};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PensionDeductionInput {
    pub pension_income: i64,
    pub is_over_65: bool,
    /// Total income other than public pensions, for the high-earner adjustment
    pub other_income: i64,
}

impl PensionDeductionInput {
    pub fn validate(&self) -> Result<()> {
        non_negative("pension_income", self.pension_income)?;
        non_negative("other_income", self.other_income)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionDeductionResult {
    pub pension_income: i64,
    pub deduction_amount: i64,
    pub taxable_pension_income: i64,
    pub is_over_65: bool,
    pub other_income_adjustment: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetirementIncomeInput {
    pub severance_pay: i64,
    /// Whole years of service; a partial year counts as a full one
    pub years_of_service: i64,
    /// Officer (役員等) retirement
    pub is_officer: bool,
    pub is_disability_retirement: bool,
}

impl RetirementIncomeInput {
    pub fn validate(&self) -> Result<()> {
        non_negative("severance_pay", self.severance_pay)?;
        if self.years_of_service < 1 {
            return Err(ValidationError::OutOfRange {
                field: "years_of_service",
                value: self.years_of_service,
                min: 1,
                max: 100,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementIncomeResult {
    pub severance_pay: i64,
    pub retirement_income_deduction: i64,
    pub taxable_retirement_income: i64,
    pub years_of_service: i64,
    pub is_officer: bool,
    /// False when the short-service rules withheld (all or part of) the ½ relief
    pub half_taxation_applied: bool,
    /// Separately assessed income tax on the retirement income
    pub income_tax: i64,
    pub reconstruction_tax: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    #[default]
    StraightLine,
    DecliningBalance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepreciationInput {
    pub method: DepreciationMethod,
    pub acquisition_cost: i64,
    pub useful_life: i64,
    /// Opening book value for the declining-balance method
    pub book_value: i64,
    /// Declining-balance rate in thousandths (0.200 → 200)
    pub declining_rate: i64,
    /// Business-use percentage, 0 to 100
    pub business_use_ratio: i64,
    /// Months in service this year, 0 to 12
    pub months: i64,
}

impl Default for DepreciationInput {
    fn default() -> Self {
        Self {
            method: DepreciationMethod::StraightLine,
            acquisition_cost: 0,
            useful_life: 1,
            book_value: 0,
            declining_rate: 0,
            business_use_ratio: 100,
            months: 12,
        }
    }
}

impl DepreciationInput {
    pub fn validate(&self) -> Result<()> {
        non_negative("acquisition_cost", self.acquisition_cost)?;
        non_negative("book_value", self.book_value)?;
        non_negative("declining_rate", self.declining_rate)?;
        let ranges = [
            ("business_use_ratio", self.business_use_ratio, 0, 100),
            ("months", self.months, 0, 12),
        ];
        for (field, value, min, max) in ranges {
            if !(min..=max).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationResult {
    pub method: DepreciationMethod,
    pub depreciation_amount: i64,
    pub business_use_ratio: i64,
    pub months: i64,
}
