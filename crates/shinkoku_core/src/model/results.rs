//! Income tax result types

use serde::{Deserialize, Serialize};

use super::deductions::DeductionsResult;

/// Every line item of the income tax computation for one fiscal year.
///
/// `tax_due` is positive for a payment and negative for a refund. Payments
/// are truncated to ¥100; refunds are kept to the yen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeTaxResult {
    pub fiscal_year: i16,

    // Income
    pub salary_income_after_deduction: i64,
    /// Profit after the capped blue-return deduction; negative on a loss
    pub business_income: i64,
    pub effective_blue_return_deduction: i64,
    pub pension_income_after_deduction: i64,
    pub misc_income: i64,
    pub dividend_income: i64,
    /// Taxable half of one-time income
    pub one_time_income: i64,
    pub loss_carryforward_applied: i64,
    /// Aggregate income; a net loss is carried through unfloored
    pub total_income: i64,

    // Deductions and tax
    pub total_income_deductions: i64,
    pub taxable_income: i64,
    pub income_tax_base: i64,
    pub dividend_credit: i64,
    pub housing_loan_credit: i64,
    pub donation_credit: i64,
    pub total_tax_credits: i64,
    pub income_tax_after_credits: i64,
    pub reconstruction_tax: i64,
    pub total_tax: i64,

    // Settlement
    pub withheld_tax: i64,
    pub business_withheld_tax: i64,
    pub other_income_withheld_tax: i64,
    pub estimated_tax_payment: i64,
    pub tax_due: i64,

    pub deductions_detail: DeductionsResult,
    /// Audit trail of automatic corrections applied during calculation
    pub warnings: Vec<String>,
}

impl IncomeTaxResult {
    pub fn is_refund(&self) -> bool {
        self.tax_due < 0
    }

    /// Sum of withholding and estimated prepayments carried on the result.
    pub fn total_prepaid(&self) -> i64 {
        self.withheld_tax
            + self.business_withheld_tax
            + self.other_income_withheld_tax
            + self.estimated_tax_payment
    }
}
