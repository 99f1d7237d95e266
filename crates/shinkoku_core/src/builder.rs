//! Income Tax Input Builder
//!
//! Fluent construction of an [`IncomeTaxInput`] with validation at the end.
//!
//! # Examples
//!
//! ```ignore
//! use shinkoku_core::IncomeTaxInputBuilder;
//!
//! let input = IncomeTaxInputBuilder::new(2025)
//!     .salary(6_000_000)
//!     .business(3_500_000, 400_000)
//!     .furusato_nozei(50_000)
//!     .withheld_tax(466_800)
//!     .build()?;
//! ```

use crate::error::Result;
use crate::model::{
    DependentInfo, DisabilityStatus, Donation, HousingLoanDetail, IncomeTaxInput,
    LifeInsuranceDetail, WidowStatus,
};

/// Builder for an [`IncomeTaxInput`]
#[derive(Debug, Clone, Default)]
pub struct IncomeTaxInputBuilder {
    input: IncomeTaxInput,
}

impl IncomeTaxInputBuilder {
    #[must_use]
    pub fn new(fiscal_year: i16) -> Self {
        Self {
            input: IncomeTaxInput {
                fiscal_year,
                ..Default::default()
            },
        }
    }

    /// Start from an existing input, e.g. one loaded from a file.
    #[must_use]
    pub fn from_input(input: IncomeTaxInput) -> Self {
        Self { input }
    }

    // =========================================================================
    // Income
    // =========================================================================

    /// Gross salary revenue
    #[must_use]
    pub fn salary(mut self, amount: i64) -> Self {
        self.input.salary_income = amount;
        self
    }

    #[must_use]
    pub fn business(mut self, revenue: i64, expenses: i64) -> Self {
        self.input.business_revenue = revenue;
        self.input.business_expenses = expenses;
        self
    }

    /// Nominal blue-return deduction (650,000 / 550,000 / 100,000)
    #[must_use]
    pub fn blue_return_deduction(mut self, amount: i64) -> Self {
        self.input.blue_return_deduction = amount;
        self
    }

    /// File a white return: no blue-return deduction at all
    #[must_use]
    pub fn white_return(mut self) -> Self {
        self.input.blue_return_deduction = 0;
        self
    }

    #[must_use]
    pub fn misc_income(mut self, amount: i64) -> Self {
        self.input.misc_income = amount;
        self
    }

    #[must_use]
    pub fn dividend_comprehensive(mut self, amount: i64) -> Self {
        self.input.dividend_income_comprehensive = amount;
        self
    }

    #[must_use]
    pub fn one_time_income(mut self, amount: i64) -> Self {
        self.input.one_time_income = amount;
        self
    }

    #[must_use]
    pub fn pension(mut self, amount: i64, is_over_65: bool) -> Self {
        self.input.pension_income = amount;
        self.input.is_over_65 = is_over_65;
        self
    }

    #[must_use]
    pub fn loss_carryforward(mut self, amount: i64) -> Self {
        self.input.loss_carryforward_amount = amount;
        self
    }

    // =========================================================================
    // Deductions
    // =========================================================================

    #[must_use]
    pub fn social_insurance(mut self, amount: i64) -> Self {
        self.input.social_insurance = amount;
        self
    }

    #[must_use]
    pub fn life_insurance(mut self, premium: i64) -> Self {
        self.input.life_insurance_premium = premium;
        self
    }

    #[must_use]
    pub fn life_insurance_detail(mut self, detail: LifeInsuranceDetail) -> Self {
        self.input.life_insurance_detail = Some(detail);
        self
    }

    #[must_use]
    pub fn earthquake_insurance(mut self, premium: i64, old_long_term_premium: i64) -> Self {
        self.input.earthquake_insurance_premium = premium;
        self.input.old_long_term_insurance_premium = old_long_term_premium;
        self
    }

    #[must_use]
    pub fn medical(mut self, paid: i64, reimbursement: i64) -> Self {
        self.input.medical_expenses = paid;
        self.input.medical_reimbursement = reimbursement;
        self
    }

    #[must_use]
    pub fn self_medication(mut self, expenses: i64) -> Self {
        self.input.self_medication_expenses = expenses;
        self.input.self_medication_eligible = true;
        self
    }

    #[must_use]
    pub fn furusato_nozei(mut self, amount: i64) -> Self {
        self.input.furusato_nozei = amount;
        self
    }

    #[must_use]
    pub fn donation(mut self, donation: Donation) -> Self {
        self.input.donations.push(donation);
        self
    }

    #[must_use]
    pub fn ideco(mut self, amount: i64) -> Self {
        self.input.ideco_contribution = amount;
        self
    }

    #[must_use]
    pub fn small_business_mutual_aid(mut self, amount: i64) -> Self {
        self.input.small_business_mutual_aid = amount;
        self
    }

    #[must_use]
    pub fn spouse_income(mut self, income: i64) -> Self {
        self.input.spouse_income = Some(income);
        self
    }

    #[must_use]
    pub fn dependent(mut self, dependent: DependentInfo) -> Self {
        self.input.dependents.push(dependent);
        self
    }

    #[must_use]
    pub fn widow_status(mut self, status: WidowStatus) -> Self {
        self.input.widow_status = status;
        self
    }

    #[must_use]
    pub fn disability_status(mut self, status: DisabilityStatus) -> Self {
        self.input.disability_status = status;
        self
    }

    #[must_use]
    pub fn working_student(mut self) -> Self {
        self.input.working_student = true;
        self
    }

    // =========================================================================
    // Credits and prepayments
    // =========================================================================

    #[must_use]
    pub fn housing_loan(mut self, balance: i64, move_in_year: i16) -> Self {
        self.input.housing_loan_balance = balance;
        self.input.housing_loan_year = Some(move_in_year);
        self
    }

    #[must_use]
    pub fn housing_loan_detail(mut self, detail: HousingLoanDetail) -> Self {
        self.input.housing_loan_balance = detail.year_end_balance;
        self.input.housing_loan_detail = Some(detail);
        self
    }

    /// Salary withholding from the 源泉徴収票
    #[must_use]
    pub fn withheld_tax(mut self, amount: i64) -> Self {
        self.input.withheld_tax = amount;
        self
    }

    #[must_use]
    pub fn business_withheld_tax(mut self, amount: i64) -> Self {
        self.input.business_withheld_tax = amount;
        self
    }

    #[must_use]
    pub fn other_income_withheld_tax(mut self, amount: i64) -> Self {
        self.input.other_income_withheld_tax = amount;
        self
    }

    #[must_use]
    pub fn estimated_tax_payment(mut self, amount: i64) -> Self {
        self.input.estimated_tax_payment = amount;
        self
    }

    /// Validate and return the input
    pub fn build(self) -> Result<IncomeTaxInput> {
        self.input.validate()?;
        Ok(self.input)
    }
}
