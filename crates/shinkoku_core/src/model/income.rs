//! Income tax input value objects.

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date_math::parse_ymd;
use crate::error::{Result, ValidationError, non_negative};

/// Disability class of a dependent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabilityClass {
    #[default]
    None,
    General,
    Special,
    /// Special disability, living with the taxpayer
    SpecialCohabiting,
}

/// Disability status of the taxpayer themself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabilityStatus {
    #[default]
    None,
    General,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidowStatus {
    #[default]
    None,
    Widow,
    SingleParent,
}

/// Housing classification that decides the eligible loan-balance ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingCategory {
    /// Certified long-term quality or low-carbon housing
    Certified,
    /// Net-zero energy house standard
    Zeh,
    EnergyEfficient,
    #[default]
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationType {
    Political,
    Npo,
    PublicInterest,
    #[default]
    Other,
}

/// Dates cross the boundary as strict `YYYY-MM-DD` strings.
pub(crate) mod ymd {
    use super::*;

    pub fn serialize<S: Serializer>(
        date: &Date,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(date)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_ymd("date", &raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Dependents
// ============================================================================

/// A relative claimed as a dependent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentInfo {
    pub name: String,
    /// Free-text relationship; `配偶者` / `spouse` entries are handled by the
    /// spouse deduction instead.
    pub relationship: String,
    #[serde(with = "ymd")]
    pub birth_date: Date,
    /// Total income of the dependent (after their own deductions)
    #[serde(default)]
    pub income: i64,
    #[serde(default)]
    pub disability: DisabilityClass,
    #[serde(default)]
    pub cohabiting: bool,
    /// Already claimed by another taxpayer; skipped to avoid double deduction
    #[serde(default)]
    pub other_taxpayer_dependent: bool,
}

impl DependentInfo {
    pub fn new(
        name: impl Into<String>,
        relationship: impl Into<String>,
        birth_date: &str,
        income: i64,
    ) -> Result<Self> {
        let dependent = Self {
            name: name.into(),
            relationship: relationship.into(),
            birth_date: parse_ymd("birth_date", birth_date)?,
            income,
            disability: DisabilityClass::None,
            cohabiting: false,
            other_taxpayer_dependent: false,
        };
        dependent.validate()?;
        Ok(dependent)
    }

    #[must_use]
    pub fn cohabiting(mut self) -> Self {
        self.cohabiting = true;
        self
    }

    #[must_use]
    pub fn disability(mut self, class: DisabilityClass) -> Self {
        self.disability = class;
        self
    }

    #[must_use]
    pub fn claimed_by_other(mut self) -> Self {
        self.other_taxpayer_dependent = true;
        self
    }

    pub fn is_spouse(&self) -> bool {
        matches!(self.relationship.as_str(), "配偶者" | "spouse")
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "dependents.name",
            });
        }
        non_negative("dependents.income", self.income)?;
        Ok(())
    }
}

// ============================================================================
// Insurance, housing and donations
// ============================================================================

/// Itemised life-insurance premiums across the three categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeInsuranceDetail {
    pub general_new: i64,
    pub general_old: i64,
    /// Nursing/medical care insurance exists only under the new regime
    pub medical_care: i64,
    pub annuity_new: i64,
    pub annuity_old: i64,
}

impl LifeInsuranceDetail {
    pub fn validate(&self) -> Result<()> {
        non_negative("life_insurance_detail.general_new", self.general_new)?;
        non_negative("life_insurance_detail.general_old", self.general_old)?;
        non_negative("life_insurance_detail.medical_care", self.medical_care)?;
        non_negative("life_insurance_detail.annuity_new", self.annuity_new)?;
        non_negative("life_insurance_detail.annuity_old", self.annuity_old)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingLoanDetail {
    #[serde(default)]
    pub housing_category: HousingCategory,
    #[serde(default = "default_true")]
    pub is_new_construction: bool,
    #[serde(default)]
    pub is_childcare_household: bool,
    /// Building permit obtained before 2024 (general new housing exception)
    #[serde(default)]
    pub has_pre_r6_building_permit: bool,
    #[serde(with = "ymd")]
    pub move_in_date: Date,
    pub year_end_balance: i64,
}

fn default_true() -> bool {
    true
}

impl HousingLoanDetail {
    pub fn new(
        category: HousingCategory,
        move_in_date: &str,
        year_end_balance: i64,
    ) -> Result<Self> {
        let detail = Self {
            housing_category: category,
            is_new_construction: true,
            is_childcare_household: false,
            has_pre_r6_building_permit: false,
            move_in_date: parse_ymd("move_in_date", move_in_date)?,
            year_end_balance,
        };
        detail.validate()?;
        Ok(detail)
    }

    #[must_use]
    pub fn used(mut self) -> Self {
        self.is_new_construction = false;
        self
    }

    #[must_use]
    pub fn childcare_household(mut self) -> Self {
        self.is_childcare_household = true;
        self
    }

    #[must_use]
    pub fn pre_r6_permit(mut self) -> Self {
        self.has_pre_r6_building_permit = true;
        self
    }

    pub fn move_in_year(&self) -> i16 {
        self.move_in_date.year()
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("housing_loan_detail.year_end_balance", self.year_end_balance)?;
        Ok(())
    }
}

/// A single donation other than furusato nozei.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    #[serde(default)]
    pub donation_type: DonationType,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

impl Donation {
    pub fn new(donation_type: DonationType, amount: i64) -> Self {
        Self {
            donation_type,
            amount,
            recipient: None,
        }
    }
}

// ============================================================================
// Income tax input
// ============================================================================

pub const DEFAULT_FISCAL_YEAR: i16 = 2025;
pub const DEFAULT_BLUE_RETURN_DEDUCTION: i64 = 650_000;

/// Every fact the income tax aggregator consumes for one fiscal year.
///
/// Amounts are whole yen. Construct through [`crate::IncomeTaxInputBuilder`]
/// or deserialize and call [`IncomeTaxInput::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeTaxInput {
    pub fiscal_year: i16,

    // Income
    /// Gross salary revenue before the salary-income deduction
    pub salary_income: i64,
    pub business_revenue: i64,
    pub business_expenses: i64,
    /// Nominal blue-return special deduction before the profit cap
    pub blue_return_deduction: i64,
    pub misc_income: i64,
    pub dividend_income_comprehensive: i64,
    /// One-time income net of its expenses, before the special deduction
    pub one_time_income: i64,
    pub pension_income: i64,
    pub is_over_65: bool,
    pub loss_carryforward_amount: i64,

    // Income deductions
    pub social_insurance: i64,
    pub life_insurance_premium: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_insurance_detail: Option<LifeInsuranceDetail>,
    pub earthquake_insurance_premium: i64,
    pub old_long_term_insurance_premium: i64,
    pub medical_expenses: i64,
    pub medical_reimbursement: i64,
    pub self_medication_expenses: i64,
    pub self_medication_eligible: bool,
    pub furusato_nozei: i64,
    pub donations: Vec<Donation>,
    pub ideco_contribution: i64,
    pub small_business_mutual_aid: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse_income: Option<i64>,
    pub dependents: Vec<DependentInfo>,
    pub widow_status: WidowStatus,
    pub disability_status: DisabilityStatus,
    pub working_student: bool,

    // Tax credits
    pub housing_loan_balance: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housing_loan_year: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housing_loan_detail: Option<HousingLoanDetail>,

    // Prepayments
    pub withheld_tax: i64,
    pub business_withheld_tax: i64,
    pub other_income_withheld_tax: i64,
    pub estimated_tax_payment: i64,
}

impl Default for IncomeTaxInput {
    fn default() -> Self {
        Self {
            fiscal_year: DEFAULT_FISCAL_YEAR,
            salary_income: 0,
            business_revenue: 0,
            business_expenses: 0,
            blue_return_deduction: DEFAULT_BLUE_RETURN_DEDUCTION,
            misc_income: 0,
            dividend_income_comprehensive: 0,
            one_time_income: 0,
            pension_income: 0,
            is_over_65: false,
            loss_carryforward_amount: 0,
            social_insurance: 0,
            life_insurance_premium: 0,
            life_insurance_detail: None,
            earthquake_insurance_premium: 0,
            old_long_term_insurance_premium: 0,
            medical_expenses: 0,
            medical_reimbursement: 0,
            self_medication_expenses: 0,
            self_medication_eligible: false,
            furusato_nozei: 0,
            donations: Vec::new(),
            ideco_contribution: 0,
            small_business_mutual_aid: 0,
            spouse_income: None,
            dependents: Vec::new(),
            widow_status: WidowStatus::None,
            disability_status: DisabilityStatus::None,
            working_student: false,
            housing_loan_balance: 0,
            housing_loan_year: None,
            housing_loan_detail: None,
            withheld_tax: 0,
            business_withheld_tax: 0,
            other_income_withheld_tax: 0,
            estimated_tax_payment: 0,
        }
    }
}

impl IncomeTaxInput {
    /// Check every construction-time constraint.
    pub fn validate(&self) -> Result<()> {
        if !(2000..=2100).contains(&self.fiscal_year) {
            return Err(ValidationError::OutOfRange {
                field: "fiscal_year",
                value: self.fiscal_year as i64,
                min: 2000,
                max: 2100,
            });
        }

        let amounts = [
            ("salary_income", self.salary_income),
            ("business_revenue", self.business_revenue),
            ("business_expenses", self.business_expenses),
            ("blue_return_deduction", self.blue_return_deduction),
            ("misc_income", self.misc_income),
            ("dividend_income_comprehensive", self.dividend_income_comprehensive),
            ("one_time_income", self.one_time_income),
            ("pension_income", self.pension_income),
            ("loss_carryforward_amount", self.loss_carryforward_amount),
            ("social_insurance", self.social_insurance),
            ("life_insurance_premium", self.life_insurance_premium),
            ("earthquake_insurance_premium", self.earthquake_insurance_premium),
            ("old_long_term_insurance_premium", self.old_long_term_insurance_premium),
            ("medical_expenses", self.medical_expenses),
            ("medical_reimbursement", self.medical_reimbursement),
            ("self_medication_expenses", self.self_medication_expenses),
            ("furusato_nozei", self.furusato_nozei),
            ("ideco_contribution", self.ideco_contribution),
            ("small_business_mutual_aid", self.small_business_mutual_aid),
            ("housing_loan_balance", self.housing_loan_balance),
            ("withheld_tax", self.withheld_tax),
            ("business_withheld_tax", self.business_withheld_tax),
            ("other_income_withheld_tax", self.other_income_withheld_tax),
            ("estimated_tax_payment", self.estimated_tax_payment),
        ];
        for (field, value) in amounts {
            non_negative(field, value)?;
        }

        if let Some(spouse_income) = self.spouse_income {
            non_negative("spouse_income", spouse_income)?;
        }
        if let Some(detail) = &self.life_insurance_detail {
            detail.validate()?;
        }
        if let Some(detail) = &self.housing_loan_detail {
            detail.validate()?;
        }
        for donation in &self.donations {
            non_negative("donations.amount", donation.amount)?;
        }
        for dependent in &self.dependents {
            dependent.validate()?;
        }
        Ok(())
    }

    /// Realized business profit before the blue-return deduction.
    #[inline]
    pub fn business_profit(&self) -> i64 {
        self.business_revenue - self.business_expenses
    }

    /// Everything already paid toward this year's income tax.
    #[inline]
    pub fn total_prepaid(&self) -> i64 {
        self.withheld_tax
            + self.business_withheld_tax
            + self.other_income_withheld_tax
            + self.estimated_tax_payment
    }
}
