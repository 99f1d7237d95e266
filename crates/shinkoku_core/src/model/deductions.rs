//! Deduction and credit breakdown types.

use serde::{Deserialize, Serialize};

use super::income::{
    DependentInfo, DisabilityStatus, Donation, HousingLoanDetail, IncomeTaxInput,
    LifeInsuranceDetail, WidowStatus,
};
use crate::error::{Result, non_negative};

/// Type tag of a deduction or credit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    // Income deductions
    Basic,
    SocialInsurance,
    LifeInsurance,
    EarthquakeInsurance,
    SmallBusinessMutualAid,
    Medical,
    SelfMedication,
    FurusatoNozei,
    Donation,
    Spouse,
    Dependent,
    SpecificRelativeSpecial,
    Disability,
    Widow,
    SingleParent,
    DisabilitySelf,
    WorkingStudent,
    // Tax credits
    HousingLoan,
    Dividend,
    PoliticalDonation,
    NpoDonation,
}

impl DeductionKind {
    /// Label as printed on the return.
    pub fn label(self) -> &'static str {
        match self {
            DeductionKind::Basic => "基礎控除",
            DeductionKind::SocialInsurance => "社会保険料控除",
            DeductionKind::LifeInsurance => "生命保険料控除",
            DeductionKind::EarthquakeInsurance => "地震保険料控除",
            DeductionKind::SmallBusinessMutualAid => "小規模企業共済等掛金控除",
            DeductionKind::Medical => "医療費控除",
            DeductionKind::SelfMedication => "セルフメディケーション税制",
            DeductionKind::FurusatoNozei => "寄附金控除",
            DeductionKind::Donation => "寄附金控除（その他）",
            DeductionKind::Spouse => "配偶者控除",
            DeductionKind::Dependent => "扶養控除",
            DeductionKind::SpecificRelativeSpecial => "特定親族特別控除",
            DeductionKind::Disability => "障害者控除",
            DeductionKind::Widow => "寡婦控除",
            DeductionKind::SingleParent => "ひとり親控除",
            DeductionKind::DisabilitySelf => "障害者控除（本人）",
            DeductionKind::WorkingStudent => "勤労学生控除",
            DeductionKind::HousingLoan => "住宅ローン控除",
            DeductionKind::Dividend => "配当控除",
            DeductionKind::PoliticalDonation => "政治活動寄附金控除",
            DeductionKind::NpoDonation => "認定NPO等寄附金控除",
        }
    }

    pub fn is_tax_credit(self) -> bool {
        matches!(
            self,
            DeductionKind::HousingLoan
                | DeductionKind::Dividend
                | DeductionKind::PoliticalDonation
                | DeductionKind::NpoDonation
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionItem {
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    pub name: String,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl DeductionItem {
    pub fn new(kind: DeductionKind, amount: i64) -> Self {
        Self {
            kind,
            name: kind.label().to_string(),
            amount,
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Ordered income deductions and tax credits with running totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionsResult {
    pub income_deductions: Vec<DeductionItem>,
    pub tax_credits: Vec<DeductionItem>,
    pub total_income_deductions: i64,
    pub total_tax_credits: i64,
}

impl DeductionsResult {
    /// Append an item to the list matching its kind; zero amounts are dropped.
    pub fn push(&mut self, item: DeductionItem) {
        if item.amount <= 0 {
            return;
        }
        if item.kind.is_tax_credit() {
            self.total_tax_credits += item.amount;
            self.tax_credits.push(item);
        } else {
            self.total_income_deductions += item.amount;
            self.income_deductions.push(item);
        }
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = DeductionItem>) {
        for item in items {
            self.push(item);
        }
    }

    /// Sum of every line of the given kind.
    pub fn amount_of(&self, kind: DeductionKind) -> i64 {
        self.income_deductions
            .iter()
            .chain(&self.tax_credits)
            .filter(|item| item.kind == kind)
            .map(|item| item.amount)
            .sum()
    }

    /// Recompute both totals from the item lists.
    pub fn recompute_totals(&mut self) {
        self.total_income_deductions = self.income_deductions.iter().map(|i| i.amount).sum();
        self.total_tax_credits = self.tax_credits.iter().map(|i| i.amount).sum();
    }
}

/// Inputs for the standalone deductions calculator.
///
/// The income tax aggregator derives one of these from [`IncomeTaxInput`]
/// once total income is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionsInput {
    pub fiscal_year: i16,
    pub total_income: i64,
    pub social_insurance: i64,
    pub life_insurance_premium: i64,
    pub life_insurance_detail: Option<LifeInsuranceDetail>,
    pub earthquake_insurance_premium: i64,
    pub old_long_term_insurance_premium: i64,
    pub medical_expenses: i64,
    pub medical_reimbursement: i64,
    pub self_medication_expenses: i64,
    pub self_medication_eligible: bool,
    pub furusato_nozei: i64,
    pub donations: Vec<Donation>,
    pub housing_loan_balance: i64,
    /// Move-in year when no itemised housing detail is given
    pub housing_loan_year: Option<i16>,
    pub housing_loan_detail: Option<HousingLoanDetail>,
    pub spouse_income: Option<i64>,
    pub ideco_contribution: i64,
    pub small_business_mutual_aid: i64,
    pub dependents: Vec<DependentInfo>,
    pub widow_status: WidowStatus,
    pub disability_status: DisabilityStatus,
    pub working_student: bool,
    pub dividend_income_comprehensive: i64,
    /// Taxable income used for the dividend credit; zero skips the credit
    pub taxable_income_for_dividend_credit: i64,
}

impl Default for DeductionsInput {
    fn default() -> Self {
        Self::from_income_input(&IncomeTaxInput::default(), 0)
    }
}

impl DeductionsInput {
    /// Project the deduction-relevant facts of an income tax input.
    ///
    /// The dividend credit is left to the aggregator, which only knows the
    /// taxable income after deductions.
    pub fn from_income_input(input: &IncomeTaxInput, total_income: i64) -> Self {
        Self {
            fiscal_year: input.fiscal_year,
            total_income,
            social_insurance: input.social_insurance,
            life_insurance_premium: input.life_insurance_premium,
            life_insurance_detail: input.life_insurance_detail,
            earthquake_insurance_premium: input.earthquake_insurance_premium,
            old_long_term_insurance_premium: input.old_long_term_insurance_premium,
            medical_expenses: input.medical_expenses,
            medical_reimbursement: input.medical_reimbursement,
            self_medication_expenses: input.self_medication_expenses,
            self_medication_eligible: input.self_medication_eligible,
            furusato_nozei: input.furusato_nozei,
            donations: input.donations.clone(),
            housing_loan_balance: input.housing_loan_balance,
            housing_loan_year: input.housing_loan_year,
            housing_loan_detail: input.housing_loan_detail.clone(),
            spouse_income: input.spouse_income,
            ideco_contribution: input.ideco_contribution,
            small_business_mutual_aid: input.small_business_mutual_aid,
            dependents: input.dependents.clone(),
            widow_status: input.widow_status,
            disability_status: input.disability_status,
            working_student: input.working_student,
            dividend_income_comprehensive: 0,
            taxable_income_for_dividend_credit: 0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("social_insurance", self.social_insurance),
            ("life_insurance_premium", self.life_insurance_premium),
            ("earthquake_insurance_premium", self.earthquake_insurance_premium),
            ("old_long_term_insurance_premium", self.old_long_term_insurance_premium),
            ("medical_expenses", self.medical_expenses),
            ("medical_reimbursement", self.medical_reimbursement),
            ("self_medication_expenses", self.self_medication_expenses),
            ("furusato_nozei", self.furusato_nozei),
            ("housing_loan_balance", self.housing_loan_balance),
            ("ideco_contribution", self.ideco_contribution),
            ("small_business_mutual_aid", self.small_business_mutual_aid),
            ("dividend_income_comprehensive", self.dividend_income_comprehensive),
            (
                "taxable_income_for_dividend_credit",
                self.taxable_income_for_dividend_credit,
            ),
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
}

/// Inputs for the furusato nozei limit estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurusatoLimitInput {
    pub total_income: i64,
    pub total_income_deductions: i64,
    /// Marginal income tax rate; derived from the bracket table when absent
    #[serde(default)]
    pub income_tax_rate_percent: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurusatoLimitResult {
    pub taxable_income: i64,
    pub income_tax_rate_percent: i64,
    pub residential_income_levy: i64,
    pub estimated_limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_routes_by_kind_and_skips_zero() {
        let mut result = DeductionsResult::default();
        result.push(DeductionItem::new(DeductionKind::Basic, 580_000));
        result.push(DeductionItem::new(DeductionKind::Medical, 0));
        result.push(DeductionItem::new(DeductionKind::HousingLoan, 140_000));

        assert_eq!(result.income_deductions.len(), 1);
        assert_eq!(result.tax_credits.len(), 1);
        assert_eq!(result.total_income_deductions, 580_000);
        assert_eq!(result.total_tax_credits, 140_000);
    }

    #[test]
    fn test_item_serializes_type_tag() {
        let item =
            DeductionItem::new(DeductionKind::FurusatoNozei, 48_000).with_details("ふるさと納税");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "furusato_nozei");
        assert_eq!(json["name"], "寄附金控除");
        assert_eq!(json["amount"], 48_000);
    }

    #[test]
    fn test_amount_of_sums_all_matching_lines() {
        let mut result = DeductionsResult::default();
        result.push(DeductionItem::new(DeductionKind::Dependent, 380_000));
        result.push(DeductionItem::new(DeductionKind::Dependent, 630_000));
        assert_eq!(result.amount_of(DeductionKind::Dependent), 1_010_000);
        assert_eq!(result.amount_of(DeductionKind::Spouse), 0);
    }
}
