//! Income deductions and tax credits.
//!
//! Each submodule holds the scalar calculators for one family of
//! deductions; [`calc_deductions`] assembles them into the ordered
//! breakdown printed on the return.

mod basic;
mod credits;
mod donations;
mod family;
mod insurance;
mod medical;
mod personal;

pub use basic::{calc_basic_deduction, calc_salary_deduction, calc_salary_income};
pub use credits::{calc_dividend_tax_credit, calc_housing_loan_credit, housing_loan_balance_limit};
pub use donations::{
    calc_furusato_deduction, calc_furusato_deduction_limit, calc_npo_donation_credit,
    calc_political_donation_credit, cap_donation_credits, donation_items,
};
pub use family::{
    calc_dependents_deduction, calc_specific_relative_special_deduction, calc_spouse_deduction,
};
pub use insurance::{
    calc_earthquake_insurance_deduction, calc_life_insurance_category,
    calc_life_insurance_deduction, calc_life_insurance_deduction_old, calc_life_insurance_total,
};
pub use medical::{
    calc_medical_deduction, calc_self_medication_deduction, choose_medical_deduction,
    medical_threshold,
};
pub use personal::{
    calc_disability_self_deduction, calc_widow_deduction, calc_working_student_deduction,
};

use crate::model::{DeductionItem, DeductionKind, DeductionsInput, DeductionsResult};
use crate::rates::DEPENDENT_INCOME_LIMIT;

fn mutual_aid_details(ideco: i64, mutual_aid: i64) -> Option<String> {
    match (ideco > 0, mutual_aid > 0) {
        (true, false) => Some("iDeCo".to_string()),
        (false, true) => Some("小規模企業共済".to_string()),
        (true, true) => Some(format!("iDeCo: {ideco}, 共済: {mutual_aid}")),
        (false, false) => None,
    }
}

/// Compute every applicable income deduction and tax credit.
///
/// Lines appear in return order: basic, social insurance, life and
/// earthquake insurance, mutual aid, medical, furusato and other donations,
/// spouse, dependents, personal status, then the credits. Ratio-based
/// limits treat a negative total income as zero.
pub fn calc_deductions(input: &DeductionsInput) -> DeductionsResult {
    let total_income = input.total_income.max(0);
    let mut result = DeductionsResult::default();

    result.push(DeductionItem::new(
        DeductionKind::Basic,
        calc_basic_deduction(total_income),
    ));
    result.push(DeductionItem::new(
        DeductionKind::SocialInsurance,
        input.social_insurance,
    ));

    match &input.life_insurance_detail {
        Some(detail) => result.push(
            DeductionItem::new(DeductionKind::LifeInsurance, calc_life_insurance_total(detail))
                .with_details("3区分詳細"),
        ),
        None => result.push(DeductionItem::new(
            DeductionKind::LifeInsurance,
            calc_life_insurance_deduction(input.life_insurance_premium),
        )),
    }

    result.push(DeductionItem::new(
        DeductionKind::EarthquakeInsurance,
        calc_earthquake_insurance_deduction(
            input.earthquake_insurance_premium,
            input.old_long_term_insurance_premium,
        ),
    ));

    let mutual_aid_total = input.ideco_contribution + input.small_business_mutual_aid;
    if let Some(details) =
        mutual_aid_details(input.ideco_contribution, input.small_business_mutual_aid)
    {
        result.push(
            DeductionItem::new(DeductionKind::SmallBusinessMutualAid, mutual_aid_total)
                .with_details(details),
        );
    }

    if let Some(item) = choose_medical_deduction(
        input.medical_expenses,
        input.medical_reimbursement,
        input.self_medication_expenses,
        input.self_medication_eligible,
        total_income,
    ) {
        result.push(item);
    }

    if input.furusato_nozei > 0 {
        result.push(
            DeductionItem::new(
                DeductionKind::FurusatoNozei,
                calc_furusato_deduction(input.furusato_nozei, Some(total_income)),
            )
            .with_details("ふるさと納税"),
        );
    }
    result.extend(donation_items(&input.donations, total_income));

    let spouse = calc_spouse_deduction(total_income, input.spouse_income);
    if spouse > 0 {
        let item = DeductionItem::new(DeductionKind::Spouse, spouse);
        let item = match input.spouse_income {
            Some(income) if income > DEPENDENT_INCOME_LIMIT => {
                item.with_details("配偶者特別控除")
            }
            _ => item,
        };
        result.push(item);
    }
    result.extend(calc_dependents_deduction(&input.dependents, input.fiscal_year));

    if let Some(item) = calc_widow_deduction(input.widow_status, total_income) {
        result.push(item);
    }
    if let Some(item) = calc_disability_self_deduction(input.disability_status) {
        result.push(item);
    }
    if let Some(item) = calc_working_student_deduction(input.working_student, total_income) {
        result.push(item);
    }

    // Tax credits
    let housing_balance = input
        .housing_loan_detail
        .as_ref()
        .map_or(input.housing_loan_balance, |detail| detail.year_end_balance);
    result.push(DeductionItem::new(
        DeductionKind::HousingLoan,
        calc_housing_loan_credit(
            housing_balance,
            input.housing_loan_detail.as_ref(),
            input.housing_loan_year,
        ),
    ));

    if input.dividend_income_comprehensive > 0 && input.taxable_income_for_dividend_credit > 0 {
        result.push(DeductionItem::new(
            DeductionKind::Dividend,
            calc_dividend_tax_credit(
                input.dividend_income_comprehensive,
                input.taxable_income_for_dividend_credit,
            ),
        ));
    }

    tracing::trace!(
        total_income_deductions = result.total_income_deductions,
        total_tax_credits = result.total_tax_credits,
        "deductions computed"
    );

    result
}
