//! Life and earthquake insurance premium deductions.

use crate::model::LifeInsuranceDetail;
use crate::rates::{
    EARTHQUAKE_INSURANCE_MAX, LIFE_INSURANCE_COMBINED_MAX, LIFE_INSURANCE_NEW_BANDS,
    LIFE_INSURANCE_NEW_MAX, LIFE_INSURANCE_OLD_BANDS, LIFE_INSURANCE_OLD_MAX,
    LIFE_INSURANCE_TOTAL_MAX, OLD_LONG_TERM_ADDITION, OLD_LONG_TERM_FULL_LIMIT,
    OLD_LONG_TERM_HALF_LIMIT, OLD_LONG_TERM_MAX,
};

fn banded(premium: i64, bands: &[(i64, i64, i64)], max: i64) -> i64 {
    if premium <= 0 {
        return 0;
    }
    bands
        .iter()
        .find(|(upper, _, _)| premium <= *upper)
        .map(|(_, divisor, addition)| premium / divisor + addition)
        .unwrap_or(max)
}

/// Deduction for one category of new-regime (2012+) premiums.
pub fn calc_life_insurance_deduction(premium: i64) -> i64 {
    banded(premium, &LIFE_INSURANCE_NEW_BANDS, LIFE_INSURANCE_NEW_MAX)
}

/// Deduction for one category of old-regime premiums.
pub fn calc_life_insurance_deduction_old(premium: i64) -> i64 {
    banded(premium, &LIFE_INSURANCE_OLD_BANDS, LIFE_INSURANCE_OLD_MAX)
}

/// Deduction for a category holding both new and old contracts.
///
/// The taxpayer may take either regime alone, or both combined up to 40,000;
/// the most favorable option wins.
pub fn calc_life_insurance_category(new_premium: i64, old_premium: i64) -> i64 {
    let new = calc_life_insurance_deduction(new_premium);
    let old = calc_life_insurance_deduction_old(old_premium);
    new.max(old)
        .max((new + old).min(LIFE_INSURANCE_COMBINED_MAX))
}

/// Sum of the general, medical-care and annuity categories, capped at 120,000.
pub fn calc_life_insurance_total(detail: &LifeInsuranceDetail) -> i64 {
    let general = calc_life_insurance_category(detail.general_new, detail.general_old);
    let medical_care = calc_life_insurance_deduction(detail.medical_care);
    let annuity = calc_life_insurance_category(detail.annuity_new, detail.annuity_old);
    (general + medical_care + annuity).min(LIFE_INSURANCE_TOTAL_MAX)
}

/// Earthquake premiums plus legacy long-term non-life premiums, capped at 50,000.
pub fn calc_earthquake_insurance_deduction(
    earthquake_premium: i64,
    old_long_term_premium: i64,
) -> i64 {
    let earthquake = earthquake_premium.clamp(0, EARTHQUAKE_INSURANCE_MAX);
    let old_long_term = match old_long_term_premium {
        p if p <= 0 => 0,
        p if p <= OLD_LONG_TERM_FULL_LIMIT => p,
        p if p <= OLD_LONG_TERM_HALF_LIMIT => p / 2 + OLD_LONG_TERM_ADDITION,
        _ => OLD_LONG_TERM_MAX,
    };
    (earthquake + old_long_term).min(EARTHQUAKE_INSURANCE_MAX)
}
