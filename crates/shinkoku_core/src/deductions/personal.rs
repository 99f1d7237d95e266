//! Flat personal-status deductions.

use crate::model::{DeductionItem, DeductionKind, DisabilityStatus, WidowStatus};
use crate::rates::{
    DISABILITY_GENERAL, DISABILITY_SPECIAL, SINGLE_PARENT_DEDUCTION, WIDOW_DEDUCTION,
    WIDOW_INCOME_LIMIT, WORKING_STUDENT_DEDUCTION, WORKING_STUDENT_INCOME_LIMIT,
};

/// Widow or single-parent deduction, available up to ¥5M total income.
pub fn calc_widow_deduction(status: WidowStatus, total_income: i64) -> Option<DeductionItem> {
    if total_income > WIDOW_INCOME_LIMIT {
        return None;
    }
    match status {
        WidowStatus::None => None,
        WidowStatus::Widow => Some(DeductionItem::new(DeductionKind::Widow, WIDOW_DEDUCTION)),
        WidowStatus::SingleParent => Some(DeductionItem::new(
            DeductionKind::SingleParent,
            SINGLE_PARENT_DEDUCTION,
        )),
    }
}

/// Disability deduction for the taxpayer themself.
pub fn calc_disability_self_deduction(status: DisabilityStatus) -> Option<DeductionItem> {
    let amount = match status {
        DisabilityStatus::None => return None,
        DisabilityStatus::General => DISABILITY_GENERAL,
        DisabilityStatus::Special => DISABILITY_SPECIAL,
    };
    Some(DeductionItem::new(DeductionKind::DisabilitySelf, amount))
}

pub fn calc_working_student_deduction(
    working_student: bool,
    total_income: i64,
) -> Option<DeductionItem> {
    (working_student && total_income <= WORKING_STUDENT_INCOME_LIMIT)
        .then(|| DeductionItem::new(DeductionKind::WorkingStudent, WORKING_STUDENT_DEDUCTION))
}
