//! Medical expense deduction and the self-medication alternative.

use crate::model::{DeductionItem, DeductionKind};
use crate::rates::{
    MEDICAL_EXPENSE_INCOME_PERCENT, MEDICAL_EXPENSE_MAX, MEDICAL_EXPENSE_THRESHOLD,
    SELF_MEDICATION_MAX, SELF_MEDICATION_THRESHOLD, apply_rate,
};

/// The lower of ¥100,000 and 5% of total income.
pub fn medical_threshold(total_income: i64) -> i64 {
    apply_rate(total_income.max(0), MEDICAL_EXPENSE_INCOME_PERCENT, 100)
        .min(MEDICAL_EXPENSE_THRESHOLD)
}

/// Ordinary medical expense deduction, capped at ¥2,000,000.
pub fn calc_medical_deduction(paid: i64, reimbursement: i64, total_income: i64) -> i64 {
    (paid - reimbursement - medical_threshold(total_income)).clamp(0, MEDICAL_EXPENSE_MAX)
}

/// Self-medication deduction on qualifying OTC purchases.
pub fn calc_self_medication_deduction(expenses: i64) -> i64 {
    (expenses - SELF_MEDICATION_THRESHOLD).clamp(0, SELF_MEDICATION_MAX)
}

/// Pick whichever of the two medical regimes yields more; they cannot be combined.
pub fn choose_medical_deduction(
    paid: i64,
    reimbursement: i64,
    self_medication_expenses: i64,
    self_medication_eligible: bool,
    total_income: i64,
) -> Option<DeductionItem> {
    let ordinary = calc_medical_deduction(paid, reimbursement, total_income);
    let self_medication = if self_medication_eligible {
        calc_self_medication_deduction(self_medication_expenses)
    } else {
        0
    };

    if self_medication > ordinary {
        Some(DeductionItem::new(DeductionKind::SelfMedication, self_medication))
    } else if ordinary > 0 {
        Some(DeductionItem::new(DeductionKind::Medical, ordinary))
    } else {
        None
    }
}
