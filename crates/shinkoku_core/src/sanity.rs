//! Post-hoc consistency checks over an income tax result.
//!
//! The checker never alters a result. It re-derives the relationships the
//! aggregator is supposed to uphold and reports each violation with a
//! severity; only error-severity items fail the check.

use crate::income_tax::{calc_reconstruction_tax, format_yen};
use crate::model::{CheckCode, CheckItem, CheckResult, IncomeTaxInput, IncomeTaxResult};
use crate::rates::TAXABLE_INCOME_UNIT;

/// Business losses beyond this are flagged for review.
const LARGE_BUSINESS_LOSS: i64 = -10_000_000;

pub fn sanity_check_income_tax(input: &IncomeTaxInput, result: &IncomeTaxResult) -> CheckResult {
    let mut items = Vec::new();
    let profit = input.business_profit();
    let blue = result.effective_blue_return_deduction;

    if profit < 0 && blue > 0 {
        items.push(CheckItem::new(
            CheckCode::BlueDeductionOnLoss,
            format!(
                "事業が赤字（{}円）にもかかわらず青色申告特別控除{}円が適用されています",
                format_yen(profit),
                format_yen(blue)
            ),
        ));
    }

    if profit > 0 && blue > profit {
        items.push(CheckItem::new(
            CheckCode::BlueDeductionExceedsProfit,
            format!(
                "青色申告特別控除（{}円）が事業利益（{}円）を超過しています",
                format_yen(blue),
                format_yen(profit)
            ),
        ));
    }

    if result.business_income < LARGE_BUSINESS_LOSS {
        items.push(CheckItem::new(
            CheckCode::LargeBusinessLoss,
            format!(
                "事業損失が{}円と大きい値です。入力を確認してください",
                format_yen(result.business_income)
            ),
        ));
    }

    if result.taxable_income == 0 && result.income_tax_base > 0 {
        items.push(CheckItem::new(
            CheckCode::TaxOnZeroIncome,
            "課税所得が0円ですが算出税額が発生しています",
        ));
    }

    let offset_income = result.salary_income_after_deduction + result.business_income;
    if offset_income < 0 || result.total_income < 0 {
        items.push(CheckItem::new(
            CheckCode::NegativeTotalIncome,
            format!(
                "損益通算後の合計所得が負（{}円）です。純損失の繰越控除の適用を検討してください",
                format_yen(offset_income.min(result.total_income))
            ),
        ));
    }

    if result.taxable_income > 0 && result.taxable_income % TAXABLE_INCOME_UNIT != 0 {
        items.push(CheckItem::new(
            CheckCode::TaxableIncomeRounding,
            format!(
                "課税所得（{}円）が1,000円単位になっていません",
                format_yen(result.taxable_income)
            ),
        ));
    }

    let expected_reconstruction = calc_reconstruction_tax(result.income_tax_after_credits);
    if result.reconstruction_tax != expected_reconstruction {
        items.push(CheckItem::new(
            CheckCode::ReconstructionTaxMismatch,
            format!(
                "復興特別所得税の計算が不一致です（実際: {}円、期待: {}円）",
                format_yen(result.reconstruction_tax),
                format_yen(expected_reconstruction)
            ),
        ));
    }

    if result.income_tax_base > 0 && result.total_tax_credits > result.income_tax_base {
        items.push(CheckItem::new(
            CheckCode::CreditsExceedTax,
            format!(
                "税額控除（{}円）が算出税額（{}円）を超過しています",
                format_yen(result.total_tax_credits),
                format_yen(result.income_tax_base)
            ),
        ));
    }

    if input.salary_income > 0 && input.withheld_tax == 0 {
        items.push(CheckItem::new(
            CheckCode::NoWithholdingOnSalary,
            format!(
                "給与収入（{}円）がありますが源泉徴収税額が0円です。源泉徴収票を確認してください",
                format_yen(input.salary_income)
            ),
        ));
    }

    let prepaid = input.total_prepaid();
    if result.tax_due < 0 && -result.tax_due > prepaid {
        items.push(CheckItem::new(
            CheckCode::RefundExceedsWithheld,
            format!(
                "還付額（{}円）が源泉徴収+予定納税の合計（{}円）を超過しています",
                format_yen(-result.tax_due),
                format_yen(prepaid)
            ),
        ));
    }

    let check = CheckResult::from_items(items);
    if !check.passed {
        tracing::warn!(errors = check.error_count, "income tax sanity check failed");
    }
    check
}
