//! Sanity checker against real and corrupted results

use crate::income_tax::calc_income_tax;
use crate::model::{CheckCode, IncomeTaxInput, IncomeTaxResult, Severity};
use crate::sanity::sanity_check_income_tax;

fn side_business() -> IncomeTaxInput {
    IncomeTaxInput {
        salary_income: 6_000_000,
        business_revenue: 3_500_000,
        business_expenses: 400_000,
        furusato_nozei: 50_000,
        withheld_tax: 466_800,
        ..Default::default()
    }
}

fn checked(
    input: &IncomeTaxInput,
    mutate: impl FnOnce(&mut IncomeTaxResult),
) -> crate::model::CheckResult {
    let mut result = calc_income_tax(input);
    mutate(&mut result);
    sanity_check_income_tax(input, &result)
}

#[test]
fn test_real_result_has_no_items() {
    let check = checked(&side_business(), |_| {});
    assert!(check.passed);
    assert!(check.items.is_empty());
    assert_eq!(check.error_count, 0);
}

#[test]
fn test_blue_deduction_on_loss_is_error() {
    let input = IncomeTaxInput {
        business_revenue: 1_000_000,
        business_expenses: 1_500_000,
        ..side_business()
    };
    let check = checked(&input, |r| r.effective_blue_return_deduction = 650_000);

    assert!(!check.passed);
    assert!(check.has(CheckCode::BlueDeductionOnLoss));
    assert!(check.items[0].message.contains("-500,000"));
}

#[test]
fn test_blue_deduction_exceeding_profit_is_error() {
    let input = IncomeTaxInput {
        business_revenue: 1_000_000,
        business_expenses: 700_000,
        ..side_business()
    };
    let check = checked(&input, |r| r.effective_blue_return_deduction = 650_000);

    assert!(!check.passed);
    assert!(check.has(CheckCode::BlueDeductionExceedsProfit));
}

#[test]
fn test_unrounded_taxable_income_is_error() {
    let check = checked(&side_business(), |r| r.taxable_income = 6_182_345);
    assert!(!check.passed);
    assert!(check.has(CheckCode::TaxableIncomeRounding));
}

#[test]
fn test_reconstruction_mismatch_is_error() {
    let check = checked(&side_business(), |r| r.reconstruction_tax += 1);
    assert!(!check.passed);
    assert!(check.has(CheckCode::ReconstructionTaxMismatch));
    assert_eq!(check.error_count, 1);
}

#[test]
fn test_tax_on_zero_income_is_error() {
    let check = checked(&side_business(), |r| r.taxable_income = 0);
    assert!(check.has(CheckCode::TaxOnZeroIncome));
}

#[test]
fn test_refund_above_prepayments_is_error() {
    let check = checked(&side_business(), |r| r.tax_due = -500_000);
    assert!(!check.passed);
    assert!(check.has(CheckCode::RefundExceedsWithheld));
}

#[test]
fn test_missing_withholding_is_only_a_warning() {
    let input = IncomeTaxInput {
        withheld_tax: 0,
        ..side_business()
    };
    let check = checked(&input, |_| {});

    assert!(check.passed);
    assert!(check.has(CheckCode::NoWithholdingOnSalary));
    assert_eq!(check.warning_count, 1);
    assert_eq!(check.items[0].severity, Severity::Warning);
}

#[test]
fn test_large_business_loss_is_warning() {
    let input = IncomeTaxInput {
        salary_income: 0,
        business_revenue: 1_000_000,
        business_expenses: 12_000_000,
        withheld_tax: 0,
        furusato_nozei: 0,
        ..Default::default()
    };
    let check = checked(&input, |_| {});

    assert!(check.passed);
    assert!(check.has(CheckCode::LargeBusinessLoss));
    assert!(check.has(CheckCode::NegativeTotalIncome));
    let info = check
        .items
        .iter()
        .find(|i| i.code == CheckCode::NegativeTotalIncome)
        .unwrap();
    assert_eq!(info.severity, Severity::Info);
}

#[test]
fn test_credits_above_base_tax_is_warning() {
    let check = checked(&side_business(), |r| r.total_tax_credits = r.income_tax_base + 1);
    assert!(check.passed);
    assert!(check.has(CheckCode::CreditsExceedTax));
}

#[test]
fn test_check_result_serializes_codes() {
    let check = checked(&side_business(), |r| r.reconstruction_tax = 0);
    let json = serde_json::to_value(&check).unwrap();
    assert_eq!(json["passed"], false);
    assert_eq!(json["items"][0]["code"], "RECONSTRUCTION_TAX_MISMATCH");
    assert_eq!(json["items"][0]["severity"], "error");
}
