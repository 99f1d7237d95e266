//! Full income tax returns
//!
//! Every scenario is also run through the sanity checker.

use crate::builder::IncomeTaxInputBuilder;
use crate::income_tax::calc_income_tax;
use crate::model::{DeductionKind, Donation, DonationType, IncomeTaxInput, IncomeTaxResult};
use crate::sanity::sanity_check_income_tax;

fn calc_checked(input: &IncomeTaxInput) -> IncomeTaxResult {
    let result = calc_income_tax(input);
    let check = sanity_check_income_tax(input, &result);
    assert!(check.passed, "sanity check failed: {:?}", check.items);
    result
}

/// Salary plus a blue-return side business with furusato nozei
#[test]
fn test_salary_and_side_business_scenario() {
    let input = IncomeTaxInputBuilder::new(2025)
        .salary(6_000_000)
        .business(3_500_000, 400_000)
        .blue_return_deduction(650_000)
        .furusato_nozei(50_000)
        .withheld_tax(466_800)
        .build()
        .unwrap();
    let r = calc_checked(&input);

    assert_eq!(r.salary_income_after_deduction, 4_360_000);
    assert_eq!(r.business_income, 2_450_000);
    assert_eq!(r.effective_blue_return_deduction, 650_000);
    assert_eq!(r.total_income, 6_810_000);
    assert_eq!(r.total_income_deductions, 628_000);
    assert_eq!(r.taxable_income, 6_182_000);
    assert_eq!(r.income_tax_base, 808_900);
    assert_eq!(r.reconstruction_tax, 16_986);
    assert_eq!(r.total_tax, 825_886);
    assert_eq!(r.tax_due, 359_000);
    assert!(r.warnings.is_empty());
}

#[test]
fn test_business_without_expenses() {
    let input = IncomeTaxInput {
        salary_income: 6_000_000,
        business_revenue: 3_000_000,
        furusato_nozei: 50_000,
        withheld_tax: 466_800,
        ..Default::default()
    };
    let r = calc_checked(&input);

    assert_eq!(r.business_income, 2_350_000);
    assert_eq!(r.total_income, 6_710_000);
    assert_eq!(r.taxable_income, 6_082_000);
    assert_eq!(r.income_tax_base, 788_900);
    assert_eq!(r.reconstruction_tax, 16_566);
    assert_eq!(r.total_tax, 805_466);
    assert_eq!(r.tax_due, 338_600);
}

/// Spouse deduction and an itemless housing-loan credit producing a refund
#[test]
fn test_spouse_and_housing_loan_refund() {
    let input = IncomeTaxInput {
        salary_income: 8_000_000,
        business_revenue: 2_000_000,
        furusato_nozei: 100_000,
        housing_loan_balance: 35_000_000,
        spouse_income: Some(0),
        withheld_tax: 720_200,
        ..Default::default()
    };
    let r = calc_checked(&input);

    assert_eq!(r.salary_income_after_deduction, 6_100_000);
    assert_eq!(r.total_income, 7_450_000);
    assert_eq!(r.total_income_deductions, 1_058_000);
    assert_eq!(r.taxable_income, 6_392_000);
    assert_eq!(r.income_tax_base, 850_900);
    assert_eq!(r.housing_loan_credit, 245_000);
    assert_eq!(r.total_tax_credits, 245_000);
    assert_eq!(r.income_tax_after_credits, 605_900);
    assert_eq!(r.reconstruction_tax, 12_723);
    assert_eq!(r.total_tax, 618_623);
    assert_eq!(r.tax_due, -101_577);
    assert!(r.is_refund());
}

#[test]
fn test_refund_is_not_truncated() {
    let input = IncomeTaxInput {
        salary_income: 5_000_000,
        social_insurance: 700_000,
        withheld_tax: 200_123,
        ..Default::default()
    };
    let r = calc_checked(&input);

    assert_eq!(r.taxable_income, 2_180_000);
    assert_eq!(r.total_tax, 123_030);
    assert_eq!(r.tax_due, -77_093);
}

#[test]
fn test_estimated_payment_reduces_due() {
    let base = IncomeTaxInput {
        salary_income: 6_000_000,
        business_revenue: 3_000_000,
        withheld_tax: 466_800,
        ..Default::default()
    };
    let with_estimated = IncomeTaxInput {
        estimated_tax_payment: 100_000,
        ..base.clone()
    };
    let a = calc_checked(&base);
    let b = calc_checked(&with_estimated);

    assert_eq!(a.total_tax, b.total_tax);
    assert_eq!(b.tax_due, a.tax_due - 100_000);
    assert_eq!(b.estimated_tax_payment, 100_000);
}

#[test]
fn test_blue_deduction_dropped_on_loss() {
    let input = IncomeTaxInput {
        salary_income: 4_000_000,
        business_revenue: 1_000_000,
        business_expenses: 1_500_000,
        withheld_tax: 100_000,
        ..Default::default()
    };
    let r = calc_checked(&input);

    assert_eq!(r.effective_blue_return_deduction, 0);
    assert_eq!(r.business_income, -500_000);
    assert_eq!(r.total_income, 2_260_000);
    assert_eq!(r.taxable_income, 1_380_000);
    assert_eq!(r.total_tax, 70_449);
    assert_eq!(r.tax_due, -29_551);
    assert_eq!(r.warnings.len(), 1);
    assert!(r.warnings[0].contains("自動調整"));
}

#[test]
fn test_blue_deduction_capped_at_small_profit() {
    let input = IncomeTaxInput {
        salary_income: 4_000_000,
        business_revenue: 1_000_000,
        business_expenses: 700_000,
        withheld_tax: 100_000,
        ..Default::default()
    };
    let r = calc_checked(&input);

    assert_eq!(r.effective_blue_return_deduction, 300_000);
    assert_eq!(r.business_income, 0);
    assert_eq!(r.warnings.len(), 1);
}

#[test]
fn test_loss_carryforward_applied() {
    let input = IncomeTaxInput {
        salary_income: 3_000_000,
        loss_carryforward_amount: 500_000,
        withheld_tax: 50_000,
        ..Default::default()
    };
    let r = calc_checked(&input);

    assert_eq!(r.salary_income_after_deduction, 2_020_000);
    assert_eq!(r.loss_carryforward_applied, 500_000);
    assert_eq!(r.total_income, 1_520_000);
    assert_eq!(r.taxable_income, 640_000);
    assert_eq!(r.total_tax, 32_672);
    assert_eq!(r.tax_due, -17_328);
}

#[test]
fn test_net_loss_is_not_floored() {
    let input = IncomeTaxInput {
        business_expenses: 3_000_000,
        loss_carryforward_amount: 1_000_000,
        ..Default::default()
    };
    let r = calc_checked(&input);

    assert_eq!(r.total_income, -3_000_000);
    assert_eq!(r.loss_carryforward_applied, 0);
    assert_eq!(r.taxable_income, 0);
    assert_eq!(r.tax_due, 0);
    assert_eq!(r.deductions_detail.amount_of(DeductionKind::Basic), 950_000);
}

#[test]
fn test_dividend_credit_in_aggregator() {
    let input = IncomeTaxInput {
        salary_income: 6_000_000,
        dividend_income_comprehensive: 1_000_000,
        withheld_tax: 466_800,
        ..Default::default()
    };
    let r = calc_checked(&input);

    assert_eq!(r.total_income, 5_360_000);
    assert_eq!(r.taxable_income, 4_730_000);
    assert_eq!(r.income_tax_base, 518_500);
    assert_eq!(r.dividend_credit, 100_000);
    assert_eq!(r.income_tax_after_credits, 418_500);
    assert_eq!(r.total_tax, 427_288);
    assert_eq!(r.tax_due, -39_512);
}

#[test]
fn test_pension_and_one_time_income() {
    let input = IncomeTaxInput {
        pension_income: 3_500_000,
        is_over_65: true,
        one_time_income: 1_500_000,
        ..Default::default()
    };
    let r = calc_checked(&input);

    assert_eq!(r.pension_income_after_deduction, 2_250_000);
    assert_eq!(r.one_time_income, 500_000);
    assert_eq!(r.total_income, 2_750_000);
}

#[test]
fn test_donation_credit_capped_at_quarter_of_tax() {
    let input = IncomeTaxInputBuilder::new(2025)
        .salary(3_000_000)
        .donation(Donation::new(DonationType::Political, 502_000))
        .withheld_tax(10_000)
        .build()
        .unwrap();
    let r = calc_checked(&input);

    assert_eq!(r.total_income_deductions, 880_000 + 500_000);
    assert_eq!(r.income_tax_base, 32_000);
    assert_eq!(r.donation_credit, 8_000);
    assert_eq!(r.income_tax_after_credits, 24_000);
}

#[test]
fn test_credits_never_make_tax_negative() {
    let input = IncomeTaxInput {
        salary_income: 3_000_000,
        housing_loan_balance: 30_000_000,
        withheld_tax: 50_000,
        ..Default::default()
    };
    let r = calc_income_tax(&input);

    assert_eq!(r.taxable_income, 1_140_000);
    assert_eq!(r.income_tax_base, 57_000);
    assert_eq!(r.housing_loan_credit, 210_000);
    assert_eq!(r.income_tax_after_credits, 0);
    assert_eq!(r.reconstruction_tax, 0);
    assert_eq!(r.tax_due, -50_000);
}
