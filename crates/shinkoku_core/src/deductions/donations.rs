//! Furusato nozei and other donation deductions and credits.

use crate::income_tax::marginal_rate_percent;
use crate::model::{DeductionItem, DeductionKind, DeductionsResult, Donation, DonationType};
use crate::model::{FurusatoLimitInput, FurusatoLimitResult};
use crate::rates::{
    DONATION_CREDIT_CAP_PERCENT, DONATION_INCOME_PERCENT, DONATION_SELF_BURDEN,
    FURUSATO_RESIDENTIAL_PERCENT, NPO_DONATION_CREDIT_PERCENT, POLITICAL_DONATION_CREDIT_PERCENT,
    RESIDENTIAL_TAX_PERCENT, TAXABLE_INCOME_UNIT, apply_rate, floor_to,
};

/// Income deduction for donations: the amount above the ¥2,000 self-burden.
///
/// With `total_income` supplied, the donation is first limited to 40% of it.
pub fn calc_furusato_deduction(donation: i64, total_income: Option<i64>) -> i64 {
    let eligible = match total_income {
        Some(total_income) => {
            donation.min(apply_rate(total_income.max(0), DONATION_INCOME_PERCENT, 100))
        }
        None => donation,
    };
    (eligible - DONATION_SELF_BURDEN).max(0)
}

fn credit_above_self_burden(total: i64, percent: i64) -> i64 {
    if total <= DONATION_SELF_BURDEN {
        return 0;
    }
    apply_rate(total - DONATION_SELF_BURDEN, percent, 100)
}

/// Tax credit for political-activity donations (30% of the excess over ¥2,000).
pub fn calc_political_donation_credit(total: i64) -> i64 {
    credit_above_self_burden(total, POLITICAL_DONATION_CREDIT_PERCENT)
}

/// Tax credit for certified NPO and public-interest donations (40%).
pub fn calc_npo_donation_credit(total: i64) -> i64 {
    credit_above_self_burden(total, NPO_DONATION_CREDIT_PERCENT)
}

/// Deduction and credit lines for donations other than furusato nozei.
pub fn donation_items(donations: &[Donation], total_income: i64) -> Vec<DeductionItem> {
    let mut items = Vec::new();

    let total: i64 = donations.iter().map(|d| d.amount).sum();
    if total > DONATION_SELF_BURDEN {
        let deduction = calc_furusato_deduction(total, Some(total_income));
        items.push(
            DeductionItem::new(DeductionKind::Donation, deduction)
                .with_details(format!("寄附金合計: {total}")),
        );
    }

    let political: i64 = donations
        .iter()
        .filter(|d| d.donation_type == DonationType::Political)
        .map(|d| d.amount)
        .sum();
    let credit = calc_political_donation_credit(political);
    if credit > 0 {
        items.push(
            DeductionItem::new(DeductionKind::PoliticalDonation, credit)
                .with_details(format!("所得税額の{DONATION_CREDIT_CAP_PERCENT}%上限あり")),
        );
    }

    let npo: i64 = donations
        .iter()
        .filter(|d| matches!(d.donation_type, DonationType::Npo | DonationType::PublicInterest))
        .map(|d| d.amount)
        .sum();
    let credit = calc_npo_donation_credit(npo);
    if credit > 0 {
        items.push(
            DeductionItem::new(DeductionKind::NpoDonation, credit)
                .with_details(format!("所得税額の{DONATION_CREDIT_CAP_PERCENT}%上限あり")),
        );
    }

    items
}

/// Limit each donation credit to 25% of the base income tax.
pub fn cap_donation_credits(deductions: &mut DeductionsResult, income_tax_base: i64) {
    let cap = apply_rate(income_tax_base.max(0), DONATION_CREDIT_CAP_PERCENT, 100);
    for item in deductions.tax_credits.iter_mut() {
        if matches!(
            item.kind,
            DeductionKind::PoliticalDonation | DeductionKind::NpoDonation
        ) {
            item.amount = item.amount.min(cap);
        }
    }
    deductions.tax_credits.retain(|item| item.amount > 0);
    deductions.recompute_totals();
}

/// Estimate the furusato nozei amount that stays fully offset by tax savings.
///
/// limit ≈ residential levy × 20% ÷ (100% − marginal rate × 1.021 − 10%) + ¥2,000,
/// evaluated in thousandths to stay in integers. Adjustment credits are ignored.
pub fn calc_furusato_deduction_limit(input: &FurusatoLimitInput) -> FurusatoLimitResult {
    let taxable_income = floor_to(
        (input.total_income - input.total_income_deductions).max(0),
        TAXABLE_INCOME_UNIT,
    );
    if taxable_income <= 0 {
        return FurusatoLimitResult::default();
    }

    let rate = input
        .income_tax_rate_percent
        .unwrap_or_else(|| marginal_rate_percent(taxable_income));
    let levy = apply_rate(taxable_income, RESIDENTIAL_TAX_PERCENT, 100);

    let denominator_permille = 1_000 - apply_rate(rate, 1_021, 100) - 100;
    let estimated_limit = if denominator_permille <= 0 {
        apply_rate(levy, FURUSATO_RESIDENTIAL_PERCENT, 100) + DONATION_SELF_BURDEN
    } else {
        apply_rate(levy, FURUSATO_RESIDENTIAL_PERCENT * 10, denominator_permille)
            + DONATION_SELF_BURDEN
    };

    FurusatoLimitResult {
        taxable_income,
        income_tax_rate_percent: rate,
        residential_income_levy: levy,
        estimated_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_furusato_without_income_cap() {
        assert_eq!(calc_furusato_deduction(50_000, None), 48_000);
        assert_eq!(calc_furusato_deduction(2_000, None), 0);
        assert_eq!(calc_furusato_deduction(1_500, None), 0);
    }

    #[test]
    fn test_furusato_income_cap() {
        // 40% of 100,000 = 40,000
        assert_eq!(calc_furusato_deduction(100_000, Some(100_000)), 38_000);
        assert_eq!(calc_furusato_deduction(50_000, Some(6_810_000)), 48_000);
        assert_eq!(calc_furusato_deduction(50_000, Some(-1)), 0);
    }

    #[test]
    fn test_donation_items_split_credit_types() {
        let donations = vec![
            Donation::new(DonationType::Political, 12_000),
            Donation::new(DonationType::Npo, 7_000),
            Donation::new(DonationType::PublicInterest, 5_000),
        ];
        let items = donation_items(&donations, 5_000_000);

        let deduction = items.iter().find(|i| i.kind == DeductionKind::Donation).unwrap();
        assert_eq!(deduction.amount, 22_000);
        let political = items
            .iter()
            .find(|i| i.kind == DeductionKind::PoliticalDonation)
            .unwrap();
        assert_eq!(political.amount, 3_000);
        let npo = items.iter().find(|i| i.kind == DeductionKind::NpoDonation).unwrap();
        assert_eq!(npo.amount, 4_000);
    }

    #[test]
    fn test_cap_donation_credits() {
        let mut deductions = DeductionsResult::default();
        deductions.push(DeductionItem::new(DeductionKind::PoliticalDonation, 300_000));
        deductions.push(DeductionItem::new(DeductionKind::HousingLoan, 100_000));
        cap_donation_credits(&mut deductions, 400_000);

        assert_eq!(deductions.amount_of(DeductionKind::PoliticalDonation), 100_000);
        assert_eq!(deductions.amount_of(DeductionKind::HousingLoan), 100_000);
        assert_eq!(deductions.total_tax_credits, 200_000);
    }

    #[test]
    fn test_furusato_limit_twenty_percent_bracket() {
        let result = calc_furusato_deduction_limit(&FurusatoLimitInput {
            total_income: 6_810_000,
            total_income_deductions: 810_000,
            income_tax_rate_percent: None,
        });
        assert_eq!(result.taxable_income, 6_000_000);
        assert_eq!(result.income_tax_rate_percent, 20);
        assert_eq!(result.residential_income_levy, 600_000);
        // 600,000 × 200 / 696 + 2,000
        assert_eq!(result.estimated_limit, 174_413);
    }

    #[test]
    fn test_furusato_limit_zero_taxable() {
        let result = calc_furusato_deduction_limit(&FurusatoLimitInput {
            total_income: 500_000,
            total_income_deductions: 950_000,
            income_tax_rate_percent: None,
        });
        assert_eq!(result.estimated_limit, 0);
    }

    #[test]
    fn test_furusato_limit_degenerate_denominator() {
        let result = calc_furusato_deduction_limit(&FurusatoLimitInput {
            total_income: 10_000_000,
            total_income_deductions: 0,
            income_tax_rate_percent: Some(90),
        });
        // levy 1,000,000 × 20% + 2,000
        assert_eq!(result.estimated_limit, 202_000);
    }
}
