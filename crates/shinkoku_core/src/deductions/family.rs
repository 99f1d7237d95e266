//! Spouse and dependent deductions.

use crate::date_math::age_at_year_end;
use crate::model::{DeductionItem, DeductionKind, DependentInfo, DisabilityClass};
use crate::rates::{
    DEPENDENT_ELDERLY, DEPENDENT_ELDERLY_COHABITING, DEPENDENT_GENERAL, DEPENDENT_INCOME_LIMIT,
    DEPENDENT_MIN_AGE, DEPENDENT_SPECIFIC, DISABILITY_GENERAL, DISABILITY_SPECIAL,
    DISABILITY_SPECIAL_COHABITING, ELDERLY_MIN_AGE, SPECIFIC_MAX_AGE, SPECIFIC_MIN_AGE,
    SPECIFIC_RELATIVE_INCOME_LIMIT, SPECIFIC_RELATIVE_SPECIAL_TABLE, SPOUSE_DEDUCTION_TABLE,
    SPOUSE_INCOME_LIMIT, SPOUSE_TAXPAYER_BANDS, SPOUSE_TAXPAYER_INCOME_LIMIT,
};

/// Spouse deduction (including the special spouse deduction phase-out).
///
/// Zero when there is no spouse, the taxpayer earns over ¥10M, or the
/// spouse earns over ¥1.33M.
pub fn calc_spouse_deduction(taxpayer_income: i64, spouse_income: Option<i64>) -> i64 {
    let Some(spouse_income) = spouse_income else {
        return 0;
    };
    if taxpayer_income > SPOUSE_TAXPAYER_INCOME_LIMIT || spouse_income > SPOUSE_INCOME_LIMIT {
        return 0;
    }
    let Some(column) = SPOUSE_TAXPAYER_BANDS
        .iter()
        .position(|upper| taxpayer_income <= *upper)
    else {
        return 0;
    };
    SPOUSE_DEDUCTION_TABLE
        .iter()
        .find(|(upper, _)| spouse_income <= *upper)
        .map(|(_, row)| row[column])
        .unwrap_or(0)
}

/// Stepped deduction for a 19–22 year old earning above the dependent limit.
pub fn calc_specific_relative_special_deduction(income: i64) -> i64 {
    if income <= DEPENDENT_INCOME_LIMIT {
        return 0;
    }
    SPECIFIC_RELATIVE_SPECIAL_TABLE
        .iter()
        .find(|(upper, _)| income <= *upper)
        .map(|(_, deduction)| *deduction)
        .unwrap_or(0)
}

fn disability_item(dep: &DependentInfo) -> Option<DeductionItem> {
    let (amount, label) = match dep.disability {
        DisabilityClass::None => return None,
        DisabilityClass::General => (DISABILITY_GENERAL, "一般障害者"),
        DisabilityClass::Special => (DISABILITY_SPECIAL, "特別障害者"),
        DisabilityClass::SpecialCohabiting => {
            (DISABILITY_SPECIAL_COHABITING, "同居特別障害者")
        }
    };
    Some(
        DeductionItem::new(DeductionKind::Disability, amount)
            .with_details(format!("{}（{label}）", dep.name)),
    )
}

/// Dependent, specific-relative and disability lines for every dependent.
///
/// Age is taken on December 31 of `fiscal_year`. Spouses and dependents
/// already claimed by another taxpayer are skipped, as is anyone over the
/// income limit for their age band (including their disability add-on).
pub fn calc_dependents_deduction(
    dependents: &[DependentInfo],
    fiscal_year: i16,
) -> Vec<DeductionItem> {
    let mut items = Vec::new();

    for dep in dependents {
        if dep.other_taxpayer_dependent || dep.is_spouse() {
            continue;
        }

        let age = age_at_year_end(dep.birth_date, fiscal_year);
        let is_specific_age = (SPECIFIC_MIN_AGE..SPECIFIC_MAX_AGE).contains(&age);
        let income_limit = if is_specific_age {
            SPECIFIC_RELATIVE_INCOME_LIMIT
        } else {
            DEPENDENT_INCOME_LIMIT
        };
        if dep.income > income_limit {
            continue;
        }

        if age >= ELDERLY_MIN_AGE {
            let (amount, label) = if dep.cohabiting {
                (DEPENDENT_ELDERLY_COHABITING, "老人扶養・同居")
            } else {
                (DEPENDENT_ELDERLY, "老人扶養・別居")
            };
            items.push(
                DeductionItem::new(DeductionKind::Dependent, amount)
                    .with_details(format!("{}（{label}）", dep.name)),
            );
        } else if is_specific_age {
            if dep.income <= DEPENDENT_INCOME_LIMIT {
                items.push(
                    DeductionItem::new(DeductionKind::Dependent, DEPENDENT_SPECIFIC)
                        .with_details(format!("{}（特定扶養）", dep.name)),
                );
            } else {
                let amount = calc_specific_relative_special_deduction(dep.income);
                if amount > 0 {
                    items.push(
                        DeductionItem::new(DeductionKind::SpecificRelativeSpecial, amount)
                            .with_details(format!("{}（所得{}円）", dep.name, dep.income)),
                    );
                }
            }
        } else if age >= DEPENDENT_MIN_AGE {
            items.push(
                DeductionItem::new(DeductionKind::Dependent, DEPENDENT_GENERAL)
                    .with_details(format!("{}（一般扶養）", dep.name)),
            );
        }

        if let Some(item) = disability_item(dep) {
            items.push(item);
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dependent(birth_date: &str, income: i64) -> DependentInfo {
        DependentInfo::new("扶養者", "子", birth_date, income).unwrap()
    }

    #[test]
    fn test_spouse_full_deduction() {
        assert_eq!(calc_spouse_deduction(5_000_000, Some(0)), 380_000);
        assert_eq!(calc_spouse_deduction(5_000_000, Some(950_000)), 380_000);
    }

    #[test]
    fn test_spouse_phase_out_by_both_incomes() {
        assert_eq!(calc_spouse_deduction(5_000_000, Some(1_000_000)), 360_000);
        assert_eq!(calc_spouse_deduction(9_200_000, Some(1_000_000)), 240_000);
        assert_eq!(calc_spouse_deduction(9_800_000, Some(1_330_000)), 10_000);
    }

    #[test]
    fn test_spouse_ineligible() {
        assert_eq!(calc_spouse_deduction(5_000_000, None), 0);
        assert_eq!(calc_spouse_deduction(10_000_001, Some(0)), 0);
        assert_eq!(calc_spouse_deduction(5_000_000, Some(1_330_001)), 0);
    }

    #[test]
    fn test_under_16_gets_nothing() {
        let items = calc_dependents_deduction(&[dependent("2012-01-01", 0)], 2025);
        assert!(items.is_empty());
    }

    #[test]
    fn test_general_and_specific_bands() {
        let items = calc_dependents_deduction(&[dependent("2008-06-01", 0)], 2025);
        assert_eq!(items[0].amount, 380_000);

        let items = calc_dependents_deduction(&[dependent("2005-06-01", 0)], 2025);
        assert_eq!(items[0].amount, 630_000);
        assert_eq!(items[0].kind, DeductionKind::Dependent);
    }

    #[test]
    fn test_elderly_cohabiting() {
        let parent = dependent("1950-03-03", 0).cohabiting();
        let items = calc_dependents_deduction(&[parent], 2025);
        assert_eq!(items[0].amount, 580_000);

        let items = calc_dependents_deduction(&[dependent("1950-03-03", 0)], 2025);
        assert_eq!(items[0].amount, 480_000);
    }

    #[test]
    fn test_specific_relative_boundary() {
        let items = calc_dependents_deduction(&[dependent("2005-01-01", 850_000)], 2025);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, DeductionKind::SpecificRelativeSpecial);
        assert_eq!(items[0].amount, 630_000);

        let items = calc_dependents_deduction(&[dependent("2005-01-01", 850_001)], 2025);
        assert_eq!(items[0].amount, 610_000);

        let items = calc_dependents_deduction(&[dependent("2005-01-01", 1_230_001)], 2025);
        assert!(items.is_empty());
    }

    #[test]
    fn test_disability_is_additive() {
        let dep = dependent("2012-01-01", 0).disability(DisabilityClass::SpecialCohabiting);
        let items = calc_dependents_deduction(&[dep], 2025);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, DeductionKind::Disability);
        assert_eq!(items[0].amount, 750_000);

        let dep = dependent("2005-01-01", 900_000).disability(DisabilityClass::General);
        let items = calc_dependents_deduction(&[dep], 2025);
        let total: i64 = items.iter().map(|i| i.amount).sum();
        assert_eq!(total, 510_000 + 270_000);
    }

    #[test]
    fn test_skips_spouse_and_claimed_dependents() {
        let spouse = DependentInfo::new("花子", "配偶者", "1985-01-01", 0).unwrap();
        let claimed = dependent("2000-01-01", 0).claimed_by_other();
        assert!(calc_dependents_deduction(&[spouse, claimed], 2025).is_empty());
    }

    #[test]
    fn test_over_income_limit_drops_disability_too() {
        let dep = dependent("1990-01-01", 600_000).disability(DisabilityClass::Special);
        assert!(calc_dependents_deduction(&[dep], 2025).is_empty());
    }
}
