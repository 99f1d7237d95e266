//! Income tax aggregation.
//!
//! [`calc_income_tax`] runs the full return pipeline in statutory order:
//!
//! 1. income components (salary, business after the blue-return cap,
//!    pension, miscellaneous, dividends, one-time) summed to total income,
//!    with any loss carryforward applied against a positive total
//! 2. income deductions, then taxable income truncated to ¥1,000
//! 3. the progressive bracket table, minus tax credits (floored at zero)
//! 4. the 2.1% reconstruction surtax
//! 5. settlement against withholding and estimated payments, truncating a
//!    payment to ¥100 but keeping a refund to the yen

use crate::deductions::{
    calc_deductions, calc_dividend_tax_credit, calc_salary_income, cap_donation_credits,
};
use crate::model::{
    DeductionItem, DeductionKind, DeductionsInput, IncomeTaxInput, IncomeTaxResult,
    PensionDeductionInput,
};
use crate::pension::calc_pension_deduction;
use crate::rates::{
    INCOME_TAX_BRACKETS, ONE_TIME_INCOME_SPECIAL_DEDUCTION, RECONSTRUCTION_TAX_RATE,
    TAX_AMOUNT_UNIT, TAXABLE_INCOME_UNIT, TaxBracket, apply_rate, floor_to,
};

#[inline]
fn bracket_for(taxable_income: i64) -> Option<&'static TaxBracket> {
    if taxable_income <= 0 {
        return None;
    }
    INCOME_TAX_BRACKETS
        .iter()
        .find(|bracket| taxable_income <= bracket.upper_bound)
}

/// Base income tax from the quick-calculation table.
pub fn calc_income_tax_from_table(taxable_income: i64) -> i64 {
    bracket_for(taxable_income)
        .map(|b| apply_rate(taxable_income, b.rate_percent, 100) - b.subtraction)
        .unwrap_or(0)
}

/// Marginal bracket rate in percent; zero for no taxable income.
pub fn marginal_rate_percent(taxable_income: i64) -> i64 {
    bracket_for(taxable_income)
        .map(|b| b.rate_percent)
        .unwrap_or(0)
}

/// 2.1% surtax on income tax, floored to the yen.
#[inline]
pub fn calc_reconstruction_tax(income_tax: i64) -> i64 {
    let (num, den) = RECONSTRUCTION_TAX_RATE;
    apply_rate(income_tax.max(0), num, den)
}

/// Outcome of limiting the blue-return deduction to realised profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlueReturnAdjustment {
    /// Revenue minus expenses
    pub profit: i64,
    pub nominal_deduction: i64,
    pub effective_deduction: i64,
    pub business_income: i64,
}

impl BlueReturnAdjustment {
    pub fn was_adjusted(&self) -> bool {
        self.effective_deduction != self.nominal_deduction
    }

    /// Human-readable audit line for an automatic adjustment.
    pub fn warning(&self) -> Option<String> {
        self.was_adjusted().then(|| {
            format!(
                "青色申告特別控除を自動調整しました: {}円 → {}円（事業利益 {}円が上限）",
                format_yen(self.nominal_deduction),
                format_yen(self.effective_deduction),
                format_yen(self.profit),
            )
        })
    }
}

/// Limit the blue-return deduction to realised profit.
///
/// A loss gets no deduction and passes through unchanged; a small profit
/// is reduced to zero, never below.
pub fn apply_blue_return_cap(
    revenue: i64,
    expenses: i64,
    nominal_deduction: i64,
) -> BlueReturnAdjustment {
    let profit = revenue - expenses;
    let effective_deduction = nominal_deduction.min(profit.max(0));
    BlueReturnAdjustment {
        profit,
        nominal_deduction,
        effective_deduction,
        business_income: profit - effective_deduction,
    }
}

/// Group digits in thousands: 1234567 → "1,234,567".
pub fn format_yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Taxable half of one-time income after the ¥500,000 special deduction.
#[inline]
pub fn calc_one_time_income(one_time_income: i64) -> i64 {
    (one_time_income - ONE_TIME_INCOME_SPECIAL_DEDUCTION).max(0) / 2
}

/// Final settlement: payments truncate to ¥100, refunds stay exact.
#[inline]
pub fn settle_tax_due(total_tax: i64, prepaid: i64) -> i64 {
    let raw = total_tax - prepaid;
    if raw > 0 {
        floor_to(raw, TAX_AMOUNT_UNIT)
    } else {
        raw
    }
}

/// Run the full income tax computation for one return.
///
/// The input is assumed validated; every combination of amounts produces a
/// defined result. Automatic corrections are recorded in `warnings`.
pub fn calc_income_tax(input: &IncomeTaxInput) -> IncomeTaxResult {
    let mut warnings = Vec::new();

    // Income components
    let salary_income_after_deduction = calc_salary_income(input.salary_income);

    let blue = apply_blue_return_cap(
        input.business_revenue,
        input.business_expenses,
        input.blue_return_deduction,
    );
    if let Some(warning) = blue.warning() {
        tracing::warn!(
            nominal = blue.nominal_deduction,
            effective = blue.effective_deduction,
            profit = blue.profit,
            "blue-return deduction capped at business profit"
        );
        warnings.push(warning);
    }
    let business_income = blue.business_income;

    let misc_income = input.misc_income;
    let dividend_income = input.dividend_income_comprehensive;
    let one_time_income = calc_one_time_income(input.one_time_income);

    let non_pension_income = salary_income_after_deduction
        + business_income
        + misc_income
        + dividend_income
        + one_time_income;

    let pension = calc_pension_deduction(&PensionDeductionInput {
        pension_income: input.pension_income,
        is_over_65: input.is_over_65,
        other_income: non_pension_income.max(0),
    });
    let pension_income_after_deduction = pension.taxable_pension_income;

    let mut total_income = non_pension_income + pension_income_after_deduction;

    let mut loss_carryforward_applied = 0;
    if input.loss_carryforward_amount > 0 && total_income > 0 {
        loss_carryforward_applied = input.loss_carryforward_amount.min(total_income);
        total_income -= loss_carryforward_applied;
    }
    tracing::debug!(total_income, loss_carryforward_applied, "total income");

    // Deductions and taxable income
    let mut deductions = calc_deductions(&DeductionsInput::from_income_input(input, total_income));
    let total_income_deductions = deductions.total_income_deductions;

    let taxable_income = floor_to(
        (total_income - total_income_deductions).max(0),
        TAXABLE_INCOME_UNIT,
    );
    let income_tax_base = calc_income_tax_from_table(taxable_income);
    tracing::debug!(taxable_income, income_tax_base, "taxable income");

    // Credits
    if dividend_income > 0 {
        deductions.push(DeductionItem::new(
            DeductionKind::Dividend,
            calc_dividend_tax_credit(dividend_income, taxable_income),
        ));
    }
    cap_donation_credits(&mut deductions, income_tax_base);

    let dividend_credit = deductions.amount_of(DeductionKind::Dividend);
    let housing_loan_credit = deductions.amount_of(DeductionKind::HousingLoan);
    let donation_credit = deductions.amount_of(DeductionKind::PoliticalDonation)
        + deductions.amount_of(DeductionKind::NpoDonation);
    let total_tax_credits = deductions.total_tax_credits;

    let income_tax_after_credits = (income_tax_base - total_tax_credits).max(0);
    let reconstruction_tax = calc_reconstruction_tax(income_tax_after_credits);
    let total_tax = income_tax_after_credits + reconstruction_tax;

    // Settlement
    let tax_due = settle_tax_due(total_tax, input.total_prepaid());
    tracing::debug!(total_tax, tax_due, "income tax settled");

    IncomeTaxResult {
        fiscal_year: input.fiscal_year,
        salary_income_after_deduction,
        business_income,
        effective_blue_return_deduction: blue.effective_deduction,
        pension_income_after_deduction,
        misc_income,
        dividend_income,
        one_time_income,
        loss_carryforward_applied,
        total_income,
        total_income_deductions,
        taxable_income,
        income_tax_base,
        dividend_credit,
        housing_loan_credit,
        donation_credit,
        total_tax_credits,
        income_tax_after_credits,
        reconstruction_tax,
        total_tax,
        withheld_tax: input.withheld_tax,
        business_withheld_tax: input.business_withheld_tax,
        other_income_withheld_tax: input.other_income_withheld_tax,
        estimated_tax_payment: input.estimated_tax_payment,
        tax_due,
        deductions_detail: deductions,
        warnings,
    }
}
