//! Separate taxation of listed-stock gains and FX / futures income.
//!
//! Each pool is taxed at 15% income tax + 5% residential tax + 2.1%
//! reconstruction surtax on the income tax. The pools never offset each
//! other.

use crate::income_tax::calc_reconstruction_tax;
use crate::model::{SeparateTaxInput, SeparateTaxResult};
use crate::rates::{SEPARATE_INCOME_TAX_PERCENT, SEPARATE_RESIDENTIAL_TAX_PERCENT, apply_rate};

/// Taxes levied on one pool's taxable income.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolTax {
    pub income_tax: i64,
    pub residential_tax: i64,
    pub reconstruction_tax: i64,
}

impl PoolTax {
    pub fn on(taxable_income: i64) -> Self {
        let taxable_income = taxable_income.max(0);
        let income_tax = apply_rate(taxable_income, SEPARATE_INCOME_TAX_PERCENT, 100);
        Self {
            income_tax,
            residential_tax: apply_rate(taxable_income, SEPARATE_RESIDENTIAL_TAX_PERCENT, 100),
            reconstruction_tax: calc_reconstruction_tax(income_tax),
        }
    }

    pub fn total(&self) -> i64 {
        self.income_tax + self.residential_tax + self.reconstruction_tax
    }
}

/// Consume a loss carryforward against a positive base.
#[inline]
fn apply_carryforward(base: i64, carryforward: i64) -> (i64, i64) {
    if base > 0 && carryforward > 0 {
        let used = carryforward.min(base);
        (base - used, used)
    } else {
        (base.max(0), 0)
    }
}

pub fn calc_separate_tax(input: &SeparateTaxInput) -> SeparateTaxResult {
    // Stock pool
    let stock_net_gain = input.stock_gains - input.stock_losses;
    let dividend = input.stock_dividend_separate;
    let (stock_base, stock_dividend_offset) = if stock_net_gain >= 0 {
        (stock_net_gain + dividend, 0)
    } else if dividend > 0 {
        let offset = (-stock_net_gain).min(dividend);
        (dividend - offset, offset)
    } else {
        (0, 0)
    };
    let (stock_taxable_income, stock_loss_carryforward_used) =
        apply_carryforward(stock_base, input.stock_loss_carryforward);
    let stock = PoolTax::on(stock_taxable_income);
    let stock_withheld_total =
        input.stock_withheld_income_tax + input.stock_withheld_residential_tax;

    // FX pool
    let fx_net_income = input.fx_gains + input.fx_swap_income - input.fx_expenses;
    let (fx_taxable_income, fx_loss_carryforward_used) =
        apply_carryforward(fx_net_income, input.fx_loss_carryforward);
    let fx = PoolTax::on(fx_taxable_income);

    SeparateTaxResult {
        fiscal_year: input.fiscal_year,
        stock_net_gain,
        stock_dividend_offset,
        stock_loss_carryforward_used,
        stock_taxable_income,
        stock_income_tax: stock.income_tax,
        stock_residential_tax: stock.residential_tax,
        stock_reconstruction_tax: stock.reconstruction_tax,
        stock_total_tax: stock.total(),
        stock_withheld_total,
        stock_tax_due: stock.total() - stock_withheld_total,
        fx_net_income,
        fx_loss_carryforward_used,
        fx_taxable_income,
        fx_income_tax: fx.income_tax,
        fx_residential_tax: fx.residential_tax,
        fx_reconstruction_tax: fx.reconstruction_tax,
        fx_total_tax: fx.total(),
        fx_tax_due: fx.total(),
        total_separate_tax: stock.total() + fx.total(),
    }
}
