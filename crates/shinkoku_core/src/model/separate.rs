//! Separate taxation (stock / FX) value objects

use serde::{Deserialize, Serialize};

use crate::error::{Result, non_negative};

/// Inputs for the two independent separate-taxation pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparateTaxInput {
    pub fiscal_year: i16,

    // Listed stock pool
    pub stock_gains: i64,
    pub stock_losses: i64,
    /// Dividends for which separate taxation was elected
    pub stock_dividend_separate: i64,
    pub stock_withheld_income_tax: i64,
    pub stock_withheld_residential_tax: i64,
    pub stock_loss_carryforward: i64,

    // Futures / FX pool
    pub fx_gains: i64,
    pub fx_swap_income: i64,
    pub fx_expenses: i64,
    pub fx_loss_carryforward: i64,
}

impl Default for SeparateTaxInput {
    fn default() -> Self {
        Self {
            fiscal_year: super::income::DEFAULT_FISCAL_YEAR,
            stock_gains: 0,
            stock_losses: 0,
            stock_dividend_separate: 0,
            stock_withheld_income_tax: 0,
            stock_withheld_residential_tax: 0,
            stock_loss_carryforward: 0,
            fx_gains: 0,
            fx_swap_income: 0,
            fx_expenses: 0,
            fx_loss_carryforward: 0,
        }
    }
}

impl SeparateTaxInput {
    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("stock_gains", self.stock_gains),
            ("stock_losses", self.stock_losses),
            ("stock_dividend_separate", self.stock_dividend_separate),
            ("stock_withheld_income_tax", self.stock_withheld_income_tax),
            (
                "stock_withheld_residential_tax",
                self.stock_withheld_residential_tax,
            ),
            ("stock_loss_carryforward", self.stock_loss_carryforward),
            ("fx_gains", self.fx_gains),
            ("fx_swap_income", self.fx_swap_income),
            ("fx_expenses", self.fx_expenses),
            ("fx_loss_carryforward", self.fx_loss_carryforward),
        ];
        for (field, value) in amounts {
            non_negative(field, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparateTaxResult {
    pub fiscal_year: i16,

    pub stock_net_gain: i64,
    pub stock_dividend_offset: i64,
    pub stock_loss_carryforward_used: i64,
    pub stock_taxable_income: i64,
    pub stock_income_tax: i64,
    pub stock_residential_tax: i64,
    pub stock_reconstruction_tax: i64,
    pub stock_total_tax: i64,
    pub stock_withheld_total: i64,
    /// Negative when broker withholding exceeds the tax
    pub stock_tax_due: i64,

    pub fx_net_income: i64,
    pub fx_loss_carryforward_used: i64,
    pub fx_taxable_income: i64,
    pub fx_income_tax: i64,
    pub fx_residential_tax: i64,
    pub fx_reconstruction_tax: i64,
    pub fx_total_tax: i64,
    pub fx_tax_due: i64,

    pub total_separate_tax: i64,
}
