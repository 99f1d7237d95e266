//! Sanity check result types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Stable identifiers for each consistency rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckCode {
    BlueDeductionOnLoss,
    BlueDeductionExceedsProfit,
    LargeBusinessLoss,
    TaxOnZeroIncome,
    NegativeTotalIncome,
    TaxableIncomeRounding,
    ReconstructionTaxMismatch,
    CreditsExceedTax,
    NoWithholdingOnSalary,
    RefundExceedsWithheld,
}

impl CheckCode {
    pub fn severity(self) -> Severity {
        match self {
            CheckCode::BlueDeductionOnLoss
            | CheckCode::BlueDeductionExceedsProfit
            | CheckCode::TaxOnZeroIncome
            | CheckCode::TaxableIncomeRounding
            | CheckCode::ReconstructionTaxMismatch
            | CheckCode::RefundExceedsWithheld => Severity::Error,
            CheckCode::LargeBusinessLoss
            | CheckCode::CreditsExceedTax
            | CheckCode::NoWithholdingOnSalary => Severity::Warning,
            CheckCode::NegativeTotalIncome => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckItem {
    pub severity: Severity,
    pub code: CheckCode,
    pub message: String,
}

impl CheckItem {
    pub fn new(code: CheckCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
        }
    }
}

/// Outcome of a post-hoc consistency check.
///
/// `passed` is true iff no error-severity item was raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub passed: bool,
    pub items: Vec<CheckItem>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl CheckResult {
    pub fn from_items(items: Vec<CheckItem>) -> Self {
        let count = |severity| items.iter().filter(|i| i.severity == severity).count();
        let error_count = count(Severity::Error);
        let warning_count = count(Severity::Warning);
        Self {
            passed: error_count == 0,
            items,
            error_count,
            warning_count,
        }
    }

    pub fn has(&self, code: CheckCode) -> bool {
        self.items.iter().any(|i| i.code == code)
    }
}
