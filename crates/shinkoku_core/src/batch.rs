//! Batch evaluation of many returns.
//!
//! Every calculator is a pure function of its input, so returns can be
//! evaluated independently. With the `parallel` feature the work is spread
//! over the rayon pool; output order always matches input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::income_tax::calc_income_tax;
use crate::model::{CheckResult, IncomeTaxInput, IncomeTaxResult};
use crate::sanity::sanity_check_income_tax;

/// One return's result together with its consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub result: IncomeTaxResult,
    pub check: CheckResult,
}

fn evaluate(input: &IncomeTaxInput) -> BatchOutcome {
    let result = calc_income_tax(input);
    let check = sanity_check_income_tax(input, &result);
    BatchOutcome { result, check }
}

/// Calculate and sanity-check every input.
pub fn calc_income_tax_batch(inputs: &[IncomeTaxInput]) -> Vec<BatchOutcome> {
    tracing::debug!(count = inputs.len(), "evaluating income tax batch");

    #[cfg(feature = "parallel")]
    let outcomes: Vec<BatchOutcome> = inputs.par_iter().map(evaluate).collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<BatchOutcome> = inputs.iter().map(evaluate).collect();

    outcomes
}

/// Effect of one furusato nozei amount on the return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurusatoSweepPoint {
    pub furusato_nozei: i64,
    pub total_tax: i64,
    pub tax_due: i64,
    /// Income tax saved relative to donating nothing
    pub income_tax_saving: i64,
}

/// Re-run `base` at each furusato amount, keeping every other field fixed.
pub fn furusato_sweep(base: &IncomeTaxInput, amounts: &[i64]) -> Vec<FurusatoSweepPoint> {
    let baseline = calc_income_tax(&IncomeTaxInput {
        furusato_nozei: 0,
        ..base.clone()
    });

    let point = |&amount: &i64| {
        let result = calc_income_tax(&IncomeTaxInput {
            furusato_nozei: amount,
            ..base.clone()
        });
        FurusatoSweepPoint {
            furusato_nozei: amount,
            total_tax: result.total_tax,
            tax_due: result.tax_due,
            income_tax_saving: baseline.total_tax - result.total_tax,
        }
    };

    #[cfg(feature = "parallel")]
    let points: Vec<FurusatoSweepPoint> = amounts.par_iter().map(point).collect();

    #[cfg(not(feature = "parallel"))]
    let points: Vec<FurusatoSweepPoint> = amounts.iter().map(point).collect();

    points
}
