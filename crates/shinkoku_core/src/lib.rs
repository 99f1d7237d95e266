//! Japanese income tax and consumption tax calculation engine
//!
//! This crate computes the figures of a Japanese individual return for
//! Reiwa 7 rules. It supports:
//! - Income tax: salary, business (with the blue-return profit cap), pension,
//!   miscellaneous, dividend and one-time income, every income deduction,
//!   housing-loan / dividend / donation credits and the reconstruction surtax
//! - Consumption tax under the standard, simplified and 2-割 special methods
//! - Separately taxed stock and FX income
//! - Retirement income, pension deduction and depreciation helpers
//! - A post-hoc sanity checker for income tax results
//!
//! All amounts are whole yen in `i64`, and every fractional step is a
//! statutory floor truncation. Calculators are pure and never fail; input
//! validation happens when value objects are built.
//!
//! # Example
//!
//! ```ignore
//! use shinkoku_core::{IncomeTaxInputBuilder, calc_income_tax, sanity_check_income_tax};
//!
//! let input = IncomeTaxInputBuilder::new(2025)
//!     .salary(6_000_000)
//!     .business(3_500_000, 400_000)
//!     .furusato_nozei(50_000)
//!     .withheld_tax(466_800)
//!     .build()?;
//! let result = calc_income_tax(&input);
//! assert_eq!(result.tax_due, 359_000);
//! assert!(sanity_check_income_tax(&input, &result).passed);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod batch;
pub mod consumption;
pub mod date_math;
pub mod deductions;
pub mod depreciation;
pub mod error;
pub mod income_tax;
pub mod pension;
pub mod rates;
pub mod sanity;
pub mod separate;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod builder;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use batch::{BatchOutcome, FurusatoSweepPoint, calc_income_tax_batch, furusato_sweep};
pub use builder::IncomeTaxInputBuilder;
pub use consumption::calc_consumption_tax;
pub use deductions::{calc_deductions, calc_furusato_deduction_limit};
pub use depreciation::calc_depreciation;
pub use error::{Result, ValidationError};
pub use income_tax::calc_income_tax;
pub use pension::{calc_pension_deduction, calc_retirement_income};
pub use sanity::sanity_check_income_tax;
pub use separate::calc_separate_tax;
