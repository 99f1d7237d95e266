//! Scenario tests for the shinkoku calculation engine
//!
//! Tests are organized by topic:
//! - `income_tax` - Full income tax returns, checked by the sanity checker
//! - `deductions` - The assembled deduction and credit breakdown
//! - `consumption` - Consumption tax methods and refunds
//! - `separate` - Stock and FX separate taxation
//! - `sanity` - Sanity checker against real and corrupted results
//! - `builders` - Input builders, validation and deserialization
//! - `batch` - Batch evaluation and the furusato sweep
//! - `properties` - Property tests for the rounding and cap rules

mod income_tax;
mod sanity;
