//! Statutory rate and bracket tables (Reiwa 7 rules).
//!
//! Everything here is `const` data; rates are expressed as integer
//! numerator/denominator pairs so that every application is a multiply
//! followed by a floor division.

// ============================================================================
// Integer rate helpers
// ============================================================================

/// Apply `numerator / denominator` to `amount`, flooring the result.
#[inline]
pub const fn apply_rate(amount: i64, numerator: i64, denominator: i64) -> i64 {
    (amount * numerator).div_euclid(denominator)
}

/// Truncate `amount` down to a multiple of `unit`.
#[inline]
pub const fn floor_to(amount: i64, unit: i64) -> i64 {
    amount.div_euclid(unit) * unit
}

/// Taxable income is truncated to whole thousands of yen.
pub const TAXABLE_INCOME_UNIT: i64 = 1_000;
/// Tax amounts payable are truncated to whole hundreds of yen.
pub const TAX_AMOUNT_UNIT: i64 = 100;

/// Reconstruction surtax: 2.1% of income tax.
pub const RECONSTRUCTION_TAX_RATE: (i64, i64) = (21, 1_000);

// ============================================================================
// Income tax brackets
// ============================================================================

/// One row of the quick-calculation table: tax = income × rate − subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Inclusive upper bound of taxable income for this row
    pub upper_bound: i64,
    pub rate_percent: i64,
    pub subtraction: i64,
}

impl TaxBracket {
    const fn new(upper_bound: i64, rate_percent: i64, subtraction: i64) -> Self {
        Self {
            upper_bound,
            rate_percent,
            subtraction,
        }
    }
}

pub const INCOME_TAX_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::new(1_949_000, 5, 0),
    TaxBracket::new(3_299_000, 10, 97_500),
    TaxBracket::new(6_949_000, 20, 427_500),
    TaxBracket::new(8_999_000, 23, 636_000),
    TaxBracket::new(17_999_000, 33, 1_536_000),
    TaxBracket::new(39_999_000, 40, 2_796_000),
    TaxBracket::new(i64::MAX, 45, 4_796_000),
];

// ============================================================================
// Basic and salary deductions
// ============================================================================

/// (total income upper bound, deduction), strictly decreasing deduction.
pub const BASIC_DEDUCTION_TABLE: [(i64, i64); 8] = [
    (1_320_000, 950_000),
    (3_360_000, 880_000),
    (4_890_000, 680_000),
    (6_550_000, 630_000),
    (23_500_000, 580_000),
    (24_000_000, 480_000),
    (24_500_000, 320_000),
    (25_000_000, 160_000),
];

pub const SALARY_DEDUCTION_MIN: i64 = 650_000;
pub const SALARY_DEDUCTION_MAX: i64 = 1_950_000;
/// (salary upper bound, rate %, fixed addition) for the interpolated bands.
pub const SALARY_DEDUCTION_BANDS: [(i64, i64, i64); 3] = [
    (3_600_000, 30, 80_000),
    (6_600_000, 20, 440_000),
    (8_500_000, 10, 1_100_000),
];
/// Salary at or below this receives the minimum deduction.
pub const SALARY_DEDUCTION_MIN_BAND: i64 = 1_900_000;

// ============================================================================
// Insurance
// ============================================================================

/// (premium upper bound, divisor, addition) for post-2012 contracts.
pub const LIFE_INSURANCE_NEW_BANDS: [(i64, i64, i64); 3] =
    [(20_000, 1, 0), (40_000, 2, 10_000), (80_000, 4, 20_000)];
pub const LIFE_INSURANCE_NEW_MAX: i64 = 40_000;

/// (premium upper bound, divisor, addition) for pre-2012 contracts.
pub const LIFE_INSURANCE_OLD_BANDS: [(i64, i64, i64); 3] =
    [(25_000, 1, 0), (50_000, 2, 12_500), (100_000, 4, 25_000)];
pub const LIFE_INSURANCE_OLD_MAX: i64 = 50_000;

/// Combined cap when a category holds both new and old contracts.
pub const LIFE_INSURANCE_COMBINED_MAX: i64 = 40_000;
pub const LIFE_INSURANCE_TOTAL_MAX: i64 = 120_000;

pub const EARTHQUAKE_INSURANCE_MAX: i64 = 50_000;
pub const OLD_LONG_TERM_FULL_LIMIT: i64 = 5_000;
pub const OLD_LONG_TERM_HALF_LIMIT: i64 = 15_000;
pub const OLD_LONG_TERM_ADDITION: i64 = 2_500;
pub const OLD_LONG_TERM_MAX: i64 = 15_000;

// ============================================================================
// Medical
// ============================================================================

pub const MEDICAL_EXPENSE_THRESHOLD: i64 = 100_000;
pub const MEDICAL_EXPENSE_INCOME_PERCENT: i64 = 5;
pub const MEDICAL_EXPENSE_MAX: i64 = 2_000_000;

pub const SELF_MEDICATION_THRESHOLD: i64 = 12_000;
pub const SELF_MEDICATION_MAX: i64 = 88_000;

// ============================================================================
// Donations
// ============================================================================

pub const DONATION_SELF_BURDEN: i64 = 2_000;
/// Deductible donations are limited to 40% of total income.
pub const DONATION_INCOME_PERCENT: i64 = 40;
pub const POLITICAL_DONATION_CREDIT_PERCENT: i64 = 30;
pub const NPO_DONATION_CREDIT_PERCENT: i64 = 40;
/// Each donation credit is limited to 25% of the base income tax.
pub const DONATION_CREDIT_CAP_PERCENT: i64 = 25;

/// Residential tax income levy rate used by the furusato limit estimate.
pub const RESIDENTIAL_TAX_PERCENT: i64 = 10;
/// Special furusato portion: 20% of the residential income levy.
pub const FURUSATO_RESIDENTIAL_PERCENT: i64 = 20;

// ============================================================================
// Family
// ============================================================================

pub const SPOUSE_TAXPAYER_INCOME_LIMIT: i64 = 10_000_000;
pub const SPOUSE_INCOME_LIMIT: i64 = 1_330_000;

/// Spouse income upper bound, then the deduction for taxpayer total income
/// of ≤9M, ≤9.5M and ≤10M respectively.
pub const SPOUSE_DEDUCTION_TABLE: [(i64, [i64; 3]); 9] = [
    (950_000, [380_000, 260_000, 130_000]),
    (1_000_000, [360_000, 240_000, 120_000]),
    (1_050_000, [310_000, 210_000, 110_000]),
    (1_100_000, [260_000, 180_000, 90_000]),
    (1_150_000, [210_000, 140_000, 70_000]),
    (1_200_000, [160_000, 110_000, 60_000]),
    (1_250_000, [110_000, 80_000, 40_000]),
    (1_300_000, [60_000, 40_000, 20_000]),
    (1_330_000, [30_000, 20_000, 10_000]),
];
pub const SPOUSE_TAXPAYER_BANDS: [i64; 3] = [9_000_000, 9_500_000, 10_000_000];

pub const DEPENDENT_INCOME_LIMIT: i64 = 580_000;
pub const DEPENDENT_GENERAL: i64 = 380_000;
pub const DEPENDENT_SPECIFIC: i64 = 630_000;
pub const DEPENDENT_ELDERLY: i64 = 480_000;
pub const DEPENDENT_ELDERLY_COHABITING: i64 = 580_000;

pub const DEPENDENT_MIN_AGE: i32 = 16;
pub const SPECIFIC_MIN_AGE: i32 = 19;
/// Exclusive: ages 19 through 22 are "specific".
pub const SPECIFIC_MAX_AGE: i32 = 23;
pub const ELDERLY_MIN_AGE: i32 = 70;

pub const SPECIFIC_RELATIVE_INCOME_LIMIT: i64 = 1_230_000;
/// (dependent income upper bound, deduction) for incomes above 580,000.
pub const SPECIFIC_RELATIVE_SPECIAL_TABLE: [(i64, i64); 9] = [
    (850_000, 630_000),
    (900_000, 610_000),
    (950_000, 510_000),
    (1_000_000, 410_000),
    (1_050_000, 310_000),
    (1_100_000, 210_000),
    (1_150_000, 110_000),
    (1_200_000, 60_000),
    (1_230_000, 30_000),
];

pub const DISABILITY_GENERAL: i64 = 270_000;
pub const DISABILITY_SPECIAL: i64 = 400_000;
pub const DISABILITY_SPECIAL_COHABITING: i64 = 750_000;

// ============================================================================
// Personal status
// ============================================================================

pub const WIDOW_DEDUCTION: i64 = 270_000;
pub const SINGLE_PARENT_DEDUCTION: i64 = 350_000;
pub const WIDOW_INCOME_LIMIT: i64 = 5_000_000;

pub const WORKING_STUDENT_DEDUCTION: i64 = 270_000;
pub const WORKING_STUDENT_INCOME_LIMIT: i64 = 850_000;

// ============================================================================
// Tax credits
// ============================================================================

/// Housing-loan credit: 0.7% of the year-end balance.
pub const HOUSING_LOAN_RATE: (i64, i64) = (7, 1_000);
/// Move-ins up to this year keep the older 1% rate.
pub const HOUSING_LOAN_LEGACY_LAST_YEAR: i16 = 2021;
pub const HOUSING_LOAN_LEGACY_RATE: (i64, i64) = (1, 100);
pub const HOUSING_LOAN_LEGACY_LIMIT: i64 = 40_000_000;
pub const HOUSING_LOAN_LEGACY_CERTIFIED_LIMIT: i64 = 50_000_000;
/// Move-ins from this year use the reduced balance ceilings.
pub const HOUSING_LOAN_REDUCED_FROM_YEAR: i16 = 2024;
pub const HOUSING_LOAN_USED_GENERAL_LIMIT: i64 = 20_000_000;
pub const HOUSING_LOAN_USED_QUALIFIED_LIMIT: i64 = 30_000_000;
/// New-construction ceilings indexed certified, ZEH, energy-efficient, general.
pub const HOUSING_LOAN_NEW_LIMITS: [i64; 4] = [50_000_000, 45_000_000, 40_000_000, 30_000_000];
pub const HOUSING_LOAN_NEW_LIMITS_REDUCED: [i64; 4] = [45_000_000, 35_000_000, 30_000_000, 0];
pub const HOUSING_LOAN_NEW_LIMITS_CHILDCARE: [i64; 4] = [50_000_000, 45_000_000, 40_000_000, 0];
/// General new housing permitted before 2024 keeps this ceiling.
pub const HOUSING_LOAN_PRE_R6_PERMIT_LIMIT: i64 = 20_000_000;

pub const DIVIDEND_CREDIT_PERCENT: i64 = 10;
pub const DIVIDEND_CREDIT_HIGH_PERCENT: i64 = 5;
pub const DIVIDEND_CREDIT_THRESHOLD: i64 = 10_000_000;

// ============================================================================
// Other income
// ============================================================================

pub const ONE_TIME_INCOME_SPECIAL_DEDUCTION: i64 = 500_000;

/// (pension upper bound, rate %, fixed addition). A 100% row deducts the
/// whole pension; a 0% row deducts the fixed amount.
pub const PENSION_UNDER_65_BANDS: [(i64, i64, i64); 5] = [
    (600_000, 100, 0),
    (1_300_000, 0, 600_000),
    (4_100_000, 25, 375_000),
    (7_700_000, 15, 785_000),
    (10_000_000, 5, 1_555_000),
];
pub const PENSION_OVER_65_BANDS: [(i64, i64, i64); 5] = [
    (1_100_000, 100, 0),
    (3_300_000, 0, 1_100_000),
    (4_100_000, 25, 375_000),
    (7_700_000, 15, 785_000),
    (10_000_000, 5, 1_555_000),
];
pub const PENSION_DEDUCTION_MAX: i64 = 2_055_000;
/// (other income threshold, deduction reduction), checked highest first.
pub const PENSION_OTHER_INCOME_ADJUSTMENTS: [(i64, i64); 2] =
    [(20_000_000, 200_000), (10_000_000, 100_000)];

pub const RETIREMENT_PER_YEAR_FIRST_20: i64 = 400_000;
pub const RETIREMENT_PER_YEAR_AFTER_20: i64 = 700_000;
pub const RETIREMENT_DEDUCTION_MIN: i64 = 800_000;
pub const RETIREMENT_BASE_AT_20: i64 = 8_000_000;
pub const RETIREMENT_DISABILITY_ADDITION: i64 = 1_000_000;
pub const RETIREMENT_SHORT_SERVICE_YEARS: i64 = 5;
pub const RETIREMENT_SHORT_SERVICE_HALF_LIMIT: i64 = 3_000_000;

// ============================================================================
// Consumption tax
// ============================================================================

/// National share of the 10% standard rate: 7.8%.
pub const NATIONAL_RATE_STANDARD: (i64, i64) = (78, 1_000);
/// National share of the 8% reduced rate: 6.24%.
pub const NATIONAL_RATE_REDUCED: (i64, i64) = (624, 10_000);
/// Local transfer tax is 22/78 of the national tax.
pub const LOCAL_TAX_RATIO: (i64, i64) = (22, 78);
pub const SPECIAL_20PCT_PERCENT: i64 = 20;
/// Deemed purchase ratios for simplified business types 1 to 6.
pub const SIMPLIFIED_DEEMED_RATIOS: [i64; 6] = [90, 80, 70, 60, 50, 40];
pub const SIMPLIFIED_DEFAULT_TYPE: u8 = 5;

// ============================================================================
// Separate taxation
// ============================================================================

pub const SEPARATE_INCOME_TAX_PERCENT: i64 = 15;
pub const SEPARATE_RESIDENTIAL_TAX_PERCENT: i64 = 5;
