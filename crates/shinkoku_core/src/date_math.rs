//! Calendar helpers for eligibility rules.
//!
//! Dependent bands are decided by age on December 31 of the fiscal year, and
//! every date crossing the engine boundary is a strict `YYYY-MM-DD` string.

use jiff::civil::Date;

use crate::error::{Result, ValidationError};

/// December 31 of the given fiscal year, the reference date for age bands.
#[inline]
pub fn fiscal_year_end(fiscal_year: i16) -> Date {
    jiff::civil::date(fiscal_year, 12, 31)
}

/// Completed years of age on `on` for someone born on `birth`.
///
/// A birthday falling on `on` itself counts as completed.
#[inline]
pub fn age_on(birth: Date, on: Date) -> i32 {
    let mut age = on.year() as i32 - birth.year() as i32;
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Age at the end of the fiscal year.
#[inline]
pub fn age_at_year_end(birth: Date, fiscal_year: i16) -> i32 {
    age_on(birth, fiscal_year_end(fiscal_year))
}

/// Parse a strict `YYYY-MM-DD` string.
///
/// The shape is checked before handing off to jiff so that looser forms jiff
/// would otherwise accept (`20250101`, a trailing time) are rejected.
pub fn parse_ymd(field: &'static str, value: &str) -> Result<Date> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(ValidationError::MalformedDate {
            field,
            value: value.to_string(),
        });
    }

    value
        .parse::<Date>()
        .map_err(|source| ValidationError::InvalidDate {
            field,
            value: value.to_string(),
            source,
        })
}
