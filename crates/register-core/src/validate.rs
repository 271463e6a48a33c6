//! Field-level validation shared by the entity constructors and patches.

use chrono::{Datelike as _, NaiveDate};

use crate::{Error, Result};

pub const NAME_MAX: usize = 512;
pub const GENDER_MAX: usize = 50;
pub const SUMMARY_MAX: usize = 1024;

/// Trim `value` and require it to be non-empty and at most `max` characters.
pub fn required_text(
  field: &'static str,
  value: String,
  max: usize,
) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::MissingField(field));
  }
  if trimmed.chars().count() > max {
    return Err(Error::TooLong { field, max });
  }
  Ok(trimmed.to_owned())
}

/// Trim an optional value; blank strings collapse to `None`.
pub fn optional_text(
  field: &'static str,
  value: Option<String>,
  max: Option<usize>,
) -> Result<Option<String>> {
  let Some(value) = value else { return Ok(None) };
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  if let Some(max) = max
    && trimmed.chars().count() > max
  {
    return Err(Error::TooLong { field, max });
  }
  Ok(Some(trimmed.to_owned()))
}

/// ISO 3166-1 alpha-3 shape: three ASCII letters, upper-cased on the way in.
pub fn country_code(value: String) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::MissingField("country_code"));
  }
  if trimmed.len() != 3 || !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
    return Err(Error::InvalidCountryCode(value));
  }
  Ok(trimmed.to_ascii_uppercase())
}

/// Dates are stored as `YYYY-MM-DD` text, which only sorts chronologically
/// for four-digit years.
pub fn date(field: &'static str, value: Option<NaiveDate>) -> Result<()> {
  match value {
    Some(date) if !(1..=9999).contains(&date.year()) => {
      Err(Error::DateOutOfRange { field, date })
    }
    _ => Ok(()),
  }
}

/// Require `later >= earlier` when both dates are present.
pub fn date_order(
  earlier: &'static str,
  earlier_date: Option<NaiveDate>,
  later: &'static str,
  later_date: Option<NaiveDate>,
) -> Result<()> {
  match (earlier_date, later_date) {
    (Some(e), Some(l)) if l < e => Err(Error::DateOrder {
      earlier,
      earlier_date: e,
      later,
      later_date: l,
    }),
    _ => Ok(()),
  }
}
