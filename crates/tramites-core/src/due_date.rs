//! The due-date rule: six business days after the received date.
//!
//! Business days are Monday to Friday; no holiday calendar applies. The
//! received date is day zero. A received date on a weekend is first rolled
//! forward onto the following Monday, then the offset is added.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{Error, Result};

/// Number of business days between receipt and due date.
pub const BUSINESS_DAY_OFFSET: u32 = 6;

/// `true` for Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
  !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Roll `date` forward onto the next business day, or keep it if it is one.
pub fn roll_forward(date: NaiveDate) -> Result<NaiveDate> {
  let mut current = date;
  while !is_business_day(current) {
    current = next_day(current)?;
  }
  Ok(current)
}

/// Add `offset` business days to `date` after rolling it forward.
pub fn add_business_days(date: NaiveDate, offset: u32) -> Result<NaiveDate> {
  let mut current = roll_forward(date)?;
  let mut remaining = offset;
  while remaining > 0 {
    current = next_day(current)?;
    if is_business_day(current) {
      remaining -= 1;
    }
  }
  Ok(current)
}

/// The due date for a case received on `received`.
pub fn due_date(received: NaiveDate) -> Result<NaiveDate> {
  add_business_days(received, BUSINESS_DAY_OFFSET)
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
    .map_err(|e| Error::InvalidInput(format!("{input:?} is not a YYYY-MM-DD date: {e}")))
}

/// [`due_date`] for a date given as text.
pub fn due_date_from_str(input: &str) -> Result<NaiveDate> {
  due_date(parse_date(input)?)
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
  date
    .checked_add_days(Days::new(1))
    .ok_or_else(|| Error::InvalidInput(format!("{date} is at the end of the calendar")))
}
