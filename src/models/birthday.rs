use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

use crate::error::FieldError;

pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// A date of birth in `YYYY-MM-DD` form, strictly in the past.
///
/// Today's date is rejected along with every future date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Birthday {
    value: String,
    date: NaiveDate,
}

impl Birthday {
    /// Validate against the local calendar date.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        Self::parse_on(value, Local::now().date_naive())
    }

    pub fn parse_on(value: impl Into<String>, today: NaiveDate) -> Result<Self, FieldError> {
        let value = value.into();
        match NaiveDate::parse_from_str(&value, BIRTHDAY_FORMAT) {
            Ok(date) if date < today => Ok(Self { value, date }),
            _ => Err(FieldError::Birthday { value }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Days from `today` until the next anniversary; 0 when it is today.
    pub fn days_until_next(&self, today: NaiveDate) -> i64 {
        let this_year = anniversary_in(self.date, today.year());
        let next = if this_year < today {
            anniversary_in(self.date, today.year() + 1)
        } else {
            this_year
        };
        (next - today).num_days()
    }
}

/// 29 February falls back to 28 February in common years.
fn anniversary_in(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
        .unwrap_or(date)
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for Birthday {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Birthday> for String {
    fn from(birthday: Birthday) -> Self {
        birthday.value
    }
}
