use std::fmt;

use chrono::{Datelike, Utc};

use crate::error::AppError;

/// Reporting month in `YYYY-MM` form. Payments are filtered server-side by
/// this value; no further date arithmetic happens on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingMonth {
    year: i32,
    month: u32,
}

impl ReportingMonth {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        let invalid = || AppError::InvalidMonth(trimmed.to_string());

        let (year_part, month_part) = trimmed.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }

    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }
}

impl fmt::Display for ReportingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
