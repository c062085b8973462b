//! Competition season span.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Season errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeasonError {
    #[error("Season ends ({end}) before it starts ({begin})")]
    EndsBeforeStart { begin: NaiveDate, end: NaiveDate },
}

/// Dates a league or cup is played between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    begin: NaiveDate,
    end: NaiveDate,
}

impl Season {
    /// Create a season, rejecting an end date before the start date
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Result<Self, SeasonError> {
        if end < begin {
            return Err(SeasonError::EndsBeforeStart { begin, end });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> NaiveDate {
        self.begin
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// "2017" for a single calendar year, "2017/2018" otherwise
    pub fn label(&self) -> String {
        let (a, b) = (self.begin.year(), self.end.year());
        if a == b {
            a.to_string()
        } else {
            format!("{a}/{b}")
        }
    }

    /// Whether the date falls within the season (inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.begin <= date && date <= self.end
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
