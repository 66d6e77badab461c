use crate::error::{Error, Result};
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDate {
    Today,
    Tomorrow,
}

impl RelativeDate {
    pub fn to_naive_date(&self) -> NaiveDate {
        match self {
            RelativeDate::Today => Local::now(),
            RelativeDate::Tomorrow => Local::now() + Days::new(1),
        }
        .naive_local()
        .date()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyType {
    Electricity,
    Gas,
}

impl EnergyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyType::Electricity => "electricity",
            EnergyType::Gas => "gas",
        }
    }

    /// Whether records of this type carry a sustainability score worth ranking
    pub fn has_sustainability(&self) -> bool {
        matches!(self, EnergyType::Electricity)
    }
}

impl fmt::Display for EnergyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "electricity" => Ok(EnergyType::Electricity),
            "gas" => Ok(EnergyType::Gas),
            _ => Err(Error::invalid_argument(format!("Invalid type provided: {s}"))),
        }
    }
}

/// Parses a strict `YYYY-MM-DD` date that also has to exist in the calendar.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    let bytes = date.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(Error::invalid_argument(
            "Invalid date format. Date must be in YYYY-MM-DD format",
        ));
    }

    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| Error::invalid_argument("Invalid date. Please provide a valid date"))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
