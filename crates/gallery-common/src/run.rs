//! Forecast run identifiers.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

/// Length of a run directory name (`YYYYMMDDHH`).
pub const RUN_ID_LEN: usize = 10;

/// One model initialization, named by its `YYYYMMDDHH` directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunId(String);

impl RunId {
    /// Accept exactly ten ASCII digits. Calendar validity is checked
    /// separately by [`RunId::calendar_date`].
    pub fn parse(name: &str) -> Option<Self> {
        if name.len() == RUN_ID_LEN && name.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(name.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date from the first eight digits, if it is a real date.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let year: i32 = self.0.get(0..4)?.parse().ok()?;
        let month: u32 = self.0.get(4..6)?.parse().ok()?;
        let day: u32 = self.0.get(6..8)?.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Initialization hour (last two digits).
    pub fn init_hour(&self) -> Option<u32> {
        self.0.get(8..10)?.parse().ok()
    }

    /// Full initialization time, if both date and hour are valid.
    pub fn init_time(&self) -> Option<NaiveDateTime> {
        self.calendar_date()?.and_hms_opt(self.init_hour()?, 0, 0)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RunId {
    type Error = GalleryError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::parse(&name)
            .ok_or_else(|| GalleryError::Config(format!("invalid run id {:?}", name)))
    }
}

impl From<RunId> for String {
    fn from(run: RunId) -> Self {
        run.0
    }
}
