//! Time handling for rendered forecast frames.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Valid time of a rendered frame.
///
/// Frames whose name could not be parsed carry [`ValidTime::EARLIEST`],
/// which sorts before every real timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ValidTime(NaiveDateTime);

impl ValidTime {
    /// Sentinel used for unparsable frame names.
    pub const EARLIEST: ValidTime = ValidTime(NaiveDateTime::MIN);

    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::EARLIEST
    }

    /// Build a valid time from the textual fields of a frame name.
    ///
    /// `date` must be `DD-MM-YYYY`, `hour` and `minute` two digits each.
    /// Returns `None` on any width mismatch, non-digit, or impossible
    /// calendar value.
    pub fn from_fields(date: &str, hour: &str, minute: &str) -> Option<Self> {
        let mut parts = date.split('-');
        let day = parts.next()?;
        let month = parts.next()?;
        let year = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let day = fixed_digits(day, 2)?;
        let month = fixed_digits(month, 2)?;
        let year = fixed_digits(year, 4)?;
        let hour = fixed_digits(hour, 2)?;
        let minute = fixed_digits(minute, 2)?;

        NaiveDate::from_ymd_opt(year as i32, month, day)?
            .and_hms_opt(hour, minute, 0)
            .map(Self)
    }

    /// Render the timestamp the way it appears in frame names.
    pub fn file_label(&self, format: TimeFormat) -> String {
        match format {
            TimeFormat::Underscore => self.0.format("%d-%m-%Y_%H_%M").to_string(),
            TimeFormat::Colon => self.0.format("%d-%m-%Y_%H:%M").to_string(),
        }
    }
}

/// Parse an ASCII digit field of exactly `width` characters.
fn fixed_digits(field: &str, width: usize) -> Option<u32> {
    if field.len() != width || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Grammar version of the time fields in frame names.
///
/// The plotting pipeline switched from `HH:MM` to `HH_MM` at some point;
/// which one a tree uses is a configuration choice, never guessed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// `DD-MM-YYYY_HH_MM` (current)
    #[default]
    Underscore,
    /// `DD-MM-YYYY_HH:MM` (legacy)
    Colon,
}

impl TimeFormat {
    /// Number of `_`-separated tokens the timestamp occupies at the end of
    /// a frame base name.
    pub fn token_count(&self) -> usize {
        match self {
            TimeFormat::Underscore => 3,
            TimeFormat::Colon => 2,
        }
    }

    /// Split `base` into its leading part and the trailing valid time.
    ///
    /// Returns `None` when the tail does not follow this grammar.
    pub fn split_tail<'a>(&self, base: &'a str) -> Option<(&'a str, ValidTime)> {
        match self {
            TimeFormat::Underscore => {
                let mut tokens = base.rsplitn(4, '_');
                let minute = tokens.next()?;
                let hour = tokens.next()?;
                let date = tokens.next()?;
                let head = tokens.next()?;
                Some((head, ValidTime::from_fields(date, hour, minute)?))
            }
            TimeFormat::Colon => {
                let mut tokens = base.rsplitn(3, '_');
                let (hour, minute) = tokens.next()?.split_once(':')?;
                let date = tokens.next()?;
                let head = tokens.next()?;
                Some((head, ValidTime::from_fields(date, hour, minute)?))
            }
        }
    }
}
