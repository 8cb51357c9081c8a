use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::{error::Error, ops::RangeExclusive};

/// Half-open range of instants, always non-empty once constructed through [`DateRange::try_new`].
pub type DateRange<Tz = Local> = RangeExclusive<DateTime<Tz>>;

impl<Tz> RangeExclusive<DateTime<Tz>>
where
    Tz: TimeZone,
    DateTime<Tz>: Copy + Display,
{
    pub fn try_new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self, Error> {
        Self::non_empty(start, end)
            .ok_or_else(|| Error::MalformedRange { start: start.to_string(), end: end.to_string() })
    }
}
