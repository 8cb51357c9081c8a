use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::{
    core::DateRange,
    error::Error,
    ops::{OpenRange, RangeExclusive},
};

/// Where an [`AvailabilityRange`] comes from.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, derive_more::Display)]
pub enum Provenance {
    #[display("consumption data")]
    ConsumptionData,

    #[display("account tariff validity")]
    AccountTariffValidity,

    #[display("compare tariff validity")]
    CompareTariffValidity,
}

/// Instants which can be meaningfully calculated, as reported by a collaborator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AvailabilityRange<Tz: TimeZone = Local> {
    pub range: OpenRange<DateTime<Tz>>,
    pub provenance: Provenance,
}

impl<Tz: TimeZone> Copy for AvailabilityRange<Tz> where DateTime<Tz>: Copy {}

impl<Tz> AvailabilityRange<Tz>
where
    Tz: TimeZone,
    DateTime<Tz>: Copy,
{
    pub fn bounded(provenance: Provenance, range: DateRange<Tz>) -> Self {
        Self { range: range.into(), provenance }
    }

    pub const fn since(provenance: Provenance, start: DateTime<Tz>) -> Self {
        Self { range: OpenRange::since(start), provenance }
    }

    /// Cut the `requested` range down to this availability.
    ///
    /// The result may be empty.
    pub fn constrain(self, requested: DateRange<Tz>) -> DateRange<Tz> {
        let RangeExclusive { start, end } = self.range.fill(requested);
        RangeExclusive { start: start.max(requested.start), end: end.min(requested.end) }
    }
}

impl<Tz> AvailabilityRange<Tz>
where
    Tz: TimeZone,
    DateTime<Tz>: Copy + Display,
{
    /// Fails when both sides are bounded and the start is not before the end.
    pub fn try_new(provenance: Provenance, range: OpenRange<DateTime<Tz>>) -> Result<Self, Error> {
        let this = Self { range, provenance };
        this.validate()?;
        Ok(this)
    }

    pub fn validate(self) -> Result<(), Error> {
        match (self.range.start, self.range.end) {
            (Some(start), Some(end)) => RangeExclusive::try_new(start, end).map(|_| ()),
            _ => Ok(()),
        }
    }
}
