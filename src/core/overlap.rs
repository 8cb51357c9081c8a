use std::{fmt::Display, iter::once};

use chrono::{DateTime, Local, TimeZone};

use crate::{
    core::{AvailabilityRange, DateRange, IntervalBoundary, intersect::Intersect},
    error::Error,
    prelude::*,
};

/// Period which can actually be calculated for a requested boundary.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OverlapResult<Tz: TimeZone = Local> {
    /// Part of the requested period covered by every availability range.
    pub actual: DateRange<Tz>,

    /// The full period which has been resolved.
    pub requested: DateRange<Tz>,

    /// `actual` is narrower than `requested`.
    pub is_partial: bool,

    /// The anchor-shift fallback has been applied, so `requested` is not the requested boundary.
    pub is_shifted: bool,

    /// The boundary `requested` comes from.
    pub boundary: IntervalBoundary<Tz>,
}

impl<Tz: TimeZone> Copy for OverlapResult<Tz> where DateTime<Tz>: Copy {}

impl<Tz> OverlapResult<Tz>
where
    Tz: TimeZone,
    DateTime<Tz>: Copy,
{
    fn try_resolve(
        boundary: IntervalBoundary<Tz>,
        availability: &[AvailabilityRange<Tz>],
        is_shifted: bool,
    ) -> Option<Self> {
        let requested = boundary.range;
        let actual = availability
            .iter()
            .map(|availability| availability.constrain(requested))
            .chain(once(requested))
            .intersect_or(requested)?;
        Some(Self { actual, requested, is_partial: actual != requested, is_shifted, boundary })
    }
}

/// Reconcile the requested boundary with the availability ranges.
///
/// When nothing overlaps and the `anchor_date` is given (normally, the latest instant known to
/// have data), the boundary of the same kind around the anchor date is tried exactly once.
///
/// [`None`] means there is no data for the period: this is a final state, not an error.
/// A malformed availability range is an error.
#[instrument(skip_all, fields(kind = %requested.kind))]
pub fn resolve_overlap<Tz>(
    requested: IntervalBoundary<Tz>,
    availability: &[AvailabilityRange<Tz>],
    anchor_date: Option<DateTime<Tz>>,
) -> Result<Option<OverlapResult<Tz>>, Error>
where
    Tz: TimeZone,
    DateTime<Tz>: Copy + Display,
{
    for availability in availability {
        availability.validate()?;
    }
    if let Some(result) = OverlapResult::try_resolve(requested, availability, false) {
        return Ok(Some(result));
    }
    let Some(anchor_date) = anchor_date else {
        debug!("no overlap and no anchor to shift to");
        return Ok(None);
    };
    let shifted = IntervalBoundary::new(anchor_date, requested.kind, requested.billing_day);
    debug!("no overlap, shifting to the anchor date");
    let result = OverlapResult::try_resolve(shifted, availability, true);
    if result.is_none() {
        debug!("no overlap after the anchor shift");
    }
    Ok(result)
}
