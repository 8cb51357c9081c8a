use std::{
    collections::BTreeSet,
    ops::Bound::{Excluded, Unbounded},
};

use bon::Builder;
use chrono::{DateTime, NaiveDate, TimeZone};

use crate::core::{BillingDay, IntervalBoundary, IntervalKind, calendar::midnight};

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, derive_more::Display)]
pub enum Direction {
    Forward,
    Backward,
}

/// Steps between the periods that have data.
#[derive(Builder)]
pub struct IntervalNavigator<'a, Tz: TimeZone> {
    kind: IntervalKind,

    #[builder(default)]
    billing_day: BillingDay,

    /// Earliest instant known to have data.
    min: Option<DateTime<Tz>>,

    /// Latest instant known to have data.
    max: Option<DateTime<Tz>>,

    /// Local calendar days with data, for sparse daily data.
    available_days: Option<&'a BTreeSet<NaiveDate>>,
}

impl<Tz> IntervalNavigator<'_, Tz>
where
    Tz: TimeZone,
    DateTime<Tz>: Copy,
{
    /// Start of the neighbouring period in the `direction`, or [`None`] if there is nowhere to go.
    #[must_use]
    pub fn next(&self, from: DateTime<Tz>, direction: Direction) -> Option<DateTime<Tz>> {
        self.next_boundary(from, direction).map(|boundary| boundary.range.start)
    }

    /// Neighbouring period in the `direction`, or [`None`] if there is nowhere to go.
    ///
    /// Daily navigation over the available days jumps over the gaps. Otherwise, the adjacent
    /// period is taken if it is not after the data (forward) or if it still has data (backward).
    /// Going backward, a week may cover the earliest data only partially, while a month or
    /// a quarter must start within the data.
    pub fn next_boundary(
        &self,
        from: DateTime<Tz>,
        direction: Direction,
    ) -> Option<IntervalBoundary<Tz>> {
        if self.kind == IntervalKind::Daily
            && let Some(available_days) = self.available_days
        {
            let timezone = from.timezone();
            return self
                .next_available_day(available_days, from.date_naive(), direction)
                .map(|date| {
                    IntervalBoundary::new(midnight(&timezone, date), self.kind, self.billing_day)
                });
        }

        let current = IntervalBoundary::new(from, self.kind, self.billing_day);
        match direction {
            Direction::Forward => {
                let next = current.next();
                (!next.is_after_data(self.max)).then_some(next)
            }
            Direction::Backward => {
                let previous = current.previous();
                let is_valid = match self.kind {
                    IntervalKind::Daily | IntervalKind::Weekly => {
                        previous.overlaps_with_data(self.min, self.max)
                    }
                    IntervalKind::Monthly | IntervalKind::Quarterly => {
                        previous.starts_within_data(self.min, self.max)
                    }
                };
                is_valid.then_some(previous)
            }
        }
    }

    fn next_available_day(
        &self,
        available_days: &BTreeSet<NaiveDate>,
        from: NaiveDate,
        direction: Direction,
    ) -> Option<NaiveDate> {
        let min = self.min.map(|min| min.date_naive());
        let max = self.max.map(|max| max.date_naive());
        let is_above_min = |date: &&NaiveDate| min.is_none_or(|min| **date >= min);
        let is_below_max = |date: &&NaiveDate| max.is_none_or(|max| **date <= max);
        let day = match direction {
            Direction::Forward => available_days
                .range((Excluded(from), Unbounded))
                .find(is_above_min)
                .filter(is_below_max),
            Direction::Backward => available_days
                .range((Unbounded, Excluded(from)))
                .rev()
                .find(is_below_max)
                .filter(is_above_min),
        };
        day.copied()
    }
}
