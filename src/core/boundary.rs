use chrono::{DateTime, Datelike, Local, TimeZone};

use crate::{
    core::{
        BillingDay,
        DateRange,
        IntervalKind,
        calendar::{
            anchored_date,
            billing_month_index,
            midnight,
            saturating_add_days,
            saturating_sub_days,
        },
    },
    error::Error,
    ops::RangeExclusive,
};

/// Canonical period of an [`IntervalKind`] containing some instant.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntervalBoundary<Tz: TimeZone = Local> {
    pub range: DateRange<Tz>,
    pub kind: IntervalKind,
    pub billing_day: BillingDay,
}

impl<Tz: TimeZone> Copy for IntervalBoundary<Tz> where DateTime<Tz>: Copy {}

impl<Tz> IntervalBoundary<Tz>
where
    Tz: TimeZone,
    DateTime<Tz>: Copy,
{
    /// Validate the raw billing day and compute the boundary.
    pub fn try_new(
        instant: DateTime<Tz>,
        kind: IntervalKind,
        billing_day: i64,
    ) -> Result<Self, Error> {
        Ok(Self::new(instant, kind, BillingDay::try_from(billing_day)?))
    }

    /// Compute the period of the `kind` which contains the `instant`.
    ///
    /// Period edges are local midnights in the instant's timezone:
    ///
    /// - daily: the instant's calendar day;
    /// - weekly: Monday on or before the instant, plus seven days;
    /// - monthly: the latest billing day on or before the instant, until the next month's one;
    /// - quarterly: the billing month containing the instant, walked back to January, April,
    ///   July, or October, until three billing months later.
    ///
    /// Near the limits of the supported calendar the period is cut off at the limit.
    pub fn new(instant: DateTime<Tz>, kind: IntervalKind, billing_day: BillingDay) -> Self {
        let date = instant.date_naive();
        let (start, end) = match kind {
            IntervalKind::Daily => (date, saturating_add_days(date, 1)),
            IntervalKind::Weekly => {
                let monday =
                    saturating_sub_days(date, u64::from(date.weekday().num_days_from_monday()));
                (monday, saturating_add_days(monday, 7))
            }
            IntervalKind::Monthly => {
                let index = billing_month_index(date, billing_day);
                (anchored_date(index, billing_day), anchored_date(index + 1, billing_day))
            }
            IntervalKind::Quarterly => {
                let index = billing_month_index(date, billing_day);
                let index = index - index.rem_euclid(3);
                (anchored_date(index, billing_day), anchored_date(index + 3, billing_day))
            }
        };
        let timezone = instant.timezone();
        Self {
            range: RangeExclusive {
                start: midnight(&timezone, start),
                end: midnight(&timezone, end),
            },
            kind,
            billing_day,
        }
    }

    /// The immediately following period of the same kind.
    pub fn next(self) -> Self {
        Self::new(self.range.end, self.kind, self.billing_day)
    }

    /// The immediately preceding period of the same kind.
    pub fn previous(self) -> Self {
        let timezone = self.range.start.timezone();
        let last_day = saturating_sub_days(self.range.start.date_naive(), 1);
        Self::new(midnight(&timezone, last_day), self.kind, self.billing_day)
    }

    #[must_use]
    pub fn contains(self, instant: DateTime<Tz>) -> bool {
        self.range.contains(instant)
    }

    /// Whether the period intersects the closed `[min, max]` data range, each side optional.
    #[must_use]
    pub fn overlaps_with_data(self, min: Option<DateTime<Tz>>, max: Option<DateTime<Tz>>) -> bool {
        min.is_none_or(|min| self.range.end > min) && max.is_none_or(|max| self.range.start <= max)
    }

    /// Whether the period starts inside the closed `[min, max]` data range, each side optional.
    #[must_use]
    pub fn starts_within_data(
        self,
        min: Option<DateTime<Tz>>,
        max: Option<DateTime<Tz>>,
    ) -> bool {
        min.is_none_or(|min| self.range.start >= min)
            && max.is_none_or(|max| self.range.start <= max)
    }

    /// Whether the period starts strictly after the data's upper bound.
    #[must_use]
    pub fn is_after_data(self, max: Option<DateTime<Tz>>) -> bool {
        max.is_some_and(|max| self.range.start > max)
    }
}
