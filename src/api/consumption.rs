use std::{
    collections::{BTreeMap, BTreeSet},
    iter::successors,
};

use chrono::{DateTime, Local, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        AvailabilityRange,
        DateRange,
        Provenance,
        calendar::{midnight, saturating_add_days},
    },
    error::Error,
    ops::RangeExclusive,
    quantity::energy::KilowattHours,
};

/// Metered consumption over a period.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, bon::Builder)]
pub struct ConsumptionRecord {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,

    #[serde(rename = "kwh")]
    pub consumption: KilowattHours,
}

impl ConsumptionRecord {
    pub fn interval(self) -> Result<DateRange, Error> {
        DateRange::try_new(self.start, self.end)
    }

    /// Consumption share which falls into the range, assuming the even consumption rate.
    pub fn share_within(self, range: DateRange) -> KilowattHours {
        let interval = RangeExclusive { start: self.start, end: self.end };
        interval.intersect(range).map_or(KilowattHours::ZERO, |overlap| {
            self.consumption * (overlap.len().as_seconds_f64() / interval.len().as_seconds_f64())
        })
    }
}

/// Time-ordered consumption records with well-formed intervals.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct ConsumptionLog(Vec<ConsumptionRecord>);

impl TryFrom<Vec<ConsumptionRecord>> for ConsumptionLog {
    type Error = Error;

    fn try_from(mut records: Vec<ConsumptionRecord>) -> Result<Self, Self::Error> {
        for record in &records {
            record.interval()?;
        }
        records.sort_by_key(|record| record.start);
        Ok(Self(records))
    }
}

impl ConsumptionLog {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// From the earliest record start to the latest record end.
    #[must_use]
    pub fn availability(&self) -> Option<AvailabilityRange> {
        let start = self.0.iter().map(|record| record.start).min()?;
        let end = self.0.iter().map(|record| record.end).max()?;
        Some(AvailabilityRange::bounded(Provenance::ConsumptionData, RangeExclusive { start, end }))
    }

    /// Last instant which is covered by a record, just before the latest record end.
    #[must_use]
    pub fn last_covered(&self) -> Option<DateTime<Local>> {
        let end = self.0.iter().map(|record| record.end).max()?;
        Some(end - TimeDelta::nanoseconds(1))
    }

    /// Local calendar days touched by at least one record.
    #[must_use]
    pub fn daily_dates(&self) -> BTreeSet<NaiveDate> {
        self.0
            .iter()
            .flat_map(|record| {
                let last_date = (record.end - TimeDelta::nanoseconds(1)).date_naive();
                successors(Some(record.start.date_naive()), NaiveDate::succ_opt)
                    .take_while(move |date| *date <= last_date)
            })
            .collect()
    }

    /// Total consumption within the range, splitting the records which cross its edges.
    pub fn total_within(&self, range: DateRange) -> KilowattHours {
        self.0.iter().map(|record| record.share_within(range)).sum()
    }

    /// Records which overlap the range.
    pub fn within(&self, range: DateRange) -> impl Iterator<Item = &ConsumptionRecord> {
        self.0
            .iter()
            .filter(move |record| record.start < range.end && range.start < record.end)
    }

    /// Consumption per local day within the range.
    ///
    /// Records crossing midnight or the range edges contribute pro rata. Days without records
    /// are left out.
    #[must_use]
    pub fn daily_totals_within(&self, range: DateRange) -> Vec<(NaiveDate, KilowattHours)> {
        let timezone = range.start.timezone();
        let mut totals = BTreeMap::<NaiveDate, KilowattHours>::new();
        for record in self.within(range) {
            let start = record.start.max(range.start);
            let last_date = (record.end.min(range.end) - TimeDelta::nanoseconds(1)).date_naive();
            for date in successors(Some(start.date_naive()), NaiveDate::succ_opt)
                .take_while(|date| *date <= last_date)
            {
                let day = RangeExclusive {
                    start: midnight(&timezone, date),
                    end: midnight(&timezone, saturating_add_days(date, 1)),
                };
                if let Some(day) = day.intersect(range) {
                    *totals.entry(date).or_default() += record.share_within(day);
                }
            }
        }
        totals.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{Datelike, TimeZone};
    use itertools::Itertools;

    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, 0, 0).unwrap(),
            )
            .earliest()
            .unwrap()
    }

    fn record(start: DateTime<Local>, end: DateTime<Local>, consumption: f64) -> ConsumptionRecord {
        ConsumptionRecord::builder()
            .start(start)
            .end(end)
            .consumption(KilowattHours::from(consumption))
            .build()
    }

    fn sample_log() -> ConsumptionLog {
        ConsumptionLog::try_from(vec![
            record(at(2024, 1, 12, 10), at(2024, 1, 12, 12), 2.0),
            record(at(2024, 1, 10, 8), at(2024, 1, 10, 10), 1.0),
            record(at(2024, 1, 12, 23), at(2024, 1, 13, 1), 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_malformed_record() {
        let result =
            ConsumptionLog::try_from(vec![record(at(2024, 1, 2, 10), at(2024, 1, 2, 10), 1.0)]);
        assert!(matches!(result, Err(Error::MalformedRange { .. })));
    }

    #[test]
    fn test_availability() {
        let availability = sample_log().availability().unwrap();
        assert_eq!(availability.provenance, Provenance::ConsumptionData);
        assert_eq!(availability.range.start, Some(at(2024, 1, 10, 8)));
        assert_eq!(availability.range.end, Some(at(2024, 1, 13, 1)));
    }

    #[test]
    fn test_empty_log() {
        let log = ConsumptionLog::default();
        assert!(log.availability().is_none());
        assert!(log.last_covered().is_none());
        assert!(log.daily_dates().is_empty());
    }

    #[test]
    fn test_last_covered() {
        assert_eq!(
            sample_log().last_covered(),
            Some(at(2024, 1, 13, 1) - TimeDelta::nanoseconds(1)),
        );
    }

    #[test]
    fn test_daily_dates_are_sparse() {
        let dates = sample_log().daily_dates();
        let expected = [
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 13).unwrap(),
        ];
        assert_eq!(dates.into_iter().collect_vec(), expected);
    }

    #[test]
    fn test_total_within_splits_records() {
        let log = sample_log();
        let range = RangeExclusive { start: at(2024, 1, 11, 0), end: at(2024, 1, 13, 0) };
        assert_abs_diff_eq!(log.total_within(range).get(), 4.0);
        assert_eq!(log.within(range).count(), 2);
    }

    #[test]
    fn test_daily_totals_within() {
        let log = sample_log();
        let range = RangeExclusive { start: at(2024, 1, 1, 0), end: at(2024, 2, 1, 0) };
        let totals = log.daily_totals_within(range);
        assert_eq!(totals.iter().map(|(date, _)| date.day()).collect_vec(), [10, 12, 13]);
        assert_abs_diff_eq!(totals[0].1.get(), 1.0);
        assert_abs_diff_eq!(totals[1].1.get(), 4.0);
        assert_abs_diff_eq!(totals[2].1.get(), 2.0);

        let range = RangeExclusive { start: at(2024, 1, 11, 0), end: at(2024, 1, 13, 0) };
        let totals = log.daily_totals_within(range);
        assert_eq!(totals.len(), 1);
        assert_abs_diff_eq!(totals[0].1.get(), 4.0);
    }

    #[test]
    fn test_daily_totals_split_at_range_edge() {
        let log = ConsumptionLog::try_from(vec![
            record(at(2024, 1, 20, 8), at(2024, 1, 20, 9), 1.0),
            record(at(2024, 1, 31, 23), at(2024, 2, 1, 1), 4.0),
        ])
        .unwrap();
        let january = RangeExclusive { start: at(2024, 1, 1, 0), end: at(2024, 2, 1, 0) };
        let totals = log.daily_totals_within(january);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[1].0, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_abs_diff_eq!(totals[1].1.get(), 2.0);
        let sum = totals.iter().map(|(_, consumption)| consumption.get()).sum::<f64>();
        assert_abs_diff_eq!(sum, log.total_within(january).get());
    }
}
