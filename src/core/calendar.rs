//! Calendar arithmetic on local dates.

use chrono::{
    DateTime,
    Datelike,
    Days,
    MappedLocalTime,
    Months,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    TimeDelta,
    TimeZone,
};

use crate::core::BillingDay;

/// Local midnight of the date.
pub fn midnight<Tz: TimeZone>(timezone: &Tz, date: NaiveDate) -> DateTime<Tz> {
    localize(timezone, date.and_time(NaiveTime::MIN))
}

/// Map the wall-clock time onto the timezone.
///
/// An ambiguous time resolves to its earliest instant. A non-existent time (DST gap) resolves
/// to the first existing quarter of an hour after it.
pub fn localize<Tz: TimeZone>(timezone: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    (0..=96)
        .filter_map(|n_quarters| naive.checked_add_signed(TimeDelta::minutes(15 * n_quarters)))
        .find_map(|candidate| match timezone.from_local_datetime(&candidate) {
            MappedLocalTime::Single(instant) | MappedLocalTime::Ambiguous(instant, _) => {
                Some(instant)
            }
            MappedLocalTime::None => None,
        })
        .unwrap_or_else(|| timezone.from_utc_datetime(&naive))
}

/// Add the calendar days, saturating at the end of the supported calendar.
pub fn saturating_add_days(date: NaiveDate, n_days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n_days)).unwrap_or(NaiveDate::MAX)
}

/// Subtract the calendar days, saturating at the start of the supported calendar.
pub fn saturating_sub_days(date: NaiveDate, n_days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n_days)).unwrap_or(NaiveDate::MIN)
}

/// Months elapsed since January of the year zero.
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0().cast_signed()
}

/// The billing day in the indexed month, clamped to the month length.
///
/// Saturates at the limits of the supported calendar.
pub fn anchored_date(month_index: i32, billing_day: BillingDay) -> NaiveDate {
    // January is never shorter than the billing day, later months are clamped by `Months`.
    NaiveDate::from_ymd_opt(month_index.div_euclid(12), 1, u32::from(billing_day.get()))
        .and_then(|january| {
            january.checked_add_months(Months::new(month_index.rem_euclid(12).cast_unsigned()))
        })
        .unwrap_or(if month_index < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Index of the month whose billing day starts the billing month containing the date.
pub fn billing_month_index(date: NaiveDate, billing_day: BillingDay) -> i32 {
    let index = month_index(date);
    if date >= anchored_date(index, billing_day) { index } else { index - 1 }
}
