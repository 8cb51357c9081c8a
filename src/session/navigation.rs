use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate};

use crate::{
    api::ConsumptionLog,
    core::{Direction, IntervalBoundary, IntervalKind, IntervalNavigator},
    prelude::*,
    settings::Settings,
};

/// Currently selected period together with the data extent it may move within.
#[must_use]
#[derive(Clone, Debug)]
pub struct NavigationState {
    date: DateTime<Local>,
    settings: Settings,
    min: Option<DateTime<Local>>,
    max: Option<DateTime<Local>>,
    available_days: BTreeSet<NaiveDate>,
}

impl NavigationState {
    /// Start at the period containing the `date`, bounded by the consumption data.
    pub fn new(date: DateTime<Local>, settings: Settings, log: &ConsumptionLog) -> Self {
        let mut this = Self {
            date,
            settings,
            min: log.availability().and_then(|availability| availability.range.start),
            max: log.last_covered(),
            available_days: log.daily_dates(),
        };
        this.date = this.boundary().range.start;
        this
    }

    #[must_use]
    pub const fn date(&self) -> DateTime<Local> {
        self.date
    }

    #[must_use]
    pub const fn settings(&self) -> Settings {
        self.settings
    }

    pub fn boundary(&self) -> IntervalBoundary {
        IntervalBoundary::new(self.date, self.settings.interval, self.settings.billing_day)
    }

    fn navigator(&self) -> IntervalNavigator<'_, Local> {
        IntervalNavigator::builder()
            .kind(self.settings.interval)
            .billing_day(self.settings.billing_day)
            .maybe_min(self.min)
            .maybe_max(self.max)
            .maybe_available_days(
                (self.settings.interval == IntervalKind::Daily).then_some(&self.available_days),
            )
            .build()
    }

    #[must_use]
    pub fn can_step(&self, direction: Direction) -> bool {
        self.navigator().next(self.date, direction).is_some()
    }

    /// Move to the neighbouring period, returns whether the state has changed.
    pub fn step(&mut self, direction: Direction) -> bool {
        match self.navigator().next(self.date, direction) {
            Some(date) => {
                debug!(%direction, from = %self.date, to = %date, "stepped");
                self.date = date;
                true
            }
            None => false,
        }
    }

    /// Switch to new settings, keeping the period which contains the current date.
    pub fn apply(&mut self, settings: Settings) {
        self.settings = settings;
        self.date = self.boundary().range.start;
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{
        api::ConsumptionRecord,
        core::BillingDay,
        quantity::energy::KilowattHours,
    };

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, 0, 0).unwrap(),
            )
            .earliest()
            .unwrap()
    }

    fn log() -> ConsumptionLog {
        ConsumptionLog::try_from(
            [(2024, 1, 10), (2024, 1, 11), (2024, 1, 20), (2024, 2, 5), (2024, 3, 1)]
                .into_iter()
                .map(|(year, month, day)| {
                    ConsumptionRecord::builder()
                        .start(at(year, month, day, 8))
                        .end(at(year, month, day, 9))
                        .consumption(KilowattHours::from(1.0))
                        .build()
                })
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_snaps_to_boundary() {
        let state = NavigationState::new(at(2024, 2, 17, 15), Settings::default(), &log());
        assert_eq!(state.date(), at(2024, 2, 1, 0));
    }

    #[test]
    fn test_monthly_steps() {
        let mut state = NavigationState::new(at(2024, 2, 17, 15), Settings::default(), &log());
        assert!(state.can_step(Direction::Forward));
        assert!(state.step(Direction::Forward));
        assert_eq!(state.date(), at(2024, 3, 1, 0));
        assert!(!state.can_step(Direction::Forward));
        assert!(!state.step(Direction::Forward));
        assert_eq!(state.date(), at(2024, 3, 1, 0));

        assert!(state.step(Direction::Backward));
        assert_eq!(state.date(), at(2024, 2, 1, 0));

        // January starts before the first record.
        assert!(!state.step(Direction::Backward));
    }

    #[test]
    fn test_daily_skips_empty_days() {
        let settings = Settings { interval: IntervalKind::Daily, ..Settings::default() };
        let mut state = NavigationState::new(at(2024, 1, 11, 12), settings, &log());
        assert!(state.step(Direction::Forward));
        assert_eq!(state.date(), at(2024, 1, 20, 0));
        assert!(state.step(Direction::Backward));
        assert!(state.step(Direction::Backward));
        assert_eq!(state.date(), at(2024, 1, 10, 0));
        assert!(!state.can_step(Direction::Backward));
    }

    #[test]
    fn test_daily_steps_onto_day_covered_past_midnight() {
        let log = ConsumptionLog::try_from(vec![
            ConsumptionRecord::builder()
                .start(at(2024, 1, 12, 23))
                .end(at(2024, 1, 13, 3))
                .consumption(KilowattHours::from(4.0))
                .build(),
        ])
        .unwrap();
        let settings = Settings { interval: IntervalKind::Daily, ..Settings::default() };
        let mut state = NavigationState::new(at(2024, 1, 12, 12), settings, &log);
        assert!(state.step(Direction::Forward));
        assert_eq!(state.date(), at(2024, 1, 13, 0));
        assert!(!state.can_step(Direction::Forward));
    }

    #[test]
    fn test_apply_settings() {
        let mut state = NavigationState::new(at(2024, 2, 17, 15), Settings::default(), &log());
        state.apply(Settings {
            billing_day: BillingDay::try_from(15).unwrap(),
            interval: IntervalKind::Monthly,
        });
        assert_eq!(state.date(), at(2024, 1, 15, 0));
        assert_eq!(state.boundary().range.end, at(2024, 2, 15, 0));
    }
}
