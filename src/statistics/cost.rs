use crate::{
    api::{ConsumptionLog, Tariff},
    core::{DateRange, OverlapResult},
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Cost of the consumption within a resolved period.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodCost {
    pub period: DateRange,
    pub is_partial: bool,
    pub consumption: KilowattHours,
    pub cost: Cost,
}

impl PeriodCost {
    pub fn calculate(log: &ConsumptionLog, overlap: &OverlapResult, tariff: &Tariff) -> Self {
        let consumption = log.total_within(overlap.actual);
        Self {
            period: overlap.actual,
            is_partial: overlap.is_partial,
            consumption,
            cost: (consumption * tariff.rate).round_to_mills(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{DateTime, Local, NaiveDate, TimeZone};

    use super::*;
    use crate::{
        api::ConsumptionRecord,
        core::{BillingDay, IntervalBoundary, IntervalKind, resolve_overlap},
        quantity::rate::KilowattHourRate,
    };

    fn at(year: i32, month: u32, day: u32) -> DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(12, 0, 0).unwrap(),
            )
            .earliest()
            .unwrap()
    }

    #[test]
    fn test_calculate() {
        let log = ConsumptionLog::try_from(vec![
            ConsumptionRecord::builder()
                .start(at(2024, 3, 10))
                .end(at(2024, 3, 11))
                .consumption(KilowattHours::from(10.0))
                .build(),
            ConsumptionRecord::builder()
                .start(at(2024, 4, 10))
                .end(at(2024, 4, 11))
                .consumption(KilowattHours::from(99.0))
                .build(),
        ])
        .unwrap();
        let boundary =
            IntervalBoundary::new(at(2024, 3, 15), IntervalKind::Monthly, BillingDay::FIRST);
        let overlap =
            resolve_overlap(boundary, &[log.availability().unwrap()], None).unwrap().unwrap();
        let tariff = Tariff { id: "fixed".into(), rate: KilowattHourRate::from(0.2345) };

        let period_cost = PeriodCost::calculate(&log, &overlap, &tariff);
        assert!(period_cost.is_partial);
        assert_eq!(period_cost.period.start, at(2024, 3, 10));
        assert_abs_diff_eq!(period_cost.consumption.get(), 10.0);
        assert_abs_diff_eq!(period_cost.cost.get(), 2.345);
    }
}
