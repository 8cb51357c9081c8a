use bon::Builder;
use chrono::{DateTime, Local};

use crate::{
    api::{ConsumptionLog, Tariff, TariffValidity},
    core::{AvailabilityRange, IntervalBoundary, Provenance, resolve_overlap},
    error::Error,
    prelude::*,
    statistics::PeriodCost,
};

/// Outcome of a single resolution pipeline.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineOutcome {
    Resolved(PeriodCost),

    /// Nothing overlaps, even after the anchor shift.
    NoData,
}

impl PipelineOutcome {
    pub const fn resolved(&self) -> Option<&PeriodCost> {
        match self {
            Self::Resolved(period_cost) => Some(period_cost),
            Self::NoData => None,
        }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonOutcome {
    /// Consumption under the current tariff.
    pub account: PipelineOutcome,

    /// Consumption under the tariff being compared, which must also be valid for the account one.
    pub compare: PipelineOutcome,
}

/// Account and comparison tariffs evaluated over the same requested period.
#[derive(Builder)]
pub struct Comparison<'a> {
    log: &'a ConsumptionLog,
    validity: &'a dyn TariffValidity,
    account: &'a Tariff,
    compare: &'a Tariff,
}

impl Comparison<'_> {
    /// Fetch both tariff validities concurrently and resolve the two pipelines.
    #[instrument(skip_all, fields(period = %requested.range))]
    pub async fn run(&self, requested: IntervalBoundary) -> Result<ComparisonOutcome, Error> {
        let (account_validity, compare_validity) = tokio::try_join!(
            self.validity.get_validity(&self.account.id),
            self.validity.get_validity(&self.compare.id),
        )?;

        let Some(consumption) = self.log.availability() else {
            info!("no consumption data");
            return Ok(ComparisonOutcome {
                account: PipelineOutcome::NoData,
                compare: PipelineOutcome::NoData,
            });
        };
        let account =
            AvailabilityRange::try_new(Provenance::AccountTariffValidity, account_validity)?;
        let compare =
            AvailabilityRange::try_new(Provenance::CompareTariffValidity, compare_validity)?;
        let anchor_date = self.log.last_covered();

        Ok(ComparisonOutcome {
            account: self.resolve(requested, &[consumption, account], self.account, anchor_date)?,
            compare: self.resolve(
                requested,
                &[consumption, account, compare],
                self.compare,
                anchor_date,
            )?,
        })
    }

    fn resolve(
        &self,
        requested: IntervalBoundary,
        availability: &[AvailabilityRange],
        tariff: &Tariff,
        anchor_date: Option<DateTime<Local>>,
    ) -> Result<PipelineOutcome, Error> {
        let outcome = resolve_overlap(requested, availability, anchor_date)?.map_or(
            PipelineOutcome::NoData,
            |overlap| {
                let period_cost = PeriodCost::calculate(self.log, &overlap, tariff);
                debug!(tariff_id = %tariff.id, period = %period_cost.period, "resolved");
                PipelineOutcome::Resolved(period_cost)
            },
        );
        Ok(outcome)
    }
}
