use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate};
use clap::{Parser, Subcommand};
use tariff_periods::{
    api::Clock,
    core::{
        AvailabilityRange,
        BillingDay,
        Direction,
        IntervalBoundary,
        IntervalKind,
        Provenance,
        calendar::midnight,
    },
    error::Error,
    ops::OpenRange,
    settings::Settings,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Settings file, missing file means the defaults.
    #[clap(long, env = "TARIFF_PERIODS_CONFIG", default_value = "tariff-periods.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the calculation period which contains the date.
    Boundary(PeriodArgs),

    /// Print the neighbouring period which still has data.
    Navigate(Box<NavigateArgs>),

    /// Reconcile the period with the availability ranges.
    Resolve(Box<ResolveArgs>),

    /// Compare the account tariff with another one over the recorded consumption.
    Compare(Box<CompareArgs>),

    /// Show or update the settings.
    Settings(SettingsArgs),
}

#[derive(Copy, Clone, Parser)]
pub struct PeriodArgs {
    /// Any date within the period, today by default.
    #[clap(long)]
    pub date: Option<NaiveDate>,

    /// Overrides the configured interval.
    #[clap(long)]
    pub interval: Option<IntervalKind>,

    /// Overrides the configured billing day.
    #[clap(long)]
    pub billing_day: Option<BillingDay>,
}

impl PeriodArgs {
    pub fn settings(self, settings: Settings) -> Settings {
        Settings {
            billing_day: self.billing_day.unwrap_or(settings.billing_day),
            interval: self.interval.unwrap_or(settings.interval),
        }
    }

    pub fn date(self, clock: &impl Clock) -> DateTime<Local> {
        self.date.map_or_else(|| clock.now(), local_midnight)
    }

    pub fn boundary(self, settings: Settings, clock: &impl Clock) -> IntervalBoundary {
        let settings = self.settings(settings);
        IntervalBoundary::new(self.date(clock), settings.interval, settings.billing_day)
    }
}

#[derive(Parser)]
pub struct NavigateArgs {
    #[clap(flatten)]
    pub period: PeriodArgs,

    #[clap(long, default_value = "forward")]
    pub direction: Direction,

    /// First day with data.
    #[clap(long)]
    pub min: Option<NaiveDate>,

    /// Last day with data.
    #[clap(long)]
    pub max: Option<NaiveDate>,

    /// Days with data, for sparse daily navigation.
    #[clap(long = "available-day", value_delimiter = ',')]
    pub available_days: Vec<NaiveDate>,
}

#[derive(Parser)]
pub struct ResolveArgs {
    #[clap(flatten)]
    pub period: PeriodArgs,

    #[clap(long)]
    pub consumption_from: Option<NaiveDate>,

    /// Exclusive.
    #[clap(long)]
    pub consumption_to: Option<NaiveDate>,

    #[clap(long)]
    pub account_from: Option<NaiveDate>,

    /// Exclusive.
    #[clap(long)]
    pub account_to: Option<NaiveDate>,

    #[clap(long)]
    pub compare_from: Option<NaiveDate>,

    /// Exclusive.
    #[clap(long)]
    pub compare_to: Option<NaiveDate>,

    /// Date to fall back to when the requested period has no data.
    #[clap(long)]
    pub anchor_date: Option<NaiveDate>,
}

impl ResolveArgs {
    /// Availability ranges for the sides given on the command line.
    ///
    /// Fails when a side ends before it starts.
    pub fn availability(&self) -> Result<Vec<AvailabilityRange>, Error> {
        [
            (Provenance::ConsumptionData, self.consumption_from, self.consumption_to),
            (Provenance::AccountTariffValidity, self.account_from, self.account_to),
            (Provenance::CompareTariffValidity, self.compare_from, self.compare_to),
        ]
        .into_iter()
        .filter(|(_, from, to)| from.is_some() || to.is_some())
        .map(|(provenance, from, to)| {
            AvailabilityRange::try_new(
                provenance,
                OpenRange::new(from.map(local_midnight), to.map(local_midnight)),
            )
        })
        .collect()
    }
}

#[derive(Parser)]
pub struct CompareArgs {
    #[clap(flatten)]
    pub period: PeriodArgs,

    /// TOML file with the consumption records and the two tariff agreements.
    #[clap(long, env = "RECORDS_PATH", default_value = "records.toml")]
    pub records: PathBuf,

    /// Navigate from the initial period, each step resolving the comparison anew.
    #[clap(long = "step", value_delimiter = ',')]
    pub steps: Vec<Direction>,

    /// Also print the daily consumption of the account period.
    #[clap(long)]
    pub daily: bool,
}

#[derive(Copy, Clone, Parser)]
pub struct SettingsArgs {
    #[clap(long)]
    pub set_billing_day: Option<BillingDay>,

    #[clap(long)]
    pub set_interval: Option<IntervalKind>,
}

pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    midnight(&Local, date)
}
