mod cli;
mod tables;

use std::{collections::BTreeSet, path::Path, sync::Arc};

use clap::{Parser, crate_version};
use tariff_periods::{
    api::{Records, SystemClock, TariffCatalog},
    core::{IntervalBoundary, IntervalNavigator, resolve_overlap},
    prelude::*,
    session::{Comparison, NavigationState, RequestSequence},
    settings::{Settings, SettingsStore},
};
use tokio::task::JoinSet;

use crate::{
    cli::{Args, Command, CompareArgs, NavigateArgs, ResolveArgs, SettingsArgs},
    tables::{
        build_boundary_table,
        build_comparison_table,
        build_daily_table,
        build_overlap_table,
        build_settings_table,
    },
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let settings = Settings::read_from(&args.config)?;

    match args.command {
        Command::Boundary(args) => {
            let boundary = args.boundary(settings, &SystemClock);
            println!("{}", build_boundary_table(&boundary));
        }
        Command::Navigate(args) => navigate(&args, settings),
        Command::Resolve(args) => resolve(&args, settings)?,
        Command::Compare(args) => compare(*args, settings).await?,
        Command::Settings(settings_args) => {
            update_settings(settings_args, settings, &args.config)?;
        }
    }

    Ok(())
}

fn navigate(args: &NavigateArgs, settings: Settings) {
    let settings = args.period.settings(settings);
    let available_days: BTreeSet<_> = args.available_days.iter().copied().collect();
    let navigator = IntervalNavigator::builder()
        .kind(settings.interval)
        .billing_day(settings.billing_day)
        .maybe_min(args.min.map(cli::local_midnight))
        .maybe_max(args.max.map(cli::local_midnight))
        .maybe_available_days((!args.available_days.is_empty()).then_some(&available_days))
        .build();
    match navigator.next_boundary(args.period.date(&SystemClock), args.direction) {
        Some(boundary) => println!("{}", build_boundary_table(&boundary)),
        None => warn!(direction = %args.direction, "nowhere to go"),
    }
}

fn resolve(args: &ResolveArgs, settings: Settings) -> Result {
    let requested = args.period.boundary(settings, &SystemClock);
    let anchor_date = args.anchor_date.map(cli::local_midnight);
    match resolve_overlap(requested, &args.availability()?, anchor_date)? {
        Some(overlap) => println!("{}", build_overlap_table(&overlap)),
        None => warn!("no data for this period"),
    }
    Ok(())
}

/// Resolve the comparison for the initial period and after every navigation step.
///
/// The resolutions run concurrently, only the latest one is rendered.
#[instrument(skip_all, fields(records = %args.records.display()))]
async fn compare(args: CompareArgs, settings: Settings) -> Result {
    let (log, account_agreement, compare_agreement) =
        Records::read_from(&args.records)?.into_parts()?;
    let mut state = NavigationState::new(
        args.period.date(&SystemClock),
        args.period.settings(settings),
        &log,
    );
    let mut boundaries = vec![state.boundary()];
    for direction in &args.steps {
        if state.step(*direction) {
            boundaries.push(state.boundary());
        } else {
            warn!(%direction, "cannot step further");
        }
    }

    let (account, compare) = (account_agreement.tariff.clone(), compare_agreement.tariff.clone());
    let catalog = Arc::new(TariffCatalog::new([account_agreement, compare_agreement], SystemClock));
    let log = Arc::new(log);
    let sequence = Arc::new(RequestSequence::default());
    let mut tasks = JoinSet::new();
    for boundary in boundaries {
        let ticket = sequence.issue();
        let (catalog, log, sequence) = (catalog.clone(), log.clone(), sequence.clone());
        let (account, compare) = (account.clone(), compare.clone());
        tasks.spawn(async move {
            let outcome = Comparison::builder()
                .log(&log)
                .validity(&*catalog)
                .account(&account)
                .compare(&compare)
                .build()
                .run(boundary)
                .await;
            sequence.accept(ticket, (boundary, outcome))
        });
    }

    let mut latest: Option<(IntervalBoundary, _)> = None;
    while let Some(result) = tasks.join_next().await {
        if let Some(accepted) = result? {
            latest = Some(accepted);
        }
    }
    let Some((boundary, outcome)) = latest else {
        bail!("no comparison has been accepted");
    };
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(error) if error.is_recoverable() => {
            warn!("tariff lookup failed, try again later: {error:#}");
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    println!("{}", build_boundary_table(&boundary));
    println!("{}", build_comparison_table(&outcome, &account, &compare));
    if args.daily
        && let Some(period_cost) = outcome.account.resolved()
    {
        println!("{}", build_daily_table(&log.daily_totals_within(period_cost.period)));
    }
    Ok(())
}

fn update_settings(args: SettingsArgs, settings: Settings, path: &Path) -> Result {
    let store = SettingsStore::new(settings);
    let mut changes = store.subscribe();
    store.update(|settings| {
        if let Some(billing_day) = args.set_billing_day {
            settings.billing_day = billing_day;
        }
        if let Some(interval) = args.set_interval {
            settings.interval = interval;
        }
    });
    if changes.has_changed()? {
        store.save(path)?;
        info!(path = %path.display(), "saved");
    }
    println!("{}", build_settings_table(*changes.borrow_and_update()));
    Ok(())
}
