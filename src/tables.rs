use chrono::{DateTime, Local, NaiveDate};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use tariff_periods::{
    api::Tariff,
    core::{IntervalBoundary, OverlapResult},
    quantity::energy::KilowattHours,
    session::{ComparisonOutcome, PipelineOutcome},
    settings::Settings,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn format_instant(instant: DateTime<Local>) -> String {
    instant.format("%Y-%m-%d %H:%M").to_string()
}

fn flag(value: bool) -> Cell {
    if value { Cell::new("yes").fg(Color::DarkYellow) } else { Cell::new("no").fg(Color::Green) }
}

pub fn build_boundary_table(boundary: &IntervalBoundary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Interval", "Billing day", "Start", "End"]);
    table.add_row(vec![
        Cell::new(boundary.kind),
        if boundary.kind.is_anchored() {
            Cell::new(boundary.billing_day).set_alignment(CellAlignment::Right)
        } else {
            Cell::new("-").add_attribute(Attribute::Dim)
        },
        Cell::new(format_instant(boundary.range.start)),
        Cell::new(format_instant(boundary.range.end)).add_attribute(Attribute::Dim),
    ]);
    table
}

pub fn build_overlap_table(overlap: &OverlapResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Start", "End"]);
    table.add_row(vec![
        Cell::new("Requested").add_attribute(Attribute::Bold),
        Cell::new(format_instant(overlap.requested.start)),
        Cell::new(format_instant(overlap.requested.end)).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new("Actual").add_attribute(Attribute::Bold),
        Cell::new(format_instant(overlap.actual.start)),
        Cell::new(format_instant(overlap.actual.end)).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new("Partial").add_attribute(Attribute::Bold),
        flag(overlap.is_partial),
    ]);
    table.add_row(vec![
        Cell::new("Shifted").add_attribute(Attribute::Bold),
        flag(overlap.is_shifted),
    ]);
    table
}

pub fn build_comparison_table(
    outcome: &ComparisonOutcome,
    account: &Tariff,
    compare: &Tariff,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Tariff", "Rate", "Start", "End", "Partial", "Usage", "Cost"]);
    for (name, tariff, outcome) in
        [("Account", account, &outcome.account), ("Compare", compare, &outcome.compare)]
    {
        let mut row = vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(&tariff.id),
            Cell::new(tariff.rate).set_alignment(CellAlignment::Right),
        ];
        match outcome {
            PipelineOutcome::Resolved(period_cost) => row.extend([
                Cell::new(format_instant(period_cost.period.start)),
                Cell::new(format_instant(period_cost.period.end)).add_attribute(Attribute::Dim),
                flag(period_cost.is_partial),
                Cell::new(period_cost.consumption).set_alignment(CellAlignment::Right),
                Cell::new(period_cost.cost).set_alignment(CellAlignment::Right),
            ]),
            PipelineOutcome::NoData => {
                row.push(Cell::new("no data for this period").fg(Color::Red));
            }
        }
        table.add_row(row);
    }
    table
}

pub fn build_daily_table(totals: &[(NaiveDate, KilowattHours)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Usage"]);
    for (date, consumption) in totals {
        table.add_row(vec![
            Cell::new(date),
            Cell::new(consumption).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_settings_table(settings: Settings) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Billing day", "Interval"]);
    table.add_row(vec![
        Cell::new(settings.billing_day).set_alignment(CellAlignment::Right),
        Cell::new(settings.interval),
    ]);
    table
}
