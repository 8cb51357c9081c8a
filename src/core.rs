mod availability;
mod billing_day;
mod boundary;
pub mod calendar;
mod date_range;
pub mod intersect;
mod interval_kind;
mod navigator;
mod overlap;

pub use self::{
    availability::{AvailabilityRange, Provenance},
    billing_day::BillingDay,
    boundary::IntervalBoundary,
    date_range::DateRange,
    intersect::Intersect,
    interval_kind::IntervalKind,
    navigator::{Direction, IntervalNavigator},
    overlap::{OverlapResult, resolve_overlap},
};
