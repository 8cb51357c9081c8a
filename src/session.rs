//! Presentation-facing state around the pure engine.

mod comparison;
mod navigation;
mod sequence;

pub use self::{
    comparison::{Comparison, ComparisonOutcome, PipelineOutcome},
    navigation::NavigationState,
    sequence::{RequestSequence, Ticket},
};
