use serde::{Deserialize, Serialize};

/// Calendar interval the costs are shown for.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Deserialize,
    Serialize,
    clap::ValueEnum,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum IntervalKind {
    /// Local calendar day.
    Daily,

    /// Monday to Monday, the billing day is ignored.
    Weekly,

    /// Billing day to billing day.
    #[default]
    Monthly,

    /// Three billing months aligned to January, April, July, and October.
    Quarterly,
}

impl IntervalKind {
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Quarterly];

    /// Whether the period starts on the billing day.
    #[must_use]
    pub const fn is_anchored(self) -> bool {
        matches!(self, Self::Monthly | Self::Quarterly)
    }
}
