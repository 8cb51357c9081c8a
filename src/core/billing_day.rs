use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Day of month that starts a billing month, `1..=31`.
///
/// Months shorter than the billing day start on their last day instead.
#[must_use]
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Deserialize,
    Serialize,
    derive_more::Display,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct BillingDay(u8);

impl BillingDay {
    pub const FIRST: Self = Self(1);

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for BillingDay {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<i64> for BillingDay {
    type Error = Error;

    fn try_from(day: i64) -> Result<Self, Self::Error> {
        match u8::try_from(day) {
            Ok(day @ 1..=31) => Ok(Self(day)),
            _ => Err(Error::BillingDayOutOfRange(day)),
        }
    }
}

impl From<BillingDay> for u8 {
    fn from(billing_day: BillingDay) -> Self {
        billing_day.0
    }
}

impl FromStr for BillingDay {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::try_from(i64::from_str(s)?)?)
    }
}
