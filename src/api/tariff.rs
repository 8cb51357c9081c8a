use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Local, Months};
use serde::{Deserialize, Serialize};

use crate::{
    api::Clock,
    error::Error,
    ops::OpenRange,
    prelude::*,
    quantity::rate::KilowattHourRate,
};

#[derive(
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
    derive_more::From,
)]
#[serde(transparent)]
pub struct TariffId(String);

impl From<&str> for TariffId {
    fn from(tariff_id: &str) -> Self {
        Self(tariff_id.to_owned())
    }
}

impl AsRef<str> for TariffId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Tariff plan the costs are calculated with.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tariff {
    #[serde(rename = "tariff_id")]
    pub id: TariffId,

    #[serde(rename = "rate_per_kwh")]
    pub rate: KilowattHourRate,
}

/// Tariff together with its validity window.
///
/// An agreement without `valid_from` is a manually entered plan, which is valid for a year
/// around the current time.
#[derive(Clone, Debug, Deserialize, Serialize, bon::Builder)]
pub struct TariffAgreement {
    #[serde(flatten)]
    pub tariff: Tariff,

    #[serde(default)]
    pub valid_from: Option<DateTime<Local>>,

    #[serde(default)]
    pub valid_to: Option<DateTime<Local>>,
}

impl TariffAgreement {
    #[must_use]
    pub const fn is_manual(&self) -> bool {
        self.valid_from.is_none()
    }

    pub fn validity(&self, now: DateTime<Local>) -> OpenRange<DateTime<Local>> {
        match self.valid_from {
            Some(valid_from) => OpenRange::new(Some(valid_from), self.valid_to),
            None => OpenRange::new(
                now.checked_sub_months(Months::new(12)),
                now.checked_add_months(Months::new(12)),
            ),
        }
    }
}

#[async_trait]
pub trait TariffValidity: Sync {
    /// Fetch the window in which the tariff may be applied.
    async fn get_validity(&self, tariff_id: &TariffId)
    -> Result<OpenRange<DateTime<Local>>, Error>;
}

/// Known tariff agreements.
pub struct TariffCatalog<C> {
    agreements: HashMap<TariffId, TariffAgreement>,
    clock: C,
}

impl<C: Clock> TariffCatalog<C> {
    pub fn new(agreements: impl IntoIterator<Item = TariffAgreement>, clock: C) -> Self {
        Self {
            agreements: agreements
                .into_iter()
                .map(|agreement| (agreement.tariff.id.clone(), agreement))
                .collect(),
            clock,
        }
    }
}

#[async_trait]
impl<C: Clock> TariffValidity for TariffCatalog<C> {
    #[instrument(skip_all, fields(tariff_id = %tariff_id))]
    async fn get_validity(
        &self,
        tariff_id: &TariffId,
    ) -> Result<OpenRange<DateTime<Local>>, Error> {
        let agreement = self.agreements.get(tariff_id).ok_or_else(|| Error::ValidityLookup {
            tariff_id: tariff_id.clone(),
            source: anyhow!("the tariff is not in the catalog"),
        })?;
        let validity = agreement.validity(self.clock.now());
        debug!(?validity, is_manual = agreement.is_manual(), "looked up");
        Ok(validity)
    }
}
