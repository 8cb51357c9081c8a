use crate::api::TariffId;

/// Errors surfaced by the library.
///
/// Having no data for a period is not an error: it is a regular [`None`] resolution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured billing day does not exist in any month.
    #[error("billing day `{0}` is out of range, expected 1 to 31")]
    BillingDayOutOfRange(i64),

    /// A bounded range whose start is not before its end.
    #[error("malformed range: start `{start}` is not before end `{end}`")]
    MalformedRange { start: String, end: String },

    /// A tariff validity collaborator failed, the caller may retry.
    #[error("failed to look up the validity of tariff `{tariff_id}`")]
    ValidityLookup {
        tariff_id: TariffId,

        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    /// Configuration and input errors are programming bugs, lookups are recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::ValidityLookup { .. })
    }
}
