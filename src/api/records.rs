use std::{fmt::Debug, fs, path::Path};

use serde::Deserialize;

use crate::{
    api::{ConsumptionLog, ConsumptionRecord, TariffAgreement},
    prelude::*,
};

/// Exported consumption together with the two tariff agreements to compare.
#[derive(Debug, Deserialize)]
pub struct Records {
    pub account: TariffAgreement,
    pub compare: TariffAgreement,

    #[serde(default)]
    pub consumption: Vec<ConsumptionRecord>,
}

impl Records {
    #[instrument(name = "Reading the records…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse `{}`", path.display()))
    }

    /// Split into the validated consumption log and the agreements.
    pub fn into_parts(self) -> Result<(ConsumptionLog, TariffAgreement, TariffAgreement)> {
        let log = ConsumptionLog::try_from(self.consumption)?;
        info!(n_records = log.len(), "loaded the consumption");
        Ok((log, self.account, self.compare))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() -> Result {
        let records: Records = toml::from_str(
            r#"
                [account]
                tariff_id = "fixed-2024"
                rate_per_kwh = 0.28
                valid_from = "2024-01-01T00:00:00+01:00"

                [compare]
                tariff_id = "dynamic"
                rate_per_kwh = 0.21

                [[consumption]]
                start = "2024-01-10T08:00:00+01:00"
                end = "2024-01-10T09:00:00+01:00"
                kwh = 1.5

                [[consumption]]
                start = "2024-01-09T08:00:00+01:00"
                end = "2024-01-09T09:00:00+01:00"
                kwh = 0.5
            "#,
        )?;
        assert!(!records.account.is_manual());
        assert!(records.compare.is_manual());
        let (log, _, _) = records.into_parts()?;
        assert_eq!(log.len(), 2);
        assert_eq!(log.daily_dates().len(), 2);
        Ok(())
    }

    #[test]
    fn test_malformed_record() -> Result {
        let records: Records = toml::from_str(
            r#"
                [account]
                tariff_id = "fixed"
                rate_per_kwh = 0.28

                [compare]
                tariff_id = "dynamic"
                rate_per_kwh = 0.21

                [[consumption]]
                start = "2024-01-10T09:00:00+01:00"
                end = "2024-01-10T08:00:00+01:00"
                kwh = 1.5
            "#,
        )?;
        assert!(records.into_parts().is_err());
        Ok(())
    }
}
