use std::{fmt::Debug, fs, path::Path};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{
    core::{BillingDay, IntervalKind},
    prelude::*,
};

/// User preferences for the calculation periods.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub billing_day: BillingDay,

    #[serde(default)]
    pub interval: IntervalKind,
}

impl Settings {
    /// Read the settings, falling back to the defaults when the file does not exist.
    #[instrument(name = "Reading the settings…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("failed to parse `{}`", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    #[instrument(skip(self), name = "Writing the settings…")]
    pub fn write_to<P: AsRef<Path> + Debug>(&self, path: P) -> Result {
        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }
}

/// Shared settings with change notifications.
#[derive(Debug)]
pub struct SettingsStore(watch::Sender<Settings>);

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self(watch::Sender::new(settings))
    }

    pub fn get(&self) -> Settings {
        *self.0.borrow()
    }

    /// Receiver which is notified on every actual change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.0.subscribe()
    }

    /// Modify the settings, notifying the subscribers only if the value has changed.
    ///
    /// Returns whether the settings have changed.
    pub fn update(&self, modify: impl FnOnce(&mut Settings)) -> bool {
        let is_changed = self.0.send_if_modified(|settings| {
            let old = *settings;
            modify(settings);
            *settings != old
        });
        if is_changed {
            info!(settings = ?self.get(), "updated");
        }
        is_changed
    }

    pub fn save<P: AsRef<Path> + Debug>(&self, path: P) -> Result {
        self.get().write_to(path)
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
