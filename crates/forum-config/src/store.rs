//! Write-once configuration store.
//!
//! # Design
//! - Configuration is merged exactly once per process; later merges are rejected.
//! - Readers get a `&'static`-style shared reference and never observe partial writes.

use once_cell::sync::OnceCell;
use tracing::info;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppConfig, ConfigInputs};

/// Holds the merged configuration once it has been written.
#[derive(Debug, Default)]
pub struct ConfigStore {
    cell: OnceCell<AppConfig>,
}

impl ConfigStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Merge the inputs and publish the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyMerged`] on every call after the first successful one, and
    /// [`ConfigError::InvalidField`] when the inputs cannot be merged.
    pub fn merge(&self, inputs: &ConfigInputs) -> ConfigResult<&AppConfig> {
        if self.cell.get().is_some() {
            return Err(ConfigError::AlreadyMerged);
        }
        let merged = AppConfig::from_inputs(inputs)?;
        self.cell
            .set(merged)
            .map_err(|_| ConfigError::AlreadyMerged)?;
        let config = self.get()?;
        info!(
            lms_base_url = %config.lms_base_url,
            learning_base_url = ?config.learning_base_url,
            post_mark_as_read_delay_ms = config.post_mark_as_read_delay_ms,
            "configuration merged"
        );
        Ok(config)
    }

    /// Read the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotMerged`] before [`ConfigStore::merge`] has succeeded.
    pub fn get(&self) -> ConfigResult<&AppConfig> {
        self.cell.get().ok_or(ConfigError::NotMerged)
    }
}

static GLOBAL: ConfigStore = ConfigStore::new();

/// The process-global store.
#[must_use]
pub fn global() -> &'static ConfigStore {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_writes_exactly_once() {
        let store = ConfigStore::new();
        assert_eq!(store.get().unwrap_err(), ConfigError::NotMerged);

        let first = ConfigInputs {
            post_mark_as_read_delay: Some("900".to_string()),
            ..ConfigInputs::default()
        };
        let merged = store.merge(&first).expect("first merge succeeds");
        assert_eq!(merged.post_mark_as_read_delay_ms, 900);

        let second = ConfigInputs {
            post_mark_as_read_delay: Some("100".to_string()),
            ..ConfigInputs::default()
        };
        assert_eq!(store.merge(&second).unwrap_err(), ConfigError::AlreadyMerged);
        assert_eq!(
            store.get().expect("still readable").post_mark_as_read_delay_ms,
            900
        );
    }

    #[test]
    fn failed_merge_leaves_store_empty() {
        let store = ConfigStore::new();
        let bad = ConfigInputs {
            lms_base_url: Some("lms.local".to_string()),
            ..ConfigInputs::default()
        };
        assert!(store.merge(&bad).is_err());
        assert_eq!(store.get().unwrap_err(), ConfigError::NotMerged);
        assert!(store.merge(&ConfigInputs::default()).is_ok());
    }
}
