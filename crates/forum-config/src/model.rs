//! Raw build-time inputs and the merged configuration they produce.

use tracing::warn;

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};

/// Unvalidated configuration values supplied by the build environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigInputs {
    /// `LEARNING_BASE_URL`: origin of the learning MFE, used for unit links.
    pub learning_base_url: Option<String>,
    /// `LMS_BASE_URL`: origin of the LMS serving the discussion APIs.
    pub lms_base_url: Option<String>,
    /// `POST_MARK_AS_READ_DELAY`: milliseconds before an opened post is marked as read.
    pub post_mark_as_read_delay: Option<String>,
}

impl ConfigInputs {
    /// Capture inputs baked in at compile time, the wasm equivalent of a bundler's `process.env`.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self {
            learning_base_url: option_env!("LEARNING_BASE_URL").map(ToString::to_string),
            lms_base_url: option_env!("LMS_BASE_URL").map(ToString::to_string),
            post_mark_as_read_delay: option_env!("POST_MARK_AS_READ_DELAY").map(ToString::to_string),
        }
    }
}

/// Configuration merged once per process and shared read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Learning MFE origin, when configured.
    pub learning_base_url: Option<String>,
    /// LMS origin without a trailing slash.
    pub lms_base_url: String,
    /// Mark-as-read delay in milliseconds; always positive.
    pub post_mark_as_read_delay_ms: u64,
}

impl AppConfig {
    /// Merge raw inputs into a usable configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when the LMS origin is not an http(s) URL.
    pub fn from_inputs(inputs: &ConfigInputs) -> ConfigResult<Self> {
        let lms_base_url = normalize_url(inputs.lms_base_url.as_deref())
            .unwrap_or_else(|| defaults::LMS_BASE_URL.to_string());
        if !(lms_base_url.starts_with("http://") || lms_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidField {
                field: "LMS_BASE_URL",
                value: Some(lms_base_url),
                reason: "must be an http or https origin",
            });
        }
        Ok(Self {
            learning_base_url: normalize_url(inputs.learning_base_url.as_deref()),
            lms_base_url,
            post_mark_as_read_delay_ms: parse_delay(inputs.post_mark_as_read_delay.as_deref()),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            learning_base_url: None,
            lms_base_url: defaults::LMS_BASE_URL.to_string(),
            post_mark_as_read_delay_ms: defaults::POST_MARK_AS_READ_DELAY_MS,
        }
    }
}

fn normalize_url(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse the mark-as-read delay, substituting the default for unset or unusable values.
#[must_use]
pub fn parse_delay(value: Option<&str>) -> u64 {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return defaults::POST_MARK_AS_READ_DELAY_MS;
    };
    match raw.parse::<u64>() {
        Ok(delay) if delay > 0 => delay,
        _ => {
            warn!(
                value = raw,
                fallback = defaults::POST_MARK_AS_READ_DELAY_MS,
                "ignoring invalid POST_MARK_AS_READ_DELAY"
            );
            defaults::POST_MARK_AS_READ_DELAY_MS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_defaults_when_unset_or_invalid() {
        assert_eq!(parse_delay(None), 2_000);
        assert_eq!(parse_delay(Some("")), 2_000);
        assert_eq!(parse_delay(Some("  ")), 2_000);
        assert_eq!(parse_delay(Some("soon")), 2_000);
        assert_eq!(parse_delay(Some("-5")), 2_000);
        assert_eq!(parse_delay(Some("0")), 2_000);
        assert_eq!(parse_delay(Some("750")), 750);
        assert_eq!(parse_delay(Some(" 1500 ")), 1_500);
    }

    #[test]
    fn urls_are_trimmed_and_blank_means_unset() {
        let config = AppConfig::from_inputs(&ConfigInputs {
            learning_base_url: Some(" https://learning.example.com/ ".to_string()),
            lms_base_url: Some("https://lms.example.com//".to_string()),
            post_mark_as_read_delay: None,
        })
        .expect("valid inputs");
        assert_eq!(
            config.learning_base_url.as_deref(),
            Some("https://learning.example.com")
        );
        assert_eq!(config.lms_base_url, "https://lms.example.com");

        let blank = AppConfig::from_inputs(&ConfigInputs {
            learning_base_url: Some("   ".to_string()),
            ..ConfigInputs::default()
        })
        .expect("defaults apply");
        assert_eq!(blank.learning_base_url, None);
        assert_eq!(blank, AppConfig::default());
    }

    #[test]
    fn lms_origin_must_be_http() {
        let err = AppConfig::from_inputs(&ConfigInputs {
            lms_base_url: Some("ftp://lms".to_string()),
            ..ConfigInputs::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "LMS_BASE_URL",
                ..
            }
        ));
    }
}
