//! Browser-backed initialisation environment.

use crate::core::auth::AuthenticatedUser;
use crate::core::bootstrap::InitEnvironment;
use crate::core::effects::FetchError;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use crate::services::api::ForumApiClient;
use async_trait::async_trait;
use forum_config::{AppConfig, ConfigInputs};
use gloo::utils::window;

pub(crate) struct BrowserEnvironment;

#[async_trait(?Send)]
impl InitEnvironment for BrowserEnvironment {
    fn config_inputs(&self) -> ConfigInputs {
        ConfigInputs::from_build_env()
    }

    async fn authenticated_user(
        &self,
        config: &AppConfig,
    ) -> Result<Option<AuthenticatedUser>, FetchError> {
        ForumApiClient::new(config.lms_base_url.as_str())
            .fetch_current_user()
            .await
    }

    fn locale(&self) -> LocaleCode {
        window()
            .navigator()
            .language()
            .and_then(|tag| LocaleCode::from_lang_tag(&tag))
            .unwrap_or(DEFAULT_LOCALE)
    }

    fn current_href(&self) -> String {
        window().location().href().unwrap_or_default()
    }
}
