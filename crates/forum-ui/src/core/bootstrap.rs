//! Application initialisation sequence.
//!
//! # Design
//! - Steps run in order: merge configuration, require a signed-in user, build messages.
//! - The first failing step ends initialisation; its message is what the error page shows.
//! - Exactly one root (app or error page) is mounted per process, guarded by [`MountSlot`].

use crate::core::auth::{AuthenticatedUser, login_url};
use crate::core::effects::FetchError;
use crate::i18n::{LocaleCode, TranslationBundle};
use async_trait::async_trait;
use forum_config::{AppConfig, ConfigError, ConfigInputs, ConfigStore};
use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::{error, info};

/// Host facilities the bootstrapper depends on.
#[async_trait(?Send)]
pub trait InitEnvironment {
    /// Raw configuration inputs.
    fn config_inputs(&self) -> ConfigInputs;
    /// The signed-in user, or `None` for an anonymous visitor.
    async fn authenticated_user(
        &self,
        config: &AppConfig,
    ) -> Result<Option<AuthenticatedUser>, FetchError>;
    /// Preferred locale.
    fn locale(&self) -> LocaleCode;
    /// Current page address, used as the post-login return target.
    fn current_href(&self) -> String;
}

/// Reasons initialisation can fail.
#[derive(Debug, Error)]
pub enum InitError {
    /// Configuration could not be merged.
    #[error("configuration failed: {0}")]
    Config(#[from] ConfigError),
    /// The visitor is not signed in.
    #[error("you must sign in to use discussions")]
    AuthenticationRequired {
        /// Where to send the visitor to sign in.
        login_url: String,
    },
    /// The user lookup itself failed.
    #[error("could not load the signed-in user: {0}")]
    User(#[from] FetchError),
}

/// Everything the root view needs once initialisation succeeded.
#[derive(Clone, Debug, PartialEq)]
pub struct Initialized {
    /// Merged configuration.
    pub config: AppConfig,
    /// Signed-in user.
    pub user: AuthenticatedUser,
    /// Merged message catalogs for the chosen locale.
    pub messages: TranslationBundle,
}

/// Run the initialisation sequence against `store`.
///
/// # Errors
///
/// Returns the first failing step as an [`InitError`].
pub async fn initialize<E>(env: &E, store: &ConfigStore) -> Result<Initialized, InitError>
where
    E: InitEnvironment + ?Sized,
{
    let config = store.merge(&env.config_inputs())?.clone();
    let user = match env.authenticated_user(&config).await? {
        Some(user) if user.is_usable() => user,
        _ => {
            return Err(InitError::AuthenticationRequired {
                login_url: login_url(&config.lms_base_url, &env.current_href()),
            });
        }
    };
    let messages = TranslationBundle::new(env.locale());
    info!(username = %user.username, locale = messages.locale.code(), "initialised");
    Ok(Initialized {
        config,
        user,
        messages,
    })
}

/// Root tree chosen from the initialisation result.
#[derive(Clone, Debug, PartialEq)]
pub enum RootView {
    /// The forum application.
    App(Box<Initialized>),
    /// Full-page error surface with the failure message.
    Error {
        /// Message shown to the user.
        message: String,
    },
}

impl RootView {
    /// Map an initialisation result to the tree to mount.
    #[must_use]
    pub fn from_result(result: Result<Initialized, InitError>) -> Self {
        match result {
            Ok(ready) => Self::App(Box::new(ready)),
            Err(err) => {
                error!(error = %err, "initialisation failed");
                Self::Error {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Which kind of root this is.
    #[must_use]
    pub const fn kind(&self) -> RootKind {
        match self {
            Self::App(_) => RootKind::App,
            Self::Error { .. } => RootKind::Error,
        }
    }
}

/// Kind of root tree mounted into the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootKind {
    /// The forum application.
    App,
    /// The error page.
    Error,
}

/// At-most-once mount guard.
#[derive(Debug, Default)]
pub struct MountSlot {
    mounted: OnceCell<RootKind>,
}

impl MountSlot {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mounted: OnceCell::new(),
        }
    }

    /// Claim the slot for `kind`.
    ///
    /// # Errors
    ///
    /// Returns the kind that was mounted earlier when the slot is already taken.
    pub fn claim(&self, kind: RootKind) -> Result<(), RootKind> {
        let mut claimed = false;
        let existing = *self.mounted.get_or_init(|| {
            claimed = true;
            kind
        });
        if claimed { Ok(()) } else { Err(existing) }
    }

    /// Kind mounted so far, if any.
    #[must_use]
    pub fn mounted(&self) -> Option<RootKind> {
        self.mounted.get().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeEnv {
        user: Result<Option<AuthenticatedUser>, FetchError>,
        delay: &'static str,
    }

    #[async_trait(?Send)]
    impl InitEnvironment for FakeEnv {
        fn config_inputs(&self) -> ConfigInputs {
            ConfigInputs {
                lms_base_url: Some("https://lms.example.com".to_string()),
                post_mark_as_read_delay: Some(self.delay.to_string()),
                ..ConfigInputs::default()
            }
        }

        async fn authenticated_user(
            &self,
            _config: &AppConfig,
        ) -> Result<Option<AuthenticatedUser>, FetchError> {
            self.user.clone()
        }

        fn locale(&self) -> LocaleCode {
            LocaleCode::Fr
        }

        fn current_href(&self) -> String {
            "https://apps.example.com/c1".to_string()
        }
    }

    fn ada() -> AuthenticatedUser {
        AuthenticatedUser {
            username: "ada".to_string(),
            user_id: Some(1),
            administrator: false,
        }
    }

    #[tokio::test]
    async fn successful_init_merges_config_once() {
        let store = ConfigStore::new();
        let env = FakeEnv {
            user: Ok(Some(ada())),
            delay: "",
        };
        let ready = initialize(&env, &store).await.expect("initialised");
        assert_eq!(ready.config.post_mark_as_read_delay_ms, 2_000);
        assert_eq!(ready.user.username, "ada");
        assert_eq!(ready.messages.locale, LocaleCode::Fr);
        assert!(matches!(
            initialize(&env, &store).await,
            Err(InitError::Config(ConfigError::AlreadyMerged))
        ));
    }

    #[tokio::test]
    async fn anonymous_visitor_is_sent_to_login() {
        let env = FakeEnv {
            user: Ok(None),
            delay: "100",
        };
        let err = initialize(&env, &ConfigStore::new()).await.unwrap_err();
        match err {
            InitError::AuthenticationRequired { login_url } => assert_eq!(
                login_url,
                "https://lms.example.com/login?next=https%3A%2F%2Fapps.example.com%2Fc1"
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failures_render_the_error_page() {
        let env = FakeEnv {
            user: Err(FetchError::Status {
                status: 500,
                url: "/me".to_string(),
            }),
            delay: "100",
        };
        let view = RootView::from_result(initialize(&env, &ConfigStore::new()).await);
        assert_eq!(view.kind(), RootKind::Error);
        let RootView::Error { message } = view else {
            panic!("expected error page");
        };
        assert!(message.contains("status 500"));
    }

    #[test]
    fn only_one_root_is_mounted() {
        let slot = MountSlot::new();
        assert_eq!(slot.mounted(), None);
        assert_eq!(slot.claim(RootKind::Error), Ok(()));
        assert_eq!(slot.claim(RootKind::App), Err(RootKind::Error));
        assert_eq!(slot.claim(RootKind::Error), Err(RootKind::Error));
        assert_eq!(slot.mounted(), Some(RootKind::Error));
    }
}
