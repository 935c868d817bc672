//! Application root: initialisation, mounting, and shared contexts.

use crate::components::chrome::{SiteFooter, SiteHeader};
use crate::components::error_page::{ErrorPage, ErrorPageProps};
use crate::components::home::ForumHome;
use crate::core::auth::AuthenticatedUser;
use crate::core::bootstrap::{InitError, Initialized, MountSlot, RootView, initialize};
use crate::i18n::TranslationBundle;
use api::ApiCtx;
use environment::BrowserEnvironment;
use forum_config::AppConfig;
use forum_telemetry::{LoggingConfig, init_logging};
use gloo::utils::{document, window};
use std::rc::Rc;
use tracing::{info, warn};
use yew::prelude::*;
use yew_router::prelude::*;

pub(crate) mod api;
mod environment;
pub(crate) mod viewport;

static MOUNT: MountSlot = MountSlot::new();

/// Signed-in user plus the merged configuration.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SessionCtx {
    pub(crate) user: AuthenticatedUser,
    pub(crate) config: AppConfig,
}

#[derive(Properties, PartialEq)]
pub(crate) struct ForumAppProps {
    pub(crate) ready: Rc<Initialized>,
}

#[function_component(ForumApp)]
pub(crate) fn forum_app(props: &ForumAppProps) -> Html {
    let api_ctx = {
        let base = props.ready.config.lms_base_url.clone();
        use_memo(move |_| ApiCtx::new(base), ())
    };
    let session = {
        let ready = Rc::clone(&props.ready);
        use_memo(
            move |_| SessionCtx {
                user: ready.user.clone(),
                config: ready.config.clone(),
            },
            (),
        )
    };
    let bundle = props.ready.messages.clone();
    let dir = if bundle.rtl() { "rtl" } else { "ltr" };

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <ContextProvider<SessionCtx> context={(*session).clone()}>
                <ContextProvider<TranslationBundle> context={bundle}>
                    <div class="forum-app d-flex flex-column min-vh-100" dir={dir}>
                        <SiteHeader />
                        <BrowserRouter>
                            <ForumHome />
                        </BrowserRouter>
                        <SiteFooter />
                    </div>
                </ContextProvider<TranslationBundle>>
            </ContextProvider<SessionCtx>>
        </ContextProvider<ApiCtx>>
    }
}

/// Entrypoint for wasm32 targets.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = init_logging(&LoggingConfig::default()) {
        gloo::console::warn!(format!("logging unavailable: {err}"));
    }
    wasm_bindgen_futures::spawn_local(async {
        let result = initialize(&BrowserEnvironment, forum_config::global()).await;
        if let Err(InitError::AuthenticationRequired { login_url }) = &result {
            info!(%login_url, "redirecting to login");
            if window().location().set_href(login_url).is_err() {
                warn!(%login_url, "login redirect was refused");
            }
        }
        mount(RootView::from_result(result));
    });
}

fn mount(view: RootView) {
    if let Err(existing) = MOUNT.claim(view.kind()) {
        warn!(?existing, "root already mounted");
        return;
    }
    let root = document().get_element_by_id("root");
    match (view, root) {
        (RootView::App(ready), Some(root)) => {
            yew::Renderer::<ForumApp>::with_root_and_props(
                root,
                ForumAppProps {
                    ready: Rc::from(ready),
                },
            )
            .render();
        }
        (RootView::App(ready), None) => {
            yew::Renderer::<ForumApp>::with_props(ForumAppProps {
                ready: Rc::from(ready),
            })
            .render();
        }
        (RootView::Error { message }, Some(root)) => {
            yew::Renderer::<ErrorPage>::with_root_and_props(root, ErrorPageProps { message })
                .render();
        }
        (RootView::Error { message }, None) => {
            yew::Renderer::<ErrorPage>::with_props(ErrorPageProps { message }).render();
        }
    }
}
