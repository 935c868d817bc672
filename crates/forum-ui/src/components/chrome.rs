//! Site header and footer around the forum.

use crate::i18n::TranslationBundle;
use yew::prelude::*;

#[function_component(SiteHeader)]
pub(crate) fn site_header() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(crate::i18n::DEFAULT_LOCALE));
    html! {
        <header class="site-header border-bottom px-4 py-2">
            <a class="visually-hidden-focusable" href="#main">
                {bundle.text("header.skip", "Skip to main content")}
            </a>
            <span class="h4 m-0">{bundle.text("header.title", "Discussions")}</span>
        </header>
    }
}

#[function_component(SiteFooter)]
pub(crate) fn site_footer() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(crate::i18n::DEFAULT_LOCALE));
    html! {
        <footer class="site-footer border-top mt-auto px-4 py-3 small">
            <span class="me-3">{bundle.text("footer.help", "Help Center")}</span>
            <span>{bundle.text("footer.privacy", "Privacy Policy")}</span>
        </footer>
    }
}
