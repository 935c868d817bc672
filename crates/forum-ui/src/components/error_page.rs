//! Full-page surface shown when initialisation fails.

use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ErrorPageProps {
    pub(crate) message: String,
}

#[function_component(ErrorPage)]
pub(crate) fn error_page(props: &ErrorPageProps) -> Html {
    let bundle = use_memo(|_| TranslationBundle::new(DEFAULT_LOCALE), ());
    html! {
        <div class="error-page container-fluid d-flex flex-column align-items-center py-5" role="alert">
            <h1 class="h3">{bundle.text("error.title", "Something went wrong")}</h1>
            <p class="text-muted">{props.message.clone()}</p>
        </div>
    }
}
