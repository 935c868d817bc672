//! Bar holding the forum title and the "add a post" action.

use crate::components::nav_link::scoped_href;
use crate::core::routes::RouteName;
use crate::core::store::{ForumStore, show_post_editor};
use crate::core::view::DiscussionContext;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;
use yew_router::history::{BrowserHistory, History};
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Properties, PartialEq)]
pub(crate) struct PostActionsBarProps {
    pub(crate) in_context: bool,
}

#[function_component(PostActionsBar)]
pub(crate) fn post_actions_bar(props: &PostActionsBarProps) -> Html {
    let ctx = use_context::<DiscussionContext>().unwrap_or_default();
    let bundle =
        use_context::<TranslationBundle>().unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let posting_enabled = use_selector(|store: &ForumStore| store.config.config.posting_enabled);

    let on_add = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            Dispatch::<ForumStore>::new().reduce_mut(show_post_editor);
            if let Some(path) = RouteName::NewPost.path(&ctx.params()) {
                BrowserHistory::new().push(scoped_href(&path, &ctx));
            }
        })
    };

    html! {
        <div class="d-flex flex-row align-items-center ms-auto px-3 py-2">
            { if props.in_context {
                html! {}
            } else {
                html! { <h2 class="h5 m-0 me-3">{bundle.text("header.title", "Discussions")}</h2> }
            } }
            { if *posting_enabled && ctx.course_id.is_some() {
                html! {
                    <button type="button" class="btn btn-primary btn-sm" onclick={on_add}>
                        {bundle.text("actions.add_post", "Add a post")}
                    </button>
                }
            } else {
                html! {}
            } }
        </div>
    }
}
