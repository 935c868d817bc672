//! Topic listing in the sidebar.

use crate::components::nav_link::{NavLink, scoped_href};
use crate::core::routes::{RouteName, RouteParams};
use crate::core::store::{ForumStore, LoadStatus};
use crate::core::view::DiscussionContext;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(TopicsView)]
pub(crate) fn topics_view() -> Html {
    let ctx = use_context::<DiscussionContext>().unwrap_or_default();
    let bundle =
        use_context::<TranslationBundle>().unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let topics = use_selector(|store: &ForumStore| store.topics.topics.clone());
    let status = use_selector(|store: &ForumStore| store.topics.status.clone());

    let body = match (&*status, topics.is_empty()) {
        (LoadStatus::Idle | LoadStatus::Loading, true) => html! {
            <p class="text-muted p-3">{bundle.text("topics.loading", "Loading topics…")}</p>
        },
        (LoadStatus::Failed(_), true) => html! {
            <p class="text-danger p-3">{bundle.text("topics.failed", "Topics could not be loaded.")}</p>
        },
        (_, true) => html! {
            <p class="text-muted p-3">{bundle.text("topics.empty", "No topics yet.")}</p>
        },
        (_, false) => html! {
            <ul class="list-group list-group-flush">
                { for topics.iter().map(|topic| {
                    let params = RouteParams {
                        course_id: ctx.course_id.clone(),
                        topic_id: Some(topic.id.clone()),
                        ..RouteParams::default()
                    };
                    let href = RouteName::Posts
                        .path(&params)
                        .map(|path| scoped_href(&path, &ctx))
                        .unwrap_or_default();
                    let active = ctx.topic_id.as_deref() == Some(topic.id.as_str());
                    html! {
                        <li class={classes!("list-group-item", active.then_some("active"))}>
                            <NavLink to={href}>{topic.name.clone()}</NavLink>
                            { topic.category.as_ref().map_or_else(|| html! {}, |category| html! {
                                <small class="d-block text-muted">{category.clone()}</small>
                            }) }
                        </li>
                    }
                }) }
            </ul>
        },
    };

    html! {
        <section class="topics-view d-flex flex-column">
            <h2 class="h6 px-3 pt-3">{bundle.text("topics.heading", "Topics")}</h2>
            {body}
        </section>
    }
}
