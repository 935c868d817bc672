//! Breadcrumb strips for topic and category listings.

use crate::components::nav_link::{NavLink, scoped_href};
use crate::core::routes::{RouteName, RouteParams};
use crate::core::store::ForumStore;
use crate::core::view::DiscussionContext;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::Topic;
use yew::prelude::*;
use yewdux::prelude::use_selector;

fn current_topic(ctx: &DiscussionContext, topics: &[Topic]) -> Option<Topic> {
    let topic_id = ctx.topic_id.as_deref()?;
    topics.iter().find(|topic| topic.id == topic_id).cloned()
}

fn root_crumb(ctx: &DiscussionContext, bundle: &TranslationBundle) -> Html {
    let params = RouteParams {
        course_id: ctx.course_id.clone(),
        ..RouteParams::default()
    };
    let label = bundle.text("breadcrumb.all_topics", "All topics");
    RouteName::TopicsAll.path(&params).map_or_else(
        || html! { <li class="breadcrumb-item">{label.clone()}</li> },
        |path| {
            html! {
                <li class="breadcrumb-item">
                    <NavLink to={scoped_href(&path, ctx)}>{label.clone()}</NavLink>
                </li>
            }
        },
    )
}

fn leaf_crumb(label: &str) -> Html {
    html! { <li class="breadcrumb-item active" aria-current="page">{label.to_string()}</li> }
}

/// Topic breadcrumbs for providers other than the legacy one.
#[function_component(BreadcrumbMenu)]
pub(crate) fn breadcrumb_menu() -> Html {
    let ctx = use_context::<DiscussionContext>().unwrap_or_default();
    let bundle =
        use_context::<TranslationBundle>().unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let topics = use_selector(|store: &ForumStore| store.topics.topics.clone());
    let topic = current_topic(&ctx, &topics);

    html! {
        <nav aria-label="breadcrumb" class="px-4 py-2">
            <ol class="breadcrumb m-0">
                {root_crumb(&ctx, &bundle)}
                { topic.map_or_else(|| html! {}, |topic| leaf_crumb(&topic.name)) }
            </ol>
        </nav>
    }
}

/// Category then topic breadcrumbs of the legacy provider.
#[function_component(LegacyBreadcrumbMenu)]
pub(crate) fn legacy_breadcrumb_menu() -> Html {
    let ctx = use_context::<DiscussionContext>().unwrap_or_default();
    let bundle =
        use_context::<TranslationBundle>().unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let topics = use_selector(|store: &ForumStore| store.topics.topics.clone());
    let topic = current_topic(&ctx, &topics);
    let category = ctx
        .category
        .clone()
        .or_else(|| topic.as_ref().and_then(|topic| topic.category.clone()));

    let category_crumb = category.map_or_else(|| html! {}, |category| {
        if topic.is_none() {
            return leaf_crumb(&category);
        }
        let params = RouteParams {
            course_id: ctx.course_id.clone(),
            category: Some(category.clone()),
            ..RouteParams::default()
        };
        RouteName::TopicCategory.path(&params).map_or_else(
            || leaf_crumb(&category),
            |path| {
                html! {
                    <li class="breadcrumb-item">
                        <NavLink to={scoped_href(&path, &ctx)}>{category.clone()}</NavLink>
                    </li>
                }
            },
        )
    });

    html! {
        <nav aria-label="breadcrumb" class="px-4 py-2">
            <ol class="breadcrumb m-0">
                {root_crumb(&ctx, &bundle)}
                {category_crumb}
                { topic.map_or_else(|| html! {}, |topic| leaf_crumb(&topic.name)) }
            </ol>
        </nav>
    }
}
