//! Top navigation between the course-wide listings.

use crate::components::nav_link::{NavLink, scoped_href};
use crate::core::routes::{RouteName, RouteParams, matches_any};
use crate::core::view::DiscussionContext;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;
use yew_router::prelude::use_location;

struct NavItem {
    target: RouteName,
    active_on: &'static [RouteName],
    label_key: &'static str,
    fallback: &'static str,
}

const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        target: RouteName::TopicsAll,
        active_on: &[RouteName::Topics],
        label_key: "nav.all_topics",
        fallback: "All topics",
    },
    NavItem {
        target: RouteName::AllPosts,
        active_on: &[RouteName::AllPosts],
        label_key: "nav.all_posts",
        fallback: "All posts",
    },
    NavItem {
        target: RouteName::MyPosts,
        active_on: &[RouteName::MyPosts],
        label_key: "nav.my_posts",
        fallback: "My posts",
    },
];

#[function_component(NavigationBar)]
pub(crate) fn navigation_bar() -> Html {
    let ctx = use_context::<DiscussionContext>().unwrap_or_default();
    let bundle =
        use_context::<TranslationBundle>().unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let pathname = use_location()
        .map(|location| location.path().to_string())
        .unwrap_or_default();
    let params = RouteParams {
        course_id: ctx.course_id.clone(),
        ..RouteParams::default()
    };

    html! {
        <nav class="nav nav-pills py-2 px-3">
            { for NAV_ITEMS.iter().filter_map(|item| {
                let path = item.target.path(&params)?;
                let class = if matches_any(item.active_on, &pathname) {
                    classes!("nav-link", "active")
                } else {
                    classes!("nav-link")
                };
                Some(html! {
                    <NavLink to={scoped_href(&path, &ctx)} class={class}>
                        {bundle.text(item.label_key, item.fallback)}
                    </NavLink>
                })
            }) }
        </nav>
    }
}
