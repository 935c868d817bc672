//! Forum home: picks the sub-views for the current URL and runs the home-level reactions.
//!
//! # Design
//! - What to render comes from [`plan_view`]; this component only maps the plan onto markup.
//! - Base data reloads whenever the course changes; the previous sequence is cancelled first.
//! - A pending post-creation redirect is cleared before navigating, so it fires once.

use crate::app::SessionCtx;
use crate::app::api::ApiCtx;
use crate::app::viewport::use_viewport_width;
use crate::components::actions_bar::PostActionsBar;
use crate::components::breadcrumbs::{BreadcrumbMenu, LegacyBreadcrumbMenu};
use crate::components::navigation::NavigationBar;
use crate::core::effects::{SequenceGuard, consume_redirect, run_base_data_sequence};
use crate::core::location::Location;
use crate::core::store::{
    ForumStore, RedirectTarget, apply_base_data, begin_base_data, select_discussion_provider,
};
use crate::core::view::{
    BreadcrumbVariant, ContentView, DiscussionContext, SidebarView, ViewInputs, plan_view,
};
use crate::features::comments::view::CommentsView;
use crate::features::posts::editor::PostEditor;
use crate::features::posts::view::PostsView;
use crate::features::topics::view::TopicsView;
use tracing::{debug, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::history::{BrowserHistory, History};
use yew_router::prelude::use_location;
use yewdux::prelude::{Dispatch, use_selector};

#[function_component(ForumHome)]
pub(crate) fn forum_home() -> Html {
    let location = use_location()
        .map(|location| Location::new(location.path(), location.query_str(), location.hash()))
        .unwrap_or_default();
    let viewport_width = use_viewport_width();
    let post_editor_visible = use_selector(|store: &ForumStore| store.threads.post_editor_visible);
    let provider = use_selector(select_discussion_provider);
    let redirect = use_selector(|store: &ForumStore| store.threads.redirect_to_thread.clone());
    let session = use_context::<SessionCtx>();
    let api_ctx = use_context::<ApiCtx>();
    let guard = use_memo(|_| SequenceGuard::default(), ());

    let plan = plan_view(&ViewInputs {
        location: &location,
        post_editor_visible: *post_editor_visible,
        provider: *provider,
        viewport_width,
    });

    {
        let guard = (*guard).clone();
        let username = session.map(|session| session.user.username);
        use_effect_with_deps(
            move |course_id: &Option<String>| {
                let token = guard.begin();
                match (course_id.clone(), api_ctx, username) {
                    (Some(course_id), Some(api_ctx), Some(username)) => {
                        info!(%course_id, "loading course base data");
                        Dispatch::<ForumStore>::new()
                            .reduce_mut(|store| begin_base_data(store, &course_id));
                        spawn_local(async move {
                            let outcome = run_base_data_sequence(
                                api_ctx.client.as_ref(),
                                &course_id,
                                &username,
                                &token,
                                |step| {
                                    Dispatch::<ForumStore>::new()
                                        .reduce_mut(move |store| apply_base_data(store, step));
                                },
                            )
                            .await;
                            debug!(%course_id, ?outcome, "base data sequence finished");
                        });
                    }
                    _ => debug!("no course selected; base data not loaded"),
                }
                move || guard.cancel()
            },
            plan.context.course_id.clone(),
        );
    }

    {
        let course_id = plan.context.course_id.clone();
        let location = location.clone();
        use_effect_with_deps(
            move |redirect: &Option<RedirectTarget>| {
                if redirect.is_some() {
                    let dispatch = Dispatch::<ForumStore>::new();
                    let mut store = (*dispatch.get()).clone();
                    let target = consume_redirect(&mut store, course_id.as_deref(), &location);
                    dispatch.set(store);
                    if let Some(target) = target {
                        info!(href = %target.href(), "showing created post");
                        BrowserHistory::new().push(target.href());
                    }
                }
                || ()
            },
            (*redirect).clone(),
        );
    }

    {
        let fallback = match &plan.sidebar {
            SidebarView::Redirect(target) => Some(target.href()),
            _ => None,
        };
        use_effect_with_deps(
            move |fallback: &Option<String>| {
                if let Some(href) = fallback {
                    debug!(%href, "no listing matched; showing all topics");
                    BrowserHistory::new().replace(href.clone());
                }
                || ()
            },
            fallback,
        );
    }

    let breadcrumb = match plan.breadcrumb {
        Some(BreadcrumbVariant::Legacy) => html! { <LegacyBreadcrumbMenu /> },
        Some(BreadcrumbVariant::Standard) => html! { <BreadcrumbMenu /> },
        None => html! {},
    };
    let sidebar = match plan.sidebar {
        SidebarView::OwnPosts => html! { <PostsView show_own_posts={true} /> },
        SidebarView::Posts => html! { <PostsView /> },
        SidebarView::Topics => html! { <TopicsView /> },
        SidebarView::Redirect(_) | SidebarView::Empty => html! {},
    };
    let content = match plan.content {
        ContentView::NewPost => html! { <PostEditor /> },
        ContentView::EditPost => html! { <PostEditor edit_existing={true} /> },
        ContentView::Comments => html! { <CommentsView /> },
        ContentView::Empty => html! {},
    };
    let sidebar_class = classes!(
        "flex-column",
        "w-25",
        "w-xs-100",
        "w-lg-25",
        if plan.show_sidebar { "d-flex" } else { "d-none" }
    );
    let content_class = classes!(
        "bg-light-300",
        "flex-column",
        "w-75",
        "w-xs-100",
        "w-xl-75",
        "align-items-center",
        if plan.show_content_area { "d-flex" } else { "d-none" }
    );

    html! {
        <ContextProvider<DiscussionContext> context={plan.context.clone()}>
            <main id="main" class="container-fluid d-flex flex-column p-0" tabindex="-1">
                <div class="d-flex flex-row justify-content-between shadow navbar">
                    { if plan.show_navigation_bar { html! { <NavigationBar /> } } else { html! {} } }
                    <PostActionsBar in_context={plan.context.in_context} />
                </div>
                {breadcrumb}
                <div class="d-flex flex-row">
                    <div class={sidebar_class} style="min-width: 30rem">
                        {sidebar}
                    </div>
                    <div class={content_class}>
                        <div class="mw-xl d-flex flex-column">
                            {content}
                        </div>
                    </div>
                </div>
            </main>
        </ContextProvider<DiscussionContext>>
    }
}
