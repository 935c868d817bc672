//! Thread listing in the sidebar.

use crate::app::SessionCtx;
use crate::app::api::ApiCtx;
use crate::components::nav_link::{NavLink, scoped_href};
use crate::core::effects::SequenceGuard;
use crate::core::store::{ForumStore, LoadStatus, set_listing, start_listing};
use crate::core::threads::{ListingQuery, listing_query, thread_path};
use crate::core::view::DiscussionContext;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Properties, PartialEq)]
pub(crate) struct PostsViewProps {
    #[prop_or_default]
    pub(crate) show_own_posts: bool,
}

#[function_component(PostsView)]
pub(crate) fn posts_view(props: &PostsViewProps) -> Html {
    let ctx = use_context::<DiscussionContext>().unwrap_or_default();
    let bundle =
        use_context::<TranslationBundle>().unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let session = use_context::<SessionCtx>();
    let api_ctx = use_context::<ApiCtx>();
    let topics = use_selector(|store: &ForumStore| store.topics.topics.clone());
    let threads = use_selector(|store: &ForumStore| store.threads.listing.clone());
    let status = use_selector(|store: &ForumStore| store.threads.listing_status.clone());
    let guard = use_memo(|_| SequenceGuard::default(), ());

    let own_posts_of = props
        .show_own_posts
        .then(|| session.as_ref().map(|session| session.user.username.clone()))
        .flatten();
    let query = listing_query(&ctx, &topics, own_posts_of.as_deref());

    {
        let guard = (*guard).clone();
        use_effect_with_deps(
            move |query: &Option<ListingQuery>| {
                let token = guard.begin();
                if let (Some(query), Some(api_ctx)) = (query.clone(), api_ctx) {
                    Dispatch::<ForumStore>::new().reduce_mut(start_listing);
                    spawn_local(async move {
                        let result = api_ctx
                            .client
                            .fetch_threads(
                                &query.course_id,
                                query.topic_filter().as_deref(),
                                query.author.as_deref(),
                            )
                            .await;
                        if token.is_current() {
                            Dispatch::<ForumStore>::new().reduce_mut(move |store| {
                                set_listing(store, result.map_err(|err| err.to_string()));
                            });
                        } else {
                            debug!(course_id = %query.course_id, "dropping stale thread listing");
                        }
                    });
                }
                move || guard.cancel()
            },
            query,
        );
    }

    let heading = if props.show_own_posts {
        bundle.text("posts.own_heading", "My posts")
    } else {
        bundle.text("posts.heading", "Posts")
    };
    let responses = bundle.text("posts.responses", "responses");
    let unread = bundle.text("comments.unread", "Unread");

    let body = match (&*status, threads.is_empty()) {
        (LoadStatus::Loading, _) => html! {
            <p class="text-muted p-3">{bundle.text("posts.loading", "Loading posts…")}</p>
        },
        (LoadStatus::Failed(_), _) => html! {
            <p class="text-danger p-3">{bundle.text("posts.failed", "Posts could not be loaded.")}</p>
        },
        (_, true) => html! {
            <p class="text-muted p-3">{bundle.text("posts.empty", "No posts yet.")}</p>
        },
        (_, false) => html! {
            <ul class="list-group list-group-flush">
                { for threads.iter().map(|thread| {
                    let href = thread_path(&ctx, &thread.id, props.show_own_posts)
                        .map(|path| scoped_href(&path, &ctx))
                        .unwrap_or_default();
                    let selected = ctx.post_id.as_deref() == Some(thread.id.as_str());
                    html! {
                        <li class={classes!("list-group-item", selected.then_some("active"))}>
                            <NavLink to={href} class={classes!((!thread.read).then_some("fw-bold"))}>
                                {thread.title.clone()}
                            </NavLink>
                            <small class="d-block text-muted">
                                {format!("{} {}", thread.comment_count, responses)}
                                { if thread.read {
                                    html! {}
                                } else {
                                    html! { <span class="badge bg-primary ms-2">{unread.clone()}</span> }
                                } }
                            </small>
                        </li>
                    }
                }) }
            </ul>
        },
    };

    html! {
        <section class="posts-view d-flex flex-column">
            <h2 class="h6 px-3 pt-3">{heading}</h2>
            {body}
        </section>
    }
}
