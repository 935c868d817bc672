//! Selected thread with its responses count; marks the thread read after a delay.

use crate::app::SessionCtx;
use crate::app::api::ApiCtx;
use crate::core::store::{ForumStore, mark_thread_read};
use crate::core::view::DiscussionContext;
use crate::features::selected::{Selection, use_selected_thread};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use forum_config::defaults::POST_MARK_AS_READ_DELAY_MS;
use gloo_timers::callback::Timeout;
use tracing::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::Dispatch;

#[function_component(CommentsView)]
pub(crate) fn comments_view() -> Html {
    let ctx = use_context::<DiscussionContext>().unwrap_or_default();
    let bundle =
        use_context::<TranslationBundle>().unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let session = use_context::<SessionCtx>();
    let api_ctx = use_context::<ApiCtx>();
    let selection = use_selected_thread(ctx.post_id.clone());
    let thread = selection.thread().cloned();
    let delay_ms = session.map_or(POST_MARK_AS_READ_DELAY_MS, |session| {
        session.config.post_mark_as_read_delay_ms
    });

    {
        let unread = thread
            .as_ref()
            .filter(|thread| !thread.read)
            .map(|thread| thread.id.clone());
        use_effect_with_deps(
            move |unread: &Option<String>| {
                let timer = unread.clone().zip(api_ctx).map(|(thread_id, api_ctx)| {
                    let millis = u32::try_from(delay_ms).unwrap_or(u32::MAX);
                    debug!(%thread_id, millis, "scheduling mark as read");
                    Timeout::new(millis, move || {
                        spawn_local(async move {
                            match api_ctx.client.mark_thread_read(&thread_id).await {
                                Ok(()) => {
                                    Dispatch::<ForumStore>::new()
                                        .reduce_mut(|store| mark_thread_read(store, &thread_id));
                                }
                                Err(err) => {
                                    warn!(%thread_id, error = %err, "mark as read failed");
                                }
                            }
                        });
                    })
                });
                move || drop(timer)
            },
            unread,
        );
    }

    let Some(thread) = thread else {
        let message = if selection == Selection::Pending {
            bundle.text("posts.loading", "Loading posts…")
        } else {
            bundle.text("comments.missing", "This post could not be loaded.")
        };
        return html! { <p class="text-muted p-4">{message}</p> };
    };

    html! {
        <article class="comments-view d-flex flex-column p-4">
            <h2 class="h4">{thread.title.clone()}</h2>
            { thread.author.clone().map_or_else(|| html! {}, |author| html! {
                <small class="text-muted mb-2">{author}</small>
            }) }
            <div class="thread-body mb-3" style="white-space: pre-wrap">{thread.raw_body.clone()}</div>
            <small class="text-muted">
                {format!("{} {}", thread.comment_count, bundle.text("comments.responses", "responses"))}
            </small>
        </article>
    }
}
