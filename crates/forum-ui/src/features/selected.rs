//! Selected thread lookup shared by the thread view and the edit form.

use crate::app::api::ApiCtx;
use crate::core::store::{ForumStore, missing_thread, select_thread, set_thread_detail};
use crate::models::ThreadSummary;
use tracing::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

/// Where the selected thread stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Selection {
    Found(ThreadSummary),
    Pending,
    Unavailable,
}

impl Selection {
    pub(crate) const fn thread(&self) -> Option<&ThreadSummary> {
        match self {
            Self::Found(thread) => Some(thread),
            Self::Pending | Self::Unavailable => None,
        }
    }
}

/// The thread named by `post_id`, fetched on its own when the listing page lacks it.
#[hook]
pub(crate) fn use_selected_thread(post_id: Option<String>) -> Selection {
    let api_ctx = use_context::<ApiCtx>();
    let threads = use_selector(|store: &ForumStore| store.threads.clone());
    let failed = use_state_eq(|| None::<String>);
    let missing = missing_thread(&threads, post_id.as_deref()).map(str::to_string);

    {
        let failed = failed.clone();
        use_effect_with_deps(
            move |missing: &Option<String>| {
                if let Some((thread_id, api_ctx)) = missing.clone().zip(api_ctx) {
                    debug!(%thread_id, "fetching thread outside the listing");
                    failed.set(None);
                    spawn_local(async move {
                        match api_ctx.client.fetch_thread(&thread_id).await {
                            Ok(thread) => Dispatch::<ForumStore>::new()
                                .reduce_mut(move |store| set_thread_detail(store, thread)),
                            Err(err) => {
                                warn!(%thread_id, error = %err, "thread fetch failed");
                                failed.set(Some(thread_id));
                            }
                        }
                    });
                }
                || ()
            },
            missing,
        );
    }

    let Some(post_id) = post_id else {
        return Selection::Unavailable;
    };
    match select_thread(&threads, &post_id) {
        Some(thread) => Selection::Found(thread.clone()),
        None if failed.as_deref() == Some(post_id.as_str()) => Selection::Unavailable,
        None => Selection::Pending,
    }
}
