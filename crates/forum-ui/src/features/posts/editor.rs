//! Post editor for creating and editing threads.

use crate::app::api::ApiCtx;
use crate::components::nav_link::scoped_href;
use crate::core::store::{ForumStore, hide_post_editor, set_redirect, upsert_thread};
use crate::core::threads::{PostDraft, Submission, submission, thread_path};
use crate::core::view::DiscussionContext;
use crate::features::selected::use_selected_thread;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use tracing::{error, info};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::history::{BrowserHistory, History};
use yewdux::prelude::{Dispatch, use_selector};

const MY_POSTS_PAGE: &str = "my-posts";

#[derive(Properties, PartialEq)]
pub(crate) struct PostEditorProps {
    #[prop_or_default]
    pub(crate) edit_existing: bool,
}

fn show_thread(ctx: &DiscussionContext, thread_id: &str) {
    let own_posts = ctx.page.as_deref() == Some(MY_POSTS_PAGE);
    if let Some(path) = thread_path(ctx, thread_id, own_posts) {
        BrowserHistory::new().push(scoped_href(&path, ctx));
    }
}

#[function_component(PostEditor)]
pub(crate) fn post_editor(props: &PostEditorProps) -> Html {
    let ctx = use_context::<DiscussionContext>().unwrap_or_default();
    let bundle =
        use_context::<TranslationBundle>().unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let topics = use_selector(|store: &ForumStore| store.topics.topics.clone());
    let editing = use_selected_thread(ctx.post_id.clone().filter(|_| props.edit_existing))
        .thread()
        .cloned();
    let draft = use_state(PostDraft::default);
    let seeded_for = use_mut_ref(|| None::<(Option<String>, bool)>);
    let busy = use_state(|| false);
    let failure = use_state(|| None::<String>);

    {
        let seed = if props.edit_existing {
            editing.as_ref().map(PostDraft::from_thread)
        } else {
            Some(PostDraft::for_context(&ctx, &topics))
        };
        let target = (ctx.post_id.clone(), props.edit_existing);
        let draft = draft.clone();
        use_effect_with_deps(
            move |(target, seed): &((Option<String>, bool), Option<PostDraft>)| {
                let same_target = seeded_for.borrow().as_ref() == Some(target);
                draft.set(draft.reseed(seed.as_ref(), same_target));
                *seeded_for.borrow_mut() = Some(target.clone());
                || ()
            },
            (target, seed),
        );
    }

    let on_topic = {
        let draft = draft.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            let mut next = (*draft).clone();
            next.topic_id = select.value();
            draft.set(next);
        })
    };
    let on_title = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let mut next = (*draft).clone();
            next.title = input.value();
            draft.set(next);
        })
    };
    let on_body = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlTextAreaElement = event.target_unchecked_into();
            let mut next = (*draft).clone();
            next.body = input.value();
            draft.set(next);
        })
    };

    let on_submit = {
        let ctx = ctx.clone();
        let draft = draft.clone();
        let busy = busy.clone();
        let failure = failure.clone();
        let edit_existing = props.edit_existing;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }
            let request = match submission(&draft, &ctx, edit_existing) {
                Ok(request) => request,
                Err(err) => {
                    failure.set(Some(err.to_string()));
                    return;
                }
            };
            let Some(api_ctx) = api_ctx.clone() else {
                return;
            };
            busy.set(true);
            failure.set(None);
            let ctx = ctx.clone();
            let busy = busy.clone();
            let failure = failure.clone();
            spawn_local(async move {
                let dispatch = Dispatch::<ForumStore>::new();
                match request {
                    Submission::Create(thread) => {
                        match api_ctx.client.create_thread(&thread).await {
                            Ok(created) => {
                                info!(thread_id = %created.id, "post created");
                                dispatch.reduce_mut(move |store| {
                                    let thread_id = created.id.clone();
                                    upsert_thread(store, created);
                                    set_redirect(store, thread_id);
                                });
                            }
                            Err(err) => {
                                error!(error = %err, "post creation failed");
                                failure.set(Some(err.to_string()));
                            }
                        }
                    }
                    Submission::Update { thread_id, update } => {
                        match api_ctx.client.update_thread(&thread_id, &update).await {
                            Ok(updated) => {
                                info!(%thread_id, "post updated");
                                dispatch.reduce_mut(move |store| upsert_thread(store, updated));
                                show_thread(&ctx, &thread_id);
                            }
                            Err(err) => {
                                error!(%thread_id, error = %err, "post update failed");
                                failure.set(Some(err.to_string()));
                            }
                        }
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_cancel = {
        let ctx = ctx.clone();
        let edit_existing = props.edit_existing;
        Callback::from(move |_: MouseEvent| {
            if edit_existing {
                if let Some(thread_id) = ctx.post_id.as_deref() {
                    show_thread(&ctx, thread_id);
                }
            } else {
                Dispatch::<ForumStore>::new().reduce_mut(hide_post_editor);
            }
        })
    };

    let heading = if props.edit_existing {
        bundle.text("editor.edit_heading", "Edit post")
    } else {
        bundle.text("editor.new_heading", "Add a post")
    };
    let submit_label = if *busy {
        bundle.text("editor.submitting", "Submitting…")
    } else {
        bundle.text("editor.submit", "Submit")
    };
    let current = (*draft).clone();

    html! {
        <form class="post-editor d-flex flex-column p-4" onsubmit={on_submit}>
            <h2 class="h5">{heading}</h2>
            <label class="form-label" for="post-topic">{bundle.text("editor.topic_label", "Topic")}</label>
            <select id="post-topic" class="form-select mb-3" onchange={on_topic}>
                { for topics.iter().map(|topic| html! {
                    <option value={topic.id.clone()} selected={topic.id == current.topic_id}>
                        {topic.name.clone()}
                    </option>
                }) }
            </select>
            <label class="form-label" for="post-title">{bundle.text("editor.title_label", "Title")}</label>
            <input
                id="post-title"
                class="form-control mb-3"
                type="text"
                value={current.title.clone()}
                oninput={on_title}
            />
            <label class="form-label" for="post-body">{bundle.text("editor.body_label", "Post")}</label>
            <textarea
                id="post-body"
                class="form-control mb-3"
                rows="8"
                value={current.body.clone()}
                oninput={on_body}
            />
            { (*failure).clone().map_or_else(|| html! {}, |message| html! {
                <div class="alert alert-danger" role="alert">
                    {format!("{} {message}", bundle.text("editor.failed", "The post could not be saved."))}
                </div>
            }) }
            <div class="d-flex flex-row justify-content-end gap-2">
                <button type="button" class="btn btn-outline-secondary" onclick={on_cancel}>
                    {bundle.text("editor.cancel", "Cancel")}
                </button>
                <button type="submit" class="btn btn-primary" disabled={*busy}>{submit_label}</button>
            </div>
        </form>
    }
}
