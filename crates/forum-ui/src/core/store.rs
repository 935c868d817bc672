//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Views read snapshots through selectors and write through the reducers below.
//! - Fetch failures are recorded as [`LoadStatus::Failed`]; views decide whether to show them.

use crate::core::effects::BaseDataStep;
use crate::models::{CourseBlocks, CourseConfig, DiscussionProvider, ThreadSummary, Topic};
use tracing::warn;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct ForumStore {
    /// Thread editing and listing state.
    pub threads: ThreadsSlice,
    /// Course discussion configuration.
    pub config: ConfigSlice,
    /// Course topics.
    pub topics: TopicsSlice,
    /// Course content blocks.
    pub blocks: BlocksSlice,
}

/// Progress of an asynchronous load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Data available.
    Loaded,
    /// Request failed with the given message.
    Failed(String),
}

/// Thread the user should be taken to after creating it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectTarget {
    /// Identifier of the newly created thread.
    pub thread_id: String,
}

/// Thread-related shared flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThreadsSlice {
    /// Whether the post editor is open.
    pub post_editor_visible: bool,
    /// Pending post-creation redirect; consumed and cleared by the home view.
    pub redirect_to_thread: Option<RedirectTarget>,
    /// Threads shown in the sidebar listing.
    pub listing: Vec<ThreadSummary>,
    /// Listing load progress.
    pub listing_status: LoadStatus,
    /// Selected thread fetched on its own because the listing does not contain it.
    pub detail: Option<ThreadSummary>,
}

/// Course configuration slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigSlice {
    /// Course the configuration belongs to.
    pub course_id: Option<String>,
    /// Loaded configuration.
    pub config: CourseConfig,
    /// Load progress.
    pub status: LoadStatus,
}

/// Topic slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopicsSlice {
    /// Flattened topics.
    pub topics: Vec<Topic>,
    /// Load progress.
    pub status: LoadStatus,
}

/// Course block slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlocksSlice {
    /// Loaded blocks.
    pub blocks: CourseBlocks,
    /// Load progress.
    pub status: LoadStatus,
}

/// Provider selector used for breadcrumb selection.
#[must_use]
pub fn select_discussion_provider(store: &ForumStore) -> DiscussionProvider {
    store.config.config.provider
}

/// Find a thread in the listing, then in the separately fetched detail.
#[must_use]
pub fn select_thread<'a>(threads: &'a ThreadsSlice, thread_id: &str) -> Option<&'a ThreadSummary> {
    threads
        .listing
        .iter()
        .chain(threads.detail.iter())
        .find(|thread| thread.id == thread_id)
}

/// Thread id to fetch on its own: the selected post is neither listed nor fetched, and no
/// listing request is still in flight.
#[must_use]
pub fn missing_thread<'a>(threads: &ThreadsSlice, post_id: Option<&'a str>) -> Option<&'a str> {
    let post_id = post_id?;
    if threads.listing_status == LoadStatus::Loading || select_thread(threads, post_id).is_some() {
        return None;
    }
    Some(post_id)
}

/// Open the post editor.
pub fn show_post_editor(store: &mut ForumStore) {
    store.threads.post_editor_visible = true;
}

/// Close the post editor.
pub fn hide_post_editor(store: &mut ForumStore) {
    store.threads.post_editor_visible = false;
}

/// Record a freshly created thread and close the editor.
pub fn set_redirect(store: &mut ForumStore, thread_id: impl Into<String>) {
    store.threads.post_editor_visible = false;
    store.threads.redirect_to_thread = Some(RedirectTarget {
        thread_id: thread_id.into(),
    });
}

/// Mark the listing as loading.
pub fn start_listing(store: &mut ForumStore) {
    store.threads.listing_status = LoadStatus::Loading;
}

/// Replace the listing with a fetch result.
pub fn set_listing(store: &mut ForumStore, result: Result<Vec<ThreadSummary>, String>) {
    match result {
        Ok(threads) => {
            store.threads.listing = threads;
            store.threads.listing_status = LoadStatus::Loaded;
        }
        Err(message) => {
            warn!(%message, "thread listing failed");
            store.threads.listing_status = LoadStatus::Failed(message);
        }
    }
}

/// Keep a thread fetched by id for the thread view.
pub fn set_thread_detail(store: &mut ForumStore, thread: ThreadSummary) {
    store.threads.detail = Some(thread);
}

/// Insert a created thread at the top of the listing, or replace an edited one in place.
pub fn upsert_thread(store: &mut ForumStore, thread: ThreadSummary) {
    if let Some(detail) = store.threads.detail.as_mut().filter(|d| d.id == thread.id) {
        *detail = thread.clone();
    }
    let listing = &mut store.threads.listing;
    match listing.iter_mut().find(|existing| existing.id == thread.id) {
        Some(existing) => *existing = thread,
        None => listing.insert(0, thread),
    }
}

/// Flag a thread as read wherever it is held.
pub fn mark_thread_read(store: &mut ForumStore, thread_id: &str) {
    let threads = &mut store.threads;
    for thread in threads
        .listing
        .iter_mut()
        .chain(threads.detail.iter_mut())
        .filter(|thread| thread.id == thread_id)
    {
        thread.read = true;
    }
}

/// Reset course-scoped slices before loading a different course.
pub fn begin_base_data(store: &mut ForumStore, course_id: &str) {
    if store.config.course_id.as_deref() != Some(course_id) {
        store.config = ConfigSlice::default();
        store.topics = TopicsSlice::default();
        store.blocks = BlocksSlice::default();
        store.config.course_id = Some(course_id.to_string());
    }
    store.config.status = LoadStatus::Loading;
    store.topics.status = LoadStatus::Loading;
    store.blocks.status = LoadStatus::Loading;
}

/// Apply one step of the base-data sequence.
pub fn apply_base_data(store: &mut ForumStore, step: BaseDataStep) {
    match step {
        BaseDataStep::Config(Ok(config)) => {
            store.config.config = config;
            store.config.status = LoadStatus::Loaded;
        }
        BaseDataStep::Config(Err(err)) => {
            store.config.status = LoadStatus::Failed(err.to_string());
        }
        BaseDataStep::Topics(Ok(topics)) => {
            store.topics.topics = topics;
            store.topics.status = LoadStatus::Loaded;
        }
        BaseDataStep::Topics(Err(err)) => {
            store.topics.status = LoadStatus::Failed(err.to_string());
        }
        BaseDataStep::Blocks(Ok(blocks)) => {
            store.blocks.blocks = blocks;
            store.blocks.status = LoadStatus::Loaded;
        }
        BaseDataStep::Blocks(Err(err)) => {
            store.blocks.status = LoadStatus::Failed(err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::FetchError;

    #[test]
    fn redirect_lifecycle() {
        let mut store = ForumStore::default();
        show_post_editor(&mut store);
        assert!(store.threads.post_editor_visible);
        set_redirect(&mut store, "abc");
        assert!(!store.threads.post_editor_visible);
        assert_eq!(
            store.threads.redirect_to_thread,
            Some(RedirectTarget {
                thread_id: "abc".to_string()
            })
        );
    }

    #[test]
    fn upsert_prepends_new_threads_and_replaces_edits() {
        let thread = |id: &str, title: &str| ThreadSummary {
            id: id.to_string(),
            title: title.to_string(),
            author: None,
            topic_id: None,
            raw_body: String::new(),
            read: false,
            comment_count: 0,
        };
        let mut store = ForumStore::default();
        set_listing(&mut store, Ok(vec![thread("a", "first")]));
        upsert_thread(&mut store, thread("b", "second"));
        upsert_thread(&mut store, thread("a", "edited"));
        let titles: Vec<_> = store.threads.listing.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["second", "edited"]);
        mark_thread_read(&mut store, "b");
        assert_eq!(select_thread(&store.threads, "b").map(|t| t.read), Some(true));
    }

    #[test]
    fn threads_beyond_the_listing_are_kept_as_detail() {
        let thread = ThreadSummary {
            id: "deep".to_string(),
            title: "Page three".to_string(),
            author: None,
            topic_id: None,
            raw_body: String::new(),
            read: false,
            comment_count: 0,
        };
        let mut store = ForumStore::default();
        assert_eq!(missing_thread(&store.threads, None), None);
        start_listing(&mut store);
        assert_eq!(missing_thread(&store.threads, Some("deep")), None);
        set_listing(&mut store, Ok(Vec::new()));
        assert_eq!(missing_thread(&store.threads, Some("deep")), Some("deep"));

        set_thread_detail(&mut store, thread);
        assert_eq!(missing_thread(&store.threads, Some("deep")), None);
        assert!(store.threads.listing.is_empty());

        mark_thread_read(&mut store, "deep");
        assert_eq!(select_thread(&store.threads, "deep").map(|t| t.read), Some(true));
    }

    #[test]
    fn base_data_steps_update_their_slice() {
        let mut store = ForumStore::default();
        begin_base_data(&mut store, "c1");
        assert_eq!(store.topics.status, LoadStatus::Loading);

        apply_base_data(
            &mut store,
            BaseDataStep::Config(Ok(CourseConfig {
                provider: DiscussionProvider::Legacy,
                posting_enabled: true,
                privileged: false,
            })),
        );
        apply_base_data(
            &mut store,
            BaseDataStep::Topics(Err(FetchError::Status {
                status: 500,
                url: "/topics".to_string(),
            })),
        );
        assert_eq!(select_discussion_provider(&store), DiscussionProvider::Legacy);
        assert_eq!(store.config.status, LoadStatus::Loaded);
        assert!(matches!(store.topics.status, LoadStatus::Failed(_)));
        assert_eq!(store.blocks.status, LoadStatus::Loading);
    }

    #[test]
    fn switching_course_resets_course_slices() {
        let mut store = ForumStore::default();
        begin_base_data(&mut store, "c1");
        apply_base_data(
            &mut store,
            BaseDataStep::Config(Ok(CourseConfig {
                provider: DiscussionProvider::Legacy,
                ..CourseConfig::default()
            })),
        );
        begin_base_data(&mut store, "c1");
        assert_eq!(select_discussion_provider(&store), DiscussionProvider::Legacy);
        begin_base_data(&mut store, "c2");
        assert_eq!(select_discussion_provider(&store), DiscussionProvider::Other);
        assert_eq!(store.config.course_id.as_deref(), Some("c2"));
    }

    #[test]
    fn listing_failures_are_recorded() {
        let mut store = ForumStore::default();
        start_listing(&mut store);
        set_listing(&mut store, Err("offline".to_string()));
        assert_eq!(
            store.threads.listing_status,
            LoadStatus::Failed("offline".to_string())
        );
    }
}
