//! Side-effect sequencing for the forum home view.
//!
//! # Design
//! - Base data (configuration, topics, blocks) loads strictly in sequence; each request starts
//!   only after the previous one resolved.
//! - A failed step is handed to the store like a successful one and the chain continues.
//! - Each sequence holds a [`SequenceToken`]; starting a newer sequence or unmounting
//!   invalidates older tokens, and a stale sequence drops its pending result and stops.

use crate::core::location::Location;
use crate::core::routes::{RouteName, RouteParams, generate_path};
use crate::core::store::{ForumStore, RedirectTarget};
use crate::models::{CourseBlocks, CourseConfig, Topic};
use async_trait::async_trait;
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Failure reported by the data layer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport error detail.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("request to {url} returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
    /// The response body did not match the expected shape.
    #[error("response from {url} could not be decoded: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder error detail.
        message: String,
    },
}

/// Source of the course-scoped data loaded when the home view mounts.
#[async_trait(?Send)]
pub trait BaseDataSource {
    /// Discussion configuration for the course.
    async fn course_config(&self, course_id: &str) -> Result<CourseConfig, FetchError>;
    /// Topics of the course.
    async fn course_topics(&self, course_id: &str) -> Result<Vec<Topic>, FetchError>;
    /// Content blocks of the course as visible to `username`.
    async fn course_blocks(
        &self,
        course_id: &str,
        username: &str,
    ) -> Result<CourseBlocks, FetchError>;
}

/// Result of one base-data request, ready to be applied to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BaseDataStep {
    /// Course configuration result.
    Config(Result<CourseConfig, FetchError>),
    /// Course topics result.
    Topics(Result<Vec<Topic>, FetchError>),
    /// Course blocks result.
    Blocks(Result<CourseBlocks, FetchError>),
}

impl BaseDataStep {
    const fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Topics(_) => "topics",
            Self::Blocks(_) => "blocks",
        }
    }

    fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Config(result) => result.as_ref().err(),
            Self::Topics(result) => result.as_ref().err(),
            Self::Blocks(result) => result.as_ref().err(),
        }
    }
}

/// How a base-data sequence ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// All three steps were applied.
    Completed,
    /// A newer sequence superseded this one.
    Cancelled,
}

/// Issues generation-numbered tokens; only the newest token is current.
#[derive(Clone, Debug, Default)]
pub struct SequenceGuard {
    generation: Rc<Cell<u64>>,
}

impl PartialEq for SequenceGuard {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.generation, &other.generation)
    }
}

impl SequenceGuard {
    /// Invalidate outstanding tokens and hand out a fresh one.
    #[must_use]
    pub fn begin(&self) -> SequenceToken {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        SequenceToken {
            generation,
            current: Rc::clone(&self.generation),
        }
    }

    /// Invalidate outstanding tokens without starting a new sequence.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

/// Proof that a sequence is still the newest one.
#[derive(Clone, Debug)]
pub struct SequenceToken {
    generation: u64,
    current: Rc<Cell<u64>>,
}

impl SequenceToken {
    /// Whether no newer sequence has started since this token was issued.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.get() == self.generation
    }
}

/// Load configuration, then topics, then blocks for `course_id`.
///
/// Every result is passed to `apply` unless the token went stale while the request was in flight.
pub async fn run_base_data_sequence<S>(
    source: &S,
    course_id: &str,
    username: &str,
    token: &SequenceToken,
    mut apply: impl FnMut(BaseDataStep),
) -> SequenceOutcome
where
    S: BaseDataSource + ?Sized,
{
    let mut deliver = |step: BaseDataStep| {
        if !token.is_current() {
            debug!(course_id, step = step.label(), "dropping stale base data");
            return false;
        }
        if let Some(err) = step.error() {
            error!(course_id, step = step.label(), error = %err, "base data request failed");
        }
        apply(step);
        true
    };

    if !token.is_current() {
        return SequenceOutcome::Cancelled;
    }
    let config = source.course_config(course_id).await;
    if !deliver(BaseDataStep::Config(config)) {
        return SequenceOutcome::Cancelled;
    }
    let topics = source.course_topics(course_id).await;
    if !deliver(BaseDataStep::Topics(topics)) {
        return SequenceOutcome::Cancelled;
    }
    let blocks = source.course_blocks(course_id, username).await;
    if !deliver(BaseDataStep::Blocks(blocks)) {
        return SequenceOutcome::Cancelled;
    }
    debug!(course_id, "base data loaded");
    SequenceOutcome::Completed
}

/// Location to visit after a post was created: the thread inside "my posts".
///
/// Query string and fragment of the current location are preserved.
#[must_use]
pub fn redirect_target(
    redirect: Option<&RedirectTarget>,
    course_id: Option<&str>,
    location: &Location,
) -> Option<Location> {
    let redirect = redirect?;
    let params = RouteParams {
        course_id: course_id.map(ToString::to_string),
        post_id: Some(redirect.thread_id.clone()),
        ..RouteParams::default()
    };
    let pattern = RouteName::MyPostComments.patterns().first()?;
    generate_path(pattern, &params).map(|path| location.with_pathname(path))
}

/// Take the pending post-creation redirect out of the store and resolve where it leads.
///
/// The flag is cleared even when no target can be built, so a redirect fires at most once.
pub fn consume_redirect(
    store: &mut ForumStore,
    course_id: Option<&str>,
    location: &Location,
) -> Option<Location> {
    let redirect = store.threads.redirect_to_thread.take()?;
    let target = redirect_target(Some(&redirect), course_id, location);
    if target.is_none() {
        warn!(thread_id = %redirect.thread_id, "dropping post redirect without a course");
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscussionProvider;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSource {
        log: RefCell<Vec<String>>,
        fail_topics: bool,
        cancel_after_config: Option<SequenceGuard>,
    }

    impl RecordingSource {
        async fn call(&self, name: &str) {
            self.log.borrow_mut().push(format!("start {name}"));
            tokio::task::yield_now().await;
            self.log.borrow_mut().push(format!("end {name}"));
        }
    }

    #[async_trait(?Send)]
    impl BaseDataSource for RecordingSource {
        async fn course_config(&self, course_id: &str) -> Result<CourseConfig, FetchError> {
            self.call(&format!("config {course_id}")).await;
            if let Some(guard) = &self.cancel_after_config {
                guard.cancel();
            }
            Ok(CourseConfig {
                provider: DiscussionProvider::Legacy,
                ..CourseConfig::default()
            })
        }

        async fn course_topics(&self, course_id: &str) -> Result<Vec<Topic>, FetchError> {
            self.call(&format!("topics {course_id}")).await;
            if self.fail_topics {
                return Err(FetchError::Status {
                    status: 503,
                    url: "/topics".to_string(),
                });
            }
            Ok(Vec::new())
        }

        async fn course_blocks(
            &self,
            course_id: &str,
            username: &str,
        ) -> Result<CourseBlocks, FetchError> {
            self.call(&format!("blocks {course_id} {username}")).await;
            Ok(CourseBlocks::default())
        }
    }

    #[tokio::test]
    async fn requests_run_strictly_in_sequence() {
        let source = RecordingSource::default();
        let guard = SequenceGuard::default();
        let mut applied = Vec::new();
        let outcome =
            run_base_data_sequence(&source, "c1", "ada", &guard.begin(), |step| {
                applied.push(step.label());
            })
            .await;
        assert_eq!(outcome, SequenceOutcome::Completed);
        assert_eq!(applied, vec!["config", "topics", "blocks"]);
        assert_eq!(
            *source.log.borrow(),
            vec![
                "start config c1",
                "end config c1",
                "start topics c1",
                "end topics c1",
                "start blocks c1 ada",
                "end blocks c1 ada",
            ]
        );
    }

    #[tokio::test]
    async fn failed_step_does_not_stop_the_chain() {
        let source = RecordingSource {
            fail_topics: true,
            ..RecordingSource::default()
        };
        let guard = SequenceGuard::default();
        let mut steps = Vec::new();
        let outcome =
            run_base_data_sequence(&source, "c1", "ada", &guard.begin(), |step| steps.push(step))
                .await;
        assert_eq!(outcome, SequenceOutcome::Completed);
        assert_eq!(steps.len(), 3);
        assert!(matches!(steps[1], BaseDataStep::Topics(Err(_))));
        assert!(matches!(steps[2], BaseDataStep::Blocks(Ok(_))));
    }

    #[tokio::test]
    async fn superseded_sequence_drops_results_and_stops() {
        let guard = SequenceGuard::default();
        let source = RecordingSource {
            cancel_after_config: Some(guard.clone()),
            ..RecordingSource::default()
        };
        let mut applied = 0;
        let outcome =
            run_base_data_sequence(&source, "c1", "ada", &guard.begin(), |_| applied += 1).await;
        assert_eq!(outcome, SequenceOutcome::Cancelled);
        assert_eq!(applied, 0);
        assert_eq!(source.log.borrow().len(), 2);
    }

    #[test]
    fn only_newest_token_is_current() {
        let guard = SequenceGuard::default();
        let first = guard.begin();
        assert!(first.is_current());
        let second = guard.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        guard.cancel();
        assert!(!second.is_current());
    }

    #[test]
    fn redirect_targets_my_posts_and_keeps_query() {
        let location = Location::parse("/c1/topics/t1/posts/new?inContext#x");
        let redirect = RedirectTarget {
            thread_id: "abc".to_string(),
        };
        let target = redirect_target(Some(&redirect), Some("c1"), &location).expect("target");
        assert_eq!(target.href(), "/c1/my-posts/abc?inContext#x");
        assert_eq!(redirect_target(None, Some("c1"), &location), None);
        assert_eq!(redirect_target(Some(&redirect), None, &location), None);
    }

    #[test]
    fn redirect_is_cleared_before_it_is_resolved() {
        let location = Location::parse("/c1/posts/new");
        let mut store = ForumStore::default();
        crate::core::store::set_redirect(&mut store, "abc");
        let target = consume_redirect(&mut store, Some("c1"), &location).expect("target");
        assert_eq!(target.href(), "/c1/my-posts/abc");
        assert_eq!(store.threads.redirect_to_thread, None);
        assert_eq!(consume_redirect(&mut store, Some("c1"), &location), None);

        crate::core::store::set_redirect(&mut store, "abc");
        assert_eq!(consume_redirect(&mut store, None, &Location::parse("/")), None);
        assert_eq!(store.threads.redirect_to_thread, None);
    }
}
