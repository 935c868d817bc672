//! Thread listing queries, post drafts, and thread links.

use crate::core::routes::{RouteName, RouteParams};
use crate::core::view::DiscussionContext;
use crate::models::{NewThread, ThreadSummary, ThreadUpdate, Topic};
use thiserror::Error;

/// Thread type used for posts created from the editor.
pub const DEFAULT_THREAD_KIND: &str = "discussion";

/// Filters for one thread listing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingQuery {
    /// Course to list.
    pub course_id: String,
    /// Topics to restrict to; empty means the whole course.
    pub topic_ids: Vec<String>,
    /// Author to restrict to.
    pub author: Option<String>,
}

impl ListingQuery {
    /// Comma-separated topic filter, if any.
    #[must_use]
    pub fn topic_filter(&self) -> Option<String> {
        (!self.topic_ids.is_empty()).then(|| self.topic_ids.join(","))
    }
}

/// Listing request for the current scope.
///
/// Own posts filter by `own_posts_of` across the course. A category scope waits until its topics
/// are known, so it never widens to the whole course.
#[must_use]
pub fn listing_query(
    ctx: &DiscussionContext,
    topics: &[Topic],
    own_posts_of: Option<&str>,
) -> Option<ListingQuery> {
    let course_id = ctx.course_id.clone()?;
    if let Some(author) = own_posts_of {
        return Some(ListingQuery {
            course_id,
            topic_ids: Vec::new(),
            author: Some(author.to_string()),
        });
    }
    let topic_ids = match (&ctx.topic_id, &ctx.category) {
        (Some(topic_id), _) => vec![topic_id.clone()],
        (None, Some(category)) => {
            let ids: Vec<String> = topics
                .iter()
                .filter(|topic| topic.category.as_deref() == Some(category.as_str()))
                .map(|topic| topic.id.clone())
                .collect();
            if ids.is_empty() {
                return None;
            }
            ids
        }
        (None, None) => Vec::new(),
    };
    Some(ListingQuery {
        course_id,
        topic_ids,
        author: None,
    })
}

/// Link to a thread inside the current listing scope.
#[must_use]
pub fn thread_path(ctx: &DiscussionContext, thread_id: &str, own_posts: bool) -> Option<String> {
    let params = RouteParams {
        post_id: Some(thread_id.to_string()),
        ..ctx.params()
    };
    if own_posts {
        RouteName::MyPostComments.path(&params)
    } else {
        RouteName::Comments.path(&params)
    }
}

/// Why a draft cannot be submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DraftError {
    /// No course in the current location.
    #[error("no course selected")]
    MissingCourse,
    /// Editing without a selected post.
    #[error("no post selected")]
    MissingPost,
    /// No topic chosen.
    #[error("a topic is required")]
    MissingTopic,
    /// Blank title.
    #[error("a title is required")]
    MissingTitle,
    /// Blank body.
    #[error("a post body is required")]
    MissingBody,
}

/// Editor form contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDraft {
    /// Chosen topic.
    pub topic_id: String,
    /// Title.
    pub title: String,
    /// Markdown body.
    pub body: String,
}

impl PostDraft {
    /// Empty draft with the topic preselected from the current scope.
    #[must_use]
    pub fn for_context(ctx: &DiscussionContext, topics: &[Topic]) -> Self {
        let topic_id = ctx
            .topic_id
            .clone()
            .or_else(|| {
                let category = ctx.category.as_deref()?;
                topics
                    .iter()
                    .find(|topic| topic.category.as_deref() == Some(category))
                    .map(|topic| topic.id.clone())
            })
            .or_else(|| topics.first().map(|topic| topic.id.clone()))
            .unwrap_or_default();
        Self {
            topic_id,
            ..Self::default()
        }
    }

    /// Draft prefilled from an existing thread.
    #[must_use]
    pub fn from_thread(thread: &ThreadSummary) -> Self {
        Self {
            topic_id: thread.topic_id.clone().unwrap_or_default(),
            title: thread.title.clone(),
            body: thread.raw_body.clone(),
        }
    }

    /// Apply a seed without losing typed input.
    ///
    /// A seed for another target (post or mode) replaces the draft. For the same target only
    /// empty fields are filled, so topics or a thread arriving late never overwrite typed text.
    #[must_use]
    pub fn reseed(&self, seed: Option<&Self>, same_target: bool) -> Self {
        if !same_target {
            return seed.cloned().unwrap_or_default();
        }
        let Some(seed) = seed else {
            return self.clone();
        };
        let fill = |current: &str, seeded: &str| {
            if current.is_empty() { seeded } else { current }.to_string()
        };
        Self {
            topic_id: fill(&self.topic_id, &seed.topic_id),
            title: fill(&self.title, &seed.title),
            body: fill(&self.body, &seed.body),
        }
    }

    /// Check that every field is filled in.
    ///
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.topic_id.trim().is_empty() {
            return Err(DraftError::MissingTopic);
        }
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.body.trim().is_empty() {
            return Err(DraftError::MissingBody);
        }
        Ok(())
    }

    /// Creation payload for this draft.
    ///
    /// # Errors
    ///
    /// See [`PostDraft::validate`]; also fails without a course.
    pub fn to_new_thread(&self, course_id: Option<&str>) -> Result<NewThread, DraftError> {
        let course_id = course_id.ok_or(DraftError::MissingCourse)?;
        self.validate()?;
        Ok(NewThread {
            course_id: course_id.to_string(),
            topic_id: self.topic_id.clone(),
            kind: DEFAULT_THREAD_KIND.to_string(),
            title: self.title.trim().to_string(),
            raw_body: self.body.clone(),
        })
    }

    /// Edit payload for this draft.
    ///
    /// # Errors
    ///
    /// See [`PostDraft::validate`].
    pub fn to_update(&self) -> Result<ThreadUpdate, DraftError> {
        self.validate()?;
        Ok(ThreadUpdate {
            topic_id: self.topic_id.clone(),
            title: self.title.trim().to_string(),
            raw_body: self.body.clone(),
        })
    }
}

/// Request the editor sends on submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Create a new thread.
    Create(NewThread),
    /// Update the selected thread.
    Update {
        /// Thread being edited.
        thread_id: String,
        /// Changed fields.
        update: ThreadUpdate,
    },
}

/// Build the submit request for the editor in the given mode.
///
/// # Errors
///
/// Returns the first reason the draft cannot be sent.
pub fn submission(
    draft: &PostDraft,
    ctx: &DiscussionContext,
    edit_existing: bool,
) -> Result<Submission, DraftError> {
    if edit_existing {
        let thread_id = ctx.post_id.clone().ok_or(DraftError::MissingPost)?;
        Ok(Submission::Update {
            thread_id,
            update: draft.to_update()?,
        })
    } else {
        draft
            .to_new_thread(ctx.course_id.as_deref())
            .map(Submission::Create)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::Location;

    fn topics() -> Vec<Topic> {
        vec![
            Topic {
                id: "t1".to_string(),
                name: "Intro".to_string(),
                category: Some("Week 1".to_string()),
            },
            Topic {
                id: "t2".to_string(),
                name: "Lab".to_string(),
                category: Some("Week 1".to_string()),
            },
            Topic {
                id: "general".to_string(),
                name: "General".to_string(),
                category: None,
            },
        ]
    }

    fn ctx(path: &str) -> DiscussionContext {
        DiscussionContext::from_location(&Location::parse(path))
    }

    #[test]
    fn listing_scopes_follow_the_location() {
        let topics = topics();
        let all = listing_query(&ctx("/c1/posts"), &topics, None).expect("course scope");
        assert_eq!(all.topic_filter(), None);

        let topic = listing_query(&ctx("/c1/topics/t2"), &topics, None).expect("topic scope");
        assert_eq!(topic.topic_filter().as_deref(), Some("t2"));

        let category =
            listing_query(&ctx("/c1/category/Week%201"), &topics, None).expect("category scope");
        assert_eq!(category.topic_filter().as_deref(), Some("t1,t2"));

        let own = listing_query(&ctx("/c1/my-posts"), &topics, Some("ada")).expect("own posts");
        assert_eq!(own.author.as_deref(), Some("ada"));
        assert!(own.topic_ids.is_empty());
    }

    #[test]
    fn category_waits_for_topics_and_root_needs_a_course() {
        assert_eq!(listing_query(&ctx("/c1/category/Week%201"), &[], None), None);
        assert_eq!(listing_query(&ctx("/"), &topics(), None), None);
    }

    #[test]
    fn thread_links_stay_in_scope() {
        assert_eq!(
            thread_path(&ctx("/c1/topics/t1"), "p9", false).as_deref(),
            Some("/c1/topics/t1/posts/p9")
        );
        assert_eq!(
            thread_path(&ctx("/c1/posts"), "p9", false).as_deref(),
            Some("/c1/posts/p9")
        );
        assert_eq!(
            thread_path(&ctx("/c1/my-posts"), "p9", true).as_deref(),
            Some("/c1/my-posts/p9")
        );
    }

    #[test]
    fn drafts_preselect_scope_topic_and_validate() {
        let topics = topics();
        assert_eq!(PostDraft::for_context(&ctx("/c1/topics/t2/posts/new"), &topics).topic_id, "t2");
        assert_eq!(
            PostDraft::for_context(&ctx("/c1/category/Week%201/posts/new"), &topics).topic_id,
            "t1"
        );
        assert_eq!(PostDraft::for_context(&ctx("/c1/posts/new"), &[]).topic_id, "");

        let mut draft = PostDraft::for_context(&ctx("/c1/posts/new"), &topics);
        assert_eq!(draft.to_new_thread(Some("c1")), Err(DraftError::MissingTitle));
        draft.title = "  Hello ".to_string();
        assert_eq!(draft.validate(), Err(DraftError::MissingBody));
        draft.body = "Body".to_string();
        assert_eq!(draft.to_new_thread(None), Err(DraftError::MissingCourse));
        let thread = draft.to_new_thread(Some("c1")).expect("complete draft");
        assert_eq!(thread.title, "Hello");
        assert_eq!(thread.kind, DEFAULT_THREAD_KIND);
        assert_eq!(draft.to_update().map(|update| update.topic_id), Ok("t1".to_string()));
    }

    #[test]
    fn submission_mode_follows_the_editor() {
        let draft = PostDraft {
            topic_id: "t1".to_string(),
            title: "Title".to_string(),
            body: "Body".to_string(),
        };
        assert!(matches!(
            submission(&draft, &ctx("/c1/posts/new"), false),
            Ok(Submission::Create(thread)) if thread.course_id == "c1"
        ));
        assert!(matches!(
            submission(&draft, &ctx("/c1/posts/p1/edit"), true),
            Ok(Submission::Update { thread_id, .. }) if thread_id == "p1"
        ));
        assert_eq!(
            submission(&draft, &ctx("/c1/posts"), true),
            Err(DraftError::MissingPost)
        );
    }

    #[test]
    fn edit_drafts_start_from_the_thread() {
        let thread = ThreadSummary {
            id: "p1".to_string(),
            title: "Title".to_string(),
            author: Some("ada".to_string()),
            topic_id: Some("t1".to_string()),
            raw_body: "Body".to_string(),
            read: true,
            comment_count: 2,
        };
        let draft = PostDraft::from_thread(&thread);
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.body, "Body");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn late_seeds_keep_typed_text() {
        let typed = PostDraft {
            topic_id: String::new(),
            title: "My question".to_string(),
            body: "Details".to_string(),
        };
        let topics = topics();
        let seed = PostDraft::for_context(&ctx("/c1/posts/new"), &topics);
        let reseeded = typed.reseed(Some(&seed), true);
        assert_eq!(reseeded.topic_id, "t1");
        assert_eq!(reseeded.title, "My question");
        assert_eq!(reseeded.body, "Details");

        let other_topic = PostDraft::for_context(&ctx("/c1/topics/t2/posts/new"), &topics);
        assert_eq!(reseeded.reseed(Some(&other_topic), true).topic_id, "t1");
        assert_eq!(reseeded.reseed(None, true), reseeded);
        assert_eq!(reseeded.reseed(Some(&other_topic), false), other_topic);
        assert_eq!(reseeded.reseed(None, false), PostDraft::default());
    }
}
