//! Shared DTOs matching the LMS discussion APIs, plus their UI-facing forms.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Backend discussion engine powering the course forum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscussionProvider {
    /// The original in-platform forum, organised by categories.
    Legacy,
    /// Any other provider (topic-based forums and third parties).
    #[default]
    Other,
}

impl DiscussionProvider {
    /// Map the provider name reported by the course configuration.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("legacy") {
            Self::Legacy
        } else {
            Self::Other
        }
    }
}

/// Course discussion configuration payload.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct CourseConfigDto {
    /// Provider name, e.g. `legacy` or `openedx`.
    #[serde(default)]
    pub provider: String,
    /// Whether posting is currently blacked out.
    #[serde(default)]
    pub is_posting_enabled: Option<bool>,
    /// Whether the caller can moderate.
    #[serde(default)]
    pub user_is_privileged: bool,
}

/// Course discussion configuration as consumed by views.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseConfig {
    /// Provider driving breadcrumb rendering.
    pub provider: DiscussionProvider,
    /// Whether new posts may be created.
    pub posting_enabled: bool,
    /// Whether the caller can moderate.
    pub privileged: bool,
}

impl From<CourseConfigDto> for CourseConfig {
    fn from(dto: CourseConfigDto) -> Self {
        Self {
            provider: DiscussionProvider::from_name(&dto.provider),
            posting_enabled: dto.is_posting_enabled.unwrap_or(true),
            privileged: dto.user_is_privileged,
        }
    }
}

/// Topic node as returned by the topics endpoint; categories carry children and no id.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TopicDto {
    /// Topic identifier, absent for pure categories.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Nested topics.
    #[serde(default)]
    pub children: Vec<TopicDto>,
}

/// Flattened topic with the category it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic {
    /// Topic identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Enclosing category name, when the topic is nested.
    pub category: Option<String>,
}

/// Flatten a topic tree into addressable topics, depth first.
#[must_use]
pub fn flatten_topics(nodes: Vec<TopicDto>) -> Vec<Topic> {
    fn walk(nodes: Vec<TopicDto>, category: Option<&str>, out: &mut Vec<Topic>) {
        for node in nodes {
            if let Some(id) = node.id {
                out.push(Topic {
                    id,
                    name: node.name.clone(),
                    category: category.map(ToString::to_string),
                });
            }
            walk(node.children, Some(&node.name), out);
        }
    }
    let mut out = Vec::new();
    walk(nodes, None, &mut out);
    out
}

/// Single course block.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CourseBlock {
    /// Usage key.
    pub id: String,
    /// Block type (`course`, `chapter`, `sequential`, `vertical`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    #[serde(default)]
    pub display_name: String,
    /// Child usage keys.
    #[serde(default)]
    pub children: Vec<String>,
    /// Discussion topic attached to the block, if any.
    #[serde(default)]
    pub topic_id: Option<String>,
    /// Link to the rendered unit.
    #[serde(default)]
    pub student_view_url: Option<String>,
}

/// Course blocks payload keyed by usage key.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct CourseBlocks {
    /// Usage key of the course root.
    #[serde(default)]
    pub root: String,
    /// Blocks keyed by usage key.
    #[serde(default)]
    pub blocks: BTreeMap<String, CourseBlock>,
}

impl CourseBlocks {
    /// Find the block that hosts a discussion topic.
    #[must_use]
    pub fn block_for_topic(&self, topic_id: &str) -> Option<&CourseBlock> {
        self.blocks
            .values()
            .find(|block| block.topic_id.as_deref() == Some(topic_id))
    }
}

/// Thread row shown in post listings and the comments pane.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ThreadSummary {
    /// Thread identifier.
    pub id: String,
    /// Thread title.
    pub title: String,
    /// Author username; absent for anonymous posts.
    #[serde(default)]
    pub author: Option<String>,
    /// Topic the thread belongs to.
    #[serde(default)]
    pub topic_id: Option<String>,
    /// Markdown body.
    #[serde(default)]
    pub raw_body: String,
    /// Whether the caller has read the thread.
    #[serde(default)]
    pub read: bool,
    /// Number of responses.
    #[serde(default)]
    pub comment_count: u32,
}

/// Paginated thread listing.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ThreadPage {
    /// Threads on this page.
    #[serde(default)]
    pub results: Vec<ThreadSummary>,
}

/// Payload for creating a thread.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewThread {
    /// Course the thread is posted in.
    pub course_id: String,
    /// Target topic.
    pub topic_id: String,
    /// Thread type, `discussion` or `question`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Title.
    pub title: String,
    /// Markdown body.
    pub raw_body: String,
}

/// Fields changed when editing a thread.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ThreadUpdate {
    /// Target topic.
    pub topic_id: String,
    /// Title.
    pub title: String,
    /// Markdown body.
    pub raw_body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_map_to_variants() {
        assert_eq!(DiscussionProvider::from_name("legacy"), DiscussionProvider::Legacy);
        assert_eq!(DiscussionProvider::from_name("LEGACY"), DiscussionProvider::Legacy);
        assert_eq!(DiscussionProvider::from_name("openedx"), DiscussionProvider::Other);
        assert_eq!(DiscussionProvider::default(), DiscussionProvider::Other);
    }

    #[test]
    fn config_defaults_posting_to_enabled() {
        let config: CourseConfigDto =
            serde_json::from_str(r#"{"provider":"legacy"}"#).expect("valid json");
        let config = CourseConfig::from(config);
        assert_eq!(config.provider, DiscussionProvider::Legacy);
        assert!(config.posting_enabled);
        assert!(!config.privileged);
    }

    #[test]
    fn topics_flatten_with_categories() {
        let tree: Vec<TopicDto> = serde_json::from_str(
            r#"[
                {"name":"Week 1","children":[{"id":"t1","name":"Intro"},{"id":"t2","name":"Lab"}]},
                {"id":"general","name":"General"}
            ]"#,
        )
        .expect("valid json");
        let topics = flatten_topics(tree);
        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0].category.as_deref(), Some("Week 1"));
        assert_eq!(topics[2].id, "general");
        assert_eq!(topics[2].category, None);
    }

    #[test]
    fn new_threads_serialise_their_kind_as_type() {
        let thread = NewThread {
            course_id: "c1".to_string(),
            topic_id: "t1".to_string(),
            kind: "discussion".to_string(),
            title: "Hello".to_string(),
            raw_body: "Body".to_string(),
        };
        let value = serde_json::to_value(&thread).expect("serialisable");
        assert_eq!(value["type"], "discussion");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn blocks_are_searchable_by_topic() {
        let blocks: CourseBlocks = serde_json::from_str(
            r#"{"root":"course","blocks":{
                "course":{"id":"course","type":"course","children":["u1"]},
                "u1":{"id":"u1","type":"vertical","display_name":"Unit","topic_id":"t1"}
            }}"#,
        )
        .expect("valid json");
        assert_eq!(blocks.block_for_topic("t1").map(|b| b.id.as_str()), Some("u1"));
        assert!(blocks.block_for_topic("t9").is_none());
    }
}
