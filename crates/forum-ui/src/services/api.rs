//! HTTP client for the LMS discussion and course APIs.

use crate::core::auth::AuthenticatedUser;
use crate::core::effects::{BaseDataSource, FetchError};
use crate::models::{
    CourseBlocks, CourseConfig, CourseConfigDto, NewThread, ThreadPage, ThreadSummary, ThreadUpdate,
    Topic, TopicDto, flatten_topics,
};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use web_sys::RequestCredentials;

const BLOCK_FIELDS: &str = "children,display_name,topic_id,student_view_url";

#[derive(Clone, Debug)]
pub(crate) struct ForumApiClient {
    pub(crate) base_url: String,
}

impl ForumApiClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(url: &str, req: Request) -> Result<Response, FetchError> {
        let response = req
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|err| FetchError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        if response.ok() {
            Ok(response)
        } else {
            Err(FetchError::Status {
                status: response.status(),
                url: url.to_string(),
            })
        }
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, FetchError> {
        response.json::<T>().await.map_err(|err| FetchError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = Self::send(&url, Request::get(&url)).await?;
        Self::decode(&url, response).await
    }

    /// The signed-in user; `None` when the LMS reports an anonymous session.
    pub(crate) async fn fetch_current_user(&self) -> Result<Option<AuthenticatedUser>, FetchError> {
        match self.get_json::<AuthenticatedUser>("/api/user/v1/me").await {
            Ok(user) => Ok(Some(user)),
            Err(FetchError::Status {
                status: 401 | 403, ..
            }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Threads of a course, optionally narrowed to a topic or an author.
    pub(crate) async fn fetch_threads(
        &self,
        course_id: &str,
        topic_id: Option<&str>,
        author: Option<&str>,
    ) -> Result<Vec<ThreadSummary>, FetchError> {
        let mut path = format!(
            "/api/discussion/v1/threads/?course_id={}",
            urlencoding::encode(course_id)
        );
        if let Some(topic_id) = topic_id {
            path.push_str(&format!("&topic_id={}", urlencoding::encode(topic_id)));
        }
        if let Some(author) = author {
            path.push_str(&format!("&author={}", urlencoding::encode(author)));
        }
        Ok(self.get_json::<ThreadPage>(&path).await?.results)
    }

    /// One thread by id, for selections that are not part of the loaded listing page.
    pub(crate) async fn fetch_thread(&self, thread_id: &str) -> Result<ThreadSummary, FetchError> {
        let path = format!(
            "/api/discussion/v1/threads/{}/",
            urlencoding::encode(thread_id)
        );
        self.get_json(&path).await
    }

    /// Create a thread and return it as stored by the server.
    pub(crate) async fn create_thread(
        &self,
        thread: &NewThread,
    ) -> Result<ThreadSummary, FetchError> {
        let url = self.url("/api/discussion/v1/threads/");
        debug!(%url, topic_id = %thread.topic_id, "POST");
        let req = Request::post(&url)
            .json(thread)
            .map_err(|err| FetchError::Transport {
                url: url.clone(),
                message: err.to_string(),
            })?;
        let response = Self::send(&url, req).await?;
        Self::decode(&url, response).await
    }

    /// Apply an edit to an existing thread.
    pub(crate) async fn update_thread(
        &self,
        thread_id: &str,
        update: &ThreadUpdate,
    ) -> Result<ThreadSummary, FetchError> {
        let body = serde_json::to_string(update).map_err(|err| FetchError::Decode {
            url: thread_id.to_string(),
            message: err.to_string(),
        })?;
        self.patch_thread(thread_id, body).await
    }

    /// Flag a thread as read for the current user.
    pub(crate) async fn mark_thread_read(&self, thread_id: &str) -> Result<(), FetchError> {
        self.patch_thread(thread_id, r#"{"read":true}"#.to_string())
            .await
            .map(|_| ())
    }

    async fn patch_thread(&self, thread_id: &str, body: String) -> Result<ThreadSummary, FetchError> {
        let url = self.url(&format!(
            "/api/discussion/v1/threads/{}/",
            urlencoding::encode(thread_id)
        ));
        debug!(%url, "PATCH");
        let req = Request::patch(&url)
            .header("Content-Type", "application/merge-patch+json")
            .body(body);
        let response = Self::send(&url, req).await?;
        Self::decode(&url, response).await
    }
}

#[async_trait(?Send)]
impl BaseDataSource for ForumApiClient {
    async fn course_config(&self, course_id: &str) -> Result<CourseConfig, FetchError> {
        let path = format!(
            "/api/discussion/v1/courses/{}/",
            urlencoding::encode(course_id)
        );
        Ok(self.get_json::<CourseConfigDto>(&path).await?.into())
    }

    async fn course_topics(&self, course_id: &str) -> Result<Vec<Topic>, FetchError> {
        let path = format!(
            "/api/discussion/v2/course_topics/{}",
            urlencoding::encode(course_id)
        );
        Ok(flatten_topics(self.get_json::<Vec<TopicDto>>(&path).await?))
    }

    async fn course_blocks(
        &self,
        course_id: &str,
        username: &str,
    ) -> Result<CourseBlocks, FetchError> {
        let path = format!(
            "/api/courses/v2/blocks/?course_id={}&username={}&depth=all&requested_fields={}",
            urlencoding::encode(course_id),
            urlencoding::encode(username),
            urlencoding::encode(BLOCK_FIELDS)
        );
        self.get_json::<CourseBlocks>(&path).await
    }
}
