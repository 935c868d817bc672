//! Named route patterns and a small prefix matcher.
//!
//! # Design
//! - Patterns are plain strings: `:name` is a required segment, `:name?` an optional one.
//! - Matching is prefix-based: extra trailing path segments are allowed.
//! - Parameter values are percent-decoded on match and escaped on generation.

/// Parameters extracted from the current path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteParams {
    /// Course identifier (`courseId`).
    pub course_id: Option<String>,
    /// Topic identifier (`topicId`).
    pub topic_id: Option<String>,
    /// Thread identifier (`postId`).
    pub post_id: Option<String>,
    /// Category name (`category`).
    pub category: Option<String>,
    /// Second path segment (`page`), e.g. `topics` or `my-posts`.
    pub page: Option<String>,
}

impl RouteParams {
    /// Look up a parameter by its pattern name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "courseId" => self.course_id.as_deref(),
            "topicId" => self.topic_id.as_deref(),
            "postId" => self.post_id.as_deref(),
            "category" => self.category.as_deref(),
            "page" => self.page.as_deref(),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "courseId" => &mut self.course_id,
            "topicId" => &mut self.topic_id,
            "postId" => &mut self.post_id,
            "category" => &mut self.category,
            "page" => &mut self.page,
            _ => return,
        };
        *slot = Some(value);
    }
}

/// Externally defined URL shapes the forum reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteName {
    /// Any course-scoped discussions path.
    Discussions,
    /// The "all topics" listing.
    TopicsAll,
    /// Topic listing, optionally scoped to a topic or category.
    Topics,
    /// A category (legacy provider topic group).
    TopicCategory,
    /// Posts of a single topic.
    Posts,
    /// All posts of the course, optionally with a selected post.
    AllPosts,
    /// Posts authored by the current user.
    MyPosts,
    /// Post creation.
    NewPost,
    /// Editing an existing post.
    EditPost,
    /// A thread with its comments.
    Comments,
    /// Course root with the optional page segment.
    CommentsPage,
    /// A thread shown inside the "my posts" listing.
    MyPostComments,
}

impl RouteName {
    /// Patterns registered under this name, in match order.
    #[must_use]
    pub const fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::Discussions => &["/:courseId"],
            Self::TopicsAll => &["/:courseId/topics"],
            Self::Topics => &["/:courseId/topics/:topicId?", "/:courseId/category/:category"],
            Self::TopicCategory => &["/:courseId/category/:category"],
            Self::Posts => &["/:courseId/topics/:topicId"],
            Self::AllPosts => &["/:courseId/posts/:postId?"],
            Self::MyPosts => &["/:courseId/my-posts/:postId?"],
            Self::NewPost => &[
                "/:courseId/topics/:topicId/posts/new",
                "/:courseId/category/:category/posts/new",
                "/:courseId/posts/new",
                "/:courseId/my-posts/new",
            ],
            Self::EditPost => &[
                "/:courseId/category/:category/posts/:postId/edit",
                "/:courseId/topics/:topicId/posts/:postId/edit",
                "/:courseId/posts/:postId/edit",
                "/:courseId/my-posts/:postId/edit",
            ],
            Self::Comments => &[
                "/:courseId/category/:category/posts/:postId",
                "/:courseId/topics/:topicId/posts/:postId",
                "/:courseId/posts/:postId",
                "/:courseId/my-posts/:postId",
            ],
            Self::CommentsPage => &["/:courseId/:page?"],
            Self::MyPostComments => &["/:courseId/my-posts/:postId"],
        }
    }

    /// Match the path against this name's patterns, first match wins.
    #[must_use]
    pub fn match_path(self, pathname: &str) -> Option<RouteParams> {
        self.patterns()
            .iter()
            .find_map(|pattern| match_pattern(pattern, pathname))
    }

    /// Whether any of this name's patterns matches the path.
    #[must_use]
    pub fn matches(self, pathname: &str) -> bool {
        self.match_path(pathname).is_some()
    }

    /// Path from the first pattern whose required parameters are all present.
    #[must_use]
    pub fn path(self, params: &RouteParams) -> Option<String> {
        self.patterns()
            .iter()
            .find_map(|pattern| generate_path(pattern, params))
    }
}

/// Route names consulted, in order, to extract [`RouteParams`] for the current path.
///
/// Post creation precedes the post-id shapes so that `new` is never read as a post id.
pub const ALL_ROUTES: [RouteName; 8] = [
    RouteName::EditPost,
    RouteName::NewPost,
    RouteName::Comments,
    RouteName::TopicCategory,
    RouteName::Topics,
    RouteName::AllPosts,
    RouteName::MyPosts,
    RouteName::Discussions,
];

/// True when any of `names` matches the path.
#[must_use]
pub fn matches_any(names: &[RouteName], pathname: &str) -> bool {
    names.iter().any(|name| name.matches(pathname))
}

/// Parameters for the current path: the first [`ALL_ROUTES`] match plus the page segment.
#[must_use]
pub fn route_params(pathname: &str) -> RouteParams {
    let mut params = ALL_ROUTES
        .iter()
        .find_map(|name| name.match_path(pathname))
        .unwrap_or_default();
    params.page = RouteName::CommentsPage
        .match_path(pathname)
        .and_then(|page| page.page);
    params
}

enum Segment<'a> {
    Literal(&'a str),
    Param { name: &'a str, optional: bool },
}

fn parse_segment(raw: &str) -> Segment<'_> {
    raw.strip_prefix(':').map_or(Segment::Literal(raw), |name| {
        name.strip_suffix('?').map_or(
            Segment::Param {
                name,
                optional: false,
            },
            |name| Segment::Param {
                name,
                optional: true,
            },
        )
    })
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Match a single pattern against the leading segments of `pathname`.
#[must_use]
pub fn match_pattern(pattern: &str, pathname: &str) -> Option<RouteParams> {
    let mut path = split_path(pathname);
    let mut params = RouteParams::default();
    for segment in split_path(pattern).map(parse_segment) {
        match (segment, path.next()) {
            (Segment::Literal(expected), Some(actual))
                if expected.eq_ignore_ascii_case(actual) => {}
            (Segment::Param { name, .. }, Some(actual)) => params.set(name, decode(actual)),
            (Segment::Param { optional: true, .. }, None) => break,
            _ => return None,
        }
    }
    Some(params)
}

/// Fill a pattern with parameters. Returns `None` when a required parameter is absent.
///
/// Optional segments without a value end the generated path.
#[must_use]
pub fn generate_path(pattern: &str, params: &RouteParams) -> Option<String> {
    let mut path = String::new();
    for segment in split_path(pattern).map(parse_segment) {
        match segment {
            Segment::Literal(literal) => {
                path.push('/');
                path.push_str(literal);
            }
            Segment::Param { name, optional } => match params.get(name) {
                Some(value) if !value.is_empty() => {
                    path.push('/');
                    path.push_str(&escape(value));
                }
                _ if optional => break,
                _ => return None,
            },
        }
    }
    if path.is_empty() {
        path.push('/');
    }
    Some(path)
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment).map_or_else(|_| segment.to_string(), |value| value.into_owned())
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            '/' => escaped.push_str("%2F"),
            '?' => escaped.push_str("%3F"),
            '#' => escaped.push_str("%23"),
            other => escaped.push(other),
        }
    }
    escaped
}
