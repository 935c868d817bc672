//! Pure render-selection for the forum home view.
//!
//! # Design
//! - Every decision is a total function of the location, a few store flags and the viewport.
//! - Route dispatch is an ordered table of `(routes, view)` pairs; first match wins.
//! - The components only translate a [`ViewPlan`] into markup.

use crate::core::breakpoints::LARGE_MIN_WIDTH;
use crate::core::location::Location;
use crate::core::routes::{RouteName, RouteParams, generate_path, matches_any, route_params};
use crate::models::DiscussionProvider;
use tracing::debug;

/// Read-only bundle handed to every view below the home view for one route match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscussionContext {
    /// Second path segment, e.g. `topics`.
    pub page: Option<String>,
    /// Course identifier.
    pub course_id: Option<String>,
    /// Selected thread.
    pub post_id: Option<String>,
    /// Selected topic.
    pub topic_id: Option<String>,
    /// Embedded mode (no top navigation).
    pub in_context: bool,
    /// Selected category.
    pub category: Option<String>,
}

impl DiscussionContext {
    /// Build the context for a location.
    #[must_use]
    pub fn from_location(location: &Location) -> Self {
        let RouteParams {
            course_id,
            topic_id,
            post_id,
            category,
            page,
        } = route_params(&location.pathname);
        Self {
            page,
            course_id,
            post_id,
            topic_id,
            in_context: location.in_context(),
            category,
        }
    }

    /// Route parameters equivalent to this context, used to generate links.
    #[must_use]
    pub fn params(&self) -> RouteParams {
        RouteParams {
            course_id: self.course_id.clone(),
            topic_id: self.topic_id.clone(),
            post_id: self.post_id.clone(),
            category: self.category.clone(),
            page: self.page.clone(),
        }
    }
}

/// Which breadcrumb renderer to mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreadcrumbVariant {
    /// Category/topic breadcrumbs of the legacy provider.
    Legacy,
    /// Topic breadcrumbs of every other provider.
    Standard,
}

/// Sidebar listing selected for the current path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarView {
    /// Posts written by the current user.
    OwnPosts,
    /// Posts of the course, a topic or a category.
    Posts,
    /// Topic listing.
    Topics,
    /// No listing matched; navigate to the "all topics" view.
    Redirect(Location),
    /// Path is outside the discussions root.
    Empty,
}

/// Content pane selected for the current path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentView {
    /// Editor creating a new post.
    NewPost,
    /// Editor updating an existing post.
    EditPost,
    /// Thread with its comments.
    Comments,
    /// Nothing to show.
    Empty,
}

/// Inputs sampled for one render.
#[derive(Clone, Copy, Debug)]
pub struct ViewInputs<'a> {
    /// Current browser location.
    pub location: &'a Location,
    /// `threads.post_editor_visible` from the store.
    pub post_editor_visible: bool,
    /// Provider selected from the store.
    pub provider: DiscussionProvider,
    /// Viewport width in CSS pixels.
    pub viewport_width: u32,
}

/// Everything the home view needs to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewPlan {
    /// Context for descendant views.
    pub context: DiscussionContext,
    /// Whether the content pane is displayed.
    pub show_content_area: bool,
    /// Whether the listing sidebar is displayed.
    pub show_sidebar: bool,
    /// Whether the top navigation bar is mounted.
    pub show_navigation_bar: bool,
    /// Breadcrumb renderer, if any.
    pub breadcrumb: Option<BreadcrumbVariant>,
    /// Sidebar listing.
    pub sidebar: SidebarView,
    /// Content pane.
    pub content: ContentView,
}

const SIDEBAR_ROUTES: [(&[RouteName], SidebarView); 3] = [
    (&[RouteName::MyPosts], SidebarView::OwnPosts),
    (
        &[RouteName::Posts, RouteName::AllPosts, RouteName::TopicCategory],
        SidebarView::Posts,
    ),
    (&[RouteName::Topics], SidebarView::Topics),
];

const CONTENT_ROUTES: [(RouteName, ContentView); 2] = [
    (RouteName::EditPost, ContentView::EditPost),
    (RouteName::Comments, ContentView::Comments),
];

const BREADCRUMB_ROUTES: [RouteName; 2] = [RouteName::Posts, RouteName::TopicCategory];

/// The content pane is shown while a post is selected or being written.
#[must_use]
pub const fn display_content_area(post_selected: bool, post_editor_visible: bool) -> bool {
    post_selected || post_editor_visible
}

/// Wide screens always show the sidebar; narrow screens only when no content is displayed.
#[must_use]
pub const fn display_sidebar(viewport_width: u32, content_area_visible: bool) -> bool {
    viewport_width >= LARGE_MIN_WIDTH || !content_area_visible
}

/// Breadcrumbs appear on post and category paths; the renderer depends on the provider.
#[must_use]
pub fn select_breadcrumb(pathname: &str, provider: DiscussionProvider) -> Option<BreadcrumbVariant> {
    if !matches_any(&BREADCRUMB_ROUTES, pathname) {
        return None;
    }
    Some(match provider {
        DiscussionProvider::Legacy => BreadcrumbVariant::Legacy,
        DiscussionProvider::Other => BreadcrumbVariant::Standard,
    })
}

/// Pick the sidebar listing, falling back to a redirect to "all topics".
#[must_use]
pub fn select_sidebar(location: &Location) -> SidebarView {
    let pathname = location.pathname.as_str();
    if let Some((_, view)) = SIDEBAR_ROUTES
        .iter()
        .find(|(routes, _)| matches_any(routes, pathname))
    {
        return view.clone();
    }
    RouteName::Discussions
        .match_path(pathname)
        .and_then(|params| {
            RouteName::TopicsAll
                .patterns()
                .first()
                .and_then(|pattern| generate_path(pattern, &params))
        })
        .map_or(SidebarView::Empty, |path| {
            SidebarView::Redirect(location.with_pathname(path))
        })
}

/// Pick the content pane. An open editor only ever shows post creation.
#[must_use]
pub fn select_content(pathname: &str, post_editor_visible: bool) -> ContentView {
    if post_editor_visible {
        return if RouteName::NewPost.matches(pathname) {
            ContentView::NewPost
        } else {
            ContentView::Empty
        };
    }
    CONTENT_ROUTES
        .iter()
        .find(|(route, _)| route.matches(pathname))
        .map_or(ContentView::Empty, |(_, view)| *view)
}

/// The navigation bar is hidden in embedded mode and outside the discussions root.
#[must_use]
pub fn show_navigation_bar(location: &Location) -> bool {
    !location.in_context() && RouteName::Discussions.matches(&location.pathname)
}

/// Derive the full render plan.
#[must_use]
pub fn plan_view(inputs: &ViewInputs<'_>) -> ViewPlan {
    let location = inputs.location;
    let context = DiscussionContext::from_location(location);
    let show_content_area =
        display_content_area(context.post_id.is_some(), inputs.post_editor_visible);
    let plan = ViewPlan {
        show_sidebar: display_sidebar(inputs.viewport_width, show_content_area),
        show_navigation_bar: show_navigation_bar(location),
        breadcrumb: select_breadcrumb(&location.pathname, inputs.provider),
        sidebar: select_sidebar(location),
        content: select_content(&location.pathname, inputs.post_editor_visible),
        show_content_area,
        context,
    };
    debug!(
        path = %location.pathname,
        sidebar = ?plan.sidebar,
        content = ?plan.content,
        show_sidebar = plan.show_sidebar,
        show_content_area = plan.show_content_area,
        "view planned"
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(href: &str, editor: bool, width: u32) -> ViewPlan {
        let location = Location::parse(href);
        plan_view(&ViewInputs {
            location: &location,
            post_editor_visible: editor,
            provider: DiscussionProvider::Other,
            viewport_width: width,
        })
    }

    #[test]
    fn context_mirrors_route_params() {
        let plan = plan("/c1/topics/t1/posts/p1?inContext", false, 1200);
        assert_eq!(
            plan.context,
            DiscussionContext {
                page: Some("topics".to_string()),
                course_id: Some("c1".to_string()),
                post_id: Some("p1".to_string()),
                topic_id: Some("t1".to_string()),
                in_context: true,
                category: None,
            }
        );
    }

    #[test]
    fn sidebar_table_is_first_match_wins() {
        assert_eq!(select_sidebar(&Location::parse("/c1/my-posts/p1")), SidebarView::OwnPosts);
        assert_eq!(select_sidebar(&Location::parse("/c1/posts")), SidebarView::Posts);
        assert_eq!(select_sidebar(&Location::parse("/c1/topics/t1")), SidebarView::Posts);
        assert_eq!(select_sidebar(&Location::parse("/c1/category/wk1")), SidebarView::Posts);
        assert_eq!(select_sidebar(&Location::parse("/c1/topics")), SidebarView::Topics);
        assert_eq!(select_sidebar(&Location::parse("/")), SidebarView::Empty);
    }

    #[test]
    fn unmatched_sidebar_redirects_to_all_topics() {
        assert_eq!(
            select_sidebar(&Location::parse("/c1/learners?inContext=1#a")),
            SidebarView::Redirect(Location::parse("/c1/topics?inContext=1#a"))
        );
        assert_eq!(
            select_sidebar(&Location::parse("/c1")),
            SidebarView::Redirect(Location::parse("/c1/topics"))
        );
    }

    #[test]
    fn open_editor_only_shows_post_creation() {
        assert_eq!(select_content("/c1/posts/new", true), ContentView::NewPost);
        assert_eq!(select_content("/c1/topics/t1/posts/new", true), ContentView::NewPost);
        assert_eq!(select_content("/c1/posts/p1", true), ContentView::Empty);
        assert_eq!(select_content("/c1/posts/p1/edit", true), ContentView::Empty);
    }

    #[test]
    fn closed_editor_dispatches_by_path() {
        assert_eq!(select_content("/c1/posts/p1/edit", false), ContentView::EditPost);
        assert_eq!(select_content("/c1/my-posts/p1", false), ContentView::Comments);
        assert_eq!(
            select_content("/c1/category/wk1/posts/p1", false),
            ContentView::Comments
        );
        assert_eq!(select_content("/c1/topics", false), ContentView::Empty);
    }

    #[test]
    fn breadcrumbs_follow_provider_on_matching_paths() {
        assert_eq!(
            select_breadcrumb("/c1/topics/t1", DiscussionProvider::Legacy),
            Some(BreadcrumbVariant::Legacy)
        );
        assert_eq!(
            select_breadcrumb("/c1/category/wk1", DiscussionProvider::Other),
            Some(BreadcrumbVariant::Standard)
        );
        assert_eq!(select_breadcrumb("/c1/topics", DiscussionProvider::Legacy), None);
        assert_eq!(select_breadcrumb("/c1/posts", DiscussionProvider::Other), None);
    }

    #[test]
    fn narrow_screens_switch_between_panes() {
        let listing = plan("/c1/topics", false, 400);
        assert!(listing.show_sidebar);
        assert!(!listing.show_content_area);

        let thread = plan("/c1/posts/p1", false, 400);
        assert!(!thread.show_sidebar);
        assert!(thread.show_content_area);

        let wide = plan("/c1/posts/p1", false, LARGE_MIN_WIDTH);
        assert!(wide.show_sidebar);
        assert!(wide.show_content_area);
    }

    #[test]
    fn navigation_bar_respects_embed_mode() {
        assert!(plan("/c1/topics", false, 1200).show_navigation_bar);
        assert!(!plan("/c1/topics?inContext", false, 1200).show_navigation_bar);
        assert!(!plan("/", false, 1200).show_navigation_bar);
    }
}
