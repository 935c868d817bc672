//! Browser-location value type used by routing decisions.
//!
//! # Design
//! - Keep the location as plain strings so decisions stay testable off the browser.
//! - `search` keeps its leading `?` and `hash` its leading `#` when present.

/// Query parameter that switches the forum into embedded mode.
pub const IN_CONTEXT_PARAM: &str = "inContext";

/// Snapshot of the current browser location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    /// Path portion, always starting with `/`.
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
}

impl Location {
    /// Build a location from its parts, normalising the separators.
    #[must_use]
    pub fn new(pathname: &str, search: &str, hash: &str) -> Self {
        let pathname = if pathname.starts_with('/') {
            pathname.to_string()
        } else {
            format!("/{pathname}")
        };
        Self {
            pathname,
            search: with_prefix('?', search),
            hash: with_prefix('#', hash),
        }
    }

    /// Parse a path-absolute reference such as `/c/topics?x=1#top`.
    #[must_use]
    pub fn parse(href: &str) -> Self {
        let (rest, hash) = href.split_once('#').unwrap_or((href, ""));
        let (pathname, search) = rest.split_once('?').unwrap_or((rest, ""));
        Self::new(pathname, search, hash)
    }

    /// Whether the query string carries `name`, regardless of its value.
    #[must_use]
    pub fn has_query_param(&self, name: &str) -> bool {
        self.search
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').map_or(pair, |(key, _)| key))
            .any(|key| urlencoding::decode(key).is_ok_and(|key| key == name))
    }

    /// Embedded mode flag derived from the `inContext` query parameter.
    #[must_use]
    pub fn in_context(&self) -> bool {
        self.has_query_param(IN_CONTEXT_PARAM)
    }

    /// Same query and fragment, different path.
    #[must_use]
    pub fn with_pathname(&self, pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: self.search.clone(),
            hash: self.hash.clone(),
        }
    }

    /// Render as a path-absolute reference for history APIs.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

fn with_prefix(prefix: char, value: &str) -> String {
    let bare = value.trim_start_matches(prefix);
    if bare.is_empty() {
        String::new()
    } else {
        format!("{prefix}{bare}")
    }
}

/// Whether a link click should be routed in-app rather than left to the browser.
///
/// Only an unmodified primary-button click qualifies; anything else keeps the browser's
/// open-in-new-tab or new-window behaviour.
#[must_use]
pub const fn routes_in_app(button: i16, modifier_held: bool) -> bool {
    button == 0 && !modifier_held
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_query_and_fragment() {
        let location = Location::parse("/c1/topics?inContext#top");
        assert_eq!(location.pathname, "/c1/topics");
        assert_eq!(location.search, "?inContext");
        assert_eq!(location.hash, "#top");
        assert_eq!(location.href(), "/c1/topics?inContext#top");
    }

    #[test]
    fn separators_are_normalised() {
        let location = Location::new("c1", "a=1", "");
        assert_eq!(location.href(), "/c1?a=1");
        assert_eq!(Location::new("/c1", "?", "#").href(), "/c1");
    }

    #[test]
    fn in_context_is_a_presence_test() {
        for search in ["?inContext", "?inContext=", "?inContext=0", "?a=1&inContext=true"] {
            assert!(Location::new("/c1", search, "").in_context(), "{search}");
        }
        for search in ["", "?context=1", "?inContextual=1", "?x=inContext"] {
            assert!(!Location::new("/c1", search, "").in_context(), "{search}");
        }
    }

    #[test]
    fn with_pathname_keeps_query_and_hash() {
        let location = Location::parse("/c1/nowhere?inContext=1#frag");
        assert_eq!(
            location.with_pathname("/c1/topics").href(),
            "/c1/topics?inContext=1#frag"
        );
    }

    #[test]
    fn only_plain_primary_clicks_route_in_app() {
        assert!(routes_in_app(0, false));
        assert!(!routes_in_app(0, true));
        assert!(!routes_in_app(1, false));
        assert!(!routes_in_app(2, false));
    }
}
