//! Route parameters of the list view and prefix normalization.

use crate::mount::normalize_mount_path;

/// Which list route was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteKind {
    /// Root of the mount; no prefix
    #[default]
    ListRoot,
    /// Nested listing under a prefix; the prefix must end in `/`
    List,
}

/// Parameters a navigation is requested with
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteParams {
    pub mount_path: String,
    pub path_prefix: String,
    pub tab: Option<String>,
    pub page: Option<usize>,
    pub page_filter: Option<String>,
    pub kind: RouteKind,
}

impl RouteParams {
    /// Root listing of `mount_path`
    pub fn root(mount_path: impl Into<String>) -> Self {
        Self {
            mount_path: mount_path.into(),
            ..Self::default()
        }
    }

    /// Nested listing of `path_prefix` under `mount_path`
    pub fn nested(mount_path: impl Into<String>, path_prefix: impl Into<String>) -> Self {
        Self {
            mount_path: mount_path.into(),
            path_prefix: path_prefix.into(),
            kind: RouteKind::List,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = Some(tab.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, page_filter: impl Into<String>) -> Self {
        self.page_filter = Some(page_filter.into());
        self
    }
}

/// A requested navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub params: RouteParams,
    /// Set when the navigation follows the deletion of a record
    pub is_deletion: bool,
}

impl Transition {
    pub fn new(params: RouteParams) -> Self {
        Self {
            params,
            is_deletion: false,
        }
    }

    /// Navigation back to the listing after a record was deleted
    pub fn after_deletion(params: RouteParams) -> Self {
        Self {
            params,
            is_deletion: true,
        }
    }
}

/// Identity of a listing for cache invalidation; page and filter are not
/// part of it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct RouteKey {
    pub mount_path: String,
    pub prefix: String,
    pub tab: Option<String>,
}

impl RouteKey {
    pub(crate) fn new(params: &RouteParams, prefix: &str) -> Self {
        Self {
            mount_path: normalize_mount_path(&params.mount_path),
            prefix: prefix.to_string(),
            tab: params.tab.clone().filter(|t| !t.is_empty()),
        }
    }
}

/// Strip leading slashes and collapse repeated ones
///
/// Idempotent. A trailing slash is kept but never added.
#[must_use]
pub fn normalize_list_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    for ch in path.trim_start_matches('/').chars() {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_leading_and_repeated_slashes() {
        assert_eq!(normalize_list_path("/foo//bar/"), "foo/bar/");
        assert_eq!(normalize_list_path("///a///b"), "a/b");
        assert_eq!(normalize_list_path("foo/"), "foo/");
        assert_eq!(normalize_list_path("/"), "");
        assert_eq!(normalize_list_path(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for path in ["/foo//bar/", "a", "//", "x//y//z", "already/clean/"] {
            let once = normalize_list_path(path);
            assert_eq!(normalize_list_path(&once), once, "path {path:?}");
        }
    }

    #[test]
    fn test_route_key_ignores_page_and_filter() {
        let a = RouteParams::nested("/secret/", "foo/").with_page(2);
        let b = RouteParams::nested("secret", "foo/").with_filter("x");
        assert_eq!(RouteKey::new(&a, "foo/"), RouteKey::new(&b, "foo/"));
    }

    #[test]
    fn test_route_key_treats_empty_tab_as_none() {
        let a = RouteParams::root("pki").with_tab("");
        let b = RouteParams::root("pki");
        assert_eq!(RouteKey::new(&a, ""), RouteKey::new(&b, ""));
    }
}
