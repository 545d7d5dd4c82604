use crate::url::normalize::CanonicalUrl;

/// The host + path-prefix boundary of an export
///
/// An empty `path_prefix` covers the whole host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeConfig {
    /// Host key (lowercase host, plus `:port` when explicit)
    pub host: String,

    /// Raw path prefix every in-scope path must start with
    pub path_prefix: String,
}

impl ScopeConfig {
    pub fn new(host: impl Into<String>, path_prefix: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path_prefix: path_prefix.into(),
        }
    }

    /// Derives the scope implied by a seed URL
    ///
    /// The prefix is the seed's path without its trailing slash, so a seed at
    /// the site root scopes the whole host and `https://x/book/` scopes
    /// everything under `/book`.
    pub fn from_seed(seed: &CanonicalUrl) -> Self {
        let path_prefix = seed.path().trim_end_matches('/').to_string();
        Self::new(seed.host(), path_prefix)
    }

    /// Same host as the seed, with an explicit path prefix
    pub fn with_prefix(seed: &CanonicalUrl, path_prefix: &str) -> Self {
        Self::new(seed.host(), path_prefix)
    }
}

/// Returns true if `url` lies inside the configured scope
///
/// Host comparison is an ASCII case-insensitive exact match; the path must
/// start with `path_prefix`, compared case-sensitively on the raw path string.
///
/// # Examples
///
/// ```
/// use gitbook_export::url::{canonicalize, is_in_scope, ScopeConfig};
///
/// let scope = ScopeConfig::new("docs.example.com", "/guide");
/// let inside = canonicalize("https://docs.example.com/guide/setup", None).unwrap();
/// let outside = canonicalize("https://docs.example.com/blog", None).unwrap();
/// assert!(is_in_scope(&inside, &scope));
/// assert!(!is_in_scope(&outside, &scope));
/// ```
pub fn is_in_scope(url: &CanonicalUrl, scope: &ScopeConfig) -> bool {
    url.host().eq_ignore_ascii_case(&scope.host) && url.path().starts_with(&scope.path_prefix)
}
