//! URL to file path mapping
//!
//! A page's relative path is a pure function of its canonical URL's path.
//! Within one run a case-folded registry catches the few inputs that map to
//! the same file (`/a` vs `/a.html`, or paths differing only in case on a
//! case-insensitive filesystem) and gives later claimants a numbered suffix.

use crate::url::CanonicalUrl;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Path of a page's artifacts relative to a format directory, without extension
///
/// Always uses `/` as separator and never starts with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(String);

impl RelativePath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem path with `ext` appended (`docs/setup` → `docs/setup.md`)
    ///
    /// The extension is appended, never substituted, so `api/v1.2` becomes
    /// `api/v1.2.md`.
    pub fn with_extension(&self, ext: &str) -> PathBuf {
        let file = format!("{}.{}", self.0, ext);
        file.split('/').filter(|s| !s.is_empty()).collect()
    }

    fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{}-{}", self.0, n))
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a canonical URL to its relative artifact path
///
/// # Mapping Rules
///
/// 1. Take the URL's path component and drop the leading `/`
/// 2. Strip a trailing `.html`
/// 3. An empty result, or one ending in `/`, gets a final `index` segment
///
/// # Examples
///
/// ```
/// use gitbook_export::output::map_path;
/// use gitbook_export::url::canonicalize;
///
/// let url = canonicalize("https://docs.example.com/guide/setup.html", None).unwrap();
/// assert_eq!(map_path(&url).as_str(), "guide/setup");
///
/// let root = canonicalize("https://docs.example.com", None).unwrap();
/// assert_eq!(map_path(&root).as_str(), "index");
/// ```
pub fn map_path(url: &CanonicalUrl) -> RelativePath {
    let path = url.path().trim_start_matches('/');
    let mut path = path.strip_suffix(".html").unwrap_or(path).to_string();

    if path.is_empty() || path.ends_with('/') {
        path.push_str("index");
    }

    // Empty segments from `//` would vanish on disk and merge distinct pages
    let path = path
        .split('/')
        .map(|seg| if seg.is_empty() { "_" } else { seg })
        .collect::<Vec<_>>()
        .join("/");

    RelativePath(path)
}

/// Hands out collision-free relative paths for one run
#[derive(Debug, Default)]
pub struct PathRegistry {
    /// Case-folded path → URL that owns it
    claimed: HashMap<String, CanonicalUrl>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the relative path for `url`, reserving it for this run
    ///
    /// The same URL always gets the same path back. A different URL whose
    /// mapped path is already taken (ignoring ASCII case) gets the first free
    /// `-2`, `-3`, … variant.
    pub fn claim(&mut self, url: &CanonicalUrl) -> RelativePath {
        let base = map_path(url);
        let mut candidate = base.clone();
        let mut n = 1;

        loop {
            let key = candidate.as_str().to_ascii_lowercase();
            match self.claimed.get(&key) {
                None => {
                    if n > 1 {
                        tracing::warn!(
                            "Path collision: {} maps to {}, already taken; using {}",
                            url,
                            base,
                            candidate
                        );
                    }
                    self.claimed.insert(key, url.clone());
                    return candidate;
                }
                Some(owner) if owner == url => return candidate,
                Some(_) => {
                    n += 1;
                    candidate = base.with_suffix(n);
                }
            }
        }
    }
}
