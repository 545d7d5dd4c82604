use crate::url::domain::host_key;
use crate::UrlError;
use std::fmt;
use url::Url;

/// A URL reduced to its scheme + host + path identity
///
/// Query string, fragment and userinfo are discarded, so two URLs that differ
/// only in those parts compare equal and hash identically. The path is kept
/// exactly as the URL parser resolved it: `/a` and `/a/` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalUrl(Url);

impl CanonicalUrl {
    /// The underlying parsed URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// The serialized canonical form, suitable for fetching
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Lowercase host, including an explicit port when one is present
    pub fn host(&self) -> String {
        // Canonical URLs are only ever built from URLs that have a host
        host_key(&self.0).unwrap_or_default()
    }

    /// The raw (still percent-encoded) path component
    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Canonicalizes a URL string, resolving it against `base` when given
///
/// # Normalization Steps
///
/// 1. Resolve `input` against `base` using standard URL resolution
///    (absolute inputs ignore the base)
/// 2. Reject anything that is not http or https
/// 3. Reject URLs without a host
/// 4. Drop the query string, fragment, username and password
///
/// Scheme, host and path are otherwise left exactly as resolved. In particular
/// the trailing slash is preserved, since documentation sites may serve `/a`
/// and `/a/` as different resources.
///
/// # Examples
///
/// ```
/// use gitbook_export::url::canonicalize;
///
/// let url = canonicalize("guide/intro?tab=1#setup", Some("https://docs.example.com/book/")).unwrap();
/// assert_eq!(url.as_str(), "https://docs.example.com/book/guide/intro");
/// ```
pub fn canonicalize(input: &str, base: Option<&str>) -> Result<CanonicalUrl, UrlError> {
    let input = input.trim();

    let url = match base {
        Some(base) => {
            let base = Url::parse(base).map_err(|e| UrlError::Parse(format!("{base}: {e}")))?;
            base.join(input)
        }
        None => Url::parse(input),
    }
    .map_err(|e| UrlError::Parse(format!("{input}: {e}")))?;

    strip_to_identity(url, input)
}

/// Resolves an `href` found on `page` and canonicalizes the result
pub fn canonicalize_against(href: &str, page: &CanonicalUrl) -> Result<CanonicalUrl, UrlError> {
    let url = page
        .as_url()
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{href}: {e}")))?;

    strip_to_identity(url, href)
}

fn strip_to_identity(mut url: Url, input: &str) -> Result<CanonicalUrl, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(input.to_string()));
    }

    url.set_query(None);
    url.set_fragment(None);
    // Only fails for cannot-be-a-base URLs, which http(s) URLs never are
    let _ = url.set_username("");
    let _ = url.set_password(None);

    Ok(CanonicalUrl(url))
}
