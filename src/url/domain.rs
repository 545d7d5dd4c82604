use url::Url;

/// Extracts the host key of a URL
///
/// The key is the lowercase host, followed by `:port` when the URL carries a
/// non-default port. It identifies a site both for scope checks and for the
/// top-level output directory.
///
/// # Arguments
///
/// * `url` - The URL to extract the host key from
///
/// # Returns
///
/// * `Some(String)` - The host key
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use gitbook_export::url::host_key;
///
/// let url = Url::parse("https://Docs.Example.com/path").unwrap();
/// assert_eq!(host_key(&url), Some("docs.example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:3000/").unwrap();
/// assert_eq!(host_key(&url), Some("127.0.0.1:3000".to_string()));
/// ```
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
