/// Hostname extraction and display formatting for tab URLs
use url::Url;

/// Extract the lowercase hostname from a URL
///
/// Returns `None` for anything the URL parser rejects or that has no host
/// (e.g. `about:blank`, `data:` URLs), so callers treat those as non-matching.
///
/// Examples:
/// - https://github.com/rust-lang → github.com
/// - http://localhost:3000/ → localhost
/// - not a url → None
pub fn extract_hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;

    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

/// Title shown in the popup: the text before the first `|`, trimmed
///
/// Examples:
/// - "Welcome | Chrome for Developers" → "Welcome"
/// - "No delimiter" → "No delimiter"
pub fn display_title(title: &str) -> &str {
    title.split('|').next().unwrap_or("").trim()
}

/// Path shown in the popup: the URL path with `prefix` removed
///
/// The prefix is only stripped when the path starts with it. URLs the parser
/// rejects are shown as-is.
///
/// Examples (prefix "/docs"):
/// - https://developer.chrome.com/docs/extensions/mv3/intro → /extensions/mv3/intro
/// - https://developer.chrome.com/blog/ → /blog/
pub fn display_path(url: &str, prefix: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let path = parsed.path();
            path.strip_prefix(prefix).unwrap_or(path).to_string()
        }
        Err(_) => url.to_string(),
    }
}
