/// URL match patterns in the browser's `<scheme>://<host><path>` syntax
///
/// Supported forms:
/// - `<all_urls>`
/// - scheme `*` (http or https), or one of http, https, ws, wss, ftp, file
/// - host `*`, `*.example.com` (the domain and its subdomains) or an exact host
/// - path with any number of `*` wildcards
///
/// Examples:
/// - `https://developer.chrome.com/docs/extensions/*`
/// - `*://*.github.com/*`
use regex::Regex;
use url::Url;

use crate::error::ConfigError;

const ALL_URLS: &str = "<all_urls>";
const SCHEMES: [&str; 6] = ["http", "https", "ws", "wss", "ftp", "file"];

#[derive(Debug, Clone)]
pub struct MatchPattern {
    source: String,
    regex: Regex,
}

impl MatchPattern {
    pub fn parse(pattern: &str) -> Result<MatchPattern, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let body = if pattern == ALL_URLS {
            format!("({})://[^/]*/.*", SCHEMES.join("|"))
        } else {
            let (scheme, rest) = pattern
                .split_once("://")
                .ok_or_else(|| invalid("missing scheme separator"))?;

            let scheme_re = match scheme {
                "*" => "https?".to_string(),
                s if SCHEMES.contains(&s) => regex::escape(s),
                _ => return Err(invalid("unsupported scheme")),
            };

            let slash = rest.find('/').ok_or_else(|| invalid("missing path"))?;
            let (host, path) = rest.split_at(slash);

            let host_re = if host == "*" {
                "[^/]*".to_string()
            } else if let Some(domain) = host.strip_prefix("*.") {
                if domain.is_empty() || domain.contains('*') {
                    return Err(invalid("wildcard host must be followed by a domain"));
                }
                format!(r"([^/]*\.)?{}", regex::escape(&domain.to_lowercase()))
            } else if host.contains('*') {
                return Err(invalid("'*' in host must be the first label"));
            } else if host.is_empty() && scheme != "file" {
                return Err(invalid("empty host"));
            } else {
                regex::escape(&host.to_lowercase())
            };

            let path_re = path
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*");

            format!("{}://{}{}", scheme_re, host_re, path_re)
        };

        let regex = Regex::new(&format!("^{}$", body)).map_err(|e| invalid(&e.to_string()))?;

        Ok(MatchPattern {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Unparseable URLs never match.
    pub fn matches(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        let mut normalized = format!(
            "{}://{}{}",
            parsed.scheme(),
            parsed.host_str().unwrap_or(""),
            parsed.path()
        );
        if let Some(query) = parsed.query() {
            normalized.push('?');
            normalized.push_str(query);
        }

        self.regex.is_match(&normalized)
    }
}
