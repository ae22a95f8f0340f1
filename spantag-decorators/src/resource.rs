//! Normalization of URLs into low-cardinality resource names.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Relative URLs are resolved against this base, only the path is kept.
static BASE_URL: Lazy<Url> = Lazy::new(|| Url::parse("http://localhost/").unwrap());

/// Path segments of the form `v1` or `V12` are API versions and kept.
static VERSION_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[vV]\d{1,2}$").unwrap());

/// Normalizes the path of a URL.
///
/// Query and fragment are dropped. Every path segment containing a digit is replaced with `?`,
/// except for version segments. Returns `None` if the URL cannot be parsed.
///
/// ```
/// use spantag_decorators::normalize_url_path;
///
/// assert_eq!(
///     normalize_url_path("https://api.example.com/v1/users/42/orders?page=2").as_deref(),
///     Some("/v1/users/?/orders")
/// );
/// ```
pub fn normalize_url_path(raw: &str) -> Option<String> {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => BASE_URL.join(raw).ok()?,
        Err(_) => return None,
    };

    let normalized = url
        .path()
        .split('/')
        .map(|segment| {
            if segment.bytes().any(|b| b.is_ascii_digit()) && !VERSION_SEGMENT.is_match(segment) {
                "?"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    Some(match normalized.as_str() {
        "" => "/".to_owned(),
        _ => normalized,
    })
}

/// Builds a resource name from an optional HTTP method and a URL.
pub(crate) fn url_resource_name(method: Option<&str>, raw_url: &str) -> Option<String> {
    let path = normalize_url_path(raw_url)?;

    Some(match method.filter(|method| !method.is_empty()) {
        Some(method) => format!("{} {path}", method.to_uppercase()),
        None => path,
    })
}
