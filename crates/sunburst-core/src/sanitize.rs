use url::{ParseError, Url};

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Normalizes a product link for use as an `href`.
///
/// Absolute URLs must use a safe scheme (`http`, `https`, `mailto`); relative references are kept
/// verbatim. Empty, unsafe or unparsable links yield `None`.
pub fn sanitize_link(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() || link.chars().any(|c| c.is_control()) {
        return None;
    }
    match Url::parse(link) {
        Ok(url) if SAFE_SCHEMES.contains(&url.scheme()) => Some(url.to_string()),
        Ok(_) => None,
        Err(ParseError::RelativeUrlWithoutBase) => Some(link.to_string()),
        Err(_) => None,
    }
}
