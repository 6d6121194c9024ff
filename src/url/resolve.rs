use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a raw href against a base URL into an absolute URL
///
/// An href that already parses as an absolute URL is returned as parsed. A
/// relative href is resolved against the base using standard RFC 3986
/// reference resolution (relative path segments, query, and fragment
/// handling come from `Url::join`). A syntactically invalid href fails with
/// `UrlError::Parse`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pdf_scout::url::resolve_href;
///
/// let base = Url::parse("https://example.org/a/b").unwrap();
///
/// let abs = resolve_href(&base, "/report.pdf").unwrap();
/// assert_eq!(abs.as_str(), "https://example.org/report.pdf");
///
/// let abs = resolve_href(&base, "https://other.org/x").unwrap();
/// assert_eq!(abs.as_str(), "https://other.org/x");
/// ```
pub fn resolve_href(base: &Url, href: &str) -> UrlResult<Url> {
    match Url::parse(href) {
        Ok(absolute) => Ok(absolute),
        Err(url::ParseError::RelativeUrlWithoutBase) => base
            .join(href)
            .map_err(|e| UrlError::Parse(format!("{}: {}", href, e))),
        Err(e) => Err(UrlError::Parse(format!("{}: {}", href, e))),
    }
}
