/// Checks if a hostname matches a dot-segment wildcard pattern
///
/// The pattern and the candidate host are both split on `.` and compared
/// segment by segment. A pattern segment of `*` matches exactly one host
/// segment; every other segment must match literally. Segment counts must be
/// equal, so `*.example.org` matches `www.example.org` but neither
/// `example.org` nor `a.b.example.org`.
///
/// Both sides are lowercased before comparison. Hosts coming out of URL
/// parsing are already lowercase, so this only affects operator-supplied
/// patterns.
///
/// # Examples
///
/// ```
/// use pdf_scout::url::host_matches_pattern;
///
/// assert!(host_matches_pattern("www.example.org", "*.example.org"));
/// assert!(host_matches_pattern("example.org", "example.org"));
/// assert!(!host_matches_pattern("example.org", "*.example.org"));
/// assert!(!host_matches_pattern("a.b.example.org", "*.example.org"));
/// ```
pub fn host_matches_pattern(host: &str, pattern: &str) -> bool {
    let host = host.to_lowercase();
    let pattern = pattern.to_lowercase();

    let host_segments: Vec<&str> = host.split('.').collect();
    let pattern_segments: Vec<&str> = pattern.split('.').collect();

    if host_segments.len() != pattern_segments.len() {
        return false;
    }

    pattern_segments
        .iter()
        .zip(host_segments.iter())
        .all(|(pat, seg)| *pat == "*" || pat == seg)
}

/// Checks if a hostname is allowed by any pattern in the allow-list
///
/// This is evaluated for every outbound link before it is considered for
/// traversal, and again immediately before any network fetch.
pub fn host_allowed(host: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| host_matches_pattern(host, pattern))
}
