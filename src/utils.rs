/// Checks whether a user-supplied `next` redirect target is safe to follow.
///
/// Only same-host relative paths are accepted: the value must start with a
/// single `/` and must not be protocol-relative (`//host`) or use a
/// backslash variant that some user agents normalize into one.
pub fn is_safe_next_url(next: &str) -> bool {
    let mut chars = next.chars();
    if chars.next() != Some('/') {
        return false;
    }
    !matches!(chars.next(), Some('/') | Some('\\'))
}

/// Resolves the post-mutation redirect target: the validated `next`
/// parameter when present and safe, otherwise the fallback.
pub fn resolve_next_url(next: Option<&str>, fallback: &str) -> String {
    match next {
        Some(url) if is_safe_next_url(url) => url.to_string(),
        _ => fallback.to_string(),
    }
}
