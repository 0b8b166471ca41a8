use std::borrow::Cow;

/// Compute the lookup path of a raw request target relative to `mount_root`.
///
/// The result always begins with `/`. Query string and fragment are dropped,
/// percent-escapes are decoded (left as-is when they do not decode to UTF-8) and
/// runs of `/` are collapsed. Returns `None` when the path lies outside the mount
/// root.
///
/// ```rust
/// use brrtrouter_backing::context::normalize_lookup_path;
///
/// assert_eq!(normalize_lookup_path("/app/custom//path?x=1", "/app").as_deref(), Some("/custom/path"));
/// assert_eq!(normalize_lookup_path("/app", "/app/").as_deref(), Some("/"));
/// assert_eq!(normalize_lookup_path("/other/path", "/app"), None);
/// ```
#[must_use]
pub fn normalize_lookup_path(raw: &str, mount_root: &str) -> Option<String> {
    let path = raw.split(['?', '#']).next().unwrap_or_default();
    let decoded = urlencoding::decode(path).unwrap_or(Cow::Borrowed(path));
    let path = collapse_separators(&decoded);

    let root = collapse_separators(mount_root);
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return Some(path);
    }

    match path.strip_prefix(root) {
        Some("") => Some("/".to_string()),
        Some(rest) if rest.starts_with('/') => Some(rest.to_string()),
        _ => None,
    }
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(segment);
    }
    if path.len() > 1 && path.ends_with('/') && !out.ends_with('/') {
        out.push('/');
    }
    out
}
