//! Endpoint path normalization shared by activation and resolution.

/// Normalize a mock path: trim whitespace, drop the query string, force a leading `/`.
///
/// Two paths address the same endpoint iff their normalized forms are byte-equal.
pub fn normalize(path: &str) -> String {
    let without_query = match path.split_once('?') {
        Some((before, _)) => before,
        None => path,
    }
    .trim();

    if without_query.starts_with('/') {
        without_query.to_string()
    } else {
        format!("/{without_query}")
    }
}

/// Remove every occurrence of the routing prefix from a raw request path.
pub fn strip_route_prefix(raw_path: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return raw_path.to_string();
    }
    raw_path.replace(prefix, "")
}
