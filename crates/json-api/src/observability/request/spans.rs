//! HTTP span helpers.

use uuid::Uuid;

/// `METHOD /path` with numeric and UUID segments collapsed.
pub(super) fn route_name(method: &str, path: &str) -> String {
    format!("{method} {}", normalise_path(path))
}

fn normalise_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}
