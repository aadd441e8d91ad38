//! Profile route resolution

/// Extract the username from a `@<username>` path segment
///
/// Exactly one leading `@` is stripped. Segments without it, or with
/// nothing after it, are not profile routes.
pub fn parse_profile_slug(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('@')
        .filter(|username| !username.is_empty())
}
