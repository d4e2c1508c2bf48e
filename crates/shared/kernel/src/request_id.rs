/// Derives the logical request id from a target URI.
///
/// Scheme, authority, query, fragment and `;` path parameters are dropped, then the last
/// non-empty path segment is taken without its extension: `/app/action/R1.do?x=1` is `R1`.
#[must_use]
pub fn request_id_of(uri: &str) -> String {
    let path = uri.split_once("://").map_or(uri, |(_, rest)| rest.find('/').map_or("", |i| &rest[i..]));
    let path = path.split(['?', '#']).next().unwrap_or_default();

    let Some(segment) = path.split('/').rev().find(|s| !s.is_empty()) else {
        return String::new();
    };
    let segment = segment.split(';').next().unwrap_or_default();

    match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_owned(),
        _ => segment.to_owned(),
    }
}
