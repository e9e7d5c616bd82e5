//! Resource Paths
//!
//! Parsed form of an API path, used to decide what an offline read can be
//! answered with.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::cache::Collection;

/// RFC 3986 unreserved characters stay as-is
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// What a path addresses within its collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `/vehicles`
    List,
    /// `/receipts/{id}`
    Item(String),
    /// `/vehicles/{id}/occupancy` and deeper
    Nested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    pub collection: Option<Collection>,
    pub shape: Shape,
}

impl ResourcePath {
    pub fn parse(path: &str) -> Self {
        let bare = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = bare
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let shape = match segments.as_slice() {
            [] | [_] => Shape::List,
            [_, id] => Shape::Item(percent_decode_str(id).decode_utf8_lossy().into_owned()),
            _ => Shape::Nested,
        };
        Self {
            collection: Collection::from_path(bare),
            shape,
        }
    }
}

/// Percent-encode one path segment or query value
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}
