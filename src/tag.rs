//! Tag extraction from single input lines.
//!
//! A data line carries one tag of the form `<name>content</name>`. Extraction
//! is stateless and never fails: lines that do not look like a tag (block
//! markers, blank lines, free text) simply yield `None`.

use regex::Regex;
use std::sync::LazyLock;

/// First opening tag on a line; closing tags never match because `/` is not
/// a word character.
static OPENING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(\w+)>").expect("opening tag pattern is a valid regex")
});

static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("tag name pattern is a valid regex"));

/// A tag found on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    /// Text between the opening tag and its closing tag, if the line has one
    pub content: Option<&'a str>,
}

/// Parse the first tag on a line
pub fn parse_tag(line: &str) -> Option<Tag<'_>> {
    let captures = OPENING_TAG.captures(line)?;
    let name = captures.get(1)?.as_str();
    let body_start = captures.get(0)?.end();

    Some(Tag {
        name,
        content: closing_content(&line[body_start..], name),
    })
}

/// Whether `name` can appear as `<name>` and be picked up by [`parse_tag`]
pub fn is_tag_name(name: &str) -> bool {
    TAG_NAME.is_match(name)
}

/// Extract the tag name from the first opening tag on the line
pub fn extract_tag_name(line: &str) -> Option<&str> {
    parse_tag(line).map(|tag| tag.name)
}

/// Extract the text between the first opening tag and the nearest closing tag
/// with the same name
pub fn extract_tag_content(line: &str) -> Option<&str> {
    parse_tag(line).and_then(|tag| tag.content)
}

/// Content up to the first `</name>`, which keeps the capture non-greedy
fn closing_content<'a>(rest: &'a str, name: &str) -> Option<&'a str> {
    let closing = format!("</{}>", name);
    rest.find(&closing).map(|end| &rest[..end])
}
