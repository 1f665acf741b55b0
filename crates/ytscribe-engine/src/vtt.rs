//! WebVTT caption markup to plain text.
//!
//! The parser is a total function: any input, including garbage, yields a
//! (possibly empty) string. It walks the document line by line with a single
//! "inside a cue" flag, strips inline styling tags, and collapses the
//! repeated-line artifact that machine-generated captions produce.

use std::sync::LazyLock;

use regex::Regex;

/// Cue-timing line, e.g. `00:00:01.000 --> 00:00:04.000` with optional
/// cue settings after the range.
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}:\d{2}(?::\d{2})?[.,]\d{3}\s*-->\s*\d{1,2}:\d{2}(?::\d{2})?[.,]\d{3}")
        .expect("valid timestamp regex")
});

/// Inline styling/karaoke tags: `<c>`, `</c>`, `<00:00:01.000>`, `<b>`, ...
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Convert a WebVTT document into deduplicated plain text.
pub fn parse_vtt(document: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_cue = false;

    for raw in document.lines() {
        let line = raw.trim();

        // Header markers and blank lines close the current cue.
        if line.is_empty() || is_header_line(line) {
            in_cue = false;
            continue;
        }

        // A timing range starts the cue text that follows it.
        if TIMESTAMP_RE.is_match(line) {
            in_cue = true;
            continue;
        }

        // Cue sequence numbers and NOTE blocks are never content.
        if is_cue_number(line) || line.starts_with("NOTE") {
            continue;
        }

        if !in_cue {
            continue;
        }

        let stripped = TAG_RE.replace_all(line, "");
        let text = unescape_entities(&stripped);
        let text = text.trim();
        if !text.is_empty() {
            out.push(text.to_string());
        }
    }

    // Auto captions repeat the previous line in each new cue; drop exact
    // consecutive duplicates.
    out.dedup();
    out.join("\n")
}

fn is_header_line(line: &str) -> bool {
    line.starts_with("WEBVTT") || line.starts_with("Kind:") || line.starts_with("Language:")
}

fn is_cue_number(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

/// Unescape the four entities YouTube caption text uses.
fn unescape_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}
