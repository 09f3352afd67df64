//! Query highlighting
//!
//! Splits a sentence into plain and emphasized runs for the current query.
//! The query is lower-cased and split on single spaces into parts. Scanning
//! starts at each occurrence of the first part; from there every part is
//! matched in order at the cursor, and a part that does not line up costs
//! one plain character instead. Multi-word queries therefore only emphasize
//! the parts that happen to sit directly next to each other.

/// A run of text in a highlighted sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Emphasis(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Emphasis(text) => text,
        }
    }

    pub fn is_emphasis(&self) -> bool {
        matches!(self, Segment::Emphasis(_))
    }
}

/// Highlight every occurrence of `query` in `text`
///
/// Matching is case-insensitive. An empty query, or one whose first part is
/// empty, leaves the text as a single plain segment.
pub fn highlight_query(text: &str, query: &str) -> Vec<Segment> {
    let parts = query_parts(query);
    let chars: Vec<char> = text.chars().collect();
    let folded: Vec<char> = chars.iter().copied().map(fold_char).collect();

    let mut builder = SegmentBuilder::default();

    let first = match parts.first() {
        Some(first) if !first.is_empty() => first,
        _ => {
            builder.push_plain(&chars);
            return builder.finish();
        }
    };

    let mut cursor = 0;
    while cursor < chars.len() {
        let Some(start) = find_from(&folded, first, cursor) else {
            builder.push_plain(&chars[cursor..]);
            break;
        };

        builder.push_plain(&chars[cursor..start]);
        cursor = start;

        for part in &parts {
            if folded[cursor..].starts_with(part) {
                builder.push_emphasis(&chars[cursor..cursor + part.len()]);
                cursor += part.len();
            } else if cursor < chars.len() {
                builder.push_plain(&chars[cursor..cursor + 1]);
                cursor += 1;
            }
        }
    }

    builder.finish()
}

/// Lower-cased query parts, folded per character
fn query_parts(query: &str) -> Vec<Vec<char>> {
    query
        .split(' ')
        .map(|part| part.chars().map(fold_char).collect())
        .collect()
}

// One char in, one char out, so folded indices line up with the input text.
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}

/// Collects segments, merging neighbours of the same kind
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<Segment>,
}

impl SegmentBuilder {
    fn push_plain(&mut self, chars: &[char]) {
        self.push(chars, false);
    }

    fn push_emphasis(&mut self, chars: &[char]) {
        self.push(chars, true);
    }

    fn push(&mut self, chars: &[char], emphasis: bool) {
        if chars.is_empty() {
            return;
        }

        match self.segments.last_mut() {
            Some(Segment::Emphasis(text)) if emphasis => text.extend(chars),
            Some(Segment::Plain(text)) if !emphasis => text.extend(chars),
            _ => {
                let text: String = chars.iter().collect();
                self.segments.push(if emphasis {
                    Segment::Emphasis(text)
                } else {
                    Segment::Plain(text)
                });
            }
        }
    }

    fn finish(self) -> Vec<Segment> {
        self.segments
    }
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod highlight_tests;
