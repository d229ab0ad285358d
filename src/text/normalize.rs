//! Canonical display text.
//!
//! Every stored offset is measured against the output of [`normalize`]. The
//! transformation is deterministic but lossy, so raw-text positions cannot be
//! recovered from normalized ones.

use std::fmt;
use std::ops::Deref;

use super::offsets::{utf16_len, Utf16Cursor};

/// Unify line endings, trim every line and drop the blank ones.
pub fn normalize(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line of normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paragraph<'a> {
    pub index: usize,
    /// UTF-16 offset of the first character.
    pub start: usize,
    pub text: &'a str,
}

impl Paragraph<'_> {
    /// UTF-16 offset one past the last character.
    pub fn end(&self) -> usize {
        self.start + utf16_len(self.text)
    }
}

/// Iterate the paragraphs of already-normalized text.
pub fn paragraphs(normalized: &str) -> impl Iterator<Item = Paragraph<'_>> {
    let mut start = 0;
    normalized
        .split('\n')
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(move |(index, text)| {
            let paragraph = Paragraph { index, start, text };
            // +1 for the separating line feed
            start = paragraph.end() + 1;
            paragraph
        })
}

/// Index of the paragraph containing `offset`.
///
/// The line feed after a paragraph belongs to that paragraph. Offsets past
/// the end resolve to the last paragraph; empty text has no paragraphs.
pub fn paragraph_index_at(normalized: &str, offset: usize) -> Option<usize> {
    let mut last = None;
    for paragraph in paragraphs(normalized) {
        if offset <= paragraph.end() {
            return Some(paragraph.index);
        }
        last = Some(paragraph.index);
    }
    last
}

/// Pair a text with its translation line by line, padding the shorter one.
pub fn pair_paragraphs<'a>(
    primary: &'a str,
    translation: &'a str,
) -> Vec<(Option<&'a str>, Option<&'a str>)> {
    let left: Vec<&str> = paragraphs(primary).map(|p| p.text).collect();
    let right: Vec<&str> = paragraphs(translation).map(|p| p.text).collect();
    let count = left.len().max(right.len());

    (0..count)
        .map(|i| (left.get(i).copied(), right.get(i).copied()))
        .collect()
}

/// Text that has been through [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len_utf16(&self) -> usize {
        utf16_len(&self.0)
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph<'_>> {
        paragraphs(&self.0)
    }

    pub fn paragraph_index_at(&self, offset: usize) -> Option<usize> {
        paragraph_index_at(&self.0, offset)
    }

    /// Slice by UTF-16 offsets, clamped to the text.
    pub fn slice_utf16(&self, start: usize, end: usize) -> &str {
        let mut cursor = Utf16Cursor::new(&self.0);
        let from = cursor.seek(start);
        let to = cursor.seek(end.max(start));
        &self.0[from..to]
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
