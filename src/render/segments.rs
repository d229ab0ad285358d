//! Turn normalized text plus stored ranges into styled runs.

use crate::models::HighlightRange;
use crate::text::{utf16_len, Utf16Cursor};

/// A contiguous run of normalized text, highlighted or plain.
///
/// `start` and `end` are UTF-16 offsets into the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
    pub start: usize,
    pub end: usize,
}

impl<'a> Segment<'a> {
    pub fn plain(text: &'a str, start: usize) -> Self {
        Self::new(text, false, start)
    }

    pub fn highlighted(text: &'a str, start: usize) -> Self {
        Self::new(text, true, start)
    }

    fn new(text: &'a str, highlighted: bool, start: usize) -> Self {
        Self {
            text,
            highlighted,
            start,
            end: start + utf16_len(text),
        }
    }
}

/// Clamp each range to `[0, len]`, drop the empty ones, sort by
/// `(start, end)` and union overlapping or touching intervals.
pub fn merge_ranges(ranges: &[HighlightRange], len: usize) -> Vec<(usize, usize)> {
    let upper = i64::try_from(len).unwrap_or(i64::MAX);

    let mut spans: Vec<(usize, usize)> = ranges
        .iter()
        .filter_map(|range| {
            let start = range.start_offset.clamp(0, upper);
            let end = range.end_offset.clamp(0, upper);
            (start < end).then_some((start as usize, end as usize))
        })
        .collect();
    spans.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Render `text` into segments that cover it exactly once, left to right.
///
/// Concatenating the segment texts always reproduces `text`, whatever
/// `ranges` contains.
pub fn render<'a>(text: &'a str, ranges: &[HighlightRange]) -> Vec<Segment<'a>> {
    let merged = merge_ranges(ranges, utf16_len(text));
    let mut segments = Vec::with_capacity(merged.len() * 2 + 1);
    let mut cursor = Utf16Cursor::new(text);
    let mut emitted = 0;

    for (start, end) in merged {
        let from = cursor.seek(start);
        push(&mut segments, text, emitted, from, false);

        let to = cursor.seek(end);
        push(&mut segments, text, from, to, true);
        emitted = to;
    }
    push(&mut segments, text, emitted, text.len(), false);

    segments
}

fn push<'a>(
    segments: &mut Vec<Segment<'a>>,
    text: &'a str,
    from: usize,
    to: usize,
    highlighted: bool,
) {
    if from >= to {
        return;
    }
    // A gap that snapped away inside a surrogate pair leaves two runs of the
    // same kind side by side; fold them together.
    if let Some(last) = segments.last_mut() {
        if last.highlighted == highlighted {
            let last_from = from - last.text.len();
            *last = Segment::new(&text[last_from..to], highlighted, last.start);
            return;
        }
    }
    let start = segments.last().map_or(0, |s| s.end);
    segments.push(Segment::new(&text[from..to], highlighted, start));
}
