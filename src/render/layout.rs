//! Lay segments out into rows for a given panel width.
//!
//! Layout only re-slices segments; offsets and highlight flags pass through
//! untouched, so the same highlights show at every width and font scale.

use textwrap::{Options, WordSplitter};

use super::segments::Segment;
use crate::text::utf16_len;

/// Split rendered segments at line feeds, one row per paragraph.
///
/// The line feeds themselves are not part of any row.
pub fn split_lines<'a>(segments: &[Segment<'a>]) -> Vec<Vec<Segment<'a>>> {
    let mut rows: Vec<Vec<Segment<'a>>> = vec![Vec::new()];

    for segment in segments {
        let mut start = segment.start;
        for (i, piece) in segment.text.split('\n').enumerate() {
            if i > 0 {
                rows.push(Vec::new());
                start += 1;
            }
            if piece.is_empty() {
                continue;
            }
            let part = Segment {
                text: piece,
                highlighted: segment.highlighted,
                start,
                end: start + utf16_len(piece),
            };
            start = part.end;
            if let Some(row) = rows.last_mut() {
                row.push(part);
            }
        }
    }

    if rows.len() == 1 && rows[0].is_empty() {
        rows.clear();
    }
    rows
}

/// Wrap one row to `width` columns.
///
/// Whitespace swallowed at a break is dropped from the output, every other
/// character keeps its segment and offset.
pub fn wrap_line<'a>(row: &[Segment<'a>], width: usize) -> Vec<Vec<Segment<'a>>> {
    let line: String = row.iter().map(|s| s.text).collect();
    if line.is_empty() {
        return vec![Vec::new()];
    }

    let options = Options::new(width.max(1))
        .break_words(true)
        .word_splitter(WordSplitter::NoHyphenation);

    let mut cursor = 0;
    let mut wrapped = Vec::new();
    for piece in textwrap::wrap(&line, options) {
        let piece: &str = &piece;
        let Some(found) = line[cursor..].find(piece) else {
            tracing::debug!(piece, "wrapped piece not found in source row");
            continue;
        };
        let from = cursor + found;
        let to = from + piece.len();
        cursor = to;
        wrapped.push(slice_row(row, from, to));
    }
    wrapped
}

/// Sub-row covering bytes `from..to` of the row's concatenated text.
fn slice_row<'a>(row: &[Segment<'a>], from: usize, to: usize) -> Vec<Segment<'a>> {
    let mut out = Vec::new();
    let mut offset = 0;

    for segment in row {
        let seg_from = offset;
        let seg_to = offset + segment.text.len();
        offset = seg_to;

        let lo = from.max(seg_from);
        let hi = to.min(seg_to);
        if lo >= hi {
            continue;
        }

        let local_lo = lo - seg_from;
        let local_hi = hi - seg_from;
        let text = &segment.text[local_lo..local_hi];
        let start = segment.start + utf16_len(&segment.text[..local_lo]);
        out.push(Segment {
            text,
            highlighted: segment.highlighted,
            start,
            end: start + utf16_len(text),
        });
    }
    out
}

/// Split into paragraphs and wrap each one.
pub fn layout<'a>(segments: &[Segment<'a>], width: usize) -> Vec<Vec<Segment<'a>>> {
    split_lines(segments)
        .iter()
        .flat_map(|row| wrap_line(row, width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HighlightRange;
    use crate::render::segments::render;
    use pretty_assertions::assert_eq;

    fn highlighted_text(rows: &[Vec<Segment>]) -> Vec<(usize, String)> {
        rows.iter()
            .flatten()
            .filter(|s| s.highlighted)
            .map(|s| (s.start, s.text.to_string()))
            .collect()
    }

    #[test]
    fn test_split_lines_tracks_offsets() {
        let text = "Hello\nWorld";
        let segments = render(text, &[HighlightRange::new(3, 8)]);
        let rows = split_lines(&segments);

        let flat: Vec<Vec<_>> = rows
            .iter()
            .map(|row| row.iter().map(|s| (s.text, s.highlighted, s.start)).collect())
            .collect();
        assert_eq!(
            flat,
            vec![
                vec![("Hel", false, 0), ("lo", true, 3)],
                vec![("Wo", true, 6), ("rld", false, 8)],
            ]
        );
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines(&[]).is_empty());
    }

    #[test]
    fn test_wrap_keeps_highlights_at_every_width() {
        let text = "The quick brown fox jumps over the lazy dog near the riverbank";
        let segments = render(text, &[HighlightRange::new(10, 25), HighlightRange::new(35, 39)]);

        let mut joined_by_width = Vec::new();
        for width in [8, 13, 20, 80] {
            let rows = layout(&segments, width);
            for row in &rows {
                let row_text: String = row.iter().map(|s| s.text).collect();
                assert!(row_text.chars().count() <= width, "{row_text:?} > {width}");
            }

            // merge highlighted pieces that the wrap split apart
            let mut merged: Vec<(usize, String)> = Vec::new();
            for (start, piece) in highlighted_text(&rows) {
                match merged.last_mut() {
                    Some((s, acc)) if *s + utf16_len(acc) + 1 >= start => {
                        let gap = start - (*s + utf16_len(acc));
                        acc.push_str(&" ".repeat(gap));
                        acc.push_str(&piece);
                    }
                    _ => merged.push((start, piece)),
                }
            }
            joined_by_width.push(merged);
        }

        let expected = vec![
            (10, "brown fox jumps".to_string()),
            (35, "lazy".to_string()),
        ];
        for merged in joined_by_width {
            assert_eq!(merged, expected);
        }
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let segments = render("abcdefghij", &[HighlightRange::new(2, 7)]);
        let rows = layout(&segments, 4);
        let texts: Vec<Vec<(&str, bool)>> = rows
            .iter()
            .map(|row| row.iter().map(|s| (s.text, s.highlighted)).collect())
            .collect();
        assert_eq!(
            texts,
            vec![
                vec![("ab", false), ("cd", true)],
                vec![("efg", true), ("h", false)],
                vec![("ij", false)],
            ]
        );
    }
}
