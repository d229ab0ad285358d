//! Convert a widget text selection into a storable range.
//!
//! The widget must be fed the unmodified normalized text, so its selection
//! coordinates are normalized-text UTF-16 offsets already. No bounds checks
//! happen here; the renderer clamps on the way out.

use chrono::{DateTime, Utc};

use crate::models::HighlightRange;

/// A selection as reported by the text widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub length: usize,
}

impl Selection {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// The stored range for this selection, or `None` when nothing is selected.
    pub fn to_range(self) -> Option<HighlightRange> {
        self.to_range_at(Utc::now())
    }

    pub fn to_range_at(self, created_at: DateTime<Utc>) -> Option<HighlightRange> {
        if self.length == 0 {
            return None;
        }
        let start = i64::try_from(self.start).ok()?;
        let end = start.checked_add(i64::try_from(self.length).ok()?)?;
        Some(HighlightRange {
            start_offset: start,
            end_offset: end,
            paragraph_index: 0,
            created_at,
        })
    }
}

impl From<(usize, usize)> for Selection {
    fn from((start, length): (usize, usize)) -> Self {
        Self::new(start, length)
    }
}
