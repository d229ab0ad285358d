//! UTF-16 offset helpers.
//!
//! Stored highlight offsets count UTF-16 code units, the unit selection-capable
//! text widgets report. Rust strings are UTF-8, so every slice taken from a
//! stored offset goes through this module.

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Forward-only cursor that maps increasing UTF-16 offsets to byte indices
/// in a single pass.
///
/// Offsets past the end clamp to `text.len()`. An offset that falls between
/// the two halves of a surrogate pair snaps forward to the next char boundary.
#[derive(Debug, Clone)]
pub struct Utf16Cursor<'a> {
    text: &'a str,
    byte: usize,
    unit: usize,
}

impl<'a> Utf16Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            unit: 0,
        }
    }

    /// Advance to the first char boundary at or after `target` and return its
    /// byte index. Targets behind the cursor leave it where it is.
    pub fn seek(&mut self, target: usize) -> usize {
        while self.unit < target {
            let Some(c) = self.text[self.byte..].chars().next() else {
                break;
            };
            self.byte += c.len_utf8();
            self.unit += c.len_utf16();
        }
        self.byte
    }
}
