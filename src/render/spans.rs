//! Hand rendered rows to a text widget or a terminal.
//!
//! Span contents are exactly the segment text. Anything decorative goes into
//! the style, never into the string, so widget offsets stay equal to stored
//! offsets.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, PrintStyledContent, Stylize};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::segments::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStyle {
    pub color: Color,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: Color::Yellow,
        }
    }
}

impl HighlightStyle {
    /// Parse a color name such as `yellow` or `#ffcc00`.
    pub fn from_name(name: &str) -> Self {
        match name.parse::<Color>() {
            Ok(color) => Self { color },
            Err(_) => {
                tracing::warn!("Unknown highlight color {:?}, using yellow", name);
                Self::default()
            }
        }
    }

    pub fn style(&self) -> Style {
        Style::default()
            .fg(self.color)
            .add_modifier(Modifier::UNDERLINED)
    }
}

pub fn to_line<'a>(row: &[Segment<'a>], style: &HighlightStyle) -> Line<'a> {
    let spans: Vec<Span<'a>> = row
        .iter()
        .map(|segment| {
            if segment.highlighted {
                Span::styled(segment.text, style.style())
            } else {
                Span::raw(segment.text)
            }
        })
        .collect();
    Line::from(spans)
}

/// Write one row to a terminal, highlighted runs underlined and colored.
pub fn write_row<W: Write>(out: &mut W, row: &[Segment], style: &HighlightStyle) -> io::Result<()> {
    let color = TermColor::from(style.color);
    for segment in row {
        if segment.highlighted {
            queue!(out, PrintStyledContent(segment.text.with(color).underlined()))?;
        } else {
            queue!(out, Print(segment.text))?;
        }
    }
    queue!(out, Print("\n"))?;
    Ok(())
}

pub fn write_rows<W: Write>(
    out: &mut W,
    rows: &[Vec<Segment>],
    style: &HighlightStyle,
) -> io::Result<()> {
    for row in rows {
        write_row(out, row, style)?;
    }
    out.flush()
}
