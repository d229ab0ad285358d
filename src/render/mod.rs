mod layout;
mod segments;
mod spans;

pub use layout::{layout, split_lines, wrap_line};
pub use segments::{merge_ranges, render, Segment};
pub use spans::{to_line, write_row, write_rows, HighlightStyle};
