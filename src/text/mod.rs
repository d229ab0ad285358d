mod normalize;
mod offsets;

pub use normalize::{
    normalize, pair_paragraphs, paragraph_index_at, paragraphs, NormalizedText, Paragraph,
};
pub use offsets::{utf16_len, Utf16Cursor};
