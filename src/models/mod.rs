mod annotation;
mod article;
mod legacy;

pub use annotation::{AnnotationCollection, ArticleAnnotation, HighlightRange};
pub use article::ArticleSource;
pub use legacy::{migrate_all, LegacyArticleAnnotation, LegacyHighlightedWord};
