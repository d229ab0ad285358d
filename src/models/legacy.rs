//! Read-only shape written by earlier app versions.
//!
//! Each highlight was a literal word with its position, a free-form type tag
//! and an optional note. Only the position survives migration.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::annotation::{AnnotationCollection, ArticleAnnotation, HighlightRange};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyHighlightedWord {
    pub word: String,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub paragraph_index: usize,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyArticleAnnotation {
    #[serde(default)]
    pub id: Option<String>,
    pub article_id: String,
    pub article_title: String,
    #[serde(default)]
    pub article_image_url: Option<String>,
    pub highlighted_words: Vec<LegacyHighlightedWord>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl LegacyHighlightedWord {
    fn into_range(self, now: DateTime<Utc>) -> HighlightRange {
        HighlightRange {
            start_offset: self.start,
            end_offset: self.end,
            paragraph_index: self.paragraph_index,
            created_at: now,
        }
    }
}

impl LegacyArticleAnnotation {
    /// Convert to the current shape. Word text, type tag and note are dropped;
    /// `last_updated` becomes `now`.
    pub fn migrate(self, now: DateTime<Utc>) -> ArticleAnnotation {
        let id = self
            .id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .unwrap_or_else(Uuid::new_v4);

        let dropped_notes = self
            .highlighted_words
            .iter()
            .filter(|w| w.note.as_deref().is_some_and(|n| !n.is_empty()))
            .count();
        if dropped_notes > 0 {
            tracing::info!(
                article_id = %self.article_id,
                dropped_notes,
                "Legacy notes have no current equivalent and were dropped"
            );
        }

        ArticleAnnotation {
            id,
            article_id: self.article_id,
            article_title: self.article_title,
            article_image_url: self.article_image_url,
            highlighted_ranges: self
                .highlighted_words
                .into_iter()
                .map(|w| w.into_range(now))
                .collect(),
            last_updated: now,
        }
    }
}

/// Migrate a whole legacy blob.
pub fn migrate_all(
    legacy: Vec<LegacyArticleAnnotation>,
    now: DateTime<Utc>,
) -> AnnotationCollection {
    legacy.into_iter().map(|record| record.migrate(now)).collect()
}
