use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One highlighted span of an article's normalized text.
///
/// Offsets are UTF-16 code units, `start_offset` inclusive and `end_offset`
/// exclusive. They are signed so stale or corrupt stored values still decode;
/// the renderer clamps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRange {
    pub start_offset: i64,
    pub end_offset: i64,
    #[serde(default)]
    pub paragraph_index: usize,
    pub created_at: DateTime<Utc>,
}

impl HighlightRange {
    pub fn new(start_offset: i64, end_offset: i64) -> Self {
        Self {
            start_offset,
            end_offset,
            paragraph_index: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_paragraph(mut self, paragraph_index: usize) -> Self {
        self.paragraph_index = paragraph_index;
        self
    }
}

/// All highlights of one article plus the metadata the list screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAnnotation {
    pub id: Uuid,
    pub article_id: String,
    pub article_title: String,
    pub article_image_url: Option<String>,
    pub highlighted_ranges: Vec<HighlightRange>,
    pub last_updated: DateTime<Utc>,
}

impl ArticleAnnotation {
    pub fn new(
        article_id: impl Into<String>,
        article_title: impl Into<String>,
        article_image_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            article_id: article_id.into(),
            article_title: article_title.into(),
            article_image_url,
            highlighted_ranges: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    pub fn highlight_count(&self) -> usize {
        self.highlighted_ranges.len()
    }
}

/// Every annotated article, in insertion order.
///
/// Serialized as a bare JSON array. At most one record per `article_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationCollection {
    records: Vec<ArticleAnnotation>,
}

impl AnnotationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, article_id: &str) -> Option<&ArticleAnnotation> {
        self.records.iter().find(|r| r.article_id == article_id)
    }

    pub fn contains(&self, article_id: &str) -> bool {
        self.get(article_id).is_some()
    }

    /// Ranges recorded for an article, empty if it has none.
    pub fn ranges_for(&self, article_id: &str) -> &[HighlightRange] {
        self.get(article_id)
            .map(|r| r.highlighted_ranges.as_slice())
            .unwrap_or_default()
    }

    /// Replace the record with the same `article_id` in place, or append.
    pub fn upsert(&mut self, annotation: ArticleAnnotation) {
        match self
            .records
            .iter_mut()
            .find(|r| r.article_id == annotation.article_id)
        {
            Some(existing) => *existing = annotation,
            None => self.records.push(annotation),
        }
    }

    pub fn remove(&mut self, article_id: &str) -> Option<ArticleAnnotation> {
        let index = self.records.iter().position(|r| r.article_id == article_id)?;
        Some(self.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArticleAnnotation> {
        self.records.iter()
    }

    pub fn total_highlights(&self) -> usize {
        self.records.iter().map(ArticleAnnotation::highlight_count).sum()
    }
}

impl FromIterator<ArticleAnnotation> for AnnotationCollection {
    fn from_iter<I: IntoIterator<Item = ArticleAnnotation>>(iter: I) -> Self {
        let mut collection = Self::new();
        for annotation in iter {
            collection.upsert(annotation);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a AnnotationCollection {
    type Item = &'a ArticleAnnotation;
    type IntoIter = std::slice::Iter<'a, ArticleAnnotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(article_id: &str, title: &str) -> ArticleAnnotation {
        ArticleAnnotation::new(article_id, title, None)
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut collection = AnnotationCollection::new();
        collection.upsert(record("a", "A"));
        collection.upsert(record("b", "B"));
        collection.upsert(record("c", "C"));

        collection.upsert(record("b", "B v2"));

        let titles: Vec<_> = collection.iter().map(|r| r.article_title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B v2", "C"]);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut collection: AnnotationCollection = [record("a", "A")].into_iter().collect();
        assert!(collection.remove("zzz").is_none());
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.remove("a").map(|r| r.article_id), Some("a".to_string()));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_ranges_for_unknown_article_is_empty() {
        let collection = AnnotationCollection::new();
        assert!(collection.ranges_for("nope").is_empty());
    }

    #[test]
    fn test_serializes_as_camel_case_array() {
        let mut annotation = record("42", "Title");
        annotation.highlighted_ranges.push(HighlightRange::new(2, 6));
        let collection: AnnotationCollection = [annotation].into_iter().collect();

        let value = serde_json::to_value(&collection).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["articleId"], "42");
        assert_eq!(first["articleImageUrl"], serde_json::Value::Null);
        assert_eq!(first["highlightedRanges"][0]["startOffset"], 2);
        assert_eq!(first["highlightedRanges"][0]["endOffset"], 6);
        assert_eq!(first["highlightedRanges"][0]["paragraphIndex"], 0);
        assert!(first.get("lastUpdated").is_some());
    }

    #[test]
    fn test_range_with_paragraph() {
        let range = HighlightRange::new(0, 7).with_paragraph(2);
        assert_eq!((range.start_offset, range.end_offset), (0, 7));
        assert_eq!(range.paragraph_index, 2);
    }
}
