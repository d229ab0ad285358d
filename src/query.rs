use std::cmp::Reverse;
use std::sync::Arc;

use crate::models::{AnnotationCollection, ArticleAnnotation};

/// Read-only views for the annotation list screen.
///
/// Works on one committed snapshot and never touches storage.
#[derive(Debug, Clone)]
pub struct AnnotationQueryService {
    snapshot: Arc<AnnotationCollection>,
}

impl AnnotationQueryService {
    pub fn new(snapshot: Arc<AnnotationCollection>) -> Self {
        Self { snapshot }
    }

    /// Most recently updated article first. Equal timestamps keep store order.
    pub fn list(&self) -> Vec<&ArticleAnnotation> {
        let mut records: Vec<&ArticleAnnotation> = self.snapshot.iter().collect();
        // stable sort keeps insertion order on ties
        records.sort_by_key(|r| Reverse(r.last_updated));
        records
    }

    /// Number of annotated articles.
    pub fn count(&self) -> usize {
        self.snapshot.len()
    }

    pub fn total_highlights(&self) -> usize {
        self.snapshot.total_highlights()
    }

    pub fn get(&self, article_id: &str) -> Option<&ArticleAnnotation> {
        self.snapshot.get(article_id)
    }
}
