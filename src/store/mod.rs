//! The single owner of the persisted annotation set.
//!
//! The whole collection lives in one blob under one storage key and is
//! rewritten on every mutation. Mutations are serialized; readers see the last
//! committed snapshot and never wait on a write in flight.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::db::KeyValueStore;
use crate::error::Result;
use crate::models::{
    migrate_all, AnnotationCollection, ArticleAnnotation, HighlightRange, LegacyArticleAnnotation,
};
use crate::query::AnnotationQueryService;

pub const DEFAULT_STORAGE_KEY: &str = "underlined_articles";

enum Decoded {
    Current(AnnotationCollection),
    Migrated(AnnotationCollection),
    Unreadable {
        current: serde_json::Error,
        legacy: serde_json::Error,
    },
}

/// Try the current shape first, then the legacy one.
fn decode(bytes: &[u8], now: DateTime<Utc>) -> Decoded {
    let current = match serde_json::from_slice::<AnnotationCollection>(bytes) {
        Ok(collection) => return Decoded::Current(collection),
        Err(e) => e,
    };
    match serde_json::from_slice::<Vec<LegacyArticleAnnotation>>(bytes) {
        Ok(legacy) => Decoded::Migrated(migrate_all(legacy, now)),
        Err(legacy) => Decoded::Unreadable { current, legacy },
    }
}

pub struct AnnotationStore<S> {
    kv: S,
    key: String,
    snapshot: RwLock<Arc<AnnotationCollection>>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> AnnotationStore<S> {
    /// Wrap a backend. Nothing is read until [`load`](Self::load).
    pub fn new(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
            snapshot: RwLock::new(Arc::default()),
            write_lock: Mutex::new(()),
        }
    }

    /// Construct and load in one step.
    pub async fn open(kv: S, key: impl Into<String>) -> Result<Self> {
        let store = Self::new(kv, key);
        store.load().await?;
        Ok(store)
    }

    pub fn backend(&self) -> &S {
        &self.kv
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Where an undecodable blob is preserved before the main key is reused.
    pub fn unreadable_key(&self) -> String {
        format!("{}.unreadable", self.key)
    }

    /// Read the persisted collection, migrating a legacy blob if needed.
    ///
    /// A blob that decodes as neither shape is logged and copied verbatim to
    /// [`unreadable_key`](Self::unreadable_key); the store then starts empty.
    /// Only backend failures are returned as errors.
    pub async fn load(&self) -> Result<Arc<AnnotationCollection>> {
        let _guard = self.write_lock.lock().await;

        let collection = match self.kv.get(&self.key).await? {
            None => {
                tracing::debug!(key = %self.key, "No stored annotations");
                AnnotationCollection::new()
            }
            Some(bytes) => match decode(&bytes, Utc::now()) {
                Decoded::Current(collection) => collection,
                Decoded::Migrated(collection) => {
                    tracing::info!(
                        key = %self.key,
                        articles = collection.len(),
                        "Migrated legacy annotations"
                    );
                    self.write(&collection).await?;
                    collection
                }
                Decoded::Unreadable { current, legacy } => {
                    // Copied before any mutation can rewrite the main key.
                    let backup = self.unreadable_key();
                    let size = bytes.len();
                    self.kv.set(&backup, bytes).await?;
                    tracing::warn!(
                        key = %self.key,
                        backup = %backup,
                        bytes = size,
                        "Stored annotations are unreadable, starting empty \
                         (current: {current}; legacy: {legacy})"
                    );
                    AnnotationCollection::new()
                }
            },
        };

        Ok(self.commit(collection))
    }

    /// Overwrite the stored collection.
    pub async fn save(&self, collection: AnnotationCollection) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write(&collection).await?;
        self.commit(collection);
        Ok(())
    }

    /// Replace the record for the same article in place, or append it.
    pub async fn add_or_update(&self, annotation: ArticleAnnotation) -> Result<()> {
        self.mutate(|collection| collection.upsert(annotation)).await
    }

    /// Append one range to an article's highlights and return the new record.
    pub async fn add_highlight(
        &self,
        article_id: &str,
        article_title: &str,
        article_image_url: Option<String>,
        range: HighlightRange,
    ) -> Result<ArticleAnnotation> {
        self.add_highlight_at(article_id, article_title, article_image_url, range, Utc::now())
            .await
    }

    pub async fn add_highlight_at(
        &self,
        article_id: &str,
        article_title: &str,
        article_image_url: Option<String>,
        range: HighlightRange,
        now: DateTime<Utc>,
    ) -> Result<ArticleAnnotation> {
        self.mutate(|collection| {
            let existing = collection.get(article_id);
            let mut highlighted_ranges = collection.ranges_for(article_id).to_vec();
            highlighted_ranges.push(range);

            let record = ArticleAnnotation {
                id: existing.map(|r| r.id).unwrap_or_else(uuid::Uuid::new_v4),
                article_id: article_id.to_string(),
                article_title: article_title.to_string(),
                article_image_url,
                highlighted_ranges,
                last_updated: now,
            };
            collection.upsert(record.clone());
            record
        })
        .await
    }

    /// Delete an article's record. Returns whether one existed.
    pub async fn remove(&self, article_id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut next = (*self.snapshot()).clone();
        if next.remove(article_id).is_none() {
            return Ok(false);
        }
        self.write(&next).await?;
        self.commit(next);
        Ok(true)
    }

    pub fn has_highlights(&self, article_id: &str) -> bool {
        self.snapshot()
            .get(article_id)
            .is_some_and(|r| !r.highlighted_ranges.is_empty())
    }

    pub fn get(&self, article_id: &str) -> Option<ArticleAnnotation> {
        self.snapshot().get(article_id).cloned()
    }

    /// The last committed collection.
    pub fn snapshot(&self) -> Arc<AnnotationCollection> {
        Arc::clone(&self.snapshot.read())
    }

    pub fn query(&self) -> AnnotationQueryService {
        AnnotationQueryService::new(self.snapshot())
    }

    async fn mutate<R>(&self, f: impl FnOnce(&mut AnnotationCollection) -> R) -> Result<R> {
        let _guard = self.write_lock.lock().await;

        let mut next = (*self.snapshot()).clone();
        let out = f(&mut next);
        self.write(&next).await?;
        self.commit(next);
        Ok(out)
    }

    async fn write(&self, collection: &AnnotationCollection) -> Result<()> {
        let bytes = serde_json::to_vec(collection)?;
        self.kv.set(&self.key, bytes).await?;
        tracing::debug!(key = %self.key, articles = collection.len(), "Saved annotations");
        Ok(())
    }

    fn commit(&self, collection: AnnotationCollection) -> Arc<AnnotationCollection> {
        let collection = Arc::new(collection);
        *self.snapshot.write() = Arc::clone(&collection);
        collection
    }
}
