use pretty_assertions::assert_eq;
use tempfile::TempDir;

use underline_reader::db::{KeyValueStore, SqliteKvStore};
use underline_reader::models::{ArticleSource, HighlightRange};
use underline_reader::render::render;
use underline_reader::selection::Selection;
use underline_reader::store::{AnnotationStore, DEFAULT_STORAGE_KEY};

fn db_path(dir: &TempDir) -> String {
    dir.path().join("annotations.db").to_string_lossy().to_string()
}

#[tokio::test]
async fn highlights_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    {
        let kv = SqliteKvStore::new(&path).await.unwrap();
        let store = AnnotationStore::open(kv, DEFAULT_STORAGE_KEY).await.unwrap();
        store
            .add_highlight("a", "First", None, HighlightRange::new(0, 4))
            .await
            .unwrap();
        store
            .add_highlight("a", "First", None, HighlightRange::new(8, 10))
            .await
            .unwrap();
        store
            .add_highlight("b", "Second", Some("b.png".into()), HighlightRange::new(1, 2))
            .await
            .unwrap();
    }

    let kv = SqliteKvStore::new(&path).await.unwrap();
    let store = AnnotationStore::open(kv, DEFAULT_STORAGE_KEY).await.unwrap();
    let snapshot = store.snapshot();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.ranges_for("a").len(), 2);
    assert_eq!(
        snapshot.get("b").and_then(|r| r.article_image_url.clone()),
        Some("b.png".to_string())
    );
}

#[tokio::test]
async fn legacy_blob_in_sqlite_migrates_once() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    let legacy = r#"[{"id":"not-a-uuid","articleId":"7","articleTitle":"Old",
        "highlightedWords":[{"word":"Hello","start":0,"end":5,"paragraphIndex":0,"type":"underline"}]}]"#;
    {
        let kv = SqliteKvStore::new(&path).await.unwrap();
        kv.set(DEFAULT_STORAGE_KEY, legacy.as_bytes().to_vec())
            .await
            .unwrap();
    }

    let kv = SqliteKvStore::new(&path).await.unwrap();
    let store = AnnotationStore::open(kv, DEFAULT_STORAGE_KEY).await.unwrap();
    let record = store.get("7").unwrap();
    assert_eq!(record.highlighted_ranges[0].end_offset, 5);

    let stored = store
        .backend()
        .get(DEFAULT_STORAGE_KEY)
        .await
        .unwrap()
        .unwrap();
    let stored = String::from_utf8(stored).unwrap();
    assert!(stored.contains("highlightedRanges"));
    assert!(!stored.contains("highlightedWords"));
}

#[tokio::test]
async fn selection_to_render_round_trip() {
    let article = ArticleSource::from_json(
        r#"{"id":"t1","title":"Talk","englishTranscript":"Line one\r\n\r\n  Line two with more words  \n"}"#,
    )
    .unwrap();
    let text = article.normalized();
    let start = text.find("two").unwrap();

    let kv = SqliteKvStore::in_memory().await.unwrap();
    let store = AnnotationStore::open(kv, DEFAULT_STORAGE_KEY).await.unwrap();
    let range = Selection::new(start, 3).to_range().unwrap();
    store
        .add_highlight(&article.id, &article.title, None, range)
        .await
        .unwrap();

    let snapshot = store.snapshot();
    let segments = render(&text, snapshot.ranges_for(&article.id));
    let highlighted: Vec<_> = segments
        .iter()
        .filter(|s| s.highlighted)
        .map(|s| s.text)
        .collect();

    assert_eq!(highlighted, vec!["two"]);
    assert_eq!(
        segments.iter().map(|s| s.text).collect::<String>(),
        text.as_str()
    );
}
