use std::io::Write;
use std::sync::Arc;

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};

use crate::cli::ReadingMode;
use crate::config::Config;
use crate::db::{KeyValueStore, SqliteKvStore};
use crate::error::{AppError, Result};
use crate::models::{ArticleAnnotation, ArticleSource};
use crate::render::{layout, render, split_lines, wrap_line, write_row, HighlightStyle};
use crate::selection::Selection;
use crate::store::AnnotationStore;

pub struct App<S = SqliteKvStore> {
    pub store: Arc<AnnotationStore<S>>,
    style: HighlightStyle,
    wrap_width: usize,
}

impl App<SqliteKvStore> {
    pub async fn new(config: &Config) -> Result<Self> {
        let kv = SqliteKvStore::new(&config.db_path).await?;
        let store = AnnotationStore::open(kv, config.storage_key.clone()).await?;
        Ok(Self::with_store(Arc::new(store), config))
    }
}

impl<S: KeyValueStore> App<S> {
    /// Use an already loaded store; every screen shares the same instance.
    pub fn with_store(store: Arc<AnnotationStore<S>>, config: &Config) -> Self {
        Self {
            store,
            style: HighlightStyle::from_name(&config.highlight_color),
            wrap_width: config.wrap_width,
        }
    }

    /// Print annotated articles, most recently annotated first.
    pub fn list<W: Write>(&self, out: &mut W) -> Result<()> {
        let query = self.store.query();
        if query.count() == 0 {
            writeln!(out, "No highlights yet")?;
            return Ok(());
        }

        let (articles, highlights) = (query.count(), query.total_highlights());
        writeln!(
            out,
            "{} {} | {} {}",
            articles,
            plural(articles, "article"),
            highlights,
            plural(highlights, "highlight")
        )?;
        for record in query.list() {
            let count = record.highlight_count();
            writeln!(
                out,
                "{:<12} {}  [{} {}]  {}",
                record.article_id,
                record.article_title,
                count,
                plural(count, "highlight"),
                record.last_updated.format("%Y-%m-%d %H:%M")
            )?;
        }
        Ok(())
    }

    /// Record a widget selection against an article's normalized text.
    pub async fn add(
        &self,
        article: &ArticleSource,
        selection: Selection,
    ) -> Result<ArticleAnnotation> {
        let text = article.normalized();
        let range = selection
            .to_range()
            .ok_or_else(|| AppError::Selection("selection is empty".to_string()))?;

        let end = selection.start.saturating_add(selection.length);
        if end > text.len_utf16() {
            tracing::warn!(
                article_id = %article.id,
                start = selection.start,
                length = selection.length,
                text_len = text.len_utf16(),
                "Selection extends past the article text"
            );
        }
        let paragraph = text.paragraph_index_at(selection.start).unwrap_or(0);

        let record = self
            .store
            .add_highlight(
                &article.id,
                &article.title,
                article.image_url.clone(),
                range.with_paragraph(paragraph),
            )
            .await?;

        tracing::info!(
            article_id = %article.id,
            highlights = record.highlight_count(),
            "Added highlight: {:?}",
            text.slice_utf16(selection.start, end)
        );
        Ok(record)
    }

    /// Print an article wrapped to `width` in the given reading mode.
    ///
    /// Highlights live on the English text; the Chinese view prints the
    /// translation plain. Without a translation every mode shows English.
    pub fn show<W: Write>(
        &self,
        out: &mut W,
        article: &ArticleSource,
        width: Option<usize>,
        mode: ReadingMode,
    ) -> Result<()> {
        let width = width.unwrap_or(self.wrap_width).max(1);
        let text = article.normalized();
        let snapshot = self.store.snapshot();
        let segments = render(&text, snapshot.ranges_for(&article.id));

        queue!(out, PrintStyledContent(article.title.as_str().bold()), Print("\n\n"))?;

        let translation = match mode {
            ReadingMode::English => None,
            ReadingMode::Chinese | ReadingMode::Parallel => {
                let translation = article.normalized_translation();
                if translation.is_none() {
                    tracing::warn!(article_id = %article.id, "No translation, showing English");
                }
                translation
            }
        };

        match (mode, translation) {
            (ReadingMode::Chinese, Some(translation)) => {
                for paragraph in translation.paragraphs() {
                    for wrapped in textwrap::wrap(paragraph.text, width) {
                        let wrapped: &str = &wrapped;
                        queue!(out, Print(wrapped), Print("\n"))?;
                    }
                    queue!(out, Print("\n"))?;
                }
            }
            (ReadingMode::Parallel, Some(translation)) => {
                let rows = split_lines(&segments);
                let translated: Vec<&str> = translation.paragraphs().map(|p| p.text).collect();
                for i in 0..rows.len().max(translated.len()) {
                    if let Some(row) = rows.get(i) {
                        for wrapped in wrap_line(row, width) {
                            write_row(out, &wrapped, &self.style)?;
                        }
                    }
                    if let Some(line) = translated.get(i) {
                        for wrapped in textwrap::wrap(line, width) {
                            let wrapped: &str = &wrapped;
                            queue!(
                                out,
                                PrintStyledContent(wrapped.dark_grey()),
                                Print("\n")
                            )?;
                        }
                    }
                    queue!(out, Print("\n"))?;
                }
            }
            _ => {
                for row in layout(&segments, width) {
                    write_row(out, &row, &self.style)?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    pub async fn remove(&self, article_id: &str) -> Result<bool> {
        let removed = self.store.remove(article_id).await?;
        if !removed {
            tracing::debug!(article_id, "No highlights to remove");
        }
        Ok(removed)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}
