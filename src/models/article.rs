use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::Result;
use crate::text::NormalizedText;

/// Article identifiers arrive as either JSON numbers or strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ArticleId {
    Number(i64),
    Text(String),
}

impl ArticleId {
    fn into_string(self) -> String {
        match self {
            ArticleId::Number(n) => n.to_string(),
            ArticleId::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticlePayload {
    id: ArticleId,
    title: String,
    #[serde(default)]
    img_url: Option<String>,
    #[serde(default)]
    english_transcript: Option<String>,
    #[serde(default)]
    chinese_transcript: Option<String>,
}

/// An article as supplied by the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ArticlePayload")]
pub struct ArticleSource {
    pub id: String,
    pub title: String,
    pub image_url: Option<String>,
    /// Text highlights are recorded against.
    pub raw_text: String,
    pub translation: Option<String>,
}

impl From<ArticlePayload> for ArticleSource {
    fn from(payload: ArticlePayload) -> Self {
        Self {
            id: payload.id.into_string(),
            title: payload.title,
            image_url: payload.img_url.filter(|url| !url.is_empty()),
            raw_text: payload.english_transcript.unwrap_or_default(),
            translation: payload.chinese_transcript,
        }
    }
}

impl ArticleSource {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading article {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn normalized(&self) -> NormalizedText {
        NormalizedText::new(&self.raw_text)
    }

    pub fn normalized_translation(&self) -> Option<NormalizedText> {
        self.translation.as_deref().map(NormalizedText::new)
    }
}
