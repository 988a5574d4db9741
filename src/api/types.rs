use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An article record as served by the backend.
///
/// Fields are opaque to the console: it renders them but enforces no
/// invariants. `ai_abstract` and `audio` are optional in the backend model;
/// the pipeline fills them in as articles move through crawl and generation
/// stages, so both empty strings and nulls occur in the wild.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub article_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub ai_abstract: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Article {
    /// The abstract for display, treating empty strings like missing values.
    pub fn abstract_text(&self) -> Option<&str> {
        self.ai_abstract.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// The audio marker for display, same empty-string handling.
    pub fn audio_text(&self) -> Option<&str> {
        self.audio.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// One page of results: the rows plus the total row count across all pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePage {
    pub data: Vec<Article>,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_record() {
        let json = r#"{"id": "a1", "title": "X"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, "a1");
        assert_eq!(article.article_type, "");
        assert!(article.ai_abstract.is_none());
        assert!(article.created_at.is_none());
    }

    #[test]
    fn empty_abstract_treated_as_missing() {
        let json = r#"{"id": "a1", "title": "X", "ai_abstract": ""}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.abstract_text().is_none());
    }

    #[test]
    fn null_abstract_treated_as_missing() {
        let json = r#"{"id": "a1", "title": "X", "ai_abstract": null}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.abstract_text().is_none());
    }

    #[test]
    fn present_abstract_survives() {
        let json = r#"{"id": "a1", "title": "X", "ai_abstract": "summary"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.abstract_text(), Some("summary"));
    }

    #[test]
    fn deserializes_page_envelope() {
        let json = r#"{"data": [{"id": "a1", "title": "X"}], "count": 12}"#;
        let page: ArticlePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.count, 12);
    }
}
