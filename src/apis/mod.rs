pub mod crossref;
pub mod openalex;
pub mod semantic_scholar;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Results requested per provider page. Providers whose search endpoint takes
/// a fixed page size are truncated client-side.
pub const PAGE_SIZE: u32 = 10;

/// Per-request upper bound; without it a stalled upstream call would hang a
/// batch with no way to cancel it.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Canonical paper record every source adapter normalizes into. Absent source
/// fields resolve to the defaults here, so downstream code never branches on
/// field presence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub title: String,
    pub authors: Vec<Author>,
    pub year: Option<i32>,
    pub citation_count: u32,
    pub venue: String,
    /// Source-specific identifier: Semantic Scholar ID, DOI, or OpenAlex
    /// work URI.
    pub paper_id: String,
    pub external_ids: ExternalIds,
    /// Batch mode only: the input line that produced this result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_title: Option<String>,
    /// Publication details the search providers do not report. Left empty by
    /// the adapters; consumed by the citation formatter when a caller fills
    /// them in.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PublicationKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booktitle: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalIds {
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationKind {
    Book,
    Journal,
    Conference,
    Chapter,
}

/// Transport-level failure from a provider. Missing fields in a response body
/// are not errors; they map to the `Paper` defaults.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{provider} returned status {status}")]
    Status { provider: &'static str, status: u16 },
}

#[async_trait]
pub trait PaperSource: Send + Sync {
    fn name(&self) -> &'static str;
    /// One search request against the provider, mapped to canonical papers.
    async fn fetch_papers(&self, term: &str, limit: u32) -> Result<Vec<Paper>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_serializes_canonical_shape() {
        let paper = Paper {
            title: "Deep Learning".to_string(),
            authors: vec![Author { name: "Yann LeCun".to_string() }],
            year: Some(2015),
            citation_count: 42,
            venue: "Nature".to_string(),
            paper_id: "abc123".to_string(),
            external_ids: ExternalIds { doi: Some("10.1038/nature14539".to_string()) },
            ..Paper::default()
        };
        let json: serde_json::Value = serde_json::to_value(&paper).unwrap();
        assert_eq!(json["citationCount"], 42);
        assert_eq!(json["paperId"], "abc123");
        assert_eq!(json["externalIds"]["DOI"], "10.1038/nature14539");
        // Citation-only fields stay off the wire until populated.
        assert!(json.get("type").is_none());
        assert!(json.get("queryTitle").is_none());
    }

    #[test]
    fn test_paper_defaults() {
        let paper = Paper::default();
        assert_eq!(paper.citation_count, 0);
        assert_eq!(paper.venue, "");
        assert!(paper.authors.is_empty());
        assert!(paper.external_ids.doi.is_none());
    }
}
