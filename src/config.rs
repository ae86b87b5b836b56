use std::path::PathBuf;

use crate::apis::crossref::CrossRefClient;
use crate::apis::openalex::OpenAlexClient;
use crate::apis::semantic_scholar::SemanticScholarClient;
use crate::router::QueryRouter;

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub semantic_scholar_api_key: Option<String>,
    pub crossref_email: Option<String>,
    pub openalex_email: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let data_dir = std::env::var("PAPER_CITE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs_or_default().join(".paper-cite"));

        Self {
            data_dir,
            semantic_scholar_api_key: std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok(),
            crossref_email: std::env::var("CROSSREF_EMAIL").ok(),
            openalex_email: std::env::var("OPENALEX_EMAIL").ok(),
        }
    }

    /// Wire a query router with one adapter per provider. The API key and
    /// polite-pool emails are optional; the providers only rate-limit harder
    /// without them.
    pub fn build_router(&self) -> QueryRouter {
        QueryRouter::new(
            SemanticScholarClient::new(self.semantic_scholar_api_key.clone()),
            CrossRefClient::new(self.crossref_email.clone()),
            OpenAlexClient::new(self.openalex_email.clone()),
        )
    }

    /// Path of the persisted search history.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }
}

fn dirs_or_default() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
