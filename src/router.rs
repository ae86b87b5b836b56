use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::apis::{
    crossref::CrossRefClient, openalex::OpenAlexClient, semantic_scholar::SemanticScholarClient,
    Paper, PaperSource, SourceError, PAGE_SIZE,
};

/// Provider selection. Unrecognized names fall back to Semantic Scholar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    SemanticScholar,
    CrossRef,
    OpenAlex,
}

impl Source {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "crossref" => Source::CrossRef,
            "openalex" => Source::OpenAlex,
            _ => Source::SemanticScholar,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Source::SemanticScholar => "semanticscholar",
            Source::CrossRef => "crossref",
            Source::OpenAlex => "openalex",
        })
    }
}

/// Input rejected before any network activity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("search term is empty")]
    EmptyTerm,
    #[error("batch contains no titles")]
    EmptyBatch,
    #[error("batch supports at most {max} titles, got {got}")]
    BatchTooLarge { got: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Network(#[from] SourceError),
}

/// Dispatches a search term to the selected provider adapter.
pub struct QueryRouter {
    semantic_scholar: SemanticScholarClient,
    crossref: CrossRefClient,
    openalex: OpenAlexClient,
}

impl QueryRouter {
    pub fn new(
        semantic_scholar: SemanticScholarClient,
        crossref: CrossRefClient,
        openalex: OpenAlexClient,
    ) -> Self {
        Self {
            semantic_scholar,
            crossref,
            openalex,
        }
    }

    fn adapter(&self, source: Source) -> &dyn PaperSource {
        match source {
            Source::SemanticScholar => &self.semantic_scholar,
            Source::CrossRef => &self.crossref,
            Source::OpenAlex => &self.openalex,
        }
    }

    /// Search the selected provider. Network failures surface unchanged, with
    /// no retry; the caller decides whether to offer another provider.
    pub async fn search(&self, term: &str, source: Source) -> Result<Vec<Paper>, QueryError> {
        self.search_limit(term, source, PAGE_SIZE).await
    }

    /// Top-1 variant used by batch lookups.
    pub async fn search_top(&self, term: &str, source: Source) -> Result<Option<Paper>, QueryError> {
        Ok(self.search_limit(term, source, 1).await?.into_iter().next())
    }

    async fn search_limit(
        &self,
        term: &str,
        source: Source,
        limit: u32,
    ) -> Result<Vec<Paper>, QueryError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ValidationError::EmptyTerm.into());
        }
        Ok(self.adapter(source).fetch_papers(term, limit).await?)
    }
}
