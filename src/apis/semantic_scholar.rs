use super::{Author, ExternalIds, Paper, PaperSource, SourceError, PAGE_SIZE, REQUEST_TIMEOUT};
use async_trait::async_trait;
use serde::Deserialize;

const BASE_URL: &str = "https://api.semanticscholar.org/graph/v1";

const FIELDS: &str = "title,authors,year,citationCount,venue,paperId,externalIds";

pub struct SemanticScholarClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SemanticScholarClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("paper-cite/0.1")
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn add_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.header("x-api-key", key),
            None => req,
        }
    }
}

#[derive(Deserialize)]
struct S2SearchResponse {
    data: Option<Vec<S2Paper>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct S2Paper {
    paper_id: Option<String>,
    title: Option<String>,
    authors: Option<Vec<S2Author>>,
    year: Option<i32>,
    citation_count: Option<u32>,
    venue: Option<String>,
    external_ids: Option<S2ExternalIds>,
}

#[derive(Deserialize)]
struct S2Author {
    name: Option<String>,
}

#[derive(Deserialize)]
struct S2ExternalIds {
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

fn s2_to_paper(p: &S2Paper) -> Paper {
    Paper {
        title: p.title.clone().unwrap_or_else(|| "Unknown Title".to_string()),
        authors: p
            .authors
            .as_ref()
            .map(|a| {
                a.iter()
                    .filter_map(|a| a.name.clone())
                    .map(|name| Author { name })
                    .collect()
            })
            .unwrap_or_default(),
        year: p.year,
        citation_count: p.citation_count.unwrap_or(0),
        venue: p.venue.clone().unwrap_or_default(),
        paper_id: p.paper_id.clone().unwrap_or_default(),
        external_ids: ExternalIds {
            doi: p.external_ids.as_ref().and_then(|e| e.doi.clone()),
        },
        ..Paper::default()
    }
}

#[async_trait]
impl PaperSource for SemanticScholarClient {
    fn name(&self) -> &'static str {
        "semanticscholar"
    }

    async fn fetch_papers(&self, term: &str, limit: u32) -> Result<Vec<Paper>, SourceError> {
        let url = format!("{}/paper/search", self.base_url);
        let limit = limit.min(PAGE_SIZE).to_string();
        let resp = self
            .add_auth(
                self.client
                    .get(&url)
                    .header("Accept", "application/json")
                    .query(&[
                        ("query", term),
                        ("fields", FIELDS),
                        ("limit", limit.as_str()),
                    ]),
            )
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status {
                provider: self.name(),
                status: resp.status().as_u16(),
            });
        }
        let body: S2SearchResponse = resp.json().await?;
        Ok(body.data.unwrap_or_default().iter().map(s2_to_paper).collect())
    }
}
