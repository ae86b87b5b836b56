use super::{Author, ExternalIds, Paper, PaperSource, SourceError, PAGE_SIZE, REQUEST_TIMEOUT};
use async_trait::async_trait;
use serde::Deserialize;

const BASE_URL: &str = "https://api.openalex.org";

pub struct OpenAlexClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAlexClient {
    pub fn new(polite_email: Option<String>) -> Self {
        Self::with_base_url(BASE_URL, polite_email)
    }

    pub fn with_base_url(base_url: &str, polite_email: Option<String>) -> Self {
        let user_agent = match polite_email {
            Some(ref email) => format!("paper-cite/0.1 (mailto:{})", email),
            None => "paper-cite/0.1".to_string(),
        };
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct OaResponse {
    results: Option<Vec<OaWork>>,
}

#[derive(Deserialize)]
struct OaWork {
    id: Option<String>,
    title: Option<String>,
    authorships: Option<Vec<OaAuthorship>>,
    publication_year: Option<i32>,
    cited_by_count: Option<u32>,
    primary_location: Option<OaLocation>,
    host_venue: Option<OaVenue>,
    doi: Option<String>,
}

#[derive(Deserialize)]
struct OaAuthorship {
    author: Option<OaAuthor>,
}

#[derive(Deserialize)]
struct OaAuthor {
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct OaLocation {
    source: Option<OaVenue>,
}

#[derive(Deserialize)]
struct OaVenue {
    display_name: Option<String>,
}

fn work_to_paper(w: &OaWork) -> Paper {
    let venue = w
        .primary_location
        .as_ref()
        .and_then(|l| l.source.as_ref())
        .and_then(|s| s.display_name.clone())
        .or_else(|| w.host_venue.as_ref().and_then(|v| v.display_name.clone()))
        .unwrap_or_default();
    // OpenAlex reports DOIs as full resolver URLs.
    let doi = w
        .doi
        .as_ref()
        .map(|d| d.strip_prefix("https://doi.org/").unwrap_or(d).to_string());

    Paper {
        title: w.title.clone().unwrap_or_else(|| "Unknown Title".to_string()),
        authors: w
            .authorships
            .as_ref()
            .map(|a| {
                a.iter()
                    .map(|a| Author {
                        name: a
                            .author
                            .as_ref()
                            .and_then(|a| a.display_name.clone())
                            .unwrap_or_else(|| "Unknown".to_string()),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        year: w.publication_year,
        citation_count: w.cited_by_count.unwrap_or(0),
        venue,
        paper_id: w.id.clone().unwrap_or_default(),
        external_ids: ExternalIds { doi },
        ..Paper::default()
    }
}

#[async_trait]
impl PaperSource for OpenAlexClient {
    fn name(&self) -> &'static str {
        "openalex"
    }

    async fn fetch_papers(&self, term: &str, limit: u32) -> Result<Vec<Paper>, SourceError> {
        let url = format!("{}/works", self.base_url);
        let per_page = PAGE_SIZE.to_string();
        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[("search", term), ("per-page", per_page.as_str())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status {
                provider: self.name(),
                status: resp.status().as_u16(),
            });
        }
        let body: OaResponse = resp.json().await?;
        Ok(body
            .results
            .unwrap_or_default()
            .iter()
            .take(limit as usize)
            .map(work_to_paper)
            .collect())
    }
}
