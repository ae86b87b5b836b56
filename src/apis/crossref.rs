use super::{Author, ExternalIds, Paper, PaperSource, SourceError, PAGE_SIZE, REQUEST_TIMEOUT};
use async_trait::async_trait;
use serde::Deserialize;

const BASE_URL: &str = "https://api.crossref.org";

pub struct CrossRefClient {
    client: reqwest::Client,
    base_url: String,
}

impl CrossRefClient {
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
struct CrResponse {
    message: CrMessage,
}

#[derive(Deserialize)]
struct CrMessage {
    items: Option<Vec<CrItem>>,
}

#[derive(Deserialize)]
struct CrItem {
    #[serde(rename = "DOI")]
    doi: Option<String>,
    title: Option<Vec<String>>,
    author: Option<Vec<CrAuthor>>,
    published: Option<CrDate>,
    created: Option<CrDate>,
    #[serde(rename = "is-referenced-by-count")]
    citation_count: Option<u32>,
    #[serde(rename = "container-title")]
    container_title: Option<Vec<String>>,
    publisher: Option<String>,
}

#[derive(Deserialize)]
struct CrAuthor {
    given: Option<String>,
    family: Option<String>,
}

#[derive(Deserialize)]
struct CrDate {
    #[serde(rename = "date-parts")]
    date_parts: Option<Vec<Vec<i32>>>,
}

fn year_of(date: &CrDate) -> Option<i32> {
    date.date_parts
        .as_ref()
        .and_then(|p| p.first())
        .and_then(|p| p.first())
        .copied()
}

fn item_to_paper(item: &CrItem) -> Paper {
    let doi = item.doi.clone();
    let authors = item
        .author
        .as_ref()
        .map(|a| {
            a.iter()
                .map(|a| Author {
                    name: format!(
                        "{} {}",
                        a.given.as_deref().unwrap_or(""),
                        a.family.as_deref().unwrap_or("")
                    )
                    .trim()
                    .to_string(),
                })
                .collect()
        })
        .unwrap_or_default();
    // Publication date first, registry creation date as fallback.
    let year = item
        .published
        .as_ref()
        .and_then(year_of)
        .or_else(|| item.created.as_ref().and_then(year_of));
    let venue = item
        .container_title
        .as_ref()
        .and_then(|t| t.first())
        .cloned()
        .or_else(|| item.publisher.clone())
        .unwrap_or_default();

    Paper {
        title: item
            .title
            .as_ref()
            .and_then(|t| t.first())
            .cloned()
            .unwrap_or_else(|| "Unknown Title".to_string()),
        authors,
        year,
        citation_count: item.citation_count.unwrap_or(0),
        venue,
        paper_id: doi.clone().unwrap_or_default(),
        external_ids: ExternalIds { doi },
        ..Paper::default()
    }
}

#[async_trait]
impl PaperSource for CrossRefClient {
    fn name(&self) -> &'static str {
        "crossref"
    }

    async fn fetch_papers(&self, term: &str, limit: u32) -> Result<Vec<Paper>, SourceError> {
        let url = format!("{}/works", self.base_url);
        let rows = PAGE_SIZE.to_string();
        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[("query.title", term), ("rows", rows.as_str())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status {
                provider: self.name(),
                status: resp.status().as_u16(),
            });
        }
        let body: CrResponse = resp.json().await?;
        Ok(body
            .message
            .items
            .unwrap_or_default()
            .iter()
            .take(limit as usize)
            .map(item_to_paper)
            .collect())
    }
}
