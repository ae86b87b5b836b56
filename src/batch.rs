use std::time::Duration;

use crate::apis::Paper;
use crate::router::{QueryRouter, Source, ValidationError};

/// Upper bound on titles per batch.
pub const MAX_BATCH_TITLES: usize = 10;

/// Fixed delay between consecutive provider requests. Batch lookups run
/// sequentially on purpose: concurrency 1 plus this delay is the rate-limit
/// control for the third-party APIs.
pub const PACING_DELAY: Duration = Duration::from_millis(500);

/// Look up each title in input order, keeping the top result per title tagged
/// with the title that produced it, and return the collection sorted by
/// citation count descending. A title whose lookup fails is logged and
/// skipped; only invalid input fails the batch as a whole.
///
/// `on_progress` is called with `(completed, total)` after each title
/// resolves, success or skip.
pub async fn run_batch<F>(
    router: &QueryRouter,
    titles: &[String],
    source: Source,
    on_progress: F,
) -> Result<Vec<Paper>, ValidationError>
where
    F: FnMut(usize, usize),
{
    run_batch_paced(router, titles, source, PACING_DELAY, on_progress).await
}

/// `run_batch` with an explicit pacing delay.
pub async fn run_batch_paced<F>(
    router: &QueryRouter,
    titles: &[String],
    source: Source,
    delay: Duration,
    mut on_progress: F,
) -> Result<Vec<Paper>, ValidationError>
where
    F: FnMut(usize, usize),
{
    let titles: Vec<&str> = titles
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if titles.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    if titles.len() > MAX_BATCH_TITLES {
        return Err(ValidationError::BatchTooLarge {
            got: titles.len(),
            max: MAX_BATCH_TITLES,
        });
    }

    let total = titles.len();
    let mut results = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        match router.search_top(title, source).await {
            Ok(Some(mut paper)) => {
                paper.query_title = Some((*title).to_string());
                results.push(paper);
            }
            Ok(None) => {
                tracing::info!("no result for \"{}\"", title);
            }
            Err(e) => {
                tracing::warn!("lookup failed for \"{}\": {}", title, e);
            }
        }
        on_progress(i + 1, total);
        if i + 1 < total {
            tokio::time::sleep(delay).await;
        }
    }

    // Stable sort: equally cited papers keep completion order.
    results.sort_by(|a, b| b.citation_count.cmp(&a.citation_count));
    Ok(results)
}
