use mockito::{Matcher, Server};

use paper_cite::apis::crossref::CrossRefClient;
use paper_cite::apis::openalex::OpenAlexClient;
use paper_cite::apis::semantic_scholar::SemanticScholarClient;
use paper_cite::batch::run_batch_paced;
use paper_cite::citation::format_citation;
use paper_cite::router::{QueryRouter, Source};

fn mock_router(base: &str) -> QueryRouter {
    QueryRouter::new(
        SemanticScholarClient::with_base_url(base, None),
        CrossRefClient::with_base_url(base, None),
        OpenAlexClient::with_base_url(base, None),
    )
}

const ATTENTION_BODY: &str = r#"{"data":[{
    "paperId": "204e3073870fae3d05bcbc2f6a8e263d9b72e776",
    "title": "Attention Is All You Need",
    "authors": [
        {"name": "Ashish Vaswani"},
        {"name": "Noam Shazeer"},
        {"name": "Niki Parmar"}
    ],
    "year": 2017,
    "citationCount": 50000,
    "venue": "Neural Information Processing Systems",
    "externalIds": {"DOI": "10.48550/arXiv.1706.03762"}
}]}"#;

#[tokio::test]
async fn search_renders_a_clean_citation() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/paper/search")
        .match_query(Matcher::Regex("query=Attention".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ATTENTION_BODY)
        .create_async()
        .await;

    let router = mock_router(&server.url());
    let papers = router
        .search("Attention Is All You Need", Source::SemanticScholar)
        .await
        .unwrap();

    assert_eq!(papers.len(), 1);
    let paper = &papers[0];
    assert_eq!(paper.citation_count, 50000);

    let citation = format_citation(paper);
    assert!(citation.starts_with("Vaswani, A., N.Shazeer, N.Parmar."));
    assert!(citation.contains("2017"));
    assert!(citation.ends_with('.'));
    assert!(!citation.contains("  "));
}

#[tokio::test]
async fn batch_tags_results_and_records_progress() {
    let mut server = Server::new_async().await;
    let _attention = server
        .mock("GET", "/paper/search")
        .match_query(Matcher::Regex("query=Attention".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ATTENTION_BODY)
        .create_async()
        .await;
    let _resnet = server
        .mock("GET", "/paper/search")
        .match_query(Matcher::Regex("query=ResNet".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data":[{
                "paperId": "resnet1",
                "title": "Deep Residual Learning for Image Recognition",
                "authors": [{"name": "Kaiming He"}],
                "year": 2016,
                "citationCount": 120000,
                "venue": "CVPR"
            }]}"#,
        )
        .create_async()
        .await;

    let router = mock_router(&server.url());
    let titles = vec![
        "Attention Is All You Need".to_string(),
        "ResNet".to_string(),
    ];
    let mut progress = Vec::new();
    let papers = run_batch_paced(
        &router,
        &titles,
        Source::SemanticScholar,
        std::time::Duration::ZERO,
        |done, total| progress.push((done, total)),
    )
    .await
    .unwrap();

    assert_eq!(progress, vec![(1, 2), (2, 2)]);
    // Sorted by citations, each result tagged with the line that found it.
    assert_eq!(papers[0].query_title.as_deref(), Some("ResNet"));
    assert_eq!(papers[1].query_title.as_deref(), Some("Attention Is All You Need"));
}
