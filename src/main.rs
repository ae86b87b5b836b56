use std::net::SocketAddr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use paper_cite::batch;
use paper_cite::citation::format_citation;
use paper_cite::config::Config;
use paper_cite::history::HistoryStore;
use paper_cite::router::Source;

#[derive(Parser)]
#[command(name = "paper-cite", version, about = "Query academic paper citation metadata")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search one title or keyword and print the matching papers
    Search {
        term: String,
        /// Provider: semanticscholar, crossref, or openalex
        #[arg(long, default_value = "semanticscholar")]
        source: String,
        /// Print ASA citations instead of JSON
        #[arg(long)]
        cite: bool,
    },
    /// Look up up to 10 titles and rank the top hits by citation count
    Batch {
        /// One paper title per argument
        #[arg(required = true)]
        titles: Vec<String>,
        /// Provider: semanticscholar, crossref, or openalex
        #[arg(long, default_value = "semanticscholar")]
        source: String,
        /// Print ASA citations instead of JSON
        #[arg(long)]
        cite: bool,
    },
    /// Inspect or clear the local search history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Run the health-check endpoint for the web client
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Print stored search terms, newest first
    List,
    /// Delete all stored search terms
    Clear,
    /// Print entries whose text contains the fragment
    Find { fragment: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Search { term, source, cite } => {
            let source = Source::parse(&source);
            let mut history = HistoryStore::open(config.history_path());
            history.add(&term)?;

            let router = config.build_router();
            let papers = router.search(&term, source).await?;
            if papers.is_empty() {
                eprintln!("No papers found for \"{}\"; try another --source", term);
            } else {
                print_papers(&papers, cite)?;
            }
        }
        Command::Batch {
            titles,
            source,
            cite,
        } => {
            let source = Source::parse(&source);
            let router = config.build_router();
            let papers = batch::run_batch(&router, &titles, source, |done, total| {
                eprintln!("{}/{} completed", done, total);
            })
            .await?;

            if papers.is_empty() {
                eprintln!("No papers found; check the titles and try again");
            } else {
                let mut history = HistoryStore::open(config.history_path());
                for title in &titles {
                    history.add(title)?;
                }
                print_papers(&papers, cite)?;
            }
        }
        Command::History { action } => {
            let mut history = HistoryStore::open(config.history_path());
            match action {
                HistoryAction::List => print_entries(history.list().iter()),
                HistoryAction::Clear => history.clear()?,
                HistoryAction::Find { fragment } => {
                    print_entries(history.matching(&fragment, 5).into_iter())
                }
            }
        }
        Command::Serve { addr } => paper_cite::server::serve(addr).await?,
    }

    Ok(())
}

fn print_papers(papers: &[paper_cite::apis::Paper], cite: bool) -> Result<()> {
    if cite {
        for paper in papers {
            println!("{}", format_citation(paper));
        }
    } else {
        println!("{}", serde_json::to_string_pretty(papers)?);
    }
    Ok(())
}

fn print_entries<'a>(entries: impl Iterator<Item = &'a paper_cite::history::HistoryEntry>) {
    for entry in entries {
        println!("{}  {}", entry.time.to_rfc3339(), entry.text);
    }
}
