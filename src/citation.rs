use crate::apis::{Author, Paper, PublicationKind};

/// Render the author list in ASA style: the first author as
/// "Last, Initials." and every later author as "InitialsLast", joined with
/// ", ". An empty list renders the placeholder token.
pub fn format_authors(authors: &[Author]) -> String {
    if authors.is_empty() {
        return "Unknown Author".to_string();
    }

    authors
        .iter()
        .enumerate()
        .map(|(i, author)| {
            let mut parts: Vec<&str> = author.name.split_whitespace().collect();
            let last = parts.pop().unwrap_or("");
            let mut initials = String::new();
            for part in &parts {
                if let Some(c) = part.chars().next() {
                    initials.extend(c.to_uppercase());
                    initials.push('.');
                }
            }
            if i == 0 {
                format!("{}, {}", last, initials)
            } else {
                format!("{}{}", initials, last)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render an ASA citation for a paper. Total: missing fields render as
/// placeholder tokens ("n.d.", "Untitled") or drop out, and the result is
/// whitespace-normalized.
pub fn format_citation(paper: &Paper) -> String {
    let authors = format_authors(&paper.authors);
    let year = paper
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "n.d.".to_string());
    let title = if paper.title.is_empty() {
        "Untitled"
    } else {
        paper.title.as_str()
    };
    let venue = paper.venue.as_str();
    let volume = paper.volume.as_deref().unwrap_or("");
    let issue = paper
        .issue
        .as_deref()
        .map(|i| format!("({})", i))
        .unwrap_or_default();
    let pages = paper
        .pages
        .as_deref()
        .map(|p| format!(":{}", p))
        .unwrap_or_default();

    let citation = match paper.kind {
        Some(PublicationKind::Book) => format!(
            "{}. {}. {}[M]. {}: {}.",
            authors,
            year,
            title,
            paper.city.as_deref().unwrap_or(""),
            paper.publisher.as_deref().unwrap_or(""),
        ),
        Some(PublicationKind::Journal) => format!(
            "{}. {}. {}[J]. {}, {}{}{}.",
            authors, year, title, venue, volume, issue, pages,
        ),
        Some(PublicationKind::Conference) => format!(
            "{}. {}. {}[C]. In {}, {}.",
            authors, year, title, venue, pages,
        ),
        Some(PublicationKind::Chapter) => format!(
            "{}. {}. {}[A]. In {}, {}[C]. {}: {}.",
            authors,
            year,
            title,
            paper.editors.as_deref().unwrap_or(""),
            paper.booktitle.as_deref().unwrap_or(""),
            paper.city.as_deref().unwrap_or(""),
            paper.publisher.as_deref().unwrap_or(""),
        ),
        None => format!("{}. {}. {}. {}.", authors, year, title, venue),
    };

    citation.split_whitespace().collect::<Vec<_>>().join(" ")
}
