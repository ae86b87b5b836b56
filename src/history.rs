use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum entries kept; the oldest are evicted past the cap.
pub const MAX_HISTORY: usize = 20;

/// One recorded search term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub time: DateTime<Utc>,
}

/// Search history persisted as a JSON array, newest first. The store owns the
/// file exclusively; every mutation is written through synchronously.
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Open the store backed by `path`. A missing file starts empty; an
    /// unreadable or corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("discarding corrupt history at {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!("could not read history at {}: {}", path.display(), e);
                Vec::new()
            }
        };
        Self { path, entries }
    }

    /// Record a search term: drop any older entry with the same text, prepend
    /// a fresh one, cap at `MAX_HISTORY`, persist. Blank terms are ignored.
    pub fn add(&mut self, term: &str) -> Result<()> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }
        self.entries.retain(|e| e.text != term);
        self.entries.insert(
            0,
            HistoryEntry {
                text: term.to_string(),
                time: Utc::now(),
            },
        );
        self.entries.truncate(MAX_HISTORY);
        self.save()
    }

    /// Stored entries, newest first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }

    /// Case-insensitive substring match over stored terms, newest first,
    /// capped at `limit`.
    pub fn matching(&self, fragment: &str, limit: usize) -> Vec<&HistoryEntry> {
        let needle = fragment.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.text.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context("Failed to create history directory")?;
        }
        let json =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize history")?;
        // Temp file plus rename keeps the stored list intact if a write dies.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).context("Failed to write history temp file")?;
        fs::rename(&tmp, &self.path).context("Failed to replace history file")?;
        Ok(())
    }
}
