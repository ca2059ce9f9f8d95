use crate::error::Result;
use crate::types::result::ConfidenceResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// One persisted evaluation. Only the smoothed score feeds the next run's
/// EMA; the rest is kept for dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub confidence: f64,
    pub base_score: f64,
    pub can_ship: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Most recent persisted score, or None when no usable history exists.
/// A corrupt history file is logged and treated as absent; scoring must not
/// fail because a collaborator's log went bad.
pub fn previous_score(path: &Path) -> Option<f64> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<History>(&content) {
        Ok(history) => history.history.last().map(|entry| entry.confidence),
        Err(e) => {
            warn!("could not parse history {}: {}", path.display(), e);
            None
        }
    }
}

/// Append the result of one evaluation, creating the file and its parent
/// directory on first use. Callers that run concurrently must serialize
/// writes themselves; this is a plain read-modify-write.
pub fn append(path: &Path, result: &ConfidenceResult) -> Result<()> {
    let mut history = match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(
                "could not parse history {}; starting fresh: {}",
                path.display(),
                e
            );
            History::default()
        }),
        Err(_) => History::default(),
    };

    history.history.push(HistoryEntry {
        timestamp: Utc::now(),
        confidence: result.score,
        base_score: result.base_score,
        can_ship: result.release_gates.can_ship,
    });

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&history)?)?;
    Ok(())
}
