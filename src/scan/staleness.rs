use crate::types::metrics::StalenessStats;
use chrono::{DateTime, Utc};
use std::path::Path;

/// A document counts as stale after this many days without modification.
const STALE_THRESHOLD_DAYS: i64 = 30;
/// Tier-A documents are held to a stricter threshold.
const TIER_A_THRESHOLD_DAYS: i64 = 21;

/// Measure staleness over the tracked document set using file modification
/// times. A configured tier-A document missing from disk counts as unmapped;
/// missing tier-B documents are simply skipped.
pub fn measure(root: &Path, tier_a_docs: &[String], tracked_docs: &[String]) -> StalenessStats {
    measure_at(root, tier_a_docs, tracked_docs, Utc::now())
}

fn measure_at(
    root: &Path,
    tier_a_docs: &[String],
    tracked_docs: &[String],
    now: DateTime<Utc>,
) -> StalenessStats {
    let mut stats = StalenessStats::default();
    let mut staleness_days = Vec::new();

    let docs = tier_a_docs
        .iter()
        .map(|doc| (doc, true))
        .chain(tracked_docs.iter().map(|doc| (doc, false)));

    for (doc, is_tier_a) in docs {
        let path = root.join(doc);
        let Some(days_old) = days_since_modified(&path, now) else {
            if is_tier_a {
                stats.tier_a_unmapped += 1;
            }
            continue;
        };

        staleness_days.push(days_old);
        if days_old >= STALE_THRESHOLD_DAYS {
            stats.stale_count += 1;
        }
        if is_tier_a && days_old >= TIER_A_THRESHOLD_DAYS {
            stats.tier_a_stale_count += 1;
        }
    }

    if !staleness_days.is_empty() {
        stats.avg_staleness_days =
            staleness_days.iter().sum::<i64>() as f64 / staleness_days.len() as f64;
    }

    stats
}

fn days_since_modified(path: &Path, now: DateTime<Utc>) -> Option<i64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let modified: DateTime<Utc> = modified.into();
    Some((now - modified).num_days().max(0))
}
