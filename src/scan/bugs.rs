use crate::scan::filesystem::read_to_string_if_exists;
use crate::types::metrics::{Aggregates, BugSummary, SeverityCounts, TierCounts};
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// Extract per-tier open counts and resolution totals from the bug tracker
/// document. Only OPEN bugs affect confidence; documented anti-pattern
/// catalogs must not be counted here.
pub fn extract_aggregates(bug_tracker: &Path) -> Aggregates {
    let Some(content) = read_to_string_if_exists(bug_tracker) else {
        return Aggregates::default();
    };

    let mut open = [0u64; 4];
    // Preferred source: a JSON summary line such as `"P0": 1, "P1": 8`.
    for (slot, label) in open.iter_mut().zip(["P0", "P1", "P2", "P3"]) {
        if let Some(count) = labeled_count(&content, label) {
            *slot = count;
        }
    }

    // Fallback: sum the per-system markdown table when no summary exists.
    if open.iter().all(|count| *count == 0) {
        if let Some(table_counts) = table_counts(&content) {
            open = table_counts;
        }
    }

    let summary = BugSummary {
        total_found: suffixed_total(&content, r"([\d,]+)\+?\s*bugs?\s*tracked").unwrap_or(0),
        total_fixed: suffixed_total(&content, r"([\d,]+)\+?\s*fixed").unwrap_or(0),
    };

    Aggregates {
        severity: SeverityCounts {
            critical: open_tier(open[0]),
            high: open_tier(open[1]),
            medium: open_tier(open[2]),
            low: open_tier(open[3]),
        },
        summary,
    }
}

fn open_tier(open: u64) -> TierCounts {
    TierCounts {
        open,
        ..TierCounts::default()
    }
}

fn labeled_count(content: &str, label: &str) -> Option<u64> {
    let pattern = Regex::new(&format!(r#""{label}":\s*(\d+)"#)).ok()?;
    pattern
        .captures(content)
        .and_then(|captures| captures.get(1))
        .and_then(|group| group.as_str().parse().ok())
}

fn table_counts(content: &str) -> Option<[u64; 4]> {
    // Rows shaped like `| system | P0 | P1 | P2 | P3 |`.
    let row = Regex::new(r"\|\s*\w+\s*\|\s*(\d+)\s*\|\s*(\d+)\s*\|\s*(\d+)\s*\|\s*(\d+)\s*\|")
        .ok()?;
    let mut totals = [0u64; 4];
    let mut matched = false;
    for captures in row.captures_iter(content) {
        matched = true;
        for (slot, group) in totals.iter_mut().zip(1..=4) {
            *slot += captures
                .get(group)
                .and_then(|value| value.as_str().parse::<u64>().ok())
                .unwrap_or(0);
        }
    }
    matched.then_some(totals)
}

fn suffixed_total(content: &str, pattern: &str) -> Option<u64> {
    let matcher = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .ok()?;
    matcher
        .captures(content)
        .and_then(|captures| captures.get(1))
        .and_then(|group| group.as_str().replace(',', "").parse().ok())
}
