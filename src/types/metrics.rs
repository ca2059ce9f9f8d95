use crate::error::{ConfGateError, Result};
use serde::{Deserialize, Serialize};

/// Open/found/fixed counts for one severity tier.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct TierCounts {
    #[serde(default)]
    pub open: u64,
    #[serde(default)]
    pub found: u64,
    #[serde(default)]
    pub fixed: u64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct SeverityCounts {
    #[serde(default)]
    pub critical: TierCounts,
    #[serde(default)]
    pub high: TierCounts,
    #[serde(default)]
    pub medium: TierCounts,
    #[serde(default)]
    pub low: TierCounts,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct BugSummary {
    #[serde(default)]
    pub total_found: u64,
    #[serde(default)]
    pub total_fixed: u64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct Aggregates {
    #[serde(default)]
    pub severity: SeverityCounts,
    #[serde(default)]
    pub summary: BugSummary,
}

/// Codebase stats supplied by the file scanner. The defaults match a
/// mid-sized, fully mapped project so engine-only callers without a scanner
/// are not penalized for missing data.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CodebaseStats {
    pub mapped: u64,
    pub scripts: u64,
    pub tests_count: u64,
}

impl Default for CodebaseStats {
    fn default() -> Self {
        Self {
            mapped: 100,
            scripts: 100,
            tests_count: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Low
    }
}

/// A recorded location where a bug pattern keeps reappearing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hotspot {
    #[serde(default)]
    pub risk: RiskLevel,
    #[serde(default)]
    pub bug_recurrence: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Fingerprints {
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

/// Document staleness as measured by the scanner. Absent stats contribute
/// zero penalty, so callers that only track bugs are unaffected.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct StalenessStats {
    #[serde(default)]
    pub stale_count: u64,
    #[serde(default)]
    pub avg_staleness_days: f64,
    #[serde(default)]
    pub tier_a_stale_count: u64,
    #[serde(default)]
    pub tier_a_unmapped: u64,
}

/// Everything one `calculate` call consumes. The previous score is read by
/// the caller from wherever it persists history; the engine never touches
/// shared storage itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsInput {
    #[serde(default)]
    pub aggregates: Aggregates,
    pub stats: Option<CodebaseStats>,
    pub fingerprints: Option<Fingerprints>,
    pub staleness: Option<StalenessStats>,
    pub previous_score: Option<f64>,
}

impl MetricsInput {
    /// Counts are unsigned by construction; this rejects the float fields a
    /// caller could still corrupt, naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if let Some(fingerprints) = &self.fingerprints {
            for (index, hotspot) in fingerprints.hotspots.iter().enumerate() {
                if !hotspot.bug_recurrence.is_finite() || hotspot.bug_recurrence < 0.0 {
                    return Err(ConfGateError::InvalidMetricInput(format!(
                        "fingerprints.hotspots[{index}].bug_recurrence must be a non-negative number"
                    )));
                }
            }
        }
        if let Some(staleness) = &self.staleness {
            if !staleness.avg_staleness_days.is_finite() || staleness.avg_staleness_days < 0.0 {
                return Err(ConfGateError::InvalidMetricInput(
                    "staleness.avg_staleness_days must be a non-negative number".to_string(),
                ));
            }
        }
        if let Some(previous) = self.previous_score {
            if !previous.is_finite() || !(0.0..=100.0).contains(&previous) {
                return Err(ConfGateError::InvalidMetricInput(
                    "previous_score must be between 0 and 100".to_string(),
                ));
            }
        }
        Ok(())
    }
}
