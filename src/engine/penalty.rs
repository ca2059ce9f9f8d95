use crate::types::config::FormulaConfig;
use crate::types::metrics::{
    BugSummary, Fingerprints, RiskLevel, SeverityCounts, StalenessStats,
};
use crate::types::result::SeverityComponents;

// Gap penalties are super-linear in the shortfall below the target.
const GAP_EXPONENT: f64 = 1.5;
const DOC_GAP_MULTIPLIER: f64 = 25.0;
const TEST_GAP_MULTIPLIER: f64 = 10.0;
const RESOLUTION_GAP_MULTIPLIER: f64 = 18.0;

// Linear staleness and tier-A weights.
const STALE_COUNT_WEIGHT: f64 = 0.5;
const AVG_STALENESS_DIVISOR: f64 = 15.0;
const TIER_A_STALE_WEIGHT: f64 = 1.0;
const TIER_A_UNMAPPED_WEIGHT: f64 = 2.0;

// Log-scaled hotspot and recurrence terms.
const HOTSPOT_SCALE: f64 = 2.0;
const HOTSPOT_HIGH_WEIGHT: f64 = 3.0;
const HOTSPOT_MEDIUM_WEIGHT: f64 = 1.0;
const RECURRENCE_SCALE: f64 = 2.5;
const RECURRENCE_GAIN: f64 = 10.0;

/// Minimum sample size before the fix-ratio bonus can activate. A project
/// with 2 bugs and both fixed must not manufacture a large bonus.
const BONUS_MIN_SAMPLE: u64 = 10;

/// Unrounded penalty values. Rounding happens once, at record assembly.
#[derive(Debug, Clone, Copy)]
pub struct PenaltyParts {
    pub severity: f64,
    pub sev_components: SeverityComponents,
    pub doc_coverage: f64,
    pub staleness: f64,
    pub tier_a_unmapped: f64,
    pub test_coverage: f64,
    pub bug_resolution: f64,
    pub persistence: f64,
    pub hotspot_risk: f64,
    pub recurrence: f64,
    pub fix_ratio_bonus: f64,
}

impl PenaltyParts {
    pub fn raw_total(&self) -> f64 {
        self.severity
            + self.doc_coverage
            + self.staleness
            + self.tier_a_unmapped
            + self.test_coverage
            + self.bug_resolution
            + self.persistence
            + self.hotspot_risk
            + self.recurrence
    }

    pub fn total(&self) -> f64 {
        (self.raw_total() - self.fix_ratio_bonus).max(0.0)
    }
}

fn saturating(open: u64, max: f64, k: f64) -> f64 {
    max * (1.0 - (-(open as f64) / k).exp())
}

/// Saturating per-tier curves: the first few open bugs of a tier matter most,
/// and no tier can contribute more than its `max`. The tier sum is capped so
/// dozens of open low-severity issues never outweigh a handful of P0s.
pub fn severity_penalty(cfg: &FormulaConfig, severity: &SeverityCounts) -> (f64, SeverityComponents) {
    let components = SeverityComponents {
        p0: saturating(severity.critical.open, cfg.p0_max, cfg.p0_k),
        p1: saturating(severity.high.open, cfg.p1_max, cfg.p1_k),
        p2: saturating(severity.medium.open, cfg.p2_max, cfg.p2_k),
        p3: saturating(severity.low.open, cfg.p3_max, cfg.p3_k),
    };
    let sum = components.p0 + components.p1 + components.p2 + components.p3;
    (sum.min(cfg.cap_severity), components)
}

fn power_gap(coverage: f64, target: f64, multiplier: f64, cap: f64) -> f64 {
    let gap = (target - coverage).max(0.0);
    (multiplier * gap.powf(GAP_EXPONENT)).min(cap)
}

/// Returns the penalty and the coverage ratio it was computed from.
pub fn doc_coverage_penalty(cfg: &FormulaConfig, mapped: u64, scripts: u64) -> (f64, f64) {
    let coverage = mapped as f64 / scripts.max(1) as f64;
    (
        power_gap(coverage, cfg.doc_target, DOC_GAP_MULTIPLIER, cfg.cap_doc),
        coverage,
    )
}

pub fn test_coverage_penalty(cfg: &FormulaConfig, tests_count: u64, scripts: u64) -> f64 {
    let ratio = tests_count as f64 / scripts.max(1) as f64;
    power_gap(ratio, cfg.test_target, TEST_GAP_MULTIPLIER, cfg.cap_test)
}

/// Bayesian-smoothed fix rate: blending in prior pseudo-counts keeps a
/// project with very few total bugs from registering as confidently good or
/// bad. Returns the penalty and the smoothed rate.
pub fn resolution_penalty(cfg: &FormulaConfig, summary: &BugSummary) -> (f64, f64) {
    let fix_pct_bayes = (summary.total_fixed as f64 + cfg.alpha)
        / (summary.total_found as f64 + cfg.alpha + cfg.beta).max(1.0);
    (
        power_gap(
            fix_pct_bayes,
            cfg.fix_target,
            RESOLUTION_GAP_MULTIPLIER,
            cfg.cap_resolution,
        ),
        fix_pct_bayes,
    )
}

/// Linear staleness terms, each bounded, summed under the staleness cap.
pub fn staleness_penalty(cfg: &FormulaConfig, staleness: &StalenessStats) -> f64 {
    let per_doc = staleness.stale_count as f64 * STALE_COUNT_WEIGHT;
    let average = staleness.avg_staleness_days / AVG_STALENESS_DIVISOR;
    let tier_a = staleness.tier_a_stale_count as f64 * TIER_A_STALE_WEIGHT;
    (per_doc + average + tier_a).min(cfg.cap_staleness)
}

pub fn tier_a_unmapped_penalty(cfg: &FormulaConfig, tier_a_unmapped: u64) -> f64 {
    (tier_a_unmapped as f64 * TIER_A_UNMAPPED_WEIGHT).min(cfg.cap_tier_a)
}

/// Risk counts and mean recurrence across all hotspots.
#[derive(Debug, Clone, Copy, Default)]
pub struct HotspotSummary {
    pub high_count: u64,
    pub medium_count: u64,
    pub avg_recurrence: f64,
}

pub fn summarize_hotspots(fingerprints: Option<&Fingerprints>) -> HotspotSummary {
    let Some(fingerprints) = fingerprints else {
        return HotspotSummary::default();
    };
    let mut summary = HotspotSummary::default();
    let mut recurrence_sum = 0.0;
    for hotspot in &fingerprints.hotspots {
        match hotspot.risk {
            RiskLevel::High => summary.high_count += 1,
            RiskLevel::Medium => summary.medium_count += 1,
            RiskLevel::Low => {}
        }
        recurrence_sum += hotspot.bug_recurrence;
    }
    if !fingerprints.hotspots.is_empty() {
        summary.avg_recurrence = recurrence_sum / fingerprints.hotspots.len() as f64;
    }
    summary
}

/// Log scaling keeps a large number of risky hotspots from saturating the
/// score once a handful are already flagged.
pub fn hotspot_penalty(cfg: &FormulaConfig, summary: &HotspotSummary) -> f64 {
    let weighted = HOTSPOT_HIGH_WEIGHT * summary.high_count as f64
        + HOTSPOT_MEDIUM_WEIGHT * summary.medium_count as f64;
    (HOTSPOT_SCALE * weighted.ln_1p()).min(cfg.cap_hotspot)
}

pub fn recurrence_penalty(cfg: &FormulaConfig, avg_recurrence: f64) -> f64 {
    (RECURRENCE_SCALE * (avg_recurrence * RECURRENCE_GAIN).ln_1p()).min(cfg.cap_recurrence)
}

/// Subtracted from the penalty total, never negative. Gated on a minimum
/// sample size and on the actual (unsmoothed) fix rate clearing the
/// threshold.
pub fn fix_ratio_bonus(cfg: &FormulaConfig, summary: &BugSummary) -> f64 {
    if !cfg.fix_ratio_bonus_enabled || summary.total_found <= BONUS_MIN_SAMPLE {
        return 0.0;
    }
    let actual_rate = summary.total_fixed as f64 / summary.total_found as f64;
    if actual_rate <= cfg.fix_ratio_bonus_threshold {
        return 0.0;
    }
    let fraction =
        (actual_rate - cfg.fix_ratio_bonus_threshold) / (1.0 - cfg.fix_ratio_bonus_threshold);
    cfg.fix_ratio_bonus_max * fraction
}
