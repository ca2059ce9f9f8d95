pub mod gates;
pub mod penalty;
pub mod smoothing;

use crate::error::Result;
use crate::types::config::FormulaConfig;
use crate::types::metrics::MetricsInput;
use crate::types::result::{
    ConfidenceResult, ConfigEcho, CriticalStatus, InputsEcho, PenaltyBreakdown,
    SeverityComponents,
};

pub const FORMULA_VERSION: &str = "v1.0.0";

/// The scoring core. Holds only the immutable formula constants; every
/// `calculate` call is a pure function of its input, so concurrent callers
/// can share one engine freely.
#[derive(Debug, Clone)]
pub struct ConfidenceEngine {
    config: FormulaConfig,
}

impl ConfidenceEngine {
    pub fn new(config: FormulaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormulaConfig {
        &self.config
    }

    pub fn calculate(&self, input: &MetricsInput) -> Result<ConfidenceResult> {
        input.validate()?;

        let cfg = &self.config;
        let severity = &input.aggregates.severity;
        let summary = &input.aggregates.summary;
        let stats = input.stats.unwrap_or_default();
        let staleness = input.staleness.unwrap_or_default();

        let (severity_penalty, sev_components) = penalty::severity_penalty(cfg, severity);
        let (doc_penalty, doc_coverage) =
            penalty::doc_coverage_penalty(cfg, stats.mapped, stats.scripts);
        let staleness_penalty = penalty::staleness_penalty(cfg, &staleness);
        let tier_a_penalty = penalty::tier_a_unmapped_penalty(cfg, staleness.tier_a_unmapped);
        let test_penalty = penalty::test_coverage_penalty(cfg, stats.tests_count, stats.scripts);
        let (resolution_penalty, fix_pct_bayes) = penalty::resolution_penalty(cfg, summary);
        let hotspots = penalty::summarize_hotspots(input.fingerprints.as_ref());
        let hotspot_penalty = penalty::hotspot_penalty(cfg, &hotspots);
        let recurrence_penalty = penalty::recurrence_penalty(cfg, hotspots.avg_recurrence);
        let fix_ratio_bonus = penalty::fix_ratio_bonus(cfg, summary);

        let parts = penalty::PenaltyParts {
            severity: severity_penalty,
            sev_components,
            doc_coverage: doc_penalty,
            staleness: staleness_penalty,
            tier_a_unmapped: tier_a_penalty,
            test_coverage: test_penalty,
            bug_resolution: resolution_penalty,
            persistence: 0.0,
            hotspot_risk: hotspot_penalty,
            recurrence: recurrence_penalty,
            fix_ratio_bonus,
        };

        // Single exponential decay keeps the base score in (0,100] for any
        // non-negative total and lets K be tuned without touching the curves.
        let total = parts.total();
        let base_score = 100.0 * (-total / cfg.k).exp();
        let final_score = smoothing::smooth(base_score, input.previous_score);
        let score = round1(final_score).clamp(0.0, 100.0);

        let release_gates = gates::evaluate(severity, input.staleness.as_ref(), score);

        Ok(ConfidenceResult {
            score,
            base_score: round1(base_score),
            previous_score: input.previous_score,
            penalty_breakdown: assemble_breakdown(&parts),
            release_gates,
            inputs: echo_inputs(input, doc_coverage, fix_pct_bayes, hotspots.avg_recurrence),
            config: ConfigEcho {
                k: cfg.k,
                formula_version: FORMULA_VERSION,
                fix_ratio_bonus_enabled: cfg.fix_ratio_bonus_enabled,
            },
        })
    }
}

fn assemble_breakdown(parts: &penalty::PenaltyParts) -> PenaltyBreakdown {
    PenaltyBreakdown {
        severity: round1(parts.severity),
        sev_components: SeverityComponents {
            p0: round2(parts.sev_components.p0),
            p1: round2(parts.sev_components.p1),
            p2: round2(parts.sev_components.p2),
            p3: round2(parts.sev_components.p3),
        },
        doc_coverage: round1(parts.doc_coverage),
        staleness: round1(parts.staleness),
        tier_a_unmapped: round1(parts.tier_a_unmapped),
        test_coverage: round1(parts.test_coverage),
        bug_resolution: round1(parts.bug_resolution),
        persistence: round1(parts.persistence),
        hotspot_risk: round1(parts.hotspot_risk),
        recurrence: round1(parts.recurrence),
        fix_ratio_bonus: round1(parts.fix_ratio_bonus),
        raw_total: round1(parts.raw_total()),
        total: round1(parts.total()),
    }
}

fn echo_inputs(
    input: &MetricsInput,
    doc_coverage: f64,
    fix_pct_bayes: f64,
    avg_recurrence: f64,
) -> InputsEcho {
    let severity = &input.aggregates.severity;
    let summary = &input.aggregates.summary;

    let critical_status = if severity.critical.open > 0 {
        CriticalStatus::Open
    } else if severity.critical.found > 0 && severity.critical.fixed == severity.critical.found {
        CriticalStatus::AllFixed
    } else {
        CriticalStatus::None
    };

    InputsEcho {
        p0_open: severity.critical.open,
        p0_found: severity.critical.found,
        p0_fixed: severity.critical.fixed,
        p1_open: severity.high.open,
        p1_found: severity.high.found,
        p1_fixed: severity.high.fixed,
        p2_open: severity.medium.open,
        p3_open: severity.low.open,
        bugs_total: summary.total_found,
        bugs_fixed: summary.total_fixed,
        doc_coverage_pct: round1(doc_coverage * 100.0),
        fix_pct_bayes: round1(fix_pct_bayes * 100.0),
        avg_recurrence: round3(avg_recurrence),
        critical_status,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
