use serde::Serialize;

/// Full output of one confidence calculation. Assembled fresh per call and
/// never mutated afterwards; persisting the score is the caller's job.
#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceResult {
    /// Final score after EMA smoothing, one decimal, clamped to [0,100].
    pub score: f64,
    /// Score before smoothing against the previous value.
    pub base_score: f64,
    pub previous_score: Option<f64>,
    pub penalty_breakdown: PenaltyBreakdown,
    pub release_gates: ReleaseGates,
    pub inputs: InputsEcho,
    pub config: ConfigEcho,
}

#[derive(Debug, Clone, Serialize)]
pub struct PenaltyBreakdown {
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
    pub raw_total: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeverityComponents {
    pub p0: f64,
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
}

/// Hard and advisory gates. `can_ship` is the only blocking determination;
/// `score_ok` and `staleness_ok` inform guidance but never block on their own.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReleaseGates {
    pub p0_zero: bool,
    pub tier_a_mapped: bool,
    pub staleness_ok: bool,
    pub score_ok: bool,
    pub can_ship: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalStatus {
    None,
    Open,
    AllFixed,
}

/// Raw quantities the formulas consumed, echoed for audit and debugging.
#[derive(Debug, Clone, Serialize)]
pub struct InputsEcho {
    pub p0_open: u64,
    pub p0_found: u64,
    pub p0_fixed: u64,
    pub p1_open: u64,
    pub p1_found: u64,
    pub p1_fixed: u64,
    pub p2_open: u64,
    pub p3_open: u64,
    pub bugs_total: u64,
    pub bugs_fixed: u64,
    pub doc_coverage_pct: f64,
    pub fix_pct_bayes: f64,
    pub avg_recurrence: f64,
    pub critical_status: CriticalStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigEcho {
    #[serde(rename = "K")]
    pub k: f64,
    pub formula_version: &'static str,
    pub fix_ratio_bonus_enabled: bool,
}
