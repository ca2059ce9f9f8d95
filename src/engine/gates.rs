use crate::types::metrics::{SeverityCounts, StalenessStats};
use crate::types::result::ReleaseGates;

/// Advisory threshold on average document staleness.
pub const STALENESS_GATE_DAYS: f64 = 21.0;
/// Advisory threshold on the final score.
pub const SCORE_GATE: f64 = 70.0;

/// Gates are derived from raw inputs, never from the continuous score, so a
/// high score cannot paper over an open critical bug. Only `p0_zero` and
/// `tier_a_mapped` are hard gates.
pub fn evaluate(
    severity: &SeverityCounts,
    staleness: Option<&StalenessStats>,
    final_score: f64,
) -> ReleaseGates {
    let p0_zero = severity.critical.open == 0;
    let tier_a_mapped = staleness.map_or(true, |stats| stats.tier_a_unmapped == 0);
    let staleness_ok =
        staleness.map_or(true, |stats| stats.avg_staleness_days < STALENESS_GATE_DAYS);

    ReleaseGates {
        p0_zero,
        tier_a_mapped,
        staleness_ok,
        score_ok: final_score >= SCORE_GATE,
        can_ship: p0_zero && tier_a_mapped,
    }
}
