use crate::types::result::ConfidenceResult;

/// Human-readable console report: score with status, penalty breakdown,
/// raw inputs, release gates, and the highest-impact focus guidance.
pub fn to_text(result: &ConfidenceResult) -> String {
    let mut output = String::new();
    let line = "=".repeat(60);

    output.push_str(&line);
    output.push_str("\nCONFIDENCE REPORT\n");
    output.push_str(&line);
    output.push('\n');

    let status = score_status(result.score);
    output.push_str(&format!(
        "\n  CONFIDENCE SCORE: {:.1}%  [{}]\n  Base score: {:.1}%\n",
        result.score, status, result.base_score
    ));
    if let Some(previous) = result.previous_score {
        output.push_str(&format!("  Previous score: {previous:.1}%\n"));
    }

    let pb = &result.penalty_breakdown;
    output.push_str("\n  Penalty breakdown:\n");
    for (label, value) in [
        ("Severity", pb.severity),
        ("Doc coverage", pb.doc_coverage),
        ("Staleness", pb.staleness),
        ("Tier-A unmapped", pb.tier_a_unmapped),
        ("Test coverage", pb.test_coverage),
        ("Bug resolution", pb.bug_resolution),
        ("Hotspot risk", pb.hotspot_risk),
        ("Recurrence", pb.recurrence),
    ] {
        output.push_str(&format!("    {label:<16} -{value:5.1}\n"));
    }
    if pb.fix_ratio_bonus > 0.0 {
        output.push_str(&format!(
            "    {:<16} +{:5.1}\n",
            "Fix-ratio bonus", pb.fix_ratio_bonus
        ));
    }
    output.push_str(&format!("    {:<16} -{:5.1}\n", "Total", pb.total));

    let inputs = &result.inputs;
    output.push_str(&format!(
        "\n  Raw inputs:\n    Open bugs: P0={}, P1={}, P2={}, P3={}\n    Resolution: {}/{} fixed ({:.1}% smoothed)\n    Doc coverage: {:.1}%\n",
        inputs.p0_open,
        inputs.p1_open,
        inputs.p2_open,
        inputs.p3_open,
        inputs.bugs_fixed,
        inputs.bugs_total,
        inputs.fix_pct_bayes,
        inputs.doc_coverage_pct,
    ));

    let gates = &result.release_gates;
    output.push_str("\n  Release gates:\n");
    output.push_str(&format!("    P0 = 0:          {}\n", pass_fail(gates.p0_zero)));
    output.push_str(&format!(
        "    Tier-A mapped:   {}\n",
        pass_fail(gates.tier_a_mapped)
    ));
    output.push_str(&format!(
        "    Staleness < 21d: {}\n",
        pass_warn(gates.staleness_ok)
    ));
    output.push_str(&format!(
        "    Score >= 70:     {}\n",
        pass_warn(gates.score_ok)
    ));

    output.push('\n');
    if gates.can_ship {
        if result.score >= 85.0 {
            output.push_str("  -> READY TO SHIP\n");
        } else if gates.score_ok {
            output.push_str("  -> CAN SHIP with known issues\n");
        } else {
            output.push_str("  -> WAIVER REQUIRED (score < 70)\n");
        }
    } else {
        output.push_str("  -> BLOCKED (hard gates failed)\n");
    }

    let guidance = focus_guidance(result);
    if !guidance.is_empty() {
        output.push_str("\n  Focus guidance (highest impact):\n");
        for (penalty, action) in guidance {
            output.push_str(&format!("    - {action} (-{penalty:.1} penalty)\n"));
        }
    }

    output.push_str(&line);
    output.push('\n');
    output
}

fn score_status(score: f64) -> &'static str {
    if score >= 85.0 {
        "EXCELLENT"
    } else if score >= 70.0 {
        "GOOD"
    } else if score >= 50.0 {
        "NEEDS ATTENTION"
    } else {
        "CRITICAL"
    }
}

fn pass_fail(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

fn pass_warn(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "WARN"
    }
}

/// Top three nonzero penalties, largest first.
fn focus_guidance(result: &ConfidenceResult) -> Vec<(f64, &'static str)> {
    let pb = &result.penalty_breakdown;
    let mut penalties = vec![
        (pb.severity, "Fix open P0/P1 bugs"),
        (pb.doc_coverage, "Map undocumented files"),
        (pb.staleness, "Update stale documents"),
        (pb.tier_a_unmapped, "Document tier-A files"),
        (pb.test_coverage, "Add more tests"),
        (pb.bug_resolution, "Close open bugs"),
        (pb.hotspot_risk, "Address risky hotspots"),
        (pb.recurrence, "Break recurring bug patterns"),
    ];
    penalties.sort_by(|a, b| b.0.total_cmp(&a.0));
    penalties
        .into_iter()
        .take(3)
        .filter(|(penalty, _)| *penalty > 0.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ConfidenceEngine;
    use crate::types::config::FormulaConfig;
    use crate::types::metrics::{CodebaseStats, MetricsInput};

    #[test]
    fn text_report_contains_score_gates_and_guidance() {
        let input = MetricsInput {
            stats: Some(CodebaseStats {
                mapped: 50,
                scripts: 100,
                tests_count: 0,
            }),
            ..MetricsInput::default()
        };
        let result = ConfidenceEngine::new(FormulaConfig::default())
            .calculate(&input)
            .expect("calculate should succeed");

        let rendered = to_text(&result);
        assert!(rendered.contains("CONFIDENCE SCORE"));
        assert!(rendered.contains("Release gates"));
        assert!(rendered.contains("Focus guidance"));
        assert!(rendered.contains("Map undocumented files"));
    }

    #[test]
    fn blocked_projects_render_the_block_banner() {
        let mut input = MetricsInput::default();
        input.aggregates.severity.critical.open = 1;
        let result = ConfidenceEngine::new(FormulaConfig::default())
            .calculate(&input)
            .expect("calculate should succeed");

        let rendered = to_text(&result);
        assert!(rendered.contains("BLOCKED (hard gates failed)"));
        assert!(rendered.contains("P0 = 0:          FAIL"));
    }
}
