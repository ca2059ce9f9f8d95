use crate::types::result::ConfidenceResult;

pub fn to_markdown(result: &ConfidenceResult) -> String {
    let mut output = String::new();
    output.push_str("# Confidence Report\n\n");
    output.push_str(&format!(
        "Score: **{:.1}** (base {:.1}, formula {})\n\n",
        result.score, result.base_score, result.config.formula_version
    ));

    let pb = &result.penalty_breakdown;
    output.push_str("## Penalty Breakdown\n\n");
    output.push_str("| Component | Penalty |\n|---|---|\n");
    for (label, value) in [
        ("severity", pb.severity),
        ("doc_coverage", pb.doc_coverage),
        ("staleness", pb.staleness),
        ("tier_a_unmapped", pb.tier_a_unmapped),
        ("test_coverage", pb.test_coverage),
        ("bug_resolution", pb.bug_resolution),
        ("hotspot_risk", pb.hotspot_risk),
        ("recurrence", pb.recurrence),
    ] {
        output.push_str(&format!("| {label} | {value:.1} |\n"));
    }
    output.push_str(&format!("| fix_ratio_bonus | -{:.1} |\n", pb.fix_ratio_bonus));
    output.push_str(&format!("| **total** | **{:.1}** |\n\n", pb.total));

    let gates = &result.release_gates;
    output.push_str("## Release Gates\n\n");
    output.push_str(&format!("- p0_zero: {}\n", gates.p0_zero));
    output.push_str(&format!("- tier_a_mapped: {}\n", gates.tier_a_mapped));
    output.push_str(&format!("- staleness_ok: {} (advisory)\n", gates.staleness_ok));
    output.push_str(&format!("- score_ok: {} (advisory)\n", gates.score_ok));
    output.push_str(&format!("- **can_ship: {}**\n", gates.can_ship));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ConfidenceEngine;
    use crate::types::config::FormulaConfig;
    use crate::types::metrics::MetricsInput;

    #[test]
    fn markdown_report_contains_sections() {
        let result = ConfidenceEngine::new(FormulaConfig::default())
            .calculate(&MetricsInput::default())
            .expect("calculate should succeed");

        let rendered = to_markdown(&result);
        assert!(rendered.contains("# Confidence Report"));
        assert!(rendered.contains("## Penalty Breakdown"));
        assert!(rendered.contains("## Release Gates"));
        assert!(rendered.contains("can_ship: true"));
    }
}
