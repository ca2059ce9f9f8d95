use crate::types::result::ConfidenceResult;

pub fn to_json(result: &ConfidenceResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ConfidenceEngine;
    use crate::types::config::FormulaConfig;
    use crate::types::metrics::MetricsInput;

    #[test]
    fn json_report_exposes_score_breakdown_and_gates() {
        let result = ConfidenceEngine::new(FormulaConfig::default())
            .calculate(&MetricsInput::default())
            .expect("calculate should succeed");

        let rendered = to_json(&result).expect("json should serialize");
        assert!(rendered.contains("\"score\""));
        assert!(rendered.contains("\"penalty_breakdown\""));
        assert!(rendered.contains("\"sev_components\""));
        assert!(rendered.contains("\"can_ship\""));
        assert!(rendered.contains("\"formula_version\": \"v1.0.0\""));
    }
}
