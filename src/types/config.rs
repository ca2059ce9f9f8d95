use crate::error::ConfGateError;
use serde::Deserialize;

/// Calibrated constants for the confidence formula. Immutable after loading;
/// the engine borrows it for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaConfig {
    /// Scaling constant for the exponential decay of the final score.
    pub k: f64,

    // Saturating severity curves, one (max, k) pair per tier.
    pub p0_max: f64,
    pub p0_k: f64,
    pub p1_max: f64,
    pub p1_k: f64,
    pub p2_max: f64,
    pub p2_k: f64,
    pub p3_max: f64,
    pub p3_k: f64,

    // Per-component caps so no single factor dominates.
    pub cap_severity: f64,
    pub cap_doc: f64,
    pub cap_staleness: f64,
    pub cap_tier_a: f64,
    pub cap_test: f64,
    pub cap_resolution: f64,
    pub cap_hotspot: f64,
    pub cap_recurrence: f64,

    // Targets: penalties apply only to the shortfall below these ratios.
    pub doc_target: f64,
    pub fix_target: f64,
    pub test_target: f64,

    // Bayesian prior pseudo-counts for smoothing the fix-rate ratio.
    pub alpha: f64,
    pub beta: f64,

    pub fix_ratio_bonus_enabled: bool,
    pub fix_ratio_bonus_threshold: f64,
    pub fix_ratio_bonus_max: f64,

    /// Penalty reduction for bugs marked as actively investigated.
    /// Reserved for severity-tier extensions; not consumed by any curve yet.
    pub investigating_discount: f64,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            k: 50.0,
            p0_max: 15.0,
            p0_k: 1.0,
            p1_max: 10.0,
            p1_k: 3.0,
            p2_max: 5.0,
            p2_k: 6.0,
            p3_max: 1.5,
            p3_k: 25.0,
            cap_severity: 35.0,
            cap_doc: 10.0,
            cap_staleness: 10.0,
            cap_tier_a: 8.0,
            cap_test: 3.0,
            cap_resolution: 6.0,
            cap_hotspot: 6.0,
            cap_recurrence: 4.0,
            doc_target: 0.90,
            fix_target: 0.70,
            test_target: 0.30,
            alpha: 3.0,
            beta: 2.0,
            fix_ratio_bonus_enabled: true,
            fix_ratio_bonus_threshold: 0.90,
            fix_ratio_bonus_max: 10.0,
            investigating_discount: 0.5,
        }
    }
}

impl FormulaConfig {
    pub fn validate(&self) -> Result<(), ConfGateError> {
        if self.k <= 0.0 {
            return Err(ConfGateError::ConfigParse(
                "confidence_formula.K must be greater than 0".to_string(),
            ));
        }

        for (name, rate) in [
            ("p0_k", self.p0_k),
            ("p1_k", self.p1_k),
            ("p2_k", self.p2_k),
            ("p3_k", self.p3_k),
        ] {
            if rate <= 0.0 {
                return Err(ConfGateError::ConfigParse(format!(
                    "severity_weights.{name} must be greater than 0"
                )));
            }
        }

        for (name, value) in [
            ("severity_weights.p0_max", self.p0_max),
            ("severity_weights.p1_max", self.p1_max),
            ("severity_weights.p2_max", self.p2_max),
            ("severity_weights.p3_max", self.p3_max),
            ("penalty_caps.severity", self.cap_severity),
            ("penalty_caps.doc_coverage", self.cap_doc),
            ("penalty_caps.staleness", self.cap_staleness),
            ("penalty_caps.tier_a", self.cap_tier_a),
            ("penalty_caps.test_coverage", self.cap_test),
            ("penalty_caps.resolution", self.cap_resolution),
            ("penalty_caps.hotspot", self.cap_hotspot),
            ("penalty_caps.recurrence", self.cap_recurrence),
            ("fix_ratio_bonus.max_bonus", self.fix_ratio_bonus_max),
        ] {
            if value < 0.0 {
                return Err(ConfGateError::ConfigParse(format!(
                    "{name} must not be negative"
                )));
            }
        }

        for (name, target) in [
            ("thresholds.doc_coverage_target", self.doc_target),
            ("thresholds.fix_rate_target", self.fix_target),
            ("thresholds.test_coverage_target", self.test_target),
            (
                "fix_ratio_bonus.threshold",
                self.fix_ratio_bonus_threshold,
            ),
        ] {
            if !(0.0..=1.0).contains(&target) {
                return Err(ConfGateError::ConfigParse(format!(
                    "{name} must be between 0.0 and 1.0"
                )));
            }
        }

        if self.alpha < 0.0 || self.beta < 0.0 {
            return Err(ConfGateError::ConfigParse(
                "bayesian_priors.alpha and beta must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// Top-level shape of the optional formula document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormulaDocument {
    pub confidence_formula: Option<FormulaOverlay>,
}

/// Per-field overrides for the formula defaults. Every field is optional so
/// a document can adjust one constant without restating its section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormulaOverlay {
    #[serde(rename = "K")]
    pub k: Option<f64>,
    pub severity_weights: Option<SeverityWeightsOverlay>,
    pub penalty_caps: Option<PenaltyCapsOverlay>,
    pub thresholds: Option<ThresholdsOverlay>,
    pub bayesian_priors: Option<BayesianPriorsOverlay>,
    pub fix_ratio_bonus: Option<FixRatioBonusOverlay>,
    pub investigating_discount: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeverityWeightsOverlay {
    pub p0_max: Option<f64>,
    pub p0_k: Option<f64>,
    pub p1_max: Option<f64>,
    pub p1_k: Option<f64>,
    pub p2_max: Option<f64>,
    pub p2_k: Option<f64>,
    pub p3_max: Option<f64>,
    pub p3_k: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PenaltyCapsOverlay {
    pub severity: Option<f64>,
    pub doc_coverage: Option<f64>,
    pub staleness: Option<f64>,
    pub tier_a: Option<f64>,
    pub test_coverage: Option<f64>,
    pub resolution: Option<f64>,
    pub hotspot: Option<f64>,
    pub recurrence: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThresholdsOverlay {
    pub doc_coverage_target: Option<f64>,
    pub fix_rate_target: Option<f64>,
    pub test_coverage_target: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BayesianPriorsOverlay {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixRatioBonusOverlay {
    pub enabled: Option<bool>,
    pub threshold: Option<f64>,
    pub max_bonus: Option<f64>,
}

impl FormulaOverlay {
    pub fn apply(&self, base: &mut FormulaConfig) {
        if let Some(k) = self.k {
            base.k = k;
        }
        if let Some(weights) = &self.severity_weights {
            set_if_some(&mut base.p0_max, weights.p0_max);
            set_if_some(&mut base.p0_k, weights.p0_k);
            set_if_some(&mut base.p1_max, weights.p1_max);
            set_if_some(&mut base.p1_k, weights.p1_k);
            set_if_some(&mut base.p2_max, weights.p2_max);
            set_if_some(&mut base.p2_k, weights.p2_k);
            set_if_some(&mut base.p3_max, weights.p3_max);
            set_if_some(&mut base.p3_k, weights.p3_k);
        }
        if let Some(caps) = &self.penalty_caps {
            set_if_some(&mut base.cap_severity, caps.severity);
            set_if_some(&mut base.cap_doc, caps.doc_coverage);
            set_if_some(&mut base.cap_staleness, caps.staleness);
            set_if_some(&mut base.cap_tier_a, caps.tier_a);
            set_if_some(&mut base.cap_test, caps.test_coverage);
            set_if_some(&mut base.cap_resolution, caps.resolution);
            set_if_some(&mut base.cap_hotspot, caps.hotspot);
            set_if_some(&mut base.cap_recurrence, caps.recurrence);
        }
        if let Some(thresholds) = &self.thresholds {
            set_if_some(&mut base.doc_target, thresholds.doc_coverage_target);
            set_if_some(&mut base.fix_target, thresholds.fix_rate_target);
            set_if_some(&mut base.test_target, thresholds.test_coverage_target);
        }
        if let Some(priors) = &self.bayesian_priors {
            set_if_some(&mut base.alpha, priors.alpha);
            set_if_some(&mut base.beta, priors.beta);
        }
        if let Some(bonus) = &self.fix_ratio_bonus {
            if let Some(enabled) = bonus.enabled {
                base.fix_ratio_bonus_enabled = enabled;
            }
            set_if_some(&mut base.fix_ratio_bonus_threshold, bonus.threshold);
            set_if_some(&mut base.fix_ratio_bonus_max, bonus.max_bonus);
        }
        if let Some(discount) = self.investigating_discount {
            base.investigating_discount = discount;
        }
    }
}

fn set_if_some(slot: &mut f64, value: Option<f64>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Optional project-level config (`confgate.toml`) describing where the
/// scanner finds code, tests, and the tracked documents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    pub code: Option<CodeConfig>,
    pub docs: Option<DocsConfig>,
    pub history: Option<HistoryConfig>,
    pub formula_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeConfig {
    pub root: Option<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocsConfig {
    pub bug_tracker: Option<String>,
    pub code_doc_map: Option<String>,
    /// Tier-A documents: stricter staleness, mandatory mapping.
    #[serde(default)]
    pub tier_a: Vec<String>,
    /// Additional tier-B documents included in staleness tracking.
    #[serde(default)]
    pub tracked: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryConfig {
    pub file: Option<String>,
}

impl ProjectConfig {
    pub fn code_root(&self) -> &str {
        self.code
            .as_ref()
            .and_then(|code| code.root.as_deref())
            .unwrap_or("src")
    }

    pub fn code_extensions(&self) -> Vec<String> {
        let configured = self
            .code
            .as_ref()
            .map(|code| code.extensions.clone())
            .unwrap_or_default();
        if configured.is_empty() {
            vec!["rs".to_string()]
        } else {
            configured
        }
    }

    pub fn bug_tracker(&self) -> &str {
        self.docs
            .as_ref()
            .and_then(|docs| docs.bug_tracker.as_deref())
            .unwrap_or("BUG_TRACKER.md")
    }

    pub fn code_doc_map(&self) -> &str {
        self.docs
            .as_ref()
            .and_then(|docs| docs.code_doc_map.as_deref())
            .unwrap_or("docs/CODE_DOC_MAP.md")
    }

    pub fn tier_a_docs(&self) -> Vec<String> {
        let configured = self
            .docs
            .as_ref()
            .map(|docs| docs.tier_a.clone())
            .unwrap_or_default();
        if configured.is_empty() {
            vec![
                "docs/INVARIANTS.md".to_string(),
                "docs/CODE_DOC_MAP.md".to_string(),
            ]
        } else {
            configured
        }
    }

    pub fn tracked_docs(&self) -> Vec<String> {
        let configured = self
            .docs
            .as_ref()
            .map(|docs| docs.tracked.clone())
            .unwrap_or_default();
        if configured.is_empty() {
            vec![
                "BUG_PATTERNS.md".to_string(),
                "docs/GOLDEN_PATHS.md".to_string(),
                "docs/DECISIONS.md".to_string(),
                "CHANGELOG.md".to_string(),
            ]
        } else {
            configured
        }
    }

    pub fn history_file(&self) -> &str {
        self.history
            .as_ref()
            .and_then(|history| history.file.as_deref())
            .unwrap_or(".confgate/history.json")
    }
}
