pub mod bugs;
pub mod docs;
pub mod filesystem;
pub mod staleness;

use crate::types::config::ProjectConfig;
use crate::types::metrics::{CodebaseStats, MetricsInput};
use std::path::Path;

/// Collect every metric the engine consumes from a project tree. The
/// previous score is left unset; the caller decides whether to read history.
pub fn discover(root: &Path, config: Option<&ProjectConfig>) -> MetricsInput {
    let defaults = ProjectConfig::default();
    let config = config.unwrap_or(&defaults);

    let extensions = config.code_extensions();
    let code_files =
        filesystem::list_files_with_extensions(&root.join(config.code_root()), &extensions);
    let tests_count = code_files
        .iter()
        .filter(|path| filesystem::is_test_file(path))
        .count() as u64;

    let aggregates = bugs::extract_aggregates(&root.join(config.bug_tracker()));
    let mapped = docs::mapped_file_count(&root.join(config.code_doc_map()), &extensions);
    let staleness = staleness::measure(root, &config.tier_a_docs(), &config.tracked_docs());

    MetricsInput {
        aggregates,
        stats: Some(CodebaseStats {
            mapped,
            scripts: code_files.len() as u64,
            tests_count,
        }),
        fingerprints: None,
        staleness: Some(staleness),
        previous_score: None,
    }
}
