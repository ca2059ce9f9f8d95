use crate::scan::filesystem::read_to_string_if_exists;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// Count distinct code files referenced from the code/doc map. A file is
/// "mapped" when the map mentions it as a backticked path with one of the
/// configured code extensions.
pub fn mapped_file_count(code_doc_map: &Path, extensions: &[String]) -> u64 {
    let Some(content) = read_to_string_if_exists(code_doc_map) else {
        return 0;
    };

    let mut mapped = HashSet::new();
    for extension in extensions {
        let Ok(reference) = Regex::new(&format!(
            r"`([^`]+\.{})`",
            regex::escape(extension)
        )) else {
            continue;
        };
        for captures in reference.captures_iter(&content) {
            if let Some(path) = captures.get(1) {
                mapped.insert(path.as_str().to_string());
            }
        }
    }
    mapped.len() as u64
}
