use std::fs;
use std::path::{Path, PathBuf};

/// Which file names count as sequencing summaries in directory mode.
#[derive(Debug, Clone)]
pub struct SummaryFileMatcher {
    prefixes: Vec<&'static str>,
    suffixes: Vec<&'static str>,
}

impl SummaryFileMatcher {
    /// Names starting with `sequencing_summary`.
    pub fn sequencing_summaries() -> Self {
        Self {
            prefixes: vec!["sequencing_summary"],
            suffixes: Vec::new(),
        }
    }

    pub fn with_suffix(mut self, suffix: &'static str) -> Self {
        self.suffixes.push(suffix);
        self
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.prefixes.iter().any(|p| file_name.starts_with(p))
            || self.suffixes.iter().any(|s| file_name.ends_with(s))
    }
}

/// All matching files below `dir`, recursively, sorted by path.
/// Symlinked directories are not followed. Directories or entries that
/// cannot be read are skipped with a warning.
pub fn find_summary_files(dir: &Path, matcher: &SummaryFileMatcher) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = match fs::read_dir(&current) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Cannot list directory {}: {}", current.display(), e);
                continue;
            }
        };

        for entry in entries {
            let (entry, file_type) = match entry.and_then(|e| e.file_type().map(|t| (e, t))) {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("Skipping entry in {}: {}", current.display(), e);
                    continue;
                }
            };
            let path = entry.path();

            if file_type.is_dir() {
                pending.push(path);
            } else if entry
                .file_name()
                .to_str()
                .is_some_and(|name| matcher.matches(name))
            {
                found.push(path);
            }
        }
    }

    found.sort();
    found
}
