//! Discovery of searchable log files.

/// Resolves configured glob patterns into the whitelist of log files.
///
/// Patterns are expanded on every call so rotated files show up without a
/// restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogCatalog {
    patterns: Vec<String>,
}

impl LogCatalog {
    #[must_use]
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Expand all patterns, deduplicated in first-seen order.
    #[must_use]
    pub fn files(&self) -> Vec<String> {
        let mut files: Vec<String> = Vec::new();

        for pattern in &self.patterns {
            let paths = match glob::glob(pattern) {
                Ok(paths) => paths,
                Err(e) => {
                    tracing::warn!(pattern, error = %e, "Invalid log file pattern");
                    continue;
                }
            };

            for entry in paths {
                match entry {
                    Ok(path) => {
                        let path = path.display().to_string();
                        if !files.contains(&path) {
                            files.push(path);
                        }
                    }
                    Err(e) => tracing::warn!(pattern, error = %e, "Skipping unreadable path"),
                }
            }
        }

        files
    }

    /// Whether `file` is currently searchable.
    #[must_use]
    pub fn contains(&self, file: &str) -> bool {
        self.files().iter().any(|f| f == file)
    }
}
