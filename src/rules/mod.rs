// rules/mod.rs
//
// Platform rule documents: one plain-text policy file per platform,
// looked up by case-folded platform name.

use std::fmt;
use std::path::{Path, PathBuf};

/// Error types for rule document loading
#[derive(Debug)]
pub enum RuleError {
    /// No rule file exists for the platform. Distinct from a read failure:
    /// the audit skips the platform entirely.
    NotFound { platform: String, path: PathBuf },
    /// The rule file exists but holds no content
    EmptyDocument { platform: String },
    /// The rule file could not be read
    Io { platform: String, message: String },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::NotFound { platform, path } => write!(
                f,
                "Rule file for '{}' not found (looked at {})",
                platform,
                path.display()
            ),
            RuleError::EmptyDocument { platform } => {
                write!(f, "Rule file for '{}' is empty", platform)
            }
            RuleError::Io { platform, message } => {
                write!(f, "Error reading rule file for '{}': {}", platform, message)
            }
        }
    }
}

impl std::error::Error for RuleError {}

/// Directory-backed store of per-platform rule documents
#[derive(Debug, Clone)]
pub struct RuleStore {
    dir: PathBuf,
}

impl RuleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a platform's rule file is expected at: `<dir>/<platform_lower>.txt`
    pub fn rule_path(&self, platform: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", platform.to_lowercase()))
    }

    /// Load the rule document for a platform
    pub fn load(&self, platform: &str) -> Result<String, RuleError> {
        let path = self.rule_path(platform);

        if !path.exists() {
            return Err(RuleError::NotFound {
                platform: platform.to_string(),
                path,
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| RuleError::Io {
            platform: platform.to_string(),
            message: e.to_string(),
        })?;

        if content.trim().is_empty() {
            return Err(RuleError::EmptyDocument {
                platform: platform.to_string(),
            });
        }

        Ok(content)
    }
}
