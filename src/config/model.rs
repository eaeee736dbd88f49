//! Configuration struct and defaults.

use serde::{Deserialize, Serialize};

use crate::classify::MatchPolicy;
use crate::output::OutputFormat;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".lintdelta.yml";

/// Tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Linter command template. `{file}` is replaced with the path to lint;
    /// without a placeholder the path is appended as the last argument.
    /// Required for `check` (here or via `--linter`).
    pub linter: Option<String>,

    /// Base revision new content is compared against.
    pub base: String,

    /// Worker threads for per-file classification.
    pub jobs: u32,

    /// Default report format.
    pub format: OutputFormat,

    /// How messages are matched across revisions.
    pub match_policy: MatchPolicy,

    /// Path globs excluded from checking (forward slashes).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_paths: Vec<String>,

    /// Regexes over rule codes; matching messages are suppressed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_rules: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            linter: None,
            base: default_base(),
            jobs: default_jobs(),
            format: OutputFormat::default(),
            match_policy: MatchPolicy::default(),
            ignore_paths: Vec::new(),
            ignore_rules: Vec::new(),
        }
    }
}

pub(crate) fn default_base() -> String {
    "HEAD".to_string()
}

pub(crate) fn default_jobs() -> u32 {
    4
}
