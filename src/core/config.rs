/*!
 * Drive Configuration
 * Auxiliary behaviour switches loaded from code or the environment
 */

use serde::{Deserialize, Serialize};

/// Environment variable enabling verbose operation traces
pub const ENV_VERBOSE: &str = "DRIVE_VERBOSE";
/// Environment variable with a comma separated list of hidden entry names
pub const ENV_HIDDEN: &str = "DRIVE_HIDDEN";

/// Drive-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Trace every operation and its parameters at `info` level
    pub verbose: bool,
    /// Entry names never returned by listings (e.g. `.DS_Store`, `.git`)
    pub hidden: Vec<String>,
}

impl DriveConfig {
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn hide(mut self, name: impl Into<String>) -> Self {
        self.hidden.push(name.into());
        self
    }

    /// Load configuration from `DRIVE_VERBOSE` and `DRIVE_HIDDEN`
    pub fn from_env() -> Self {
        let verbose = std::env::var(ENV_VERBOSE)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let hidden = std::env::var(ENV_HIDDEN)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self { verbose, hidden }
    }
}

/// Per-operation options for mutating calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperationConfig {
    /// Rename the target with a `(N)` suffix instead of overwriting
    pub prevent_name_collision: bool,
}

impl OperationConfig {
    pub fn prevent_collision() -> Self {
        Self {
            prevent_name_collision: true,
        }
    }
}
