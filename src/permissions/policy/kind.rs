/*!
 * Policy Kinds
 * Named policies selectable from configuration
 */

use super::engine::{AllowPolicy, DenyPolicy, Policy, ReadOnlyPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Caller-selectable base policy
///
/// The root restriction is never part of this choice, the drive adds it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Allow,
    ReadOnly,
    Deny,
}

impl PolicyKind {
    pub fn into_policy(self) -> Arc<dyn Policy> {
        match self {
            PolicyKind::Allow => Arc::new(AllowPolicy),
            PolicyKind::ReadOnly => Arc::new(ReadOnlyPolicy),
            PolicyKind::Deny => Arc::new(DenyPolicy),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" | "" => Ok(PolicyKind::Allow),
            "readonly" | "read_only" | "read-only" => Ok(PolicyKind::ReadOnly),
            "deny" => Ok(PolicyKind::Deny),
            other => Err(format!("unknown policy: {}", other)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Allow => write!(f, "allow"),
            PolicyKind::ReadOnly => write!(f, "readonly"),
            PolicyKind::Deny => write!(f, "deny"),
        }
    }
}
