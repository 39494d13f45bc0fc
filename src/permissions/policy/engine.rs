/*!
 * Policy Engine
 * Evaluates (path, operation) pairs against composable policies
 */

use crate::permissions::types::Operation;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Policy that decides whether an operation on a host path is allowed
///
/// Implementations must be pure: same input, same answer, no side effects.
pub trait Policy: Send + Sync + fmt::Debug {
    /// Evaluate an operation on an absolute host path
    fn comply(&self, path: &Path, operation: Operation) -> bool;

    /// Policy name
    fn name(&self) -> &str;
}

/// Allows everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowPolicy;

impl Policy for AllowPolicy {
    fn comply(&self, _path: &Path, _operation: Operation) -> bool {
        true
    }

    fn name(&self) -> &str {
        "allow"
    }
}

/// Denies everything
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyPolicy;

impl Policy for DenyPolicy {
    fn comply(&self, _path: &Path, _operation: Operation) -> bool {
        false
    }

    fn name(&self) -> &str {
        "deny"
    }
}

/// Allows reads only
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnlyPolicy;

impl Policy for ReadOnlyPolicy {
    fn comply(&self, _path: &Path, operation: Operation) -> bool {
        operation.is_read()
    }

    fn name(&self) -> &str {
        "readonly"
    }
}

/// Allows paths equal to the root or below it
///
/// The comparison is component-wise, so `/data-other` is not under `/data`.
/// Paths that still carry `..` components are rejected outright.
#[derive(Debug, Clone)]
pub struct ForceRootPolicy {
    root: PathBuf,
}

impl ForceRootPolicy {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Policy for ForceRootPolicy {
    fn comply(&self, path: &Path, _operation: Operation) -> bool {
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return false;
        }
        path.starts_with(&self.root)
    }

    fn name(&self) -> &str {
        "force_root"
    }
}

/// Logical AND of an ordered chain of policies
///
/// Evaluation stops at the first member that denies.
#[derive(Debug, Clone, Default)]
pub struct CombinedPolicy {
    policies: Vec<Arc<dyn Policy>>,
}

impl CombinedPolicy {
    pub fn new(policies: Vec<Arc<dyn Policy>>) -> Self {
        Self { policies }
    }

    /// Build a new chain with `policy` appended; `self` is left untouched
    pub fn and(&self, policy: Arc<dyn Policy>) -> Self {
        let mut policies = self.policies.clone();
        policies.push(policy);
        Self { policies }
    }

    pub fn policies(&self) -> &[Arc<dyn Policy>] {
        &self.policies
    }

    /// Name of the first policy in the chain that would deny, if any
    pub fn denied_by(&self, path: &Path, operation: Operation) -> Option<&str> {
        self.policies
            .iter()
            .find(|p| !p.comply(path, operation))
            .map(|p| p.name())
    }
}

impl Policy for CombinedPolicy {
    fn comply(&self, path: &Path, operation: Operation) -> bool {
        self.policies.iter().all(|p| p.comply(path, operation))
    }

    fn name(&self) -> &str {
        "combined"
    }
}
