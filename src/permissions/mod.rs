/*!
 * Permissions Module
 * Path and operation policies guarding every drive call
 *
 * A policy is a pure predicate over `(host path, operation)`. Policies are
 * composed once into an immutable chain; the drive always places a
 * `ForceRootPolicy` first so no caller-supplied policy can widen the sandbox.
 *
 * ## Usage
 * ```ignore
 * use local_drive::permissions::{CombinedPolicy, ForceRootPolicy, Operation, Policy, ReadOnlyPolicy};
 * use std::sync::Arc;
 *
 * let policy = CombinedPolicy::new(vec![
 *     Arc::new(ForceRootPolicy::new("/srv/files")),
 *     Arc::new(ReadOnlyPolicy),
 * ]);
 * assert!(policy.comply(Path::new("/srv/files/a.txt"), Operation::Read));
 * assert!(!policy.comply(Path::new("/srv/files/a.txt"), Operation::Write));
 * ```
 */

pub mod policy;
pub mod types;

// Re-export commonly used items
pub use policy::{
    AllowPolicy, CombinedPolicy, DenyPolicy, ForceRootPolicy, Policy, PolicyKind, ReadOnlyPolicy,
};
pub use types::Operation;
