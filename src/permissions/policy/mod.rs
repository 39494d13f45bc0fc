/*!
 * Policy Module
 * Built-in policies and their composition
 */

mod engine;
mod kind;

pub use engine::{AllowPolicy, CombinedPolicy, DenyPolicy, ForceRootPolicy, Policy, ReadOnlyPolicy};
pub use kind::PolicyKind;
