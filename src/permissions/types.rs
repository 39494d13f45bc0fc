/*!
 * Permission Types
 * Operation kinds checked by every policy
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of access an operation needs on a host path
///
/// `Write` covers create, modify, delete and being the target of a rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Read,
    Write,
}

impl Operation {
    #[inline]
    pub const fn is_read(self) -> bool {
        matches!(self, Operation::Read)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Read => write!(f, "read"),
            Operation::Write => write!(f, "write"),
        }
    }
}
