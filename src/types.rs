/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Record operations supported throughout the system
/// Used by both the observer pipeline and the HTTP handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Select,
}

impl Operation {
    /// Whether this operation writes to the record set
    pub fn is_write(&self) -> bool {
        !matches!(self, Operation::Select)
    }
}
