use async_trait::async_trait;
use std::time::Duration;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
pub use crate::types::Operation;

/// Observer rings with semantic meaning, executed in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ObserverRing {
    DataPreparation = 0, // Load the existing record, reject unsupported saves
    InputValidation = 1, // Field coercion, field options, validate_<field>
    Business = 3,        // Object-level validate
    Database = 5,        // Store writes
    PostDatabase = 6,    // Change logging
}

impl ObserverRing {
    /// Rings that run before any write. Errors here leave the store untouched.
    pub fn is_pre_database(&self) -> bool {
        (*self as u8) < (ObserverRing::Database as u8)
    }

    /// Get all rings for an operation type. Reads bypass the pipeline.
    pub fn for_operation(operation: &Operation) -> Vec<Self> {
        use ObserverRing::*;

        match operation {
            Operation::Select => vec![],
            Operation::Delete => vec![DataPreparation, Database, PostDatabase],
            Operation::Create | Operation::Update => {
                vec![DataPreparation, InputValidation, Business, Database, PostDatabase]
            }
        }
    }
}

/// A single step of the write pipeline
#[async_trait]
pub trait Observer: Send + Sync {
    /// Observer name for logging and debugging
    fn name(&self) -> &'static str;

    /// Which ring this observer belongs to
    fn ring(&self) -> ObserverRing;

    /// Check if observer applies to this operation
    fn applies_to_operation(&self, op: Operation) -> bool;

    /// Execution timeout (default 5 seconds)
    fn timeout(&self) -> Duration {
        Duration::from_secs(5)
    }

    /// Priority within ring (lower numbers execute first)
    fn priority(&self) -> u8 {
        50
    }

    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError>;
}
