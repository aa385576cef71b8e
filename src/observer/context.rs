use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::database::models::student::Student;
use crate::database::store::StudentStore;
use crate::observer::error::ObserverError;
use crate::observer::traits::{ObserverRing, Operation};
use crate::serializers::{Serializer, ValidatedData};

/// The data structure that flows through the observer pipeline
pub struct ObserverContext {
    // Core request data
    pub operation: Operation,
    pub partial: bool,
    pub serializer: Arc<dyn Serializer>,
    pub store: Arc<dyn StudentStore>,
    pub target_id: Option<i64>,
    pub payload: Value,

    // Loaded by Ring 0 for update/delete
    pub existing: Option<Student>,

    // Cleaned input (Rings 1 and 3)
    pub validated: Option<ValidatedData>,

    // Results after store writes (Ring 5)
    pub result: Option<Student>,
    pub deleted: bool,

    // Performance tracking
    pub start_time: Instant,
    pub current_ring: Option<ObserverRing>,

    pub errors: Vec<ObserverError>,
}

impl ObserverContext {
    fn new(
        operation: Operation,
        serializer: Arc<dyn Serializer>,
        store: Arc<dyn StudentStore>,
        target_id: Option<i64>,
        payload: Value,
        partial: bool,
    ) -> Self {
        Self {
            operation,
            partial,
            serializer,
            store,
            target_id,
            payload,
            existing: None,
            validated: None,
            result: None,
            deleted: false,
            start_time: Instant::now(),
            current_ring: None,
            errors: Vec::new(),
        }
    }

    pub fn create(serializer: Arc<dyn Serializer>, store: Arc<dyn StudentStore>, payload: Value) -> Self {
        Self::new(Operation::Create, serializer, store, None, payload, false)
    }

    /// Full (`partial == false`) or partial update of record `id`
    pub fn update(
        serializer: Arc<dyn Serializer>,
        store: Arc<dyn StudentStore>,
        id: i64,
        payload: Value,
        partial: bool,
    ) -> Self {
        Self::new(Operation::Update, serializer, store, Some(id), payload, partial)
    }

    pub fn delete(serializer: Arc<dyn Serializer>, store: Arc<dyn StudentStore>, id: i64) -> Self {
        Self::new(Operation::Delete, serializer, store, Some(id), Value::Null, false)
    }

    /// Add error to context
    pub fn add_error(&mut self, error: ObserverError) {
        self.errors.push(error);
    }

    /// Check if context has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get total execution time
    pub fn execution_time(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

impl std::fmt::Debug for ObserverContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverContext")
            .field("operation", &self.operation)
            .field("partial", &self.partial)
            .field("serializer", &self.serializer.name())
            .field("store", &self.store.backend())
            .field("target_id", &self.target_id)
            .field("existing", &self.existing)
            .field("validated", &self.validated)
            .field("result", &self.result)
            .field("deleted", &self.deleted)
            .field("current_ring", &self.current_ring)
            .field("errors", &self.errors)
            .finish()
    }
}
