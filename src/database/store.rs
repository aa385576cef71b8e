use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::student::{NewStudent, Student};

/// Persistence seam for the Student record set.
///
/// Handlers and pipeline observers only talk to this trait, so the same
/// request flow runs against PostgreSQL in deployment and against
/// [`MemoryStore`](crate::database::memory::MemoryStore) in tests.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Records ordered by id
    async fn list(&self, limit: Option<i64>, offset: Option<i64>) -> Result<Vec<Student>, DatabaseError>;

    async fn get(&self, id: i64) -> Result<Option<Student>, DatabaseError>;

    /// Insert and return the stored row with its generated id
    async fn insert(&self, new: NewStudent) -> Result<Student, DatabaseError>;

    /// Replace the stored row with the same id. `NotFound` if it is gone.
    async fn update(&self, student: &Student) -> Result<Student, DatabaseError>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Backend label for logs and the health endpoint
    fn backend(&self) -> &'static str;
}
