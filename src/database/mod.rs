pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use models::student::{NewStudent, Student};
pub use repository::StudentRepository;
pub use store::StudentStore;
