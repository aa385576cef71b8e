// handlers/mod.rs
//
// Route handlers, one module per resource:
//   root      → GET /, GET /health
//   students  → /api/students[/:id]
pub mod root;
pub mod students;

pub use root::{health, root};
