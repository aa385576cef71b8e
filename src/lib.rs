pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod observer;
pub mod serializers;
pub mod types;

pub use app::{app, AppState};
