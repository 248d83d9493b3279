//! Core domain logic for the todo list app.
//! This crate owns the list rules and the persisted collection format.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{Category, Priority, Todo, TodoId, TodoValidationError};
pub use repo::kv_store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use repo::todo_repo::{
    KvTodoRepository, RepoError, RepoResult, TodoRepository, TODOS_STORAGE_KEY,
};
pub use service::id_gen::IdGenerator;
pub use service::todo_service::{
    MutationOutcome, RejectReason, ServiceResult, TodoService, TodoServiceError,
};
pub use service::view::{
    compute_view, CategoryFilter, SortMode, TodoView, ViewState, EMPTY_VIEW_MESSAGE,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
