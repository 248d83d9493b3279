//! Persistence boundary.
//!
//! # Responsibility
//! - Define the key-value store contract the core needs from the platform.
//! - Persist the todo collection as one serialized value on top of it.
//!
//! # Invariants
//! - Repository APIs return storage/decoding errors; a missing collection is
//!   not an error.

pub mod kv_store;
pub mod todo_repo;
