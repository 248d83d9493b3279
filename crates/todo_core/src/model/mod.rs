//! Domain model for the todo list.
//!
//! # Responsibility
//! - Define the canonical todo record and its closed enumerations.
//! - Keep the wire shape compatible with blobs already in the store.
//!
//! # Invariants
//! - `id` is unique within one collection.
//! - Only `Work | Personal | Other` are stored as categories; `All` exists
//!   only in view state.

pub mod todo;
