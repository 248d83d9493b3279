//! Core use-case services.
//!
//! # Responsibility
//! - Hold the in-memory todo list and apply user mutations to it.
//! - Compute presentation views without touching storage details.

pub mod id_gen;
pub mod todo_service;
pub mod view;
