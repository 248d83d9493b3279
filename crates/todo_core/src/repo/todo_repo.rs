//! Todo collection persistence adapter.
//!
//! # Responsibility
//! - Load and save the whole todo collection as one JSON blob.
//! - Surface storage and decoding faults; treat a missing blob as empty.
//!
//! # Invariants
//! - The collection lives under the single key `TODOS`.
//! - Saves replace the stored blob wholesale; there is no partial write.
//! - Loaded records must pass `Todo::validate()`.

use crate::db::DbError;
use crate::model::todo::Todo;
use crate::repo::kv_store::KeyValueStore;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Store key holding the serialized collection.
pub const TODOS_STORAGE_KEY: &str = "TODOS";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure for the todo collection.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "todo collection encoding failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Whole-collection load/save contract.
pub trait TodoRepository {
    /// Returns the saved collection, or an empty one when nothing was saved.
    fn load_todos(&self) -> RepoResult<Vec<Todo>>;
    /// Replaces the saved collection with `todos`.
    fn save_todos(&self, todos: &[Todo]) -> RepoResult<()>;
}

/// `TodoRepository` over any `KeyValueStore`.
pub struct KvTodoRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvTodoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> TodoRepository for KvTodoRepository<S> {
    fn load_todos(&self) -> RepoResult<Vec<Todo>> {
        let started_at = Instant::now();
        let todos = match self.store.get_item(TODOS_STORAGE_KEY) {
            Ok(Some(blob)) => decode_todos(&blob),
            Ok(None) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        };

        match &todos {
            Ok(todos) => info!(
                "event=todos_load module=repo status=ok count={} duration_ms={}",
                todos.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=todos_load module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        todos
    }

    fn save_todos(&self, todos: &[Todo]) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = serde_json::to_string(todos)
            .map_err(RepoError::from)
            .and_then(|blob| {
                self.store
                    .set_item(TODOS_STORAGE_KEY, &blob)
                    .map_err(RepoError::from)
            });

        match &result {
            Ok(()) => info!(
                "event=todos_save module=repo status=ok count={} duration_ms={}",
                todos.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=todos_save module=repo status=error count={} duration_ms={} error={}",
                todos.len(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn decode_todos(blob: &str) -> RepoResult<Vec<Todo>> {
    let todos: Vec<Todo> = serde_json::from_str(blob)?;
    for (index, todo) in todos.iter().enumerate() {
        todo.validate()
            .map_err(|err| RepoError::InvalidData(format!("record {index}: {err}")))?;
    }
    Ok(todos)
}
