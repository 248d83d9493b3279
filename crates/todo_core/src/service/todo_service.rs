//! Todo list use-case service.
//!
//! # Responsibility
//! - Own the in-memory collection while a screen is active.
//! - Apply create/toggle/edit/delete and write the whole collection back.
//! - Hand out filtered/sorted views for rendering.
//!
//! # Invariants
//! - Every applied mutation is followed by a full-collection save.
//! - Rejected input and unknown ids are outcomes, not errors, and skip the save.
//! - Storage faults propagate unchanged; the in-memory change is kept.

use crate::model::todo::{Category, Priority, Todo, TodoId};
use crate::repo::todo_repo::{RepoError, TodoRepository};
use crate::service::id_gen::{Clock, IdGenerator};
use crate::service::view::{TodoView, ViewState};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, TodoServiceError>;

/// Service failure. Only storage faults reach callers.
#[derive(Debug)]
pub enum TodoServiceError {
    Storage(RepoError),
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "todo storage fault: {err}"),
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<RepoError> for TodoServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Why a mutation was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Create with a blank title, or edit with an empty one.
    EmptyTitle,
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is empty"),
        }
    }
}

/// Result of a mutation that did not hit a storage fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Change applied and persisted.
    Applied { id: TodoId },
    /// Input rejected; nothing changed.
    Rejected(RejectReason),
    /// No todo carries the id; nothing changed.
    NotFound(TodoId),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// In-memory list engine backed by a `TodoRepository`.
pub struct TodoService<R: TodoRepository> {
    repo: R,
    todos: Vec<Todo>,
    ids: IdGenerator,
}

impl<R: TodoRepository> TodoService<R> {
    /// Loads the saved collection and returns a ready service.
    pub fn open(repo: R) -> ServiceResult<Self> {
        Self::open_with_ids(repo, IdGenerator::default())
    }

    /// Like `open`, with a caller-supplied millisecond clock for ids.
    pub fn open_with_clock(repo: R, clock: Clock) -> ServiceResult<Self> {
        Self::open_with_ids(repo, IdGenerator::new(clock))
    }

    fn open_with_ids(repo: R, ids: IdGenerator) -> ServiceResult<Self> {
        let mut service = Self {
            repo,
            todos: Vec::new(),
            ids,
        };
        service.reload()?;
        Ok(service)
    }

    /// Re-reads the collection from storage, discarding in-memory state.
    pub fn reload(&mut self) -> ServiceResult<()> {
        self.todos = self.repo.load_todos()?;
        self.ids.observe(&self.todos);
        Ok(())
    }

    /// Current collection in insertion order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Filtered and sorted projection for `state`.
    pub fn view(&self, state: ViewState) -> TodoView<'_> {
        TodoView::new(&self.todos, state)
    }

    /// Appends a new not-done todo.
    ///
    /// The title is stored as given; only the emptiness check trims it.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        category: Category,
        priority: Priority,
    ) -> ServiceResult<MutationOutcome> {
        let title = title.into();
        if is_blank_title(&title) {
            debug!("event=todo_create module=service status=rejected reason=empty_title");
            return Ok(MutationOutcome::Rejected(RejectReason::EmptyTitle));
        }

        let id = self.ids.next_id();
        self.todos.push(Todo::new(id.clone(), title, category, priority));
        self.persist("todo_create", &id)?;
        Ok(MutationOutcome::Applied { id })
    }

    /// Flips `done` on every todo carrying `id`.
    pub fn toggle_done(&mut self, id: &str) -> ServiceResult<MutationOutcome> {
        let mut matched = false;
        for todo in self.todos.iter_mut().filter(|todo| todo.id == id) {
            todo.toggle_done();
            matched = true;
        }
        if !matched {
            return Ok(not_found("todo_toggle", id));
        }
        self.persist("todo_toggle", id)?;
        Ok(MutationOutcome::Applied { id: id.to_string() })
    }

    /// Replaces the title of every todo carrying `id`.
    ///
    /// Only the empty string is rejected; the caller owns any trimming.
    pub fn edit_title(
        &mut self,
        id: &str,
        new_title: impl Into<String>,
    ) -> ServiceResult<MutationOutcome> {
        let new_title = new_title.into();
        if new_title.is_empty() {
            debug!("event=todo_edit module=service status=rejected reason=empty_title");
            return Ok(MutationOutcome::Rejected(RejectReason::EmptyTitle));
        }

        let mut matched = false;
        for todo in self.todos.iter_mut().filter(|todo| todo.id == id) {
            todo.title.clone_from(&new_title);
            matched = true;
        }
        if !matched {
            return Ok(not_found("todo_edit", id));
        }
        self.persist("todo_edit", id)?;
        Ok(MutationOutcome::Applied { id: id.to_string() })
    }

    /// Removes every todo carrying `id`. Confirmation is the caller's job.
    pub fn delete(&mut self, id: &str) -> ServiceResult<MutationOutcome> {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        if self.todos.len() == before {
            return Ok(not_found("todo_delete", id));
        }
        self.persist("todo_delete", id)?;
        Ok(MutationOutcome::Applied { id: id.to_string() })
    }

    fn persist(&self, event: &str, id: &str) -> ServiceResult<()> {
        self.repo.save_todos(&self.todos)?;
        info!(
            "event={event} module=service status=ok id={id} count={}",
            self.todos.len()
        );
        Ok(())
    }
}

/// Blank by the JavaScript `trim` whitespace set the mobile form uses:
/// BOM counts as blank, NEL does not.
fn is_blank_title(title: &str) -> bool {
    title
        .chars()
        .all(|c| c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}'))
}

fn not_found(event: &str, id: &str) -> MutationOutcome {
    debug!("event={event} module=service status=not_found id={id}");
    MutationOutcome::NotFound(id.to_string())
}
