//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose list/create/toggle/edit/delete to Dart via FRB.
//! - Run each call as read-through, mutate, write-back against the store.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Enum parameters travel as display labels; unknown labels fall back to
//!   defaults.
//! - One store cycle runs at a time per process.

use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use todo_core::db::open_db;
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Category, CategoryFilter, KvTodoRepository, MutationOutcome, Priority, ServiceResult,
    SortMode, SqliteKeyValueStore, Todo, TodoService, ViewState,
};

const STORE_DB_FILE_NAME: &str = "todo_store.sqlite3";
const STORE_DB_PATH_ENV: &str = "TODO_DB_PATH";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of a rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub done: bool,
    /// `Work|Personal|Other`.
    pub category: String,
    /// `Low|Medium|High`.
    pub priority: String,
}

/// Rendered list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    pub ok: bool,
    /// Rows in display order.
    pub items: Vec<TodoItem>,
    /// Effective filter label after fallback.
    pub filter: String,
    /// Sort label actually applied: `Priority` under a category filter.
    pub sort_mode: String,
    /// Whether the UI should offer the sort toggle.
    pub sort_selector_visible: bool,
    /// Placeholder text when `items` is empty.
    pub empty_message: Option<String>,
    /// Human-readable diagnostics.
    pub message: String,
}

/// Mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// `false` only on storage faults.
    pub ok: bool,
    /// `applied|rejected|not_found|error`.
    pub outcome: String,
    /// Affected todo id when applied.
    pub todo_id: Option<String>,
    pub message: String,
}

impl TodoActionResponse {
    fn from_outcome(outcome: MutationOutcome, applied_message: &str) -> Self {
        match outcome {
            MutationOutcome::Applied { id } => Self {
                ok: true,
                outcome: "applied".to_string(),
                todo_id: Some(id),
                message: applied_message.to_string(),
            },
            MutationOutcome::Rejected(reason) => Self {
                ok: true,
                outcome: "rejected".to_string(),
                todo_id: None,
                message: format!("Ignored: {reason}."),
            },
            MutationOutcome::NotFound(id) => Self {
                ok: true,
                outcome: "not_found".to_string(),
                todo_id: None,
                message: format!("No todo with id {id}."),
            },
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            outcome: "error".to_string(),
            todo_id: None,
            message: message.into(),
        }
    }
}

/// Loads the list and returns the filtered/sorted rows.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `filter`: `All|Work|Personal|Other`, default `All`.
/// - `sort_mode`: `Priority|Date`, default `Priority`; ignored unless `All`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list(filter: String, sort_mode: String) -> TodoListResponse {
    let state = ViewState::new(parse_filter(&filter), parse_sort_mode(&sort_mode));
    let result = with_todo_service(|service| {
        let view = service.view(state);
        let items: Vec<TodoItem> = view.items.iter().copied().map(to_item).collect();
        Ok((items, view.empty_message()))
    });

    let mut response = TodoListResponse {
        ok: true,
        items: Vec::new(),
        filter: state.filter.to_string(),
        sort_mode: state.effective_sort().to_string(),
        sort_selector_visible: state.sort_selector_visible(),
        empty_message: None,
        message: String::new(),
    };
    match result {
        Ok((items, empty_message)) => {
            response.message = format!("Loaded {} todo(s).", items.len());
            response.items = items;
            response.empty_message = empty_message.map(str::to_string);
        }
        Err(err) => {
            response.ok = false;
            response.message = format!("todo_list failed: {err}");
        }
    }
    response
}

/// Creates a todo. Blank titles are rejected without touching the store.
///
/// Unknown `category` falls back to `Work`, unknown `priority` to `Low`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_create(title: String, category: String, priority: String) -> TodoActionResponse {
    let category = parse_category(&category);
    let priority = parse_priority(&priority);
    match with_todo_service(|service| service.create(title, category, priority)) {
        Ok(outcome) => TodoActionResponse::from_outcome(outcome, "Todo created."),
        Err(err) => TodoActionResponse::failure(format!("todo_create failed: {err}")),
    }
}

/// Flips the done flag of one todo.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(id: String) -> TodoActionResponse {
    match with_todo_service(|service| service.toggle_done(&id)) {
        Ok(outcome) => TodoActionResponse::from_outcome(outcome, "Todo toggled."),
        Err(err) => TodoActionResponse::failure(format!("todo_toggle failed: {err}")),
    }
}

/// Replaces a todo title. The caller has already collected the new text.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_edit_title(id: String, title: String) -> TodoActionResponse {
    match with_todo_service(|service| service.edit_title(&id, title)) {
        Ok(outcome) => TodoActionResponse::from_outcome(outcome, "Todo updated."),
        Err(err) => TodoActionResponse::failure(format!("todo_edit_title failed: {err}")),
    }
}

/// Deletes a todo. The caller has already confirmed with the user.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(id: String) -> TodoActionResponse {
    match with_todo_service(|service| service.delete(&id)) {
        Ok(outcome) => TodoActionResponse::from_outcome(outcome, "Todo deleted."),
        Err(err) => TodoActionResponse::failure(format!("todo_delete failed: {err}")),
    }
}

fn parse_filter(value: &str) -> CategoryFilter {
    CategoryFilter::parse(value.trim()).unwrap_or_else(|| {
        warn!("event=ffi_parse module=ffi status=fallback field=filter");
        CategoryFilter::default()
    })
}

fn parse_sort_mode(value: &str) -> SortMode {
    SortMode::parse(value.trim()).unwrap_or_else(|| {
        warn!("event=ffi_parse module=ffi status=fallback field=sort_mode");
        SortMode::default()
    })
}

fn parse_category(value: &str) -> Category {
    Category::parse(value.trim()).unwrap_or_else(|| {
        warn!("event=ffi_parse module=ffi status=fallback field=category");
        Category::default()
    })
}

fn parse_priority(value: &str) -> Priority {
    Priority::parse(value.trim()).unwrap_or_else(|| {
        warn!("event=ffi_parse module=ffi status=fallback field=priority");
        Priority::default()
    })
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(STORE_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

type StoreService<'conn> = TodoService<KvTodoRepository<SqliteKeyValueStore<'conn>>>;

fn with_todo_service<T>(
    f: impl FnOnce(&mut StoreService<'_>) -> ServiceResult<T>,
) -> Result<T, String> {
    let _guard = STORE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let conn = open_db(resolve_store_db_path()).map_err(|err| format!("store open failed: {err}"))?;
    let store =
        SqliteKeyValueStore::try_new(&conn).map_err(|err| format!("store init failed: {err}"))?;
    let mut service = TodoService::open(KvTodoRepository::new(store))
        .map_err(|err| format!("todo load failed: {err}"))?;
    f(&mut service).map_err(|err| err.to_string())
}

fn to_item(todo: &Todo) -> TodoItem {
    TodoItem {
        id: todo.id.clone(),
        title: todo.title.clone(),
        done: todo.done,
        category: todo.category.to_string(),
        priority: todo.priority.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, todo_create, todo_delete, todo_edit_title, todo_list,
        todo_toggle, TodoItem,
    };
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    static TEST_STORE_DIR: OnceLock<TempDir> = OnceLock::new();

    // The store path is resolved once per process, so every test points
    // `TODO_DB_PATH` at the same throwaway directory before its first call.
    fn use_test_store() {
        let dir = TEST_STORE_DIR.get_or_init(|| TempDir::new().expect("create test store dir"));
        std::env::set_var(super::STORE_DB_PATH_ENV, dir.path().join("todo_store.sqlite3"));
        assert_eq!(
            super::resolve_store_db_path(),
            dir.path().join("todo_store.sqlite3")
        );
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn create_then_list_returns_the_new_row() {
        use_test_store();
        let title = unique_token("ffi-create");
        let created = todo_create(title.clone(), "Personal".to_string(), "High".to_string());
        assert!(created.ok, "{}", created.message);
        assert_eq!(created.outcome, "applied");
        let id = created.todo_id.expect("applied create returns id");

        let row = find_row("Personal", &id).expect("created row is listed");
        assert_eq!(row.title, title);
        assert!(!row.done);
        assert_eq!(row.category, "Personal");
        assert_eq!(row.priority, "High");
    }

    #[test]
    fn create_with_blank_title_is_rejected() {
        use_test_store();
        let response = todo_create("   ".to_string(), "Work".to_string(), "Low".to_string());
        assert!(response.ok);
        assert_eq!(response.outcome, "rejected");
        assert!(response.todo_id.is_none());
    }

    #[test]
    fn create_falls_back_to_default_labels() {
        use_test_store();
        let created = todo_create(
            unique_token("ffi-default"),
            "Errands".to_string(),
            "Urgent".to_string(),
        );
        let id = created.todo_id.expect("applied create returns id");

        let row = find_row("All", &id).expect("created row is listed");
        assert_eq!(row.category, "Work");
        assert_eq!(row.priority, "Low");
    }

    #[test]
    fn toggle_edit_delete_roundtrip() {
        use_test_store();
        let created = todo_create(
            unique_token("ffi-cycle"),
            "Other".to_string(),
            "Medium".to_string(),
        );
        let id = created.todo_id.expect("applied create returns id");

        assert_eq!(todo_toggle(id.clone()).outcome, "applied");
        assert!(find_row("Other", &id).unwrap().done);

        assert_eq!(todo_edit_title(id.clone(), String::new()).outcome, "rejected");
        assert_eq!(todo_edit_title(id.clone(), "renamed".to_string()).outcome, "applied");
        assert_eq!(find_row("Other", &id).unwrap().title, "renamed");

        assert_eq!(todo_delete(id.clone()).outcome, "applied");
        assert!(find_row("All", &id).is_none());
        assert_eq!(todo_delete(id).outcome, "not_found");
    }

    #[test]
    fn category_list_hides_sort_selector_and_reports_effective_labels() {
        use_test_store();
        let response = todo_list("Work".to_string(), "Date".to_string());
        assert!(response.ok, "{}", response.message);
        assert!(!response.sort_selector_visible);
        assert_eq!(response.filter, "Work");
        assert_eq!(response.sort_mode, "Priority");
        assert!(response.items.iter().all(|item| item.category == "Work"));

        let response = todo_list("bogus".to_string(), "bogus".to_string());
        assert_eq!(response.filter, "All");
        assert_eq!(response.sort_mode, "Priority");
        assert!(response.sort_selector_visible);

        let response = todo_list("All".to_string(), "Date".to_string());
        assert_eq!(response.sort_mode, "Date");
    }

    fn find_row(filter: &str, id: &str) -> Option<TodoItem> {
        let response = todo_list(filter.to_string(), "Priority".to_string());
        assert!(response.ok, "{}", response.message);
        response.items.into_iter().find(|item| item.id == id)
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
