//! Todo domain model.
//!
//! # Responsibility
//! - Define the record persisted for every task in the list.
//! - Provide priority ranking used by view ordering.
//!
//! # Invariants
//! - `id` is a non-empty numeric string of creation epoch milliseconds.
//! - `title` is non-empty. Creation additionally rejects whitespace-only
//!   titles; edits only reject the empty string.
//! - `done` starts as `false`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a todo.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = String;

/// Stored category of a todo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Work,
    Personal,
    Other,
}

impl Category {
    /// Every stored category in picker order.
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Other => "Other",
        }
    }

    /// Parses a display label. Matching is exact, like the stored values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Work" => Some(Self::Work),
            "Personal" => Some(Self::Personal),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Every priority in picker order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Sort rank: `High=3, Medium=2, Low=1`.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for a todo record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyId,
    EmptyTitle,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "todo id must not be empty"),
            Self::EmptyTitle => write!(f, "todo title must not be empty"),
        }
    }
}

impl Error for TodoValidationError {}

/// Canonical todo record.
///
/// Field names are the persisted JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub done: bool,
    pub category: Category,
    pub priority: Priority,
}

impl Todo {
    /// Creates a not-done todo with a caller-provided id.
    pub fn new(
        id: impl Into<TodoId>,
        title: impl Into<String>,
        category: Category,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            done: false,
            category,
            priority,
        }
    }

    /// Checks record invariants.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is empty.
    /// - `EmptyTitle` when `title` is empty.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.is_empty() {
            return Err(TodoValidationError::EmptyId);
        }
        if self.title.is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Numeric creation timestamp encoded in `id`.
    ///
    /// Returns `None` for ids that are not decimal integers.
    pub fn created_at_ms(&self) -> Option<u64> {
        self.id.parse().ok()
    }

    pub fn toggle_done(&mut self) {
        self.done = !self.done;
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Priority, Todo, TodoValidationError};

    #[test]
    fn priority_rank_orders_high_above_low() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn labels_parse_back() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        for priority in Priority::ALL {
            assert_eq!(Priority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(Category::parse("All"), None);
        assert_eq!(Priority::parse("high"), None);
    }

    #[test]
    fn validate_rejects_empty_title_but_keeps_edited_whitespace() {
        let todo = Todo::new("1", "", Category::Work, Priority::Low);
        assert_eq!(todo.validate(), Err(TodoValidationError::EmptyTitle));

        let todo = Todo::new("1", "  ", Category::Work, Priority::Low);
        assert_eq!(todo.validate(), Ok(()));

        let todo = Todo::new("", "x", Category::Work, Priority::Low);
        assert_eq!(todo.validate(), Err(TodoValidationError::EmptyId));
    }

    #[test]
    fn created_at_ms_ignores_non_numeric_ids() {
        let todo = Todo::new("abc", "x", Category::Other, Priority::Low);
        assert_eq!(todo.created_at_ms(), None);
        let todo = Todo::new("1700000000000", "x", Category::Other, Priority::Low);
        assert_eq!(todo.created_at_ms(), Some(1_700_000_000_000));
    }
}
