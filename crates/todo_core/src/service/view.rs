//! Filtered/sorted projection of the todo collection.
//!
//! # Responsibility
//! - Hold the per-screen view parameters as explicit state.
//! - Compute the ordered sequence the presentation layer renders.
//!
//! # Invariants
//! - A category filter keeps only todos of that category.
//! - A category filter always orders by priority; `sort_mode` applies only
//!   under `All`.
//! - Computing a view never reorders the underlying collection.

use crate::model::todo::{Category, Todo};
use std::cmp::Reverse;
use std::fmt::{Display, Formatter};

/// Message shown when a view has no rows.
pub const EMPTY_VIEW_MESSAGE: &str = "Nothing to do yet :)";

/// Category selector including the view-only `All` value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Selector values in display order.
    pub const OPTIONS: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Work),
        CategoryFilter::Only(Category::Personal),
        CategoryFilter::Only(Category::Other),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.as_str(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "All" => Some(Self::All),
            other => Category::parse(other).map(Self::Only),
        }
    }

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => todo.category == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering selected for the `All` view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Highest priority first.
    #[default]
    Priority,
    /// Newest creation first.
    Date,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "Priority",
            Self::Date => "Date",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Priority" => Some(Self::Priority),
            "Date" => Some(Self::Date),
            _ => None,
        }
    }

    /// The other mode; the sort button cycles between the two.
    pub fn toggled(self) -> Self {
        match self {
            Self::Priority => Self::Date,
            Self::Date => Self::Priority,
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View parameters owned by one screen instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub filter: CategoryFilter,
    pub sort_mode: SortMode,
}

impl ViewState {
    pub fn new(filter: CategoryFilter, sort_mode: SortMode) -> Self {
        Self { filter, sort_mode }
    }

    /// Flips between priority and date ordering.
    ///
    /// Does nothing while a category filter hides the selector; the last
    /// selection comes back when the filter returns to `All`.
    pub fn toggle_sort_mode(&mut self) {
        if self.sort_selector_visible() {
            self.sort_mode = self.sort_mode.toggled();
        }
    }

    /// Whether the sort selector is offered to the user.
    pub fn sort_selector_visible(&self) -> bool {
        self.filter == CategoryFilter::All
    }

    /// Ordering actually applied to the view.
    pub fn effective_sort(&self) -> SortMode {
        match self.filter {
            CategoryFilter::All => self.sort_mode,
            CategoryFilter::Only(_) => SortMode::Priority,
        }
    }
}

/// Rendered projection handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoView<'a> {
    pub items: Vec<&'a Todo>,
    pub state: ViewState,
}

impl<'a> TodoView<'a> {
    pub fn new(todos: &'a [Todo], state: ViewState) -> Self {
        Self {
            items: compute_view(todos, &state),
            state,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Placeholder text when there is nothing to render.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_VIEW_MESSAGE)
    }

    pub fn titles(&self) -> Vec<&'a str> {
        self.items.iter().map(|todo| todo.title.as_str()).collect()
    }
}

/// Filters then sorts `todos` for display.
///
/// Sorting is stable, so ties keep collection order. Ids that are not
/// numeric sort after every timestamp id under `Date`.
pub fn compute_view<'a>(todos: &'a [Todo], state: &ViewState) -> Vec<&'a Todo> {
    let mut items: Vec<&Todo> = todos
        .iter()
        .filter(|todo| state.filter.matches(todo))
        .collect();

    match state.effective_sort() {
        SortMode::Priority => items.sort_by_key(|todo| Reverse(todo.priority.rank())),
        SortMode::Date => items.sort_by_key(|todo| Reverse(todo.created_at_ms().unwrap_or(0))),
    }
    items
}

#[cfg(test)]
mod tests {
    use super::{compute_view, CategoryFilter, SortMode, TodoView, ViewState, EMPTY_VIEW_MESSAGE};
    use crate::model::todo::{Category, Priority, Todo};

    fn todo(id: &str, title: &str, category: Category, priority: Priority) -> Todo {
        Todo::new(id, title, category, priority)
    }

    fn sample() -> Vec<Todo> {
        vec![
            todo("100", "low work", Category::Work, Priority::Low),
            todo("300", "high personal", Category::Personal, Priority::High),
            todo("200", "medium work", Category::Work, Priority::Medium),
            todo("400", "high work", Category::Work, Priority::High),
        ]
    }

    fn titles(items: &[&Todo]) -> Vec<String> {
        items.iter().map(|todo| todo.title.clone()).collect()
    }

    #[test]
    fn all_priority_orders_by_rank_keeping_ties_stable() {
        let todos = sample();
        let view = compute_view(&todos, &ViewState::default());
        assert_eq!(
            titles(&view),
            ["high personal", "high work", "medium work", "low work"]
        );
    }

    #[test]
    fn all_date_orders_newest_first() {
        let todos = sample();
        let state = ViewState::new(CategoryFilter::All, SortMode::Date);
        let view = compute_view(&todos, &state);
        assert_eq!(
            titles(&view),
            ["high work", "high personal", "medium work", "low work"]
        );
    }

    #[test]
    fn date_sort_compares_ids_numerically() {
        let todos = vec![
            todo("99", "short id", Category::Work, Priority::Low),
            todo("100", "long id", Category::Work, Priority::Low),
            todo("legacy", "not numeric", Category::Work, Priority::Low),
        ];
        let state = ViewState::new(CategoryFilter::All, SortMode::Date);
        assert_eq!(
            titles(&compute_view(&todos, &state)),
            ["long id", "short id", "not numeric"]
        );
    }

    #[test]
    fn category_filter_ignores_date_sort() {
        let todos = sample();
        let state = ViewState::new(CategoryFilter::Only(Category::Work), SortMode::Date);
        let view = compute_view(&todos, &state);
        assert_eq!(titles(&view), ["high work", "medium work", "low work"]);
        assert!(!state.sort_selector_visible());
        assert_eq!(state.effective_sort(), SortMode::Priority);
    }

    #[test]
    fn view_does_not_reorder_collection() {
        let todos = sample();
        let before = todos.clone();
        let _ = compute_view(&todos, &ViewState::default());
        assert_eq!(todos, before);
    }

    #[test]
    fn toggle_sort_mode_cycles() {
        let mut state = ViewState::default();
        state.toggle_sort_mode();
        assert_eq!(state.sort_mode, SortMode::Date);
        state.toggle_sort_mode();
        assert_eq!(state.sort_mode, SortMode::Priority);
    }

    #[test]
    fn toggle_sort_mode_is_inert_under_category_filter() {
        let mut state = ViewState::new(CategoryFilter::Only(Category::Personal), SortMode::Date);
        state.toggle_sort_mode();
        assert_eq!(state.sort_mode, SortMode::Date);

        state.filter = CategoryFilter::All;
        assert_eq!(state.effective_sort(), SortMode::Date);
        state.toggle_sort_mode();
        assert_eq!(state.sort_mode, SortMode::Priority);
    }

    #[test]
    fn filter_labels_parse_back() {
        for filter in CategoryFilter::OPTIONS {
            assert_eq!(CategoryFilter::parse(filter.as_str()), Some(filter));
        }
        assert_eq!(CategoryFilter::parse("work"), None);
    }

    #[test]
    fn empty_view_exposes_placeholder() {
        let todos = sample();
        let state = ViewState::new(CategoryFilter::Only(Category::Other), SortMode::Priority);
        let view = TodoView::new(&todos, state);
        assert!(view.is_empty());
        assert_eq!(view.empty_message(), Some(EMPTY_VIEW_MESSAGE));

        let view = TodoView::new(&todos, ViewState::default());
        assert_eq!(view.len(), 4);
        assert_eq!(view.empty_message(), None);
    }
}
