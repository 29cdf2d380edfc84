//! Search suggestions over the board, used by the search bar to jump to
//! a list and highlight it.

use crate::domain::board::BoardState;
use crate::domain::list::ListId;

/// How many lists fit on one page of the board view.
pub const LISTS_PER_PAGE: usize = 5;

/// Maximum number of suggestions surfaced for one query.
pub const MAX_SUGGESTIONS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionKind {
    List,
    Task { completed: bool },
}

/// One search hit, carrying everything navigation needs: the matched
/// name, the target list's identity, its display index, and the page it
/// currently sits on.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub name: String,
    pub list_id: ListId,
    pub list_index: usize,
    pub page: usize,
}

/// Case-insensitive substring search over list and task names.
///
/// Relevance order: prefix matches first, then lists before tasks, then
/// name A-Z. At most [`MAX_SUGGESTIONS`] results.
pub fn suggest(board: &BoardState, query: &str, per_page: usize) -> Vec<Suggestion> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();

    for (index, list) in board.lists().iter().enumerate() {
        if list.name.to_lowercase().contains(&query) {
            results.push(Suggestion {
                kind: SuggestionKind::List,
                name: list.name.clone(),
                list_id: list.id.clone(),
                list_index: index,
                page: index / per_page,
            });
        }

        for task in board.tasks_for(&list.id) {
            if task.name.to_lowercase().contains(&query) {
                results.push(Suggestion {
                    kind: SuggestionKind::Task {
                        completed: task.completed,
                    },
                    name: task.name.clone(),
                    list_id: list.id.clone(),
                    list_index: index,
                    page: index / per_page,
                });
            }
        }
    }

    results.sort_by(|a, b| {
        let a_prefix = a.name.to_lowercase().starts_with(&query);
        let b_prefix = b.name.to_lowercase().starts_with(&query);
        b_prefix
            .cmp(&a_prefix)
            .then_with(|| rank(&a.kind).cmp(&rank(&b.kind)))
            .then_with(|| a.name.cmp(&b.name))
    });

    results.truncate(MAX_SUGGESTIONS);
    results
}

fn rank(kind: &SuggestionKind) -> u8 {
    match kind {
        SuggestionKind::List => 0,
        SuggestionKind::Task { .. } => 1,
    }
}
