use crate::domain::list::{ListId, TodoList};
use crate::domain::task::{Task, TaskId};
use crate::error::{LystraError, Result};
use std::collections::{HashMap, HashSet};

/// The canonical, consistent snapshot of lists and tasks.
///
/// Holds three interdependent structures: the ordered list sequence, the
/// per-list task sequences, and the mapping from a list's display position
/// to its persistent identity. Backend calls address lists by identity
/// while the UI addresses them by position, so the mapping is maintained
/// explicitly and always swapped together with the other two.
///
/// Every mutating method on this type re-establishes the position
/// invariants before returning; observers never see a partially-updated
/// state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    lists: Vec<TodoList>,
    tasks: HashMap<ListId, Vec<Task>>,
    positions: HashMap<usize, ListId>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from backend data, normalizing positions.
    ///
    /// Lists are kept in the order given; task entries for unknown lists
    /// are dropped and missing entries are filled with empty sequences.
    pub fn from_parts(lists: Vec<TodoList>, tasks: HashMap<ListId, Vec<Task>>) -> Self {
        let mut board = Self {
            lists,
            tasks: HashMap::new(),
            positions: HashMap::new(),
        };

        for list in &board.lists {
            let list_tasks = tasks.get(&list.id).cloned().unwrap_or_default();
            board.tasks.insert(list.id.clone(), list_tasks);
        }

        board.renumber_lists();
        let ids: Vec<ListId> = board.lists.iter().map(|l| l.id.clone()).collect();
        for id in ids {
            board.renumber_tasks(&id);
        }
        board
    }

    /// Immutable copy of the current state, used for rollback.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Atomically swaps in a full replacement state.
    pub fn replace(&mut self, next: Self) {
        *self = next;
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn list_at(&self, position: usize) -> Option<&TodoList> {
        self.lists.get(position)
    }

    /// Resolves a display position to the list's persistent identity.
    pub fn id_at(&self, position: usize) -> Option<&ListId> {
        self.positions.get(&position)
    }

    /// Resolves a persistent identity back to its display position.
    pub fn position_of(&self, id: &ListId) -> Option<usize> {
        self.lists.iter().position(|l| &l.id == id)
    }

    pub fn tasks_for(&self, id: &ListId) -> &[Task] {
        self.tasks.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Locates a task anywhere on the board.
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.values().flatten().find(|t| &t.id == id)
    }

    /// Appends a new list at the end of the sequence.
    pub fn push_list(&mut self, list: TodoList) {
        self.tasks.insert(list.id.clone(), Vec::new());
        self.lists.push(list);
        self.renumber_lists();
    }

    /// Reinserts a list (with its task set) at a given position.
    ///
    /// `position` is clamped to the current length so an undo still
    /// succeeds after the board shrank in the meantime.
    pub fn insert_list(&mut self, position: usize, list: TodoList, list_tasks: Vec<Task>) {
        let position = position.min(self.lists.len());
        self.tasks.insert(list.id.clone(), list_tasks);
        self.lists.insert(position, list);
        self.renumber_lists();
        if let Some(id) = self.lists.get(position).map(|l| l.id.clone()) {
            self.renumber_tasks(&id);
        }
    }

    /// Removes the list at `position`, returning it with its task set.
    pub fn remove_list(&mut self, position: usize) -> Option<(TodoList, Vec<Task>)> {
        if position >= self.lists.len() {
            return None;
        }
        let list = self.lists.remove(position);
        let list_tasks = self.tasks.remove(&list.id).unwrap_or_default();
        self.renumber_lists();
        Some((list, list_tasks))
    }

    pub fn rename_list(&mut self, position: usize, name: String) -> Result<()> {
        let len = self.lists.len();
        let list = self
            .lists
            .get_mut(position)
            .ok_or_else(|| LystraError::IndexOutOfRange {
                container: "lists".to_string(),
                index: position,
                len,
            })?;
        list.name = name;
        Ok(())
    }

    /// Appends a task at the end of its owning list's sequence.
    pub fn push_task(&mut self, task: Task) -> Result<()> {
        let list_id = task.list_id.clone();
        let seq = self
            .tasks
            .get_mut(&list_id)
            .ok_or_else(|| LystraError::ListNotFound(list_id.to_string()))?;
        seq.push(task);
        self.renumber_tasks(&list_id);
        Ok(())
    }

    /// Reinserts a task at a given position within a list.
    ///
    /// Like [`insert_list`](Self::insert_list), the position is clamped.
    pub fn insert_task(&mut self, list_id: &ListId, position: usize, mut task: Task) -> Result<()> {
        let seq = self
            .tasks
            .get_mut(list_id)
            .ok_or_else(|| LystraError::ListNotFound(list_id.to_string()))?;
        task.list_id = list_id.clone();
        let position = position.min(seq.len());
        seq.insert(position, task);
        self.renumber_tasks(list_id);
        Ok(())
    }

    /// Removes and returns the task at `position` within a list.
    pub fn remove_task(&mut self, list_id: &ListId, position: usize) -> Result<Task> {
        let seq = self
            .tasks
            .get_mut(list_id)
            .ok_or_else(|| LystraError::ListNotFound(list_id.to_string()))?;
        if position >= seq.len() {
            return Err(LystraError::IndexOutOfRange {
                container: format!("tasks of {list_id}"),
                index: position,
                len: seq.len(),
            });
        }
        let task = seq.remove(position);
        self.renumber_tasks(list_id);
        Ok(task)
    }

    /// Flips a task's completion flag in place.
    pub fn toggle_task(&mut self, list_id: &ListId, position: usize) -> Result<bool> {
        let seq = self
            .tasks
            .get_mut(list_id)
            .ok_or_else(|| LystraError::ListNotFound(list_id.to_string()))?;
        let len = seq.len();
        let task = seq
            .get_mut(position)
            .ok_or_else(|| LystraError::IndexOutOfRange {
                container: format!("tasks of {list_id}"),
                index: position,
                len,
            })?;
        task.toggle_completed();
        Ok(task.completed)
    }

    /// Verifies the board invariants; used by tests and debug checks.
    ///
    /// - every list's `position` equals its index, gapless (I1)
    /// - every task's `position` equals its index and its `list_id` names
    ///   the owning sequence (I2)
    /// - a task id appears in exactly one sequence (I3)
    /// - the identity mapping has exactly one valid entry per list (I4)
    pub fn verify(&self) -> Result<()> {
        for (i, list) in self.lists.iter().enumerate() {
            if list.position != i {
                return Err(LystraError::SyncFailed(format!(
                    "list {} has position {} at index {i}",
                    list.id, list.position
                )));
            }
            match self.positions.get(&i) {
                Some(id) if *id == list.id => {}
                other => {
                    return Err(LystraError::SyncFailed(format!(
                        "identity mapping at {i} is {other:?}, expected {}",
                        list.id
                    )))
                }
            }
        }
        if self.positions.len() != self.lists.len() || self.tasks.len() != self.lists.len() {
            return Err(LystraError::SyncFailed(
                "mapping size differs from list count".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for list in &self.lists {
            let seq = self
                .tasks
                .get(&list.id)
                .ok_or_else(|| LystraError::ListNotFound(list.id.to_string()))?;
            for (i, task) in seq.iter().enumerate() {
                if task.position != i || task.list_id != list.id {
                    return Err(LystraError::SyncFailed(format!(
                        "task {} misplaced in list {}",
                        task.id, list.id
                    )));
                }
                if !seen.insert(task.id.clone()) {
                    return Err(LystraError::SyncFailed(format!(
                        "task {} appears in more than one list",
                        task.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn renumber_lists(&mut self) {
        self.positions.clear();
        for (i, list) in self.lists.iter_mut().enumerate() {
            list.position = i;
            self.positions.insert(i, list.id.clone());
        }
    }

    pub(crate) fn renumber_tasks(&mut self, list_id: &ListId) {
        if let Some(seq) = self.tasks.get_mut(list_id) {
            for (i, task) in seq.iter_mut().enumerate() {
                task.position = i;
                task.list_id = list_id.clone();
            }
        }
    }
}
