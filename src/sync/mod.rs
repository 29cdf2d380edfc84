use crate::{
    domain::{ListId, ListPatch, NewTask, Task, TaskId, TaskPatch, TodoList},
    error::Result,
};
use async_trait::async_trait;

pub mod coordinator;
pub mod file_store;

pub use coordinator::SyncCoordinator;
pub use file_store::FileStore;

/// Persistence backend for lists and tasks.
///
/// Every call addresses entities by persistent identity, never by
/// display position, and implementations are expected to scope all data
/// to the authenticated user.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns all lists, ordered by position.
    async fn list_all(&self) -> Result<Vec<TodoList>>;

    /// Creates a list at the next free position.
    async fn create_list(&self, name: &str, color: Option<&str>) -> Result<TodoList>;

    /// Applies a partial update to a list.
    async fn update_list(&self, id: &ListId, patch: &ListPatch) -> Result<TodoList>;

    /// Deletes a list, cascading to all of its tasks.
    async fn delete_list(&self, id: &ListId) -> Result<()>;

    /// Returns a list's tasks, ordered by position.
    async fn list_tasks(&self, list_id: &ListId) -> Result<Vec<Task>>;

    /// Creates a task at the end of its list.
    async fn create_task(&self, new: &NewTask) -> Result<Task>;

    /// Applies a partial update to a task. `list_id` in the patch is
    /// the field driving cross-list moves.
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task>;

    /// Flips a task's completion flag.
    async fn toggle_task(&self, id: &TaskId) -> Result<Task>;

    /// Deletes a task.
    async fn delete_task(&self, id: &TaskId) -> Result<()>;
}
