use crate::{
    domain::{ListId, ListPatch, NewTask, Task, TaskId, TaskPatch, TodoList},
    error::{LystraError, Result},
    sync::Store,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

/// File-based [`Store`] implementation.
///
/// Keeps the list index in a single JSON file and one JSON file per
/// task, mirroring the backend's semantics: new tasks land at the
/// highest position plus one and deleting a list removes its tasks.
pub struct FileStore {
    root_path: PathBuf,
}

impl FileStore {
    const LYSTRA_DIR: &'static str = ".lystra";
    const TASKS_DIR: &'static str = "tasks";
    const LISTS_FILE: &'static str = "lists.json";

    /// Creates a new FileStore instance rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().join(Self::LYSTRA_DIR),
        }
    }

    /// Creates the directory layout and an empty list index.
    pub async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.tasks_dir()).await?;

        if !self.lists_file().exists() {
            self.write_lists(&[]).await?;
        }
        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.lists_file().exists()
    }

    fn tasks_dir(&self) -> PathBuf {
        self.root_path.join(Self::TASKS_DIR)
    }

    fn lists_file(&self) -> PathBuf {
        self.root_path.join(Self::LISTS_FILE)
    }

    fn task_file(&self, id: &TaskId) -> PathBuf {
        self.tasks_dir().join(format!("{}.json", id.as_str()))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    async fn read_lists(&self) -> Result<Vec<TodoList>> {
        let path = self.lists_file();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path).await?;
        let lists: Vec<TodoList> = serde_json::from_str(&contents)?;
        Ok(lists)
    }

    async fn write_lists(&self, lists: &[TodoList]) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        let json = serde_json::to_string_pretty(lists)?;
        fs::write(self.lists_file(), json).await?;
        Ok(())
    }

    async fn read_task(&self, id: &TaskId) -> Result<Task> {
        let path = self.task_file(id);
        if !path.exists() {
            return Err(LystraError::TaskNotFound(id.to_string()));
        }
        let contents = fs::read_to_string(&path).await?;
        let task: Task = serde_json::from_str(&contents)?;
        Ok(task)
    }

    async fn write_task(&self, task: &Task) -> Result<()> {
        self.ensure_directory_exists(&self.tasks_dir()).await?;
        let json = serde_json::to_string_pretty(task)?;
        fs::write(self.task_file(&task.id), json).await?;
        Ok(())
    }

    async fn read_all_tasks(&self) -> Result<Vec<Task>> {
        let tasks_dir = self.tasks_dir();
        if !tasks_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&tasks_dir).await?;
        let mut tasks = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                let contents = fs::read_to_string(&path).await?;
                let task: Task = serde_json::from_str(&contents)?;
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    async fn require_list(&self, id: &ListId) -> Result<()> {
        let lists = self.read_lists().await?;
        if lists.iter().any(|l| &l.id == id) {
            Ok(())
        } else {
            Err(LystraError::ListNotFound(id.to_string()))
        }
    }
}

#[async_trait]
impl Store for FileStore {
    async fn list_all(&self) -> Result<Vec<TodoList>> {
        let mut lists = self.read_lists().await?;
        lists.sort_by_key(|l| l.position);
        Ok(lists)
    }

    async fn create_list(&self, name: &str, color: Option<&str>) -> Result<TodoList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LystraError::EmptyName);
        }

        let mut lists = self.read_lists().await?;
        let mut list = TodoList::new(
            ListId::new(Uuid::new_v4().to_string()),
            name.to_string(),
            lists.len(),
        );
        if let Some(color) = color {
            list = list.with_color(color.to_string());
        }

        debug!(list = %list.id, position = list.position, "creating list");
        lists.push(list.clone());
        self.write_lists(&lists).await?;
        Ok(list)
    }

    async fn update_list(&self, id: &ListId, patch: &ListPatch) -> Result<TodoList> {
        let mut lists = self.read_lists().await?;
        let list = lists
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| LystraError::ListNotFound(id.to_string()))?;

        if let Some(name) = &patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(LystraError::EmptyName);
            }
            list.name = name.to_string();
        }
        if let Some(color) = &patch.color {
            list.color = color.clone();
        }

        let updated = list.clone();
        self.write_lists(&lists).await?;
        Ok(updated)
    }

    async fn delete_list(&self, id: &ListId) -> Result<()> {
        let mut lists = self.read_lists().await?;
        let before = lists.len();
        lists.retain(|l| &l.id != id);
        if lists.len() == before {
            return Err(LystraError::ListNotFound(id.to_string()));
        }
        for (i, list) in lists.iter_mut().enumerate() {
            list.position = i;
        }
        self.write_lists(&lists).await?;

        // Cascade: drop every task owned by the deleted list.
        for task in self.read_all_tasks().await? {
            if &task.list_id == id {
                fs::remove_file(self.task_file(&task.id)).await?;
            }
        }
        debug!(list = %id, "deleted list and its tasks");
        Ok(())
    }

    async fn list_tasks(&self, list_id: &ListId) -> Result<Vec<Task>> {
        self.require_list(list_id).await?;

        let mut tasks: Vec<Task> = self
            .read_all_tasks()
            .await?
            .into_iter()
            .filter(|t| &t.list_id == list_id)
            .collect();
        tasks.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(tasks)
    }

    async fn create_task(&self, new: &NewTask) -> Result<Task> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(LystraError::EmptyName);
        }
        self.require_list(&new.list_id).await?;

        let position = self
            .list_tasks(&new.list_id)
            .await?
            .last()
            .map(|t| t.position + 1)
            .unwrap_or(0);

        let mut task = Task::new(
            TaskId::new(Uuid::new_v4().to_string()),
            name.to_string(),
            new.list_id.clone(),
            position,
        );
        task.deadline = new.deadline;

        debug!(task = %task.id, list = %task.list_id, "creating task");
        self.write_task(&task).await?;
        Ok(task)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task> {
        let mut task = self.read_task(id).await?;

        if let Some(name) = &patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(LystraError::EmptyName);
            }
            task.name = name.to_string();
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(deadline) = patch.deadline {
            task.deadline = deadline;
        }
        if let Some(list_id) = &patch.list_id {
            self.require_list(list_id).await?;
            task.list_id = list_id.clone();
        }

        self.write_task(&task).await?;
        Ok(task)
    }

    async fn toggle_task(&self, id: &TaskId) -> Result<Task> {
        let mut task = self.read_task(id).await?;
        task.toggle_completed();
        self.write_task(&task).await?;
        Ok(task)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<()> {
        let path = self.task_file(id);
        if !path.exists() {
            return Err(LystraError::TaskNotFound(id.to_string()));
        }
        fs::remove_file(path).await?;
        Ok(())
    }
}
