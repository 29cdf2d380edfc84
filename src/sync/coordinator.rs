use crate::{
    domain::{
        board::BoardState,
        list::{ListId, ListPatch, TodoList},
        reorder::{plan_move, DragMove, MoveOutcome},
        task::{parse_deadline, NewTask, Task, TaskPatch},
    },
    error::{LystraError, Result},
    sync::Store,
    undo::{DeleteBuffer, Highlight},
};
use std::time::Instant;
use tracing::{debug, warn};

/// A list parked in the undo buffer together with its task set, so a
/// delete-then-undo round trip restores it exactly as observed at
/// deletion time.
#[derive(Debug, Clone)]
pub struct DeletedList {
    pub list: TodoList,
    pub tasks: Vec<Task>,
}

/// Drives the reorder engine against a persistence backend.
///
/// Exclusively owns the [`BoardState`] plus the undo buffers and the
/// highlight pointer. Mutations are applied locally first (optimistic),
/// then mirrored to the backend; a failed call rolls the board back to
/// the pre-mutation snapshot and marks the coordinator for a refresh.
///
/// A generation counter guards against late responses: a failure
/// observed after a newer local change is logged and ignored instead of
/// clobbering state that has already moved on.
pub struct SyncCoordinator<S: Store> {
    store: S,
    board: BoardState,
    generation: u64,
    needs_refresh: bool,
    pending_list: DeleteBuffer<DeletedList>,
    pending_task: DeleteBuffer<Task>,
    highlight: Highlight<ListId>,
}

impl<S: Store> SyncCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            board: BoardState::new(),
            generation: 0,
            needs_refresh: false,
            pending_list: DeleteBuffer::default(),
            pending_task: DeleteBuffer::default(),
            highlight: Highlight::default(),
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Whether a failed sync left local state potentially drifted from
    /// the backend.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    fn apply(&mut self, next: BoardState) -> u64 {
        self.generation += 1;
        self.board.replace(next);
        self.generation
    }

    fn rollback(&mut self, snapshot: BoardState) {
        self.generation += 1;
        self.board.replace(snapshot);
        self.needs_refresh = true;
    }

    /// Rebuilds the board from the backend.
    pub async fn load(&mut self) -> Result<()> {
        let lists = self.store.list_all().await?;
        let mut tasks = std::collections::HashMap::new();
        for list in &lists {
            tasks.insert(list.id.clone(), self.store.list_tasks(&list.id).await?);
        }

        self.apply(BoardState::from_parts(lists, tasks));
        self.needs_refresh = false;
        debug!(lists = self.board.list_count(), "board loaded");
        Ok(())
    }

    /// Reconciles local state with the backend after a failed sync.
    pub async fn refresh(&mut self) -> Result<()> {
        self.load().await
    }

    /// Applies one drag gesture.
    ///
    /// Protocol: snapshot, plan, optimistic apply, then the single
    /// backend call a cross-list task move implies. List reorders and
    /// same-list task reorders are local-only. Returns `false` for a
    /// cancelled or same-slot drag (no state change, no call).
    pub async fn apply_drag(&mut self, mv: &DragMove) -> Result<bool> {
        let snapshot = self.board.snapshot();
        let MoveOutcome::Applied { board, update } = plan_move(&self.board, mv)? else {
            return Ok(false);
        };

        let generation = self.apply(board);

        if let Some(update) = update {
            let patch = TaskPatch::move_to(update.new_list.clone());
            if let Err(err) = self.store.update_task(&update.task_id, &patch).await {
                if self.generation == generation {
                    warn!(task = %update.task_id, error = %err, "cross-list move failed, rolling back");
                    self.rollback(snapshot);
                    return Err(err);
                }
                // A newer local change already superseded this move; the
                // rollback would reapply stale state.
                debug!(task = %update.task_id, "ignoring stale sync failure");
            }
        }
        Ok(true)
    }

    /// Creates a list through the backend and appends it to the board.
    pub async fn create_list(&mut self, name: &str, color: Option<&str>) -> Result<TodoList> {
        if name.trim().is_empty() {
            return Err(LystraError::EmptyName);
        }
        let list = self.store.create_list(name, color).await?;
        self.generation += 1;
        self.board.push_list(list.clone());
        Ok(list)
    }

    /// Renames the list at a display position, optimistically.
    pub async fn rename_list(&mut self, position: usize, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(LystraError::EmptyName);
        }
        let id = self
            .board
            .id_at(position)
            .cloned()
            .ok_or_else(|| LystraError::IndexOutOfRange {
                container: "lists".to_string(),
                index: position,
                len: self.board.list_count(),
            })?;

        let snapshot = self.board.snapshot();
        self.board.rename_list(position, name.trim().to_string())?;
        let generation = self.generation + 1;
        self.generation = generation;

        if let Err(err) = self.store.update_list(&id, &ListPatch::rename(name)).await {
            if self.generation == generation {
                self.rollback(snapshot);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Creates a task at the end of a list.
    ///
    /// Name and deadline are validated before any state change or
    /// backend call; an invalid deadline is rejected outright so the UI
    /// can clear the field.
    pub async fn create_task(
        &mut self,
        list_id: &ListId,
        name: &str,
        deadline: Option<&str>,
    ) -> Result<Task> {
        if name.trim().is_empty() {
            return Err(LystraError::EmptyName);
        }
        let deadline = deadline.map(parse_deadline).transpose()?;
        if self.board.position_of(list_id).is_none() {
            return Err(LystraError::ListNotFound(list_id.to_string()));
        }

        let task = self
            .store
            .create_task(&NewTask {
                name: name.trim().to_string(),
                list_id: list_id.clone(),
                deadline,
            })
            .await?;
        self.generation += 1;
        self.board.push_task(task.clone())?;
        Ok(task)
    }

    /// Toggles a task's completion flag, optimistically.
    pub async fn toggle_task(&mut self, list_position: usize, task_index: usize) -> Result<bool> {
        let id = self
            .board
            .id_at(list_position)
            .cloned()
            .ok_or_else(|| LystraError::IndexOutOfRange {
                container: "lists".to_string(),
                index: list_position,
                len: self.board.list_count(),
            })?;

        let snapshot = self.board.snapshot();
        let completed = self.board.toggle_task(&id, task_index)?;
        let task_id = self.board.tasks_for(&id)[task_index].id.clone();
        let generation = self.generation + 1;
        self.generation = generation;

        if let Err(err) = self.store.toggle_task(&task_id).await {
            if self.generation == generation {
                warn!(task = %task_id, error = %err, "toggle failed, rolling back");
                self.rollback(snapshot);
                return Err(err);
            }
        }
        Ok(completed)
    }

    /// Removes the list at a display position into the undo buffer.
    ///
    /// The backend delete is deferred until the undo window lapses, so
    /// an undo restores the identical entity. A previously pending list
    /// deletion is finalized immediately.
    pub async fn delete_list(&mut self, position: usize, now: Instant) -> Result<()> {
        let (list, tasks) =
            self.board
                .remove_list(position)
                .ok_or_else(|| LystraError::IndexOutOfRange {
                    container: "lists".to_string(),
                    index: position,
                    len: self.board.list_count(),
                })?;
        self.generation += 1;

        let forfeited = self.pending_list.schedule(DeletedList { list, tasks }, now);
        if let Some(old) = forfeited {
            self.finalize_list_delete(&old).await?;
        }
        Ok(())
    }

    /// Removes a task into the undo buffer.
    ///
    /// Also finalizes any pending list deletion: the two undo slots are
    /// mutually exclusive.
    pub async fn delete_task(
        &mut self,
        list_position: usize,
        task_index: usize,
        now: Instant,
    ) -> Result<()> {
        let id = self
            .board
            .id_at(list_position)
            .cloned()
            .ok_or_else(|| LystraError::IndexOutOfRange {
                container: "lists".to_string(),
                index: list_position,
                len: self.board.list_count(),
            })?;

        let task = self.board.remove_task(&id, task_index)?;
        self.generation += 1;

        let forfeited_task = self.pending_task.schedule(task, now);
        if let Some(old) = forfeited_task {
            self.finalize_task_delete(&old).await?;
        }
        if let Some(old) = self.pending_list.forfeit() {
            self.finalize_list_delete(&old).await?;
        }
        Ok(())
    }

    /// Restores the pending list deletion, if its window is still open.
    pub fn undo_delete_list(&mut self, now: Instant) -> bool {
        let Some(DeletedList { list, tasks }) = self.pending_list.undo(now) else {
            return false;
        };
        self.generation += 1;
        let position = list.position;
        self.board.insert_list(position, list, tasks);
        true
    }

    /// Restores the pending task deletion, if its window is still open.
    pub fn undo_delete_task(&mut self, now: Instant) -> Result<bool> {
        let Some(task) = self.pending_task.undo(now) else {
            return Ok(false);
        };
        self.generation += 1;
        let list_id = task.list_id.clone();
        let position = task.position;
        self.board.insert_task(&list_id, position, task)?;
        Ok(true)
    }

    /// Name of the list awaiting undo, for snackbar display.
    pub fn pending_list_name(&self, now: Instant) -> Option<&str> {
        self.pending_list.peek(now).map(|d| d.list.name.as_str())
    }

    /// Name of the task awaiting undo, for snackbar display.
    pub fn pending_task_name(&self, now: Instant) -> Option<&str> {
        self.pending_task.peek(now).map(|t| t.name.as_str())
    }

    /// Makes expired pending deletions permanent on the backend.
    ///
    /// Call this from the UI tick; it is a no-op while windows are
    /// still open.
    pub async fn flush_expired(&mut self, now: Instant) -> Result<()> {
        if let Some(old) = self.pending_list.take_expired(now) {
            self.finalize_list_delete(&old).await?;
        }
        if let Some(old) = self.pending_task.take_expired(now) {
            self.finalize_task_delete(&old).await?;
        }
        Ok(())
    }

    async fn finalize_list_delete(&mut self, deleted: &DeletedList) -> Result<()> {
        debug!(list = %deleted.list.id, "finalizing list deletion");
        if let Err(err) = self.store.delete_list(&deleted.list.id).await {
            warn!(list = %deleted.list.id, error = %err, "backend list delete failed");
            self.needs_refresh = true;
            return Err(err);
        }
        Ok(())
    }

    async fn finalize_task_delete(&mut self, deleted: &Task) -> Result<()> {
        debug!(task = %deleted.id, "finalizing task deletion");
        if let Err(err) = self.store.delete_task(&deleted.id).await {
            warn!(task = %deleted.id, error = %err, "backend task delete failed");
            self.needs_refresh = true;
            return Err(err);
        }
        Ok(())
    }

    /// Points the transient highlight at a list, e.g. after search
    /// navigation.
    pub fn highlight_list(&mut self, id: ListId, now: Instant) {
        self.highlight.set(id, now);
    }

    pub fn highlighted(&self, now: Instant) -> Option<&ListId> {
        self.highlight.current(now)
    }

    /// Clears the highlight on page change.
    pub fn page_changed(&mut self) {
        self.highlight.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::TaskId;
    use crate::undo::UNDO_WINDOW;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct MockStore {
        lists: Mutex<Vec<TodoList>>,
        tasks: Mutex<Vec<Task>>,
        calls: Mutex<Vec<String>>,
        fail_update_task: AtomicBool,
        fail_toggle: AtomicBool,
    }

    impl MockStore {
        fn seeded(lists: &[(&str, &[&str])]) -> Self {
            let store = Self::default();
            {
                let mut l = store.lists.lock().unwrap();
                let mut t = store.tasks.lock().unwrap();
                for (i, (list_id, task_ids)) in lists.iter().enumerate() {
                    let id = ListId::new(*list_id);
                    l.push(TodoList::new(id.clone(), format!("List {list_id}"), i));
                    for (j, task_id) in task_ids.iter().enumerate() {
                        t.push(Task::new(
                            TaskId::new(*task_id),
                            format!("Task {task_id}"),
                            id.clone(),
                            j,
                        ));
                    }
                }
            }
            store
        }

        fn log(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn mutation_calls(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter(|c| !c.starts_with("list_"))
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl Store for MockStore {
        async fn list_all(&self) -> Result<Vec<TodoList>> {
            self.log("list_all");
            Ok(self.lists.lock().unwrap().clone())
        }

        async fn create_list(&self, name: &str, _color: Option<&str>) -> Result<TodoList> {
            self.log(format!("create_list {name}"));
            let mut lists = self.lists.lock().unwrap();
            let list = TodoList::new(
                ListId::new(format!("new-{}", lists.len())),
                name.to_string(),
                lists.len(),
            );
            lists.push(list.clone());
            Ok(list)
        }

        async fn update_list(&self, id: &ListId, patch: &ListPatch) -> Result<TodoList> {
            self.log(format!("update_list {id}"));
            let mut lists = self.lists.lock().unwrap();
            let list = lists
                .iter_mut()
                .find(|l| &l.id == id)
                .ok_or_else(|| LystraError::ListNotFound(id.to_string()))?;
            if let Some(name) = &patch.name {
                list.name = name.clone();
            }
            Ok(list.clone())
        }

        async fn delete_list(&self, id: &ListId) -> Result<()> {
            self.log(format!("delete_list {id}"));
            self.lists.lock().unwrap().retain(|l| &l.id != id);
            self.tasks.lock().unwrap().retain(|t| &t.list_id != id);
            Ok(())
        }

        async fn list_tasks(&self, list_id: &ListId) -> Result<Vec<Task>> {
            self.log(format!("list_tasks {list_id}"));
            Ok(self
                .tasks
                .lock()
                .unwrap()
                .iter()
                .filter(|t| &t.list_id == list_id)
                .cloned()
                .collect())
        }

        async fn create_task(&self, new: &NewTask) -> Result<Task> {
            self.log(format!("create_task {}", new.name));
            let mut tasks = self.tasks.lock().unwrap();
            let position = tasks.iter().filter(|t| t.list_id == new.list_id).count();
            let mut task = Task::new(
                TaskId::new(format!("new-t{}", tasks.len())),
                new.name.clone(),
                new.list_id.clone(),
                position,
            );
            task.deadline = new.deadline;
            tasks.push(task.clone());
            Ok(task)
        }

        async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task> {
            self.log(format!(
                "update_task {id} -> {}",
                patch
                    .list_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default()
            ));
            if self.fail_update_task.load(Ordering::SeqCst) {
                return Err(LystraError::SyncFailed("network down".to_string()));
            }
            let mut tasks = self.tasks.lock().unwrap();
            let task = tasks
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| LystraError::TaskNotFound(id.to_string()))?;
            if let Some(list_id) = &patch.list_id {
                task.list_id = list_id.clone();
            }
            Ok(task.clone())
        }

        async fn toggle_task(&self, id: &TaskId) -> Result<Task> {
            self.log(format!("toggle_task {id}"));
            if self.fail_toggle.load(Ordering::SeqCst) {
                return Err(LystraError::SyncFailed("network down".to_string()));
            }
            let mut tasks = self.tasks.lock().unwrap();
            let task = tasks
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| LystraError::TaskNotFound(id.to_string()))?;
            task.toggle_completed();
            Ok(task.clone())
        }

        async fn delete_task(&self, id: &TaskId) -> Result<()> {
            self.log(format!("delete_task {id}"));
            self.tasks.lock().unwrap().retain(|t| &t.id != id);
            Ok(())
        }
    }

    async fn coordinator(lists: &[(&str, &[&str])]) -> SyncCoordinator<MockStore> {
        let mut coordinator = SyncCoordinator::new(MockStore::seeded(lists));
        coordinator.load().await.unwrap();
        coordinator.store.calls.lock().unwrap().clear();
        coordinator
    }

    #[tokio::test]
    async fn test_load_builds_board_in_position_order() {
        let coordinator = coordinator(&[("a", &["t1", "t2"]), ("b", &["t3"])]).await;
        let board = coordinator.board();

        assert_eq!(board.list_count(), 2);
        assert_eq!(board.id_at(0), Some(&ListId::new("a")));
        assert_eq!(board.tasks_for(&ListId::new("a")).len(), 2);
        board.verify().unwrap();
    }

    #[tokio::test]
    async fn test_list_reorder_is_local_only() {
        let mut coordinator = coordinator(&[("a", &[]), ("b", &[]), ("c", &[])]).await;

        let applied = coordinator
            .apply_drag(&DragMove::List { from: 0, to: Some(2) })
            .await
            .unwrap();

        assert!(applied);
        assert_eq!(coordinator.board().id_at(2), Some(&ListId::new("a")));
        assert!(coordinator.store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_drag_changes_nothing_and_calls_nothing() {
        let mut coordinator = coordinator(&[("a", &["t1"])]).await;
        let before = coordinator.board().snapshot();

        let applied = coordinator
            .apply_drag(&DragMove::Task {
                source: ListId::new("a"),
                from: 0,
                dest: None,
            })
            .await
            .unwrap();

        assert!(!applied);
        assert_eq!(coordinator.board(), &before);
        assert!(coordinator.store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cross_list_move_issues_one_update() {
        let mut coordinator = coordinator(&[("a", &["t1", "t2"]), ("b", &[])]).await;

        coordinator
            .apply_drag(&DragMove::Task {
                source: ListId::new("a"),
                from: 0,
                dest: Some((ListId::new("b"), 0)),
            })
            .await
            .unwrap();

        let board = coordinator.board();
        assert_eq!(board.tasks_for(&ListId::new("a")).len(), 1);
        assert_eq!(board.tasks_for(&ListId::new("b"))[0].id, TaskId::new("t1"));
        assert_eq!(coordinator.store.calls(), vec!["update_task t1 -> b"]);
    }

    #[tokio::test]
    async fn test_failed_cross_list_move_rolls_back_to_snapshot() {
        let mut coordinator = coordinator(&[("a", &["t1"]), ("b", &[])]).await;
        coordinator.store.fail_update_task.store(true, Ordering::SeqCst);
        let before = coordinator.board().snapshot();

        let result = coordinator
            .apply_drag(&DragMove::Task {
                source: ListId::new("a"),
                from: 0,
                dest: Some((ListId::new("b"), 0)),
            })
            .await;

        assert!(result.is_err());
        assert_eq!(coordinator.board(), &before);
        assert!(coordinator.needs_refresh());
    }

    #[tokio::test]
    async fn test_out_of_range_drag_is_rejected_without_state_change() {
        let mut coordinator = coordinator(&[("a", &["t1"])]).await;
        let before = coordinator.board().snapshot();

        let result = coordinator
            .apply_drag(&DragMove::List { from: 7, to: Some(0) })
            .await;

        assert!(matches!(result, Err(LystraError::IndexOutOfRange { .. })));
        assert_eq!(coordinator.board(), &before);
        assert!(coordinator.store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_list_then_undo_restores_exactly() {
        let mut coordinator = coordinator(&[("a", &["t1", "t2"]), ("b", &[])]).await;
        let now = Instant::now();
        let before = coordinator.board().snapshot();

        coordinator.delete_list(0, now).await.unwrap();
        assert_eq!(coordinator.board().list_count(), 1);
        assert_eq!(coordinator.pending_list_name(now), Some("List a"));
        // Backend delete is deferred until the window lapses.
        assert!(coordinator.store.calls().is_empty());

        assert!(coordinator.undo_delete_list(now + Duration::from_secs(2)));
        assert_eq!(coordinator.board(), &before);
        assert!(coordinator.store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_second_list_delete_forfeits_first_undo() {
        let mut coordinator = coordinator(&[("a", &[]), ("b", &[])]).await;
        let now = Instant::now();

        coordinator.delete_list(0, now).await.unwrap();
        coordinator.delete_list(0, now + Duration::from_secs(1)).await.unwrap();

        // The first deletion became permanent.
        assert_eq!(coordinator.store.calls(), vec!["delete_list a"]);
        assert!(coordinator.board().is_empty());

        // Undo only brings back the second list.
        assert!(coordinator.undo_delete_list(now + Duration::from_secs(2)));
        assert_eq!(coordinator.board().list_count(), 1);
        assert_eq!(coordinator.board().id_at(0), Some(&ListId::new("b")));
    }

    #[tokio::test]
    async fn test_expired_deletion_becomes_permanent() {
        let mut coordinator = coordinator(&[("a", &["t1"]), ("b", &[])]).await;
        let now = Instant::now();

        coordinator.delete_list(0, now).await.unwrap();
        coordinator.flush_expired(now + Duration::from_secs(3)).await.unwrap();
        assert!(coordinator.store.calls().is_empty());

        coordinator.flush_expired(now + UNDO_WINDOW).await.unwrap();
        assert_eq!(coordinator.store.calls(), vec!["delete_list a"]);

        assert!(!coordinator.undo_delete_list(now + UNDO_WINDOW));
        assert_eq!(coordinator.board().list_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_task_then_undo_restores_position() {
        let mut coordinator = coordinator(&[("a", &["t1", "t2", "t3"])]).await;
        let now = Instant::now();
        let before = coordinator.board().snapshot();

        coordinator.delete_task(0, 1, now).await.unwrap();
        assert_eq!(coordinator.board().tasks_for(&ListId::new("a")).len(), 2);
        assert_eq!(coordinator.pending_task_name(now), Some("Task t2"));

        assert!(coordinator.undo_delete_task(now + Duration::from_secs(1)).unwrap());
        assert_eq!(coordinator.board(), &before);
    }

    #[tokio::test]
    async fn test_deleting_task_forfeits_pending_list_deletion() {
        let mut coordinator = coordinator(&[("a", &[]), ("b", &["t1"])]).await;
        let now = Instant::now();

        coordinator.delete_list(0, now).await.unwrap();
        coordinator.delete_task(0, 0, now + Duration::from_secs(1)).await.unwrap();

        // The list deletion was finalized; its undo window is gone.
        assert_eq!(coordinator.store.calls(), vec!["delete_list a"]);
        assert!(!coordinator.undo_delete_list(now + Duration::from_secs(2)));
        // The task is still undoable.
        assert!(coordinator
            .undo_delete_task(now + Duration::from_secs(2))
            .unwrap());
    }

    #[tokio::test]
    async fn test_toggle_rolls_back_on_failure() {
        let mut coordinator = coordinator(&[("a", &["t1"])]).await;
        coordinator.store.fail_toggle.store(true, Ordering::SeqCst);
        let before = coordinator.board().snapshot();

        let result = coordinator.toggle_task(0, 0).await;
        assert!(result.is_err());
        assert_eq!(coordinator.board(), &before);
        assert!(coordinator.needs_refresh());
    }

    #[tokio::test]
    async fn test_toggle_success() {
        let mut coordinator = coordinator(&[("a", &["t1"])]).await;

        assert!(coordinator.toggle_task(0, 0).await.unwrap());
        assert!(coordinator.board().tasks_for(&ListId::new("a"))[0].completed);
        assert_eq!(coordinator.store.calls(), vec!["toggle_task t1"]);
    }

    #[tokio::test]
    async fn test_create_task_validates_before_any_call() {
        let mut coordinator = coordinator(&[("a", &[])]).await;

        let err = coordinator
            .create_task(&ListId::new("a"), "  ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, LystraError::EmptyName));

        let err = coordinator
            .create_task(&ListId::new("a"), "Buy milk", Some("999-01-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, LystraError::InvalidDeadline(_)));

        assert!(coordinator.store.mutation_calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_task_appends_to_board() {
        let mut coordinator = coordinator(&[("a", &["t1"])]).await;

        let task = coordinator
            .create_task(&ListId::new("a"), "Buy milk", Some("2999-01-01"))
            .await
            .unwrap();

        let tasks = coordinator.board().tasks_for(&ListId::new("a"));
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].id, task.id);
        assert_eq!(tasks[1].position, 1);
        coordinator.board().verify().unwrap();
    }

    #[tokio::test]
    async fn test_create_list_appends_at_end() {
        let mut coordinator = coordinator(&[("a", &[])]).await;

        let list = coordinator.create_list("Workout", None).await.unwrap();
        assert_eq!(list.position, 1);
        assert_eq!(coordinator.board().list_count(), 2);
        coordinator.board().verify().unwrap();
    }

    #[tokio::test]
    async fn test_rename_list() {
        let mut coordinator = coordinator(&[("a", &[])]).await;

        coordinator.rename_list(0, "Errands").await.unwrap();
        assert_eq!(coordinator.board().lists()[0].name, "Errands");
        assert_eq!(coordinator.store.calls(), vec!["update_list a"]);
    }

    #[tokio::test]
    async fn test_highlight_lifecycle() {
        let mut coordinator = coordinator(&[("a", &[])]).await;
        let now = Instant::now();

        coordinator.highlight_list(ListId::new("a"), now);
        assert_eq!(coordinator.highlighted(now), Some(&ListId::new("a")));

        coordinator.page_changed();
        assert!(coordinator.highlighted(now).is_none());
    }
}
