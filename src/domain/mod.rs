pub mod board;
pub mod list;
pub mod reorder;
pub mod search;
pub mod task;

pub use board::BoardState;
pub use list::{ListId, ListPatch, TodoList};
pub use reorder::{plan_move, CrossListUpdate, DragMove, MoveOutcome};
pub use search::{suggest, Suggestion, SuggestionKind};
pub use task::{parse_deadline, NewTask, Task, TaskId, TaskPatch};
