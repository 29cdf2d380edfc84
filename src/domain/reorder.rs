//! Pure reorder engine for drag-and-drop moves.
//!
//! Computes a full replacement [`BoardState`] from a move descriptor
//! without performing any I/O. The sync coordinator decides whether to
//! apply the result and which backend call, if any, it implies.

use crate::domain::board::BoardState;
use crate::domain::list::ListId;
use crate::domain::task::TaskId;
use crate::error::{LystraError, Result};

/// Describes one completed drag gesture.
///
/// A missing destination models a drop outside any valid target
/// (a cancelled drag).
#[derive(Debug, Clone, PartialEq)]
pub enum DragMove {
    /// Reorder a list within the global list sequence.
    List { from: usize, to: Option<usize> },
    /// Reorder a task within a list, or move it across lists.
    Task {
        source: ListId,
        from: usize,
        dest: Option<(ListId, usize)>,
    },
}

/// The single backend call implied by a cross-list task move.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossListUpdate {
    pub task_id: TaskId,
    pub new_list: ListId,
}

/// Result of planning a move.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Cancelled drag or identical source and destination; the caller
    /// must leave state untouched and issue no call.
    Unchanged,
    /// The computed replacement state, plus the backend update for a
    /// cross-list task move (`None` for every other move kind).
    Applied {
        board: BoardState,
        update: Option<CrossListUpdate>,
    },
}

/// Validates and computes the board resulting from `mv`.
///
/// Out-of-bounds indices and unknown list identities are rejected
/// without touching the input board.
pub fn plan_move(board: &BoardState, mv: &DragMove) -> Result<MoveOutcome> {
    match mv {
        DragMove::List { from, to } => plan_list_move(board, *from, *to),
        DragMove::Task { source, from, dest } => {
            plan_task_move(board, source, *from, dest.as_ref())
        }
    }
}

fn check_index(container: &str, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(LystraError::IndexOutOfRange {
            container: container.to_string(),
            index,
            len,
        });
    }
    Ok(())
}

fn plan_list_move(board: &BoardState, from: usize, to: Option<usize>) -> Result<MoveOutcome> {
    let Some(to) = to else {
        return Ok(MoveOutcome::Unchanged);
    };

    let len = board.list_count();
    check_index("lists", from, len)?;
    check_index("lists", to, len)?;

    if from == to {
        return Ok(MoveOutcome::Unchanged);
    }

    let mut next = board.snapshot();
    // remove_list/insert_list renumber positions and rebuild the
    // identity mapping, which is what the splice shift amounts to
    let (list, list_tasks) = next
        .remove_list(from)
        .ok_or_else(|| LystraError::IndexOutOfRange {
            container: "lists".to_string(),
            index: from,
            len,
        })?;
    next.insert_list(to, list, list_tasks);

    Ok(MoveOutcome::Applied {
        board: next,
        update: None,
    })
}

fn plan_task_move(
    board: &BoardState,
    source: &ListId,
    from: usize,
    dest: Option<&(ListId, usize)>,
) -> Result<MoveOutcome> {
    let Some((dest_list, to)) = dest else {
        return Ok(MoveOutcome::Unchanged);
    };
    let to = *to;

    if board.position_of(source).is_none() {
        return Err(LystraError::ListNotFound(source.to_string()));
    }
    if board.position_of(dest_list).is_none() {
        return Err(LystraError::ListNotFound(dest_list.to_string()));
    }

    let src_len = board.tasks_for(source).len();
    check_index(&format!("tasks of {source}"), from, src_len)?;

    if source == dest_list {
        check_index(&format!("tasks of {dest_list}"), to, src_len)?;
        if from == to {
            return Ok(MoveOutcome::Unchanged);
        }

        let mut next = board.snapshot();
        let task = next.remove_task(source, from)?;
        next.insert_task(source, to, task)?;

        return Ok(MoveOutcome::Applied {
            board: next,
            update: None,
        });
    }

    // Cross-list move: insertion at the destination's end is allowed.
    let dst_len = board.tasks_for(dest_list).len();
    if to > dst_len {
        return Err(LystraError::IndexOutOfRange {
            container: format!("tasks of {dest_list}"),
            index: to,
            len: dst_len,
        });
    }

    let mut next = board.snapshot();
    let task = next.remove_task(source, from)?;
    let task_id = task.id.clone();
    next.insert_task(dest_list, to, task)?;

    Ok(MoveOutcome::Applied {
        board: next,
        update: Some(CrossListUpdate {
            task_id,
            new_list: dest_list.clone(),
        }),
    })
}


#[cfg(test)]
mod properties {
    use super::*;
    use crate::domain::list::TodoList;
    use crate::domain::task::Task;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn arb_board() -> impl Strategy<Value = BoardState> {
        // 1-5 lists, each with 0-4 tasks; ids stay unique by construction
        (1usize..=5, proptest::collection::vec(0usize..=4, 1..=5)).prop_map(
            |(n_lists, task_counts)| {
                let mut lists = Vec::new();
                let mut tasks = HashMap::new();
                let mut task_no = 0;
                for i in 0..n_lists {
                    let id = ListId::new(format!("l{i}"));
                    lists.push(TodoList::new(id.clone(), format!("List {i}"), i));
                    let count = task_counts.get(i).copied().unwrap_or(0);
                    let seq: Vec<Task> = (0..count)
                        .map(|j| {
                            task_no += 1;
                            Task::new(
                                TaskId::new(format!("t{task_no}")),
                                format!("Task {task_no}"),
                                id.clone(),
                                j,
                            )
                        })
                        .collect();
                    tasks.insert(id, seq);
                }
                BoardState::from_parts(lists, tasks)
            },
        )
    }

    fn arb_move() -> impl Strategy<Value = (usize, usize, usize, usize, bool, bool)> {
        // raw indices; deliberately allowed to run out of range
        (0usize..8, 0usize..8, 0usize..8, 0usize..8, any::<bool>(), any::<bool>())
    }

    fn total_tasks(board: &BoardState) -> usize {
        board
            .lists()
            .iter()
            .map(|l| board.tasks_for(&l.id).len())
            .sum()
    }

    proptest! {
        // After any sequence of accepted moves, positions are exactly
        // 0..n-1 with no gaps or duplicates and every task appears in
        // exactly one list (board.verify covers both).
        #[test]
        fn positions_stay_contiguous(
            board in arb_board(),
            moves in proptest::collection::vec(arb_move(), 1..12),
        ) {
            let mut board = board;
            let task_count = total_tasks(&board);

            for (a, b, c, d, is_list, cancelled) in moves {
                let mv = if is_list {
                    DragMove::List {
                        from: a,
                        to: (!cancelled).then_some(b),
                    }
                } else {
                    let source = ListId::new(format!("l{}", a % 5));
                    let dest = ListId::new(format!("l{}", c % 5));
                    DragMove::Task {
                        source,
                        from: b,
                        dest: (!cancelled).then_some((dest, d)),
                    }
                };

                match plan_move(&board, &mv) {
                    Ok(MoveOutcome::Applied { board: next, .. }) => board.replace(next),
                    Ok(MoveOutcome::Unchanged) | Err(_) => {}
                }

                prop_assert!(board.verify().is_ok());
                prop_assert_eq!(total_tasks(&board), task_count);
            }
        }

        // A rejected or cancelled move never mutates the input board.
        #[test]
        fn rejected_moves_leave_board_identical(
            board in arb_board(),
            (a, b, c, d, is_list, _) in arb_move(),
        ) {
            let before = board.snapshot();
            let mv = if is_list {
                DragMove::List { from: a + 10, to: Some(b) }
            } else {
                DragMove::Task {
                    source: ListId::new(format!("l{}", a % 5)),
                    from: b + 10,
                    dest: Some((ListId::new(format!("l{}", c % 5)), d)),
                }
            };
            let _ = plan_move(&board, &mv);
            prop_assert_eq!(board, before);
        }
    }
}
