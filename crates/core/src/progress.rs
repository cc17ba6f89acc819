//! Progress/status roll-up from tasks to goals and from goals to projects.
//!
//! The server is the single authority for these aggregates. The rule is the
//! same at both levels: a parent is complete when every child is complete,
//! in progress when any child has moved, and pending otherwise. A child is
//! "complete" when its progress is 100 or its status is 완료.

use serde::Serialize;

use crate::status::Status;

/// The (progress, status) pair of one child, as read from the database.
#[derive(Debug, Clone, Copy)]
pub struct ChildProgress {
    /// 0..=100 in steps of 10.
    pub progress: i16,
    pub status: Status,
}

impl ChildProgress {
    pub fn is_complete(self) -> bool {
        self.progress >= 100 || self.status == Status::Complete
    }
}

/// Aggregated roll-up over a set of children.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Rollup {
    pub status: Status,
    /// Mean child progress, completed children counted as 100.
    pub progress_percentage: u8,
    pub completed: usize,
    pub total: usize,
}

/// The status a task must carry for a given progress value.
///
/// Progress 0 means not started, 100 means complete, anything in between
/// is in progress. Task edits always pass through this normalization.
pub fn status_for_progress(progress: i16) -> Status {
    match progress {
        0 => Status::Pending,
        100 => Status::Complete,
        _ => Status::InProgress,
    }
}

/// Compute the roll-up status over a set of children.
///
/// An empty set rolls up to 진행전; a parent with no children is never
/// auto-completed (a goal with zero tasks may still be completed manually,
/// which is the caller's decision, not this function's).
pub fn rollup_status(children: &[ChildProgress]) -> Status {
    if children.is_empty() {
        return Status::Pending;
    }
    if children.iter().all(|c| c.is_complete()) {
        return Status::Complete;
    }
    if children.iter().any(|c| c.progress > 0 || c.is_complete()) {
        return Status::InProgress;
    }
    Status::Pending
}

/// Whether a parent with these children may transition to 완료.
///
/// `allow_empty` is true for goals (completable with zero tasks) and false
/// for projects.
pub fn can_complete(children: &[ChildProgress], allow_empty: bool) -> bool {
    if children.is_empty() {
        return allow_empty;
    }
    children.iter().all(|c| c.is_complete())
}

/// Mean progress across children, with completed children counted as 100.
/// An empty set is 0.
pub fn progress_percentage(children: &[ChildProgress]) -> u8 {
    if children.is_empty() {
        return 0;
    }
    let sum: i64 = children
        .iter()
        .map(|c| if c.is_complete() { 100 } else { i64::from(c.progress) })
        .sum();
    (sum / children.len() as i64) as u8
}

/// Full roll-up summary for a parent entity.
pub fn summarize(children: &[ChildProgress]) -> Rollup {
    Rollup {
        status: rollup_status(children),
        progress_percentage: progress_percentage(children),
        completed: children.iter().filter(|c| c.is_complete()).count(),
        total: children.len(),
    }
}
