//! In-memory view model over the current user's task list: filtering,
//! per-status counters and lifecycle transitions.
//!
//! Transitions are gated client-side so a bad request never leaves the
//! process: start/update/submit/restart require the acting user to be the
//! task's assignee, review requires the leader of the owning project. The
//! backend enforces the same rules authoritatively.

use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::error::{HubError, Result};
use crate::types::{Priority, Task, TaskStatus};

/// Progress a task is reset to when a review rejects it.
pub const REJECTED_PROGRESS: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatusFilter {
    #[default]
    All,
    /// Matches both PENDING and the legacy TO_DO spelling.
    Pending,
    InProgress,
    UnderReview,
    Completed,
    Rejected,
}

impl StatusFilter {
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status.is_pending(),
            StatusFilter::InProgress => status == TaskStatus::InProgress,
            StatusFilter::UnderReview => status == TaskStatus::UnderReview,
            StatusFilter::Completed => status == TaskStatus::Completed,
            StatusFilter::Rejected => status == TaskStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PriorityFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl PriorityFilter {
    pub fn matches(self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Low => priority == Priority::Low,
            PriorityFilter::Medium => priority == Priority::Medium,
            PriorityFilter::High => priority == Priority::High,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task.status) && self.priority.matches(task.priority)
    }
}

/// Per-status counters shown alongside the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub under_review: usize,
    pub completed: usize,
    pub rejected: usize,
}

pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks passing both filters, input order preserved.
    pub fn filtered(&self, filter: &TaskFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            total: self.tasks.len(),
            ..StatusCounts::default()
        };
        for task in &self.tasks {
            match task.status {
                TaskStatus::ToDo | TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::UnderReview => counts.under_review += 1,
                TaskStatus::Completed => counts.completed += 1,
                TaskStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    pub fn get(&self, id: &str) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| HubError::TaskNotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| HubError::TaskNotFound(id.to_string()))
    }

    /// Swap in a re-fetched copy of a task after a server-side mutation.
    pub fn replace(&mut self, updated: Task) {
        match self.tasks.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => *slot = updated,
            None => self.tasks.insert(0, updated),
        }
    }

    /// TO_DO/PENDING → IN_PROGRESS. Assignee only.
    pub fn start(&mut self, id: &str, actor: &str) -> Result<&Task> {
        let task = self.get_mut(id)?;
        ensure_assignee(task, actor, "start")?;
        if !task.status.is_pending() {
            return Err(HubError::InvalidTransition(format!(
                "cannot start a task that is {}",
                task.status.label()
            )));
        }
        task.status = TaskStatus::InProgress;
        Ok(task)
    }

    /// Sets progress; the task stays in (or returns to) IN_PROGRESS.
    /// Assignee only. Not allowed once submitted or completed.
    pub fn update_progress(&mut self, id: &str, progress: u8, actor: &str) -> Result<&Task> {
        if progress > 100 {
            return Err(HubError::Validation(format!(
                "progress must be between 0 and 100, got {progress}"
            )));
        }
        let task = self.get_mut(id)?;
        ensure_assignee(task, actor, "update progress on")?;
        if matches!(task.status, TaskStatus::UnderReview | TaskStatus::Completed) {
            return Err(HubError::InvalidTransition(format!(
                "cannot update progress on a task that is {}",
                task.status.label()
            )));
        }
        task.progress_percentage = progress;
        task.status = TaskStatus::InProgress;
        Ok(task)
    }

    /// IN_PROGRESS → UNDER_REVIEW, valid only at 100% progress. Assignee only.
    pub fn submit(&mut self, id: &str, actor: &str) -> Result<&Task> {
        let task = self.get_mut(id)?;
        ensure_assignee(task, actor, "submit")?;
        if task.status != TaskStatus::InProgress {
            return Err(HubError::InvalidTransition(format!(
                "cannot submit a task that is {}",
                task.status.label()
            )));
        }
        if task.progress_percentage < 100 {
            return Err(HubError::InvalidTransition(format!(
                "progress must reach 100% before review, currently at {}%",
                task.progress_percentage
            )));
        }
        task.status = TaskStatus::UnderReview;
        Ok(task)
    }

    /// UNDER_REVIEW → COMPLETED (approved) or REJECTED with progress reset
    /// to 75. Project leader only.
    pub fn review(
        &mut self,
        id: &str,
        approved: bool,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<&Task> {
        let task = self.get_mut(id)?;
        ensure_project_leader(task, actor)?;
        if task.status != TaskStatus::UnderReview {
            return Err(HubError::InvalidTransition(format!(
                "cannot review a task that is {}",
                task.status.label()
            )));
        }
        if approved {
            task.status = TaskStatus::Completed;
            task.progress_percentage = 100;
            task.completed_at = Some(now);
        } else {
            task.status = TaskStatus::Rejected;
            task.progress_percentage = REJECTED_PROGRESS;
        }
        Ok(task)
    }

    /// REJECTED → IN_PROGRESS, progress left as the review set it.
    /// Assignee only.
    pub fn restart(&mut self, id: &str, actor: &str) -> Result<&Task> {
        let task = self.get_mut(id)?;
        ensure_assignee(task, actor, "restart")?;
        if task.status != TaskStatus::Rejected {
            return Err(HubError::InvalidTransition(format!(
                "only rejected tasks can be restarted, this one is {}",
                task.status.label()
            )));
        }
        task.status = TaskStatus::InProgress;
        Ok(task)
    }
}

fn ensure_assignee(task: &Task, actor: &str, verb: &str) -> Result<()> {
    match task.assignee_id() {
        Some(id) if id == actor => Ok(()),
        _ => Err(HubError::PermissionDenied(format!(
            "only the assignee can {verb} task '{}'",
            task.title
        ))),
    }
}

fn ensure_project_leader(task: &Task, actor: &str) -> Result<()> {
    match task.project_leader_id() {
        Some(id) if id == actor => Ok(()),
        _ => Err(HubError::PermissionDenied(format!(
            "only the project leader can review task '{}'",
            task.title
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProjectRef, UserRef};

    const ASSIGNEE: &str = "u1";
    const LEADER: &str = "u9";

    fn user(id: &str) -> UserRef {
        UserRef {
            id: id.to_string(),
            username: format!("user-{id}"),
            full_name: None,
        }
    }

    fn task(id: &str, status: TaskStatus, priority: Priority, progress: u8) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            description: None,
            status,
            priority,
            progress_percentage: progress,
            assignee: Some(user(ASSIGNEE)),
            project: Some(ProjectRef {
                id: "p1".to_string(),
                name: "Web Development".to_string(),
                leader: Some(user(LEADER)),
            }),
            due_date: None,
            created_at: None,
            completed_at: None,
            credit_points: 10,
        }
    }

    fn board() -> TaskBoard {
        TaskBoard::new(vec![
            task("1", TaskStatus::ToDo, Priority::High, 0),
            task("2", TaskStatus::Pending, Priority::Low, 0),
            task("3", TaskStatus::InProgress, Priority::Medium, 40),
            task("4", TaskStatus::UnderReview, Priority::High, 100),
            task("5", TaskStatus::Completed, Priority::Low, 100),
            task("6", TaskStatus::Rejected, Priority::Medium, 75),
        ])
    }

    #[test]
    fn all_filter_is_identity() {
        let b = board();
        let filtered = b.filtered(&TaskFilter::default());
        assert_eq!(filtered.len(), b.tasks().len());
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn pending_filter_matches_both_spellings() {
        let b = board();
        let filter = TaskFilter {
            status: StatusFilter::Pending,
            ..TaskFilter::default()
        };
        let ids: Vec<&str> = b.filtered(&filter).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn filters_combine_and_preserve_order() {
        let b = board();
        let filter = TaskFilter {
            status: StatusFilter::All,
            priority: PriorityFilter::High,
        };
        let ids: Vec<&str> = b.filtered(&filter).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "4"]);
    }

    #[test]
    fn counts_by_status() {
        let counts = board().counts();
        assert_eq!(
            counts,
            StatusCounts {
                total: 6,
                pending: 2,
                in_progress: 1,
                under_review: 1,
                completed: 1,
                rejected: 1,
            }
        );
    }

    #[test]
    fn full_lifecycle_to_completion() {
        let mut b = TaskBoard::new(vec![task("1", TaskStatus::ToDo, Priority::Medium, 0)]);

        let t = b.start("1", ASSIGNEE).unwrap();
        assert_eq!(t.status, TaskStatus::InProgress);

        let t = b.update_progress("1", 100, ASSIGNEE).unwrap();
        assert_eq!(t.status, TaskStatus::InProgress);
        assert_eq!(t.progress_percentage, 100);

        let t = b.submit("1", ASSIGNEE).unwrap();
        assert_eq!(t.status, TaskStatus::UnderReview);

        let now = Utc::now();
        let t = b.review("1", true, LEADER, now).unwrap();
        assert_eq!(t.status, TaskStatus::Completed);
        assert_eq!(t.progress_percentage, 100);
        assert_eq!(t.completed_at, Some(now));
    }

    #[test]
    fn submit_rejected_below_full_progress() {
        let mut b = TaskBoard::new(vec![task("1", TaskStatus::InProgress, Priority::Low, 80)]);
        let err = b.submit("1", ASSIGNEE).unwrap_err();
        assert!(matches!(err, HubError::InvalidTransition(_)));
        // No state change.
        let t = b.get("1").unwrap();
        assert_eq!(t.status, TaskStatus::InProgress);
        assert_eq!(t.progress_percentage, 80);
    }

    #[test]
    fn rejection_resets_progress_to_75() {
        for prior in [10u8, 100] {
            let mut b = TaskBoard::new(vec![task("1", TaskStatus::UnderReview, Priority::Low, prior)]);
            let t = b.review("1", false, LEADER, Utc::now()).unwrap();
            assert_eq!(t.status, TaskStatus::Rejected);
            assert_eq!(t.progress_percentage, REJECTED_PROGRESS);
            assert!(t.completed_at.is_none());
        }
    }

    #[test]
    fn restart_keeps_progress() {
        let mut b = TaskBoard::new(vec![task("1", TaskStatus::Rejected, Priority::Low, 75)]);
        let t = b.restart("1", ASSIGNEE).unwrap();
        assert_eq!(t.status, TaskStatus::InProgress);
        assert_eq!(t.progress_percentage, 75);
    }

    #[test]
    fn member_transitions_require_assignee() {
        let mut b = board();
        assert!(matches!(
            b.start("1", "someone-else").unwrap_err(),
            HubError::PermissionDenied(_)
        ));
        assert!(matches!(
            b.update_progress("3", 50, LEADER).unwrap_err(),
            HubError::PermissionDenied(_)
        ));
        assert!(matches!(
            b.restart("6", "intruder").unwrap_err(),
            HubError::PermissionDenied(_)
        ));
    }

    #[test]
    fn review_requires_project_leader() {
        let mut b = board();
        assert!(matches!(
            b.review("4", true, ASSIGNEE, Utc::now()).unwrap_err(),
            HubError::PermissionDenied(_)
        ));
    }

    #[test]
    fn start_rejected_when_already_running() {
        let mut b = board();
        assert!(matches!(
            b.start("3", ASSIGNEE).unwrap_err(),
            HubError::InvalidTransition(_)
        ));
    }

    #[test]
    fn progress_bounds_checked() {
        let mut b = board();
        assert!(matches!(
            b.update_progress("3", 101, ASSIGNEE).unwrap_err(),
            HubError::Validation(_)
        ));
    }

    #[test]
    fn unknown_task_id() {
        let mut b = board();
        assert!(matches!(
            b.start("nope", ASSIGNEE).unwrap_err(),
            HubError::TaskNotFound(_)
        ));
    }

    #[test]
    fn replace_swaps_by_id() {
        let mut b = board();
        let mut updated = task("3", TaskStatus::UnderReview, Priority::Medium, 100);
        updated.title = "task 3 (updated)".to_string();
        b.replace(updated);
        assert_eq!(b.get("3").unwrap().status, TaskStatus::UnderReview);
        assert_eq!(b.tasks().len(), 6);
    }
}
