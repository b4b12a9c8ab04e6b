/// Task board view-model: filter, sort, bucket
///
/// This module is the pure derivation layer behind the kanban board.
/// Given the fetched task collection and the user's filter/sort
/// selection, it produces the three status columns. No I/O, no clocks;
/// re-run it whenever the source collection or the selection changes.
///
/// # Invariant
///
/// The three buckets partition the filtered collection: every task lands
/// in exactly one, decided solely by its `status`, and relative order
/// within a bucket follows the sorted order of the input.
///
/// # Example
///
/// ```
/// use meetask_shared::board::{BoardView, SortKey, TaskFilter};
/// use meetask_shared::models::task::{Priority, Status, Task};
///
/// # fn task(id: i64, status: Status) -> Task {
/// #     Task {
/// #         id,
/// #         title: format!("task {id}"),
/// #         description: String::new(),
/// #         deadline: None,
/// #         priority: Priority::Middle,
/// #         status,
/// #         assigned_user: None,
/// #         group_id: None,
/// #         created_at: None,
/// #     }
/// # }
/// let tasks = vec![
///     task(1, Status::NotStartedYet),
///     task(2, Status::InProgress),
///     task(3, Status::Done),
/// ];
///
/// let board = BoardView::build(&tasks, &TaskFilter::default(), SortKey::PriorityDeadline);
/// assert_eq!(board.counts(), (1, 1, 1));
/// ```
use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::task::{Priority, Status, Task};

/// Filter selection for the board sidebar
///
/// Each dimension is vacuously true when its selection is empty; a task
/// must match every constrained dimension to pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Selected priorities; empty selects all
    pub priorities: HashSet<Priority>,

    /// Selected assignee member ids; empty selects all.
    /// An unassigned task never matches a non-empty selection.
    pub assignees: HashSet<i64>,

    /// Title search text; empty matches all (case-insensitive substring)
    pub title: String,
}

impl TaskFilter {
    /// Whether this filter constrains anything at all
    pub fn is_empty(&self) -> bool {
        self.priorities.is_empty() && self.assignees.is_empty() && self.title.is_empty()
    }

    /// Whether a task passes every constrained dimension
    pub fn matches(&self, task: &Task) -> bool {
        if !self.priorities.is_empty() && !self.priorities.contains(&task.priority) {
            return false;
        }

        if !self.assignees.is_empty() {
            match task.assignee_id() {
                Some(id) if self.assignees.contains(&id) => {}
                _ => return false,
            }
        }

        if !self.title.is_empty() {
            let needle = self.title.to_lowercase();
            if !task.title.to_lowercase().contains(&needle) {
                return false;
            }
        }

        true
    }

    /// Toggles a priority in or out of the selection
    pub fn toggle_priority(&mut self, priority: Priority) {
        if !self.priorities.remove(&priority) {
            self.priorities.insert(priority);
        }
    }

    /// Toggles an assignee in or out of the selection
    pub fn toggle_assignee(&mut self, member_id: i64) {
        if !self.assignees.remove(&member_id) {
            self.assignees.insert(member_id);
        }
    }
}

/// Sort order for the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Priority rank first, deadline ascending within a rank (board default)
    #[default]
    PriorityDeadline,

    /// Priority rank only; ties keep their incoming order
    Priority,

    /// Deadline ascending only; undated tasks last
    Deadline,
}

/// Ascending deadline order with undated tasks after every dated one
fn deadline_order(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stably sorts tasks in place by the given key
///
/// Priority ranks high before middle before low, with unset priorities
/// last. Whenever the key consults the deadline, undated tasks sort
/// after all dated ones.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::PriorityDeadline => tasks.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then_with(|| deadline_order(a.deadline, b.deadline))
        }),
        SortKey::Priority => tasks.sort_by(|a, b| a.priority.rank().cmp(&b.priority.rank())),
        SortKey::Deadline => tasks.sort_by(|a, b| deadline_order(a.deadline, b.deadline)),
    }
}

/// Per-priority totals for the filter sidebar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    /// Tasks with high priority
    pub high: usize,

    /// Tasks with middle priority
    pub middle: usize,

    /// Tasks with low priority
    pub low: usize,

    /// Tasks whose priority was never set
    pub unset: usize,
}

impl PriorityCounts {
    /// Tallies priorities from any iterator (tasks, drafts, ...)
    pub fn tally(priorities: impl IntoIterator<Item = Priority>) -> Self {
        let mut counts = PriorityCounts::default();
        for priority in priorities {
            match priority {
                Priority::High => counts.high += 1,
                Priority::Middle => counts.middle += 1,
                Priority::Low => counts.low += 1,
                Priority::NotSet => counts.unset += 1,
            }
        }
        counts
    }

    /// Count for one priority value
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Middle => self.middle,
            Priority::Low => self.low,
            Priority::NotSet => self.unset,
        }
    }

    /// Total across all priorities
    pub fn total(&self) -> usize {
        self.high + self.middle + self.low + self.unset
    }
}

/// The three kanban columns, derived from one filtered, sorted collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardView {
    /// Tasks in `not-started-yet`
    pub not_started: Vec<Task>,

    /// Tasks in `in-progress`
    pub in_progress: Vec<Task>,

    /// Tasks in `done`
    pub done: Vec<Task>,
}

impl BoardView {
    /// Filters, sorts, and partitions the task collection
    ///
    /// An empty collection (or a filter nothing passes) yields three
    /// empty buckets.
    pub fn build(tasks: &[Task], filter: &TaskFilter, sort: SortKey) -> Self {
        let mut matched: Vec<Task> = tasks.iter().filter(|t| filter.matches(t)).cloned().collect();
        sort_tasks(&mut matched, sort);

        let mut board = BoardView::default();
        for task in matched {
            board.bucket_mut(task.status).push(task);
        }
        board
    }

    fn bucket_mut(&mut self, status: Status) -> &mut Vec<Task> {
        match status {
            Status::NotStartedYet => &mut self.not_started,
            Status::InProgress => &mut self.in_progress,
            Status::Done => &mut self.done,
        }
    }

    /// The tasks in one column
    pub fn bucket(&self, status: Status) -> &[Task] {
        match status {
            Status::NotStartedYet => &self.not_started,
            Status::InProgress => &self.in_progress,
            Status::Done => &self.done,
        }
    }

    /// Column sizes as `(not_started, in_progress, done)`
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.not_started.len(),
            self.in_progress.len(),
            self.done.len(),
        )
    }

    /// Total tasks across all columns
    pub fn total(&self) -> usize {
        self.not_started.len() + self.in_progress.len() + self.done.len()
    }

    /// Whether every column is empty
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::AssignedUser;

    fn task(id: i64, priority: Priority, status: Status, deadline: Option<&str>) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: String::new(),
            deadline: deadline.map(|d| d.parse().unwrap()),
            priority,
            status,
            assigned_user: None,
            group_id: Some(7),
            created_at: None,
        }
    }

    fn assigned(mut t: Task, member_id: i64) -> Task {
        t.assigned_user = Some(AssignedUser {
            id: member_id,
            user_name: format!("member {member_id}"),
            picture: String::new(),
        });
        t
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task(1, Priority::Low, Status::NotStartedYet, Some("2025-09-10")),
            assigned(
                task(2, Priority::High, Status::InProgress, Some("2025-09-01")),
                101,
            ),
            task(3, Priority::Middle, Status::Done, None),
            assigned(
                task(4, Priority::High, Status::NotStartedYet, Some("2025-08-20")),
                102,
            ),
            task(5, Priority::Middle, Status::NotStartedYet, Some("2025-09-05")),
        ]
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let tasks = sample_tasks();
        let filter = TaskFilter::default();

        let passed: Vec<_> = tasks.iter().filter(|t| filter.matches(t)).collect();
        assert_eq!(passed.len(), tasks.len());
    }

    #[test]
    fn test_filter_by_priority() {
        let tasks = sample_tasks();
        let mut filter = TaskFilter::default();
        filter.toggle_priority(Priority::High);

        let passed: Vec<_> = tasks.iter().filter(|t| filter.matches(t)).collect();
        assert_eq!(passed.len(), 2);
        assert!(passed.iter().all(|t| t.priority == Priority::High));
    }

    #[test]
    fn test_filter_by_assignee_excludes_unassigned() {
        let tasks = sample_tasks();
        let mut filter = TaskFilter::default();
        filter.toggle_assignee(101);

        let passed: Vec<_> = tasks.iter().filter(|t| filter.matches(t)).collect();
        assert_eq!(passed.len(), 1);
        assert_eq!(passed[0].id, 2);
    }

    #[test]
    fn test_filter_dimensions_are_anded() {
        let tasks = sample_tasks();
        let mut filter = TaskFilter::default();
        filter.toggle_priority(Priority::High);
        filter.toggle_assignee(102);

        let passed: Vec<_> = tasks.iter().filter(|t| filter.matches(t)).collect();
        assert_eq!(passed.len(), 1);
        assert_eq!(passed[0].id, 4);
    }

    #[test]
    fn test_filter_toggle_roundtrip() {
        let mut filter = TaskFilter::default();
        filter.toggle_priority(Priority::Low);
        assert!(!filter.is_empty());
        filter.toggle_priority(Priority::Low);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_title_search_is_case_insensitive() {
        let mut tasks = sample_tasks();
        tasks[0].title = "Write Report".to_string();

        let filter = TaskFilter {
            title: "report".to_string(),
            ..Default::default()
        };

        let passed: Vec<_> = tasks.iter().filter(|t| filter.matches(t)).collect();
        assert_eq!(passed.len(), 1);
        assert_eq!(passed[0].id, 1);
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let mut tasks = vec![
            task(1, Priority::Middle, Status::NotStartedYet, None),
            task(2, Priority::High, Status::NotStartedYet, None),
            task(3, Priority::Middle, Status::NotStartedYet, None),
            task(4, Priority::Low, Status::NotStartedYet, None),
        ];
        sort_tasks(&mut tasks, SortKey::Priority);

        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        // High first, then the two middles in their original order
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_sort_by_deadline_puts_undated_last() {
        let mut tasks = vec![
            task(1, Priority::High, Status::NotStartedYet, None),
            task(2, Priority::Low, Status::NotStartedYet, Some("2025-09-05")),
            task(3, Priority::Middle, Status::NotStartedYet, Some("2025-09-01")),
        ];
        sort_tasks(&mut tasks, SortKey::Deadline);

        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_priority_deadline_breaks_ties_by_deadline() {
        let mut tasks = vec![
            task(1, Priority::High, Status::NotStartedYet, Some("2025-09-10")),
            task(2, Priority::High, Status::NotStartedYet, Some("2025-09-01")),
            task(3, Priority::High, Status::NotStartedYet, None),
            task(4, Priority::Middle, Status::NotStartedYet, Some("2025-08-01")),
        ];
        sort_tasks(&mut tasks, SortKey::PriorityDeadline);

        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_unset_priority_ranks_last() {
        let mut tasks = vec![
            task(1, Priority::NotSet, Status::NotStartedYet, Some("2025-01-01")),
            task(2, Priority::Low, Status::NotStartedYet, None),
        ];
        sort_tasks(&mut tasks, SortKey::PriorityDeadline);

        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_board_buckets_partition_the_collection() {
        let tasks = sample_tasks();
        let board = BoardView::build(&tasks, &TaskFilter::default(), SortKey::PriorityDeadline);

        assert_eq!(board.total(), tasks.len());

        // Pairwise disjoint: every id appears exactly once across buckets
        let mut seen: Vec<i64> = board
            .not_started
            .iter()
            .chain(&board.in_progress)
            .chain(&board.done)
            .map(|t| t.id)
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), tasks.len());

        // Bucket membership is a pure function of status
        assert!(board
            .not_started
            .iter()
            .all(|t| t.status == Status::NotStartedYet));
        assert!(board
            .in_progress
            .iter()
            .all(|t| t.status == Status::InProgress));
        assert!(board.done.iter().all(|t| t.status == Status::Done));
    }

    #[test]
    fn test_board_counts_scenario() {
        // Group 7 with one task per status renders 1,1,1
        let tasks = vec![
            task(1, Priority::High, Status::NotStartedYet, None),
            task(2, Priority::Middle, Status::InProgress, None),
            task(3, Priority::Low, Status::Done, None),
        ];
        let board = BoardView::build(&tasks, &TaskFilter::default(), SortKey::PriorityDeadline);
        assert_eq!(board.counts(), (1, 1, 1));
    }

    #[test]
    fn test_empty_collection_yields_empty_buckets() {
        let board = BoardView::build(&[], &TaskFilter::default(), SortKey::Deadline);
        assert!(board.is_empty());
        assert_eq!(board.counts(), (0, 0, 0));
    }

    #[test]
    fn test_filtered_board_keeps_sorted_order_within_buckets() {
        let tasks = sample_tasks();
        let board = BoardView::build(&tasks, &TaskFilter::default(), SortKey::PriorityDeadline);

        // not_started holds ids 4 (high), 5 (middle), 1 (low)
        let ids: Vec<_> = board.not_started.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 5, 1]);
    }

    #[test]
    fn test_priority_counts_tally() {
        let tasks = sample_tasks();
        let counts = PriorityCounts::tally(tasks.iter().map(|t| t.priority));

        assert_eq!(counts.high, 2);
        assert_eq!(counts.middle, 2);
        assert_eq!(counts.low, 1);
        assert_eq!(counts.unset, 0);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.get(Priority::High), 2);
    }
}
