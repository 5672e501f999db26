//! Task use-case service.
//!
//! # Responsibility
//! - Create, list, complete and patch tasks.
//! - Build the daily agenda buckets.
//!
//! # Invariants
//! - Due dates pass through the date normalizer on create and update.
//! - `complete` and status patches keep `completed_at` in step with
//!   `status == completed`.
//! - List results are ordered by [`sort_tasks`].
//!
//! # See also
//! - `model::task` for the filter and patch shapes.

use crate::model::task::{
    sort_tasks, DailyAgenda, NewTask, Task, TaskFilter, TaskPatch, TaskStatus,
};
use crate::model::{tags_overlap, RecordId};
use crate::repo::json_store::{
    allocate_id, Collection, CollectionRepository, StoreError, StoreResult,
};
use crate::time::clock::Clock;
use crate::time::dates::{format_timestamp, normalize_date, today};
use log::info;

const UPCOMING_AGENDA_LIMIT: usize = 5;

/// Task service facade over a collection repository.
pub struct TaskService<'a, R: CollectionRepository> {
    repo: &'a R,
    clock: &'a dyn Clock,
}

impl<'a, R: CollectionRepository> TaskService<'a, R> {
    pub fn new(repo: &'a R, clock: &'a dyn Clock) -> Self {
        Self { repo, clock }
    }

    /// Creates a pending task and persists it.
    ///
    /// # Contract
    /// - Priority defaults to `medium`, tags default to `[]`.
    /// - `due_date` is normalized when present.
    pub fn create(&self, request: NewTask) -> StoreResult<Task> {
        let now = self.clock.now();
        let task = self.repo.update(Collection::Tasks, |tasks: &mut Vec<Task>| {
            let task = Task {
                id: allocate_id(Collection::Tasks, tasks)?,
                title: request.title,
                description: request.description,
                status: TaskStatus::Pending,
                priority: request.priority.unwrap_or_default(),
                due_date: request
                    .due_date
                    .as_deref()
                    .map(|value| normalize_date(value, now)),
                assignee: request.assignee,
                tags: request.tags.unwrap_or_default(),
                created_at: format_timestamp(now),
                completed_at: None,
            };
            tasks.push(task.clone());
            Ok(task)
        })?;

        info!(
            "event=task_create module=service status=ok task_id={}",
            task.id
        );
        Ok(task)
    }

    /// Lists tasks matching every set filter, ordered by priority then due date.
    pub fn list(&self, filter: &TaskFilter) -> Vec<Task> {
        let now = self.clock.now();
        let cutoff = filter
            .due_before
            .as_deref()
            .map(|value| normalize_date(value, now));
        let wanted_tags = filter.tags.as_deref().filter(|tags| !tags.is_empty());

        let matching = self
            .repo
            .load::<Task>(Collection::Tasks)
            .into_iter()
            .filter(|task| filter.status.map_or(true, |status| task.status == status))
            .filter(|task| {
                filter
                    .priority
                    .map_or(true, |priority| task.priority == priority)
            })
            .filter(|task| match cutoff.as_deref() {
                Some(bound) => task
                    .due_date
                    .as_deref()
                    .is_some_and(|due| due <= bound),
                None => true,
            })
            .filter(|task| match filter.assignee.as_deref() {
                Some(assignee) => task.assignee.as_deref() == Some(assignee),
                None => true,
            })
            .filter(|task| wanted_tags.map_or(true, |tags| tags_overlap(&task.tags, tags)))
            .collect();

        sort_tasks(matching)
    }

    /// Gets one task by id.
    pub fn get(&self, id: RecordId) -> Option<Task> {
        self.repo
            .load::<Task>(Collection::Tasks)
            .into_iter()
            .find(|task| task.id == id)
    }

    /// Marks a task completed and stamps `completed_at` with the current time.
    ///
    /// Calling this again keeps the status and refreshes `completed_at`.
    pub fn complete(&self, id: RecordId) -> StoreResult<Task> {
        let completed_at = format_timestamp(self.clock.now());
        let task = self.repo.update(Collection::Tasks, |tasks: &mut Vec<Task>| {
            let task = find_task_mut(tasks, id)?;
            task.status = TaskStatus::Completed;
            task.completed_at = Some(completed_at);
            Ok(task.clone())
        })?;

        info!(
            "event=task_complete module=service status=ok task_id={}",
            task.id
        );
        Ok(task)
    }

    /// Applies a partial update field-by-field.
    ///
    /// # Contract
    /// - `due_date` is re-normalized when present in the patch.
    /// - Patching status to `completed` stamps `completed_at` if unset;
    ///   patching to any other status clears it.
    pub fn update(&self, id: RecordId, patch: TaskPatch) -> StoreResult<Task> {
        let now = self.clock.now();
        let task = self.repo.update(Collection::Tasks, |tasks: &mut Vec<Task>| {
            let task = find_task_mut(tasks, id)?;
            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = Some(description);
            }
            if let Some(due_date) = patch.due_date.as_deref() {
                task.due_date = Some(normalize_date(due_date, now));
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(assignee) = patch.assignee {
                task.assignee = Some(assignee);
            }
            if let Some(tags) = patch.tags {
                task.tags = tags;
            }
            if let Some(status) = patch.status {
                task.status = status;
                if status == TaskStatus::Completed {
                    if task.completed_at.is_none() {
                        task.completed_at = Some(format_timestamp(now));
                    }
                } else {
                    task.completed_at = None;
                }
            }
            Ok(task.clone())
        })?;

        info!(
            "event=task_update module=service status=ok task_id={}",
            task.id
        );
        Ok(task)
    }

    /// Splits open tasks into due-on, overdue and upcoming buckets.
    ///
    /// `date` defaults to today and is normalized when given. Upcoming keeps
    /// the first five matches in collection order.
    pub fn daily_agenda(&self, date: Option<&str>) -> DailyAgenda {
        let now = self.clock.now();
        let target = match date {
            Some(value) => normalize_date(value, now),
            None => today(now),
        };

        let mut agenda = DailyAgenda::default();
        for task in self.repo.load::<Task>(Collection::Tasks) {
            if task.status == TaskStatus::Completed {
                continue;
            }
            let Some(due) = task.due_date.as_deref() else {
                continue;
            };
            match due.cmp(target.as_str()) {
                std::cmp::Ordering::Equal => agenda.tasks.push(task),
                std::cmp::Ordering::Less => agenda.overdue.push(task),
                std::cmp::Ordering::Greater => {
                    if agenda.upcoming.len() < UPCOMING_AGENDA_LIMIT {
                        agenda.upcoming.push(task);
                    }
                }
            }
        }
        agenda
    }
}

fn find_task_mut(tasks: &mut [Task], id: RecordId) -> StoreResult<&mut Task> {
    tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or(StoreError::NotFound {
            collection: Collection::Tasks,
            id,
        })
}
