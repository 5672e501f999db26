//! Reminder use-case service.
//!
//! # Invariants
//! - Reminders are created `active` and no operation here changes status.
//! - "Due" means `active` with `remind_at <= now`; reminders whose time
//!   cannot be parsed are never due.

use crate::model::reminder::{NewReminder, Reminder, ReminderStatus};
use crate::repo::json_store::{allocate_id, Collection, CollectionRepository, StoreResult};
use crate::time::clock::Clock;
use crate::time::dates::{format_timestamp, normalize_timestamp, parse_timestamp};
use log::info;

/// Reminder service facade over a collection repository.
pub struct ReminderService<'a, R: CollectionRepository> {
    repo: &'a R,
    clock: &'a dyn Clock,
}

impl<'a, R: CollectionRepository> ReminderService<'a, R> {
    pub fn new(repo: &'a R, clock: &'a dyn Clock) -> Self {
        Self { repo, clock }
    }

    /// Sets one active reminder.
    pub fn create(&self, request: NewReminder) -> StoreResult<Reminder> {
        let now = self.clock.now();
        let reminder = self
            .repo
            .update(Collection::Reminders, |reminders: &mut Vec<Reminder>| {
                let reminder = Reminder {
                    id: allocate_id(Collection::Reminders, reminders)?,
                    message: request.message,
                    remind_at: normalize_timestamp(&request.remind_at),
                    status: ReminderStatus::Active,
                    created_at: format_timestamp(now),
                };
                reminders.push(reminder.clone());
                Ok(reminder)
            })?;

        info!(
            "event=reminder_create module=service status=ok reminder_id={}",
            reminder.id
        );
        Ok(reminder)
    }

    /// Active reminders whose time has passed, earliest first.
    pub fn list_due(&self) -> Vec<Reminder> {
        let now = self.clock.now();
        let mut due: Vec<_> = self
            .repo
            .load::<Reminder>(Collection::Reminders)
            .into_iter()
            .filter(|reminder| reminder.status == ReminderStatus::Active)
            .filter_map(|reminder| {
                let remind_at = parse_timestamp(&reminder.remind_at)?;
                (remind_at <= now).then_some((remind_at, reminder))
            })
            .collect();
        due.sort_by_key(|(remind_at, _)| *remind_at);
        due.into_iter().map(|(_, reminder)| reminder).collect()
    }
}
