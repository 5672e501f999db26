//! Calendar event use-case service.
//!
//! # Invariants
//! - Start and end times are stored as canonical timestamps; unparseable
//!   input is stored as the `Invalid Date` marker without raising.
//! - Events whose start time cannot be parsed never appear in time-window
//!   queries.

use crate::model::event::{CalendarEvent, NewEvent};
use crate::repo::json_store::{allocate_id, Collection, CollectionRepository, StoreResult};
use crate::time::clock::Clock;
use crate::time::dates::{
    format_timestamp, normalize_timestamp, parse_timestamp, timestamp_on_date, today,
};
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};

/// Look-ahead window used when the caller does not pick one.
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

/// Calendar event service facade over a collection repository.
pub struct EventService<'a, R: CollectionRepository> {
    repo: &'a R,
    clock: &'a dyn Clock,
}

impl<'a, R: CollectionRepository> EventService<'a, R> {
    pub fn new(repo: &'a R, clock: &'a dyn Clock) -> Self {
        Self { repo, clock }
    }

    /// Schedules one event.
    pub fn create(&self, request: NewEvent) -> StoreResult<CalendarEvent> {
        let now = self.clock.now();
        let event = self
            .repo
            .update(Collection::Events, |events: &mut Vec<CalendarEvent>| {
                let event = CalendarEvent {
                    id: allocate_id(Collection::Events, events)?,
                    title: request.title,
                    description: request.description,
                    start_time: normalize_timestamp(&request.start_time),
                    end_time: request.end_time.as_deref().map(normalize_timestamp),
                    location: request.location,
                    attendees: request.attendees,
                    created_at: format_timestamp(now),
                };
                events.push(event.clone());
                Ok(event)
            })?;

        if parse_timestamp(&event.start_time).is_none() {
            warn!(
                "event=event_create module=service status=degraded event_id={} reason=invalid_start_time",
                event.id
            );
        } else {
            info!(
                "event=event_create module=service status=ok event_id={}",
                event.id
            );
        }
        Ok(event)
    }

    /// Events starting within `[now, now + days]`, earliest first.
    pub fn list_upcoming(&self, days: i64) -> Vec<CalendarEvent> {
        if days < 0 {
            return Vec::new();
        }
        let now = self.clock.now();
        let horizon = Duration::try_days(days)
            .and_then(|window| now.checked_add_signed(window))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut upcoming: Vec<_> = self
            .repo
            .load::<CalendarEvent>(Collection::Events)
            .into_iter()
            .filter_map(|event| {
                let start = parse_timestamp(&event.start_time)?;
                (start >= now && start <= horizon).then_some((start, event))
            })
            .collect();
        upcoming.sort_by_key(|(start, _)| *start);
        upcoming.into_iter().map(|(_, event)| event).collect()
    }

    /// Events starting on the current calendar date, earliest first.
    pub fn today_events(&self) -> Vec<CalendarEvent> {
        self.events_on(&today(self.clock.now()))
    }

    /// Events starting on a canonical `YYYY-MM-DD` date, earliest first.
    pub fn events_on(&self, date: &str) -> Vec<CalendarEvent> {
        let mut events: Vec<_> = self
            .repo
            .load::<CalendarEvent>(Collection::Events)
            .into_iter()
            .filter(|event| timestamp_on_date(&event.start_time, date))
            .collect();
        events.sort_by_key(|event| parse_timestamp(&event.start_time));
        events
    }
}
