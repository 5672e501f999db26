//! Domain records for the daybook collections.
//!
//! # Responsibility
//! - Define the persisted shape of tasks, notes, expenses, events and
//!   reminders.
//! - Define typed create/patch/filter requests accepted by services.
//!
//! # Invariants
//! - Every record carries an integer id unique within its own collection.
//! - Records never reference each other by id.

pub mod event;
pub mod expense;
pub mod note;
pub mod reminder;
pub mod task;

/// Per-collection record identifier.
pub type RecordId = u64;

/// Common identity accessor for persisted records.
pub trait Record {
    fn id(&self) -> RecordId;
}

/// Returns the id for the next record appended to `records`.
///
/// Ids are `max + 1` over the existing collection, or `1` when empty.
/// Returns `None` once a hand-edited document holds `RecordId::MAX`.
pub fn next_record_id<R: Record>(records: &[R]) -> Option<RecordId> {
    match records.iter().map(Record::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Returns whether two tag lists share at least one value.
pub(crate) fn tags_overlap(record_tags: &[String], wanted: &[String]) -> bool {
    wanted.iter().any(|tag| record_tags.contains(tag))
}

#[cfg(test)]
mod tests {
    use super::{next_record_id, tags_overlap, Record, RecordId};

    struct Stub(RecordId);

    impl Record for Stub {
        fn id(&self) -> RecordId {
            self.0
        }
    }

    #[test]
    fn next_id_starts_at_one_and_follows_max() {
        assert_eq!(next_record_id::<Stub>(&[]), Some(1));
        assert_eq!(next_record_id(&[Stub(3), Stub(9), Stub(4)]), Some(10));
    }

    #[test]
    fn next_id_refuses_to_wrap_past_max() {
        assert_eq!(next_record_id(&[Stub(1), Stub(RecordId::MAX)]), None);
        assert_eq!(next_record_id(&[Stub(RecordId::MAX - 1)]), Some(RecordId::MAX));
    }

    #[test]
    fn tags_overlap_requires_shared_value() {
        let tags = vec!["demo".to_string(), "urgent".to_string()];
        assert!(tags_overlap(&tags, &["urgent".to_string()]));
        assert!(!tags_overlap(&tags, &["later".to_string()]));
        assert!(!tags_overlap(&[], &["demo".to_string()]));
    }
}
