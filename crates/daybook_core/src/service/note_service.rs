//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/search/update APIs.
//! - Replace note tag sets and list known tags.
//!
//! # Invariants
//! - Every mutation refreshes `updated_at`.
//! - Search results are sorted by `updated_at DESC`; ties keep collection
//!   order.

use crate::model::note::{NewNote, Note, NotePatch};
use crate::model::{tags_overlap, RecordId};
use crate::repo::json_store::{
    allocate_id, Collection, CollectionRepository, StoreError, StoreResult,
};
use crate::time::clock::Clock;
use crate::time::dates::{format_timestamp, parse_timestamp};
use log::info;
use std::collections::BTreeSet;

/// Note service facade over a collection repository.
pub struct NoteService<'a, R: CollectionRepository> {
    repo: &'a R,
    clock: &'a dyn Clock,
}

impl<'a, R: CollectionRepository> NoteService<'a, R> {
    pub fn new(repo: &'a R, clock: &'a dyn Clock) -> Self {
        Self { repo, clock }
    }

    /// Creates one note. `created_at` and `updated_at` start equal.
    pub fn create(&self, request: NewNote) -> StoreResult<Note> {
        let stamp = format_timestamp(self.clock.now());
        let note = self.repo.update(Collection::Notes, |notes: &mut Vec<Note>| {
            let note = Note {
                id: allocate_id(Collection::Notes, notes)?,
                title: request.title,
                content: request.content,
                tags: request.tags.unwrap_or_default(),
                created_at: stamp.clone(),
                updated_at: stamp,
            };
            notes.push(note.clone());
            Ok(note)
        })?;

        info!(
            "event=note_create module=service status=ok note_id={}",
            note.id
        );
        Ok(note)
    }

    /// Case-insensitive substring search over title or content.
    ///
    /// When `tags` is non-empty, results must also share at least one tag.
    pub fn search(&self, query: &str, tags: Option<&[String]>) -> Vec<Note> {
        let needle = query.to_lowercase();
        let wanted_tags = tags.filter(|values| !values.is_empty());

        let mut matching: Vec<Note> = self
            .repo
            .load::<Note>(Collection::Notes)
            .into_iter()
            .filter(|note| {
                note.title.to_lowercase().contains(&needle)
                    || note.content.to_lowercase().contains(&needle)
            })
            .filter(|note| wanted_tags.map_or(true, |wanted| tags_overlap(&note.tags, wanted)))
            .collect();

        matching.sort_by(|left, right| {
            parse_timestamp(&right.updated_at).cmp(&parse_timestamp(&left.updated_at))
        });
        matching
    }

    /// Gets one note by id.
    pub fn get(&self, id: RecordId) -> Option<Note> {
        self.repo
            .load::<Note>(Collection::Notes)
            .into_iter()
            .find(|note| note.id == id)
    }

    /// Applies a partial update and refreshes `updated_at`.
    pub fn update(&self, id: RecordId, patch: NotePatch) -> StoreResult<Note> {
        let stamp = format_timestamp(self.clock.now());
        let note = self.repo.update(Collection::Notes, |notes: &mut Vec<Note>| {
            let note = notes
                .iter_mut()
                .find(|note| note.id == id)
                .ok_or(StoreError::NotFound {
                    collection: Collection::Notes,
                    id,
                })?;
            if let Some(title) = patch.title {
                note.title = title;
            }
            if let Some(content) = patch.content {
                note.content = content;
            }
            if let Some(tags) = patch.tags {
                note.tags = tags;
            }
            note.updated_at = stamp;
            Ok(note.clone())
        })?;

        info!(
            "event=note_update module=service status=ok note_id={}",
            note.id
        );
        Ok(note)
    }

    /// Replaces the full tag set of one note.
    pub fn tag(&self, id: RecordId, tags: Vec<String>) -> StoreResult<Note> {
        self.update(
            id,
            NotePatch {
                tags: Some(tags),
                ..NotePatch::default()
            },
        )
    }

    /// Returns distinct note tags sorted by name.
    pub fn list_tags(&self) -> Vec<String> {
        self.repo
            .load::<Note>(Collection::Notes)
            .into_iter()
            .flat_map(|note| note.tags)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
