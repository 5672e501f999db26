#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use daybook_core::{Collection, FixedClock, JsonStore, StoreConfig};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct Fixture {
    pub dir: TempDir,
    pub store: JsonStore,
    pub clock: FixedClock,
}

impl Fixture {
    pub fn document(&self, collection: Collection) -> PathBuf {
        self.store.document_path(collection)
    }

    pub fn read_document(&self, collection: Collection) -> String {
        std::fs::read_to_string(self.document(collection)).unwrap()
    }
}

/// Fresh store in a temp dir with the clock pinned to 2025-10-06 09:30 UTC.
pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open(StoreConfig::new(dir.path().join("data"))).unwrap();
    let clock = FixedClock::new(at(2025, 10, 6, 9, 30));
    Fixture { dir, store, clock }
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}
