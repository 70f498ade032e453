//! Shared test utilities: a simulated filesystem for driving the walk.
//!
//! [`SimFileSystem`] implements [`FileSystemAccess`] over an in-memory tree
//! of [`SimEntry`] nodes with a frozen clock, so traversal tests control
//! listing order, modification times, and "today" exactly.

use crate::fsaccess::FileSystemAccess;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::io;

/// The simulated today: 2026-03-20.
pub fn sim_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()
}

/// Midnight on the given day, for modification times.
pub fn sim_date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_time(NaiveTime::MIN)
}

/// One node of a simulated tree: a file, or a directory with children.
#[derive(Debug, Clone)]
pub struct SimEntry {
    pub name: String,
    pub modified: NaiveDateTime,
    pub children: Option<Vec<SimEntry>>,
}

impl SimEntry {
    /// A file modified shortly before [`sim_today`].
    pub fn file(name: &str) -> Self {
        Self::file_dated(name, sim_date(2026, 3, 1))
    }

    pub fn file_dated(name: &str, modified: NaiveDateTime) -> Self {
        Self {
            name: name.to_string(),
            modified,
            children: None,
        }
    }

    pub fn dir(name: &str, children: Vec<SimEntry>) -> Self {
        Self {
            name: name.to_string(),
            modified: sim_date(2026, 3, 1),
            children: Some(children),
        }
    }
}

/// In-memory [`FileSystemAccess`] rooted at an anonymous top directory.
///
/// Paths are the slash-joined entry names relative to the root; the empty
/// path is the root itself. Listings preserve the order entries were built
/// in.
pub struct SimFileSystem {
    entries: Vec<SimEntry>,
    today: NaiveDate,
}

impl SimFileSystem {
    pub fn new(entries: Vec<SimEntry>) -> Self {
        Self {
            entries,
            today: sim_today(),
        }
    }

    fn find(&self, path: &str) -> Option<&SimEntry> {
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        let first = segments.next()?;
        let mut current = self.entries.iter().find(|entry| entry.name == first)?;
        for segment in segments {
            current = current
                .children
                .as_ref()?
                .iter()
                .find(|entry| entry.name == segment)?;
        }
        Some(current)
    }

    fn not_found(path: &str) -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, format!("no such entry: {path}"))
    }
}

impl FileSystemAccess for SimFileSystem {
    fn list_dir(&self, path: &str) -> io::Result<Vec<String>> {
        let children = if path.is_empty() {
            &self.entries
        } else {
            self.find(path)
                .and_then(|entry| entry.children.as_ref())
                .ok_or_else(|| Self::not_found(path))?
        };
        Ok(children.iter().map(|entry| entry.name.clone()).collect())
    }

    fn is_dir(&self, path: &str) -> bool {
        self.find(path)
            .is_some_and(|entry| entry.children.is_some())
    }

    fn get_file_modification_time(&self, path: &str) -> io::Result<NaiveDateTime> {
        self.find(path)
            .map(|entry| entry.modified)
            .ok_or_else(|| Self::not_found(path))
    }

    fn current_date(&self) -> NaiveDate {
        self.today
    }
}
