//! External listing-callback interface. The core never walks a working
//! copy itself; a collaborator drives the walk and reports each entry
//! through a [`DirEntryListener`], kept as a plain trait rather than a
//! global registration table.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::Result;

/// What kind of object a listed entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
    Symlink,
}

/// A lock record attached to an entry, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockInfo {
    pub owner: String,
    pub comment: Option<String>,
}

/// One directory entry as reported to a [`DirEntryListener`].
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub abs_path: PathBuf,
    pub node_kind: NodeKind,
    pub size: u64,
    pub has_props: bool,
    pub last_changed_rev: Option<u64>,
    pub last_changed_time: Option<DateTime<Utc>>,
    pub last_author: Option<String>,
    pub lock: Option<LockInfo>,
}

/// Receives entries as a listing walk progresses. The core never retains
/// reported records; it is purely a callback sink.
pub trait DirEntryListener {
    /// Report one entry. Returning `Err` aborts the listing.
    fn on_entry(&mut self, entry: &DirEntry) -> Result<()>;
}

/// A listener that collects every reported entry, useful for tests and
/// small callers that don't need streaming behavior.
#[derive(Debug, Default)]
pub struct CollectingListener {
    pub entries: Vec<DirEntry>,
}

impl DirEntryListener for CollectingListener {
    fn on_entry(&mut self, entry: &DirEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}
