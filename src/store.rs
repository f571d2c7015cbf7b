use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::Context;

use crate::dedup::{dedup_users, DedupReport};
use crate::model::{now_timestamp, RootDocument};

pub const DATA_FILE: &str = "messmate-data.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    Save,
    Refresh,
}

impl ChangeOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeOrigin::Save => "save",
            ChangeOrigin::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub origin: ChangeOrigin,
    pub last_updated: Option<String>,
}

type Observer = Box<dyn Fn(&ChangeEvent) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    Idle,
    Reloading,
}

/// Whole-document store over one JSON file in the workspace.
///
/// Every mutation is load-modify-save of the full document. The document
/// lives behind a mutex so each accessor is one critical section in this
/// process; concurrent writers in *other* processes sharing the file remain
/// last-writer-wins with no transaction. That is a documented limitation of
/// the storage format, kept intentionally.
pub struct Store {
    path: PathBuf,
    doc: Mutex<RootDocument>,
    observers: Mutex<Vec<Observer>>,
    sync: Mutex<SyncState>,
}

// A poisoned mutex only means another accessor panicked mid-flight; the
// document itself is still the last consistent value, so recover it.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// Fail-soft read: an absent, unreadable, or unparseable file yields an
/// empty document. Callers are never blocked by a corrupt store.
fn load_document(path: &Path) -> RootDocument {
    match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
        Err(_) => RootDocument::default(),
    }
}

impl Store {
    /// Opens the workspace, loads the document, and runs the deduplication
    /// pass over the user collection. If duplicates were dropped the cleaned
    /// document is persisted immediately (a write-back during what looks
    /// like a read; the legacy dashboards did the same at init).
    pub fn open(workspace: &Path) -> anyhow::Result<(Store, DedupReport)> {
        fs::create_dir_all(workspace)
            .with_context(|| format!("failed to create workspace {}", workspace.display()))?;
        let path = workspace.join(DATA_FILE);

        let mut doc = load_document(&path);
        let report = dedup_users(&mut doc.users);
        let store = Store {
            path,
            doc: Mutex::new(doc),
            observers: Mutex::new(Vec::new()),
            sync: Mutex::new(SyncState::Idle),
        };
        if report.removed() > 0 {
            let mut doc = lock(&store.doc);
            store.persist(&mut doc)?;
        }
        Ok((store, report))
    }

    /// Read access to the current document.
    pub fn with<T>(&self, f: impl FnOnce(&RootDocument) -> T) -> T {
        f(&lock(&self.doc))
    }

    /// One load-modify-save unit. If `f` rejects the change the document is
    /// untouched and nothing is written; on success `lastUpdated` is stamped
    /// and the whole document is rewritten, then observers fire.
    ///
    /// Outer error is storage I/O; inner is the domain rejection.
    pub fn mutate<T, E>(
        &self,
        f: impl FnOnce(&mut RootDocument) -> Result<T, E>,
    ) -> anyhow::Result<Result<T, E>> {
        let mut doc = lock(&self.doc);
        match f(&mut doc) {
            Ok(value) => {
                self.persist(&mut doc)?;
                let event = ChangeEvent {
                    origin: ChangeOrigin::Save,
                    last_updated: doc.last_updated.clone(),
                };
                drop(doc);
                self.notify(&event);
                Ok(Ok(value))
            }
            Err(rejection) => Ok(Err(rejection)),
        }
    }

    /// Registers an on-change callback, fired after every successful save
    /// and after every refresh. Keeps rendering concerns out of the store.
    pub fn subscribe(&self, f: impl Fn(&ChangeEvent) + Send + 'static) {
        lock(&self.observers).push(Box::new(f));
    }

    /// Reload after an external write to the data file (the storage-event
    /// analogue). idle -> reloading -> idle; a refresh arriving while one is
    /// already in flight is answered without re-entering the load.
    pub fn refresh(&self) -> anyhow::Result<DedupReport> {
        {
            let mut state = lock(&self.sync);
            if *state == SyncState::Reloading {
                return Ok(DedupReport::default());
            }
            *state = SyncState::Reloading;
        }

        let mut fresh = load_document(&self.path);
        let report = dedup_users(&mut fresh.users);
        let result: anyhow::Result<ChangeEvent> = (|| {
            let mut doc = lock(&self.doc);
            *doc = fresh;
            if report.removed() > 0 {
                self.persist(&mut doc)?;
            }
            Ok(ChangeEvent {
                origin: ChangeOrigin::Refresh,
                last_updated: doc.last_updated.clone(),
            })
        })();

        *lock(&self.sync) = SyncState::Idle;
        let event = result?;
        self.notify(&event);
        Ok(report)
    }

    pub fn last_updated(&self) -> Option<String> {
        lock(&self.doc).last_updated.clone()
    }

    fn persist(&self, doc: &mut RootDocument) -> anyhow::Result<()> {
        doc.last_updated = Some(now_timestamp());
        let text =
            serde_json::to_string_pretty(&*doc).context("failed to serialize data document")?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    fn notify(&self, event: &ChangeEvent) {
        for observer in lock(&self.observers).iter() {
            observer(event);
        }
    }
}
