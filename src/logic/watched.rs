//! Durable watched-list store.
//!
//! A [`PersistedList`] owns an ordered collection and writes it back to a
//! [`ListRepository`] on every mutation, so a reload immediately after a
//! successful `add`/`remove` reflects the new collection. The repository is
//! injected, keeping the store storage-agnostic; production uses a single
//! JSON file slot under the lists directory.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::state::WatchedEntry;

/// Persistence medium holding one named slot of serialized text.
pub trait ListRepository: Send {
    /// Read the persisted body; `Ok(None)` when the slot does not exist yet.
    fn load(&self) -> io::Result<Option<String>>;
    /// Overwrite the persisted body wholesale.
    fn save(&self, body: &str) -> io::Result<()>;
}

/// Repository backed by one JSON file on disk.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ListRepository for JsonFileRepository {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, body: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, body)
    }
}

/// Repository that never persists anything. Used until startup wires the
/// real file slot, and by tests that only need the in-memory behavior.
#[derive(Debug, Default)]
pub struct NullRepository;

impl ListRepository for NullRepository {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(None)
    }

    fn save(&self, _body: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Ordered collection synchronized with its repository on every mutation.
///
/// The collection is owned exclusively by this type; callers mutate it only
/// through `push`/`remove_where`. A failed write-back is logged and otherwise
/// ignored: the in-memory view stays authoritative for the session.
pub struct PersistedList<T> {
    repo: Box<dyn ListRepository>,
    items: Vec<T>,
}

impl<T: Serialize + DeserializeOwned> PersistedList<T> {
    /// What: Load the collection from the repository, once, at first use.
    ///
    /// Inputs:
    /// - `repo`: Persistence medium to read from and write back to.
    ///
    /// Output:
    /// - A list populated from the slot; empty when the slot is missing,
    ///   unreadable, or holds a body that fails to parse.
    pub fn load(repo: Box<dyn ListRepository>) -> Self {
        let items = match repo.load() {
            Ok(Some(body)) => match serde_json::from_str::<Vec<T>>(&body) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(error = %e, "persisted list unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "persisted list load failed, starting empty");
                Vec::new()
            }
        };
        Self { repo, items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item and write the collection back.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.persist();
    }

    /// Remove all items matching `pred`, preserving the relative order of the
    /// rest, and write the collection back when anything changed.
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !pred(item));
        let removed = before - self.items.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.items) {
            Ok(body) => {
                if let Err(e) = self.repo.save(&body) {
                    tracing::warn!(error = %e, "list write-back failed, keeping in-memory state");
                }
            }
            Err(e) => tracing::warn!(error = %e, "list serialization failed"),
        }
    }
}

/// The watched-movie collection: a persisted list with unique catalog ids.
pub struct WatchedList {
    list: PersistedList<WatchedEntry>,
}

impl Default for WatchedList {
    fn default() -> Self {
        Self {
            list: PersistedList::load(Box::new(NullRepository)),
        }
    }
}

impl WatchedList {
    /// Load the watched list from the given repository.
    pub fn load(repo: Box<dyn ListRepository>) -> Self {
        Self {
            list: PersistedList::load(repo),
        }
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        self.list.items()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.list.items().iter().any(|e| e.imdb_id == imdb_id)
    }

    /// Self-assigned rating for an already-watched title, if any.
    pub fn user_rating(&self, imdb_id: &str) -> Option<u8> {
        self.list
            .items()
            .iter()
            .find(|e| e.imdb_id == imdb_id)
            .map(|e| e.user_rating)
    }

    /// What: Append an entry, ignoring duplicates by catalog id.
    ///
    /// Inputs:
    /// - `entry`: Fully-populated watched entry.
    ///
    /// Output:
    /// - `true` when appended (and written back); `false` when an entry with
    ///   the same id already exists.
    pub fn add(&mut self, entry: WatchedEntry) -> bool {
        if self.contains(&entry.imdb_id) {
            tracing::debug!(imdb_id = %entry.imdb_id, "ignoring duplicate watched entry");
            return false;
        }
        self.list.push(entry);
        true
    }

    /// Remove the entry with the given id, preserving the order of the rest.
    pub fn remove(&mut self, imdb_id: &str) -> bool {
        self.list.remove_where(|e| e.imdb_id == imdb_id) > 0
    }
}
