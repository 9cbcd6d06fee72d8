//! Reading and writing documentation files.
//!
//! Loading never fails: a missing file is an empty corpus, and an unreadable or
//! malformed one is logged then treated as empty. Writing is fatal on error, and
//! replaces the destination atomically (uniquely named temporary sibling, `fsync`,
//! rename), so a failed write leaves the previous documentation intact and parallel
//! writers never share a temporary file.
//!
//! Concurrent processes writing the same file are last-write-wins.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::yaml::from_yaml;
use crate::{DocsError, DocumentStore, GroupedStore, ToYaml};

mod naming;
pub use self::naming::{ControllerFileNaming, FileNaming};

/// Loads the examples of one controller file.
///
/// Records written by older layouts without `action` get it from their position.
pub fn load(path: &Path) -> DocumentStore {
    let mut store: DocumentStore = read_or_default(path);
    store.backfill(None);
    store
}

/// Loads a legacy file holding every controller (`controller → action → fingerprint → record`).
pub fn load_grouped(path: &Path) -> GroupedStore {
    let mut grouped: GroupedStore = read_or_default(path);
    grouped.backfill();
    grouped
}

/// Writes the examples of one controller, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`DocsError::YamlError`] if the store cannot be serialized and
/// [`DocsError::WriteFailure`] if a directory or the file cannot be written.
pub fn write(path: &Path, store: &DocumentStore) -> Result<(), DocsError> {
    let yaml = store.to_yaml().map_err(|err| DocsError::YamlError {
        error: format!("{err:#?}"),
    })?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DocsError::WriteFailure {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    write_replacing(path, yaml.as_bytes()).map_err(|source| DocsError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), records = store.len(), "documentation written");
    Ok(())
}

/// Loads every documentation file of `directory`, in file name order.
///
/// Files not recognized by `naming` are ignored; a missing directory yields an empty store.
pub fn load_all(directory: &Path, naming: &dyn FileNaming) -> GroupedStore {
    let mut grouped = GroupedStore::new();

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %directory.display(), "no documentation directory yet");
            return grouped;
        }
        Err(err) => {
            warn!(path = %directory.display(), %err, "cannot list documentation directory, starting empty");
            return grouped;
        }
    };

    let mut files: Vec<(String, String)> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|file_type| file_type.is_file()))
        .filter_map(|entry| {
            let file_name = entry.file_name().into_string().ok()?;
            let controller = naming.controller_for(&file_name)?;
            Some((file_name, controller))
        })
        .collect();
    files.sort();

    for (file_name, controller) in files {
        let mut store: DocumentStore = read_or_default(&directory.join(&file_name));
        store.backfill(Some(&controller));
        grouped.insert_group(controller, store);
    }

    debug!(path = %directory.display(), records = grouped.len(), "documentation loaded");
    grouped
}

/// Writes one file per controller of `grouped`.
///
/// Empty groups are skipped so that an unreadable file is not replaced by an empty one.
///
/// # Errors
///
/// Stops at the first failing [`write`].
pub fn write_all(
    directory: &Path,
    grouped: &GroupedStore,
    naming: &dyn FileNaming,
) -> Result<(), DocsError> {
    for (controller, store) in grouped.groups() {
        if store.is_empty() {
            debug!(controller, "nothing to write");
            continue;
        }
        write(&directory.join(naming.file_name(controller)), store)?;
    }
    Ok(())
}

/// Documentation directory together with its naming strategy.
///
/// # Example
///
/// ```rust,no_run
/// use apidocs_core::persist::DocsGateway;
///
/// # fn main() -> Result<(), apidocs_core::DocsError> {
/// let gateway = DocsGateway::new("doc/api");
///
/// let users = gateway.load_group("users");
/// // ... merge new examples ...
/// gateway.write_group("users", &users)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DocsGateway {
    docs_path: PathBuf,
    naming: Box<dyn FileNaming>,
}

impl DocsGateway {
    /// Creates a gateway using [`ControllerFileNaming`].
    pub fn new(docs_path: impl Into<PathBuf>) -> Self {
        Self {
            docs_path: docs_path.into(),
            naming: Box::new(ControllerFileNaming::default()),
        }
    }

    /// Replaces the naming strategy.
    pub fn with_naming(self, naming: impl FileNaming + 'static) -> Self {
        self.with_boxed_naming(Box::new(naming))
    }

    pub(crate) fn with_boxed_naming(mut self, naming: Box<dyn FileNaming>) -> Self {
        self.naming = naming;
        self
    }

    /// The documentation directory.
    pub fn docs_path(&self) -> &Path {
        &self.docs_path
    }

    /// Path of the file holding `controller`.
    pub fn file_path(&self, controller: &str) -> PathBuf {
        self.docs_path.join(self.naming.file_name(controller))
    }

    /// Loads the examples of `controller`.
    pub fn load_group(&self, controller: &str) -> DocumentStore {
        let mut store: DocumentStore = read_or_default(&self.file_path(controller));
        store.backfill(Some(controller));
        store
    }

    /// Writes the examples of `controller`.
    ///
    /// # Errors
    ///
    /// See [`write`].
    pub fn write_group(&self, controller: &str, store: &DocumentStore) -> Result<(), DocsError> {
        write(&self.file_path(controller), store)
    }

    /// Loads every controller file.
    pub fn load_all(&self) -> GroupedStore {
        load_all(&self.docs_path, self.naming.as_ref())
    }

    /// Writes every non-empty controller group.
    ///
    /// # Errors
    ///
    /// See [`write_all`].
    pub fn write_all(&self, grouped: &GroupedStore) -> Result<(), DocsError> {
        write_all(&self.docs_path, grouped, self.naming.as_ref())
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no documentation file yet");
            return T::default();
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "cannot read documentation file, starting empty");
            return T::default();
        }
    };

    if content.trim().is_empty() {
        return T::default();
    }

    match from_yaml(&content) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed documentation file, starting empty");
            T::default()
        }
    }
}

/// Writes `content` to a uniquely named hidden sibling, then renames it over `path`.
///
/// The temporary file is removed on drop when anything fails before the rename.
fn write_replacing(path: &Path, content: &[u8]) -> io::Result<()> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(directory)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
