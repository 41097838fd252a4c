//! Single-file JSON persistence for the note tree.
//!
//! # Responsibility
//! - Map a `NoteTree` to and from one pretty-printed JSON document.
//! - Guarantee that a crash mid-save never truncates a valid document.
//!
//! # Invariants
//! - A missing document is first-run behavior, never an error.
//! - A present but unparseable document is surfaced as `Corrupt`, not
//!   silently replaced by an empty tree.
//! - Saves go through a sibling temp file and an atomic rename; the temp
//!   file is removed on every failure path.

use crate::model::node::NodeSnapshot;
use crate::model::tree::{CheckedRootPolicy, NoteTree};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Logical file name used by the desktop widget for its document.
pub const DEFAULT_STORE_FILE: &str = "noteBookData.json";

/// Suffix appended when a corrupt document is set aside.
const QUARANTINE_SUFFIX: &str = "corrupt";

/// Result type used by store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from load/save/quarantine operations.
#[derive(Debug)]
pub enum StoreError {
    /// Document exists but could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Document or temp file could not be written or renamed.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Document exists but is not a valid note document.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// In-memory tree could not be serialized to a document.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed reading note store `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed writing note store `{}`: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "note store `{}` is corrupt: {source}", path.display())
            }
            Self::Serialize { path, source } => write!(
                f,
                "failed serializing note store `{}`: {source}",
                path.display()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Corrupt { source, .. } | Self::Serialize { source, .. } => Some(source),
        }
    }
}

impl StoreError {
    /// Returns whether this error means the document exists but is invalid.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// Single-document store bound to one explicit path.
///
/// The path is configuration handed in by the caller, never ambient process
/// state, so tests and multiple widgets can use isolated files.
#[derive(Debug, Clone)]
pub struct TreeStore {
    path: PathBuf,
    policy: CheckedRootPolicy,
}

impl TreeStore {
    /// Creates a store over `path` with the default checked-root policy.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: CheckedRootPolicy::default(),
        }
    }

    /// Overrides the save-time handling of checked roots.
    pub fn with_policy(mut self, policy: CheckedRootPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Configured document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted tree.
    ///
    /// A missing document yields an empty tree. A present but unreadable or
    /// unparseable document is an error; the caller decides whether to
    /// quarantine and continue.
    ///
    /// # Errors
    /// - `StoreError::Read` when the document exists but cannot be read.
    /// - `StoreError::Corrupt` when the document is not valid JSON of the
    ///   expected shape.
    pub fn load(&self) -> StoreResult<NoteTree> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=empty path={}",
                    self.path.display()
                );
                return Ok(NoteTree::new());
            }
            Err(err) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        let doc: Vec<NodeSnapshot> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "event=store_load module=store status=ok path={} roots={}",
            self.path.display(),
            doc.len()
        );
        Ok(NoteTree::from_snapshots(doc))
    }

    /// Serializes `tree` and replaces the document atomically.
    ///
    /// The document is fully written to a sibling temp file first and then
    /// renamed over the target, so a crash mid-save leaves the previous
    /// document intact.
    ///
    /// # Errors
    /// - `StoreError::Write` on any I/O failure; the temp file is removed.
    pub fn save(&self, tree: &NoteTree) -> StoreResult<()> {
        let doc = tree.snapshot(self.policy);
        let raw = serde_json::to_string_pretty(&doc).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.sibling_path("tmp");
        let result = write_all_synced(&tmp_path, raw.as_bytes()).and_then(|()| {
            fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
        });
        if result.is_err() {
            // Why: a failed save must not leave a stray temp file next to
            // the document; best effort, the original error wins.
            let _ = fs::remove_file(&tmp_path);
        }
        result?;

        info!(
            "event=store_save module=store status=ok path={} roots={}",
            self.path.display(),
            doc.len()
        );
        Ok(())
    }

    /// Sets a corrupt document aside under a `.corrupt` sibling name and
    /// returns the quarantine path.
    ///
    /// Startup can then continue with an empty tree without destroying the
    /// user's data.
    ///
    /// # Errors
    /// - `StoreError::Write` when the rename fails.
    pub fn quarantine(&self) -> StoreResult<PathBuf> {
        let quarantine_path = self.sibling_path(QUARANTINE_SUFFIX);
        fs::rename(&self.path, &quarantine_path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        warn!(
            "event=store_quarantine module=store status=ok path={} moved_to={}",
            self.path.display(),
            quarantine_path.display()
        );
        Ok(quarantine_path)
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| DEFAULT_STORE_FILE.into());
        file_name.push(".");
        file_name.push(suffix);
        self.path.with_file_name(file_name)
    }
}

fn write_all_synced(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let write = |path: &Path| -> std::io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(bytes)?;
        file.sync_all()
    };
    write(path).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
