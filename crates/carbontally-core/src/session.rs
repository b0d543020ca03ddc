//! Session state for a batch of files moving through the pipeline.
//!
//! Every file added to a session is tracked as a `FileEntry` with an
//! explicit status. Processing is sequential; one failing file marks its own
//! entry and never interrupts the rest of the batch. Failed entries keep
//! their original bytes so they can be retried later, completed entries drop
//! them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CarbontallyError, Result};
use crate::ingest::{FileSource, IngestContext, IngestOptions, IngestorRegistry};
use crate::models::{Location, ProcessedFile};

/// Lifecycle state of one file in a session.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FileStatus {
    Pending,
    Processing,
    Completed { result: ProcessedFile },
    Failed { error: String },
}

/// One file tracked by a session.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    /// Unique identifier within the session
    pub id: Uuid,

    /// Original file name
    pub file_name: String,

    /// Content size in bytes
    pub size: usize,

    /// Current lifecycle state
    pub status: FileStatus,

    /// When the file was added to the session
    pub added_at: DateTime<Utc>,

    /// Original bytes, kept while a retry is still possible
    #[serde(skip)]
    source: Option<FileSource>,
}

impl FileEntry {
    /// The derived report, when processing has completed.
    pub fn result(&self) -> Option<&ProcessedFile> {
        match &self.status {
            FileStatus::Completed { result } => Some(result),
            _ => None,
        }
    }

    /// The recorded failure message, when processing has failed.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FileStatus::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// Counts for one `process_all` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub completed: usize,
    pub failed: usize,
}

/// A batch of files and the shared pipeline state they run through.
///
/// All files of a session draw from one random stream, so a seeded session
/// reproduces the same fabricated values file after file.
pub struct IngestSession {
    registry: IngestorRegistry,
    ctx: IngestContext,
    entries: Vec<FileEntry>,
}

impl IngestSession {
    /// Session with an entropy-seeded random stream.
    pub fn new(options: IngestOptions) -> Self {
        Self {
            registry: IngestorRegistry::with_defaults(),
            ctx: IngestContext::new(options),
            entries: Vec::new(),
        }
    }

    /// Session with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64, options: IngestOptions) -> Self {
        Self {
            registry: IngestorRegistry::with_defaults(),
            ctx: IngestContext::seeded(seed, options),
            entries: Vec::new(),
        }
    }

    /// Track a new file. It stays `Pending` until the next `process_all`.
    pub fn add_file(&mut self, source: FileSource) -> Uuid {
        let id = Uuid::new_v4();
        tracing::debug!(file = %source.name, %id, "file added to session");
        self.entries.push(FileEntry {
            id,
            file_name: source.name.clone(),
            size: source.size(),
            status: FileStatus::Pending,
            added_at: Utc::now(),
            source: Some(source),
        });
        id
    }

    /// Track several files at once, in the given order.
    pub fn add_files(&mut self, sources: impl IntoIterator<Item = FileSource>) -> Vec<Uuid> {
        sources.into_iter().map(|s| self.add_file(s)).collect()
    }

    /// Read a file from disk and track it.
    pub fn add_path(&mut self, path: &std::path::Path) -> Result<Uuid> {
        Ok(self.add_file(FileSource::from_path(path)?))
    }

    /// All tracked entries, in insertion order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Look up one entry by id.
    pub fn entry(&self, id: Uuid) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Derived reports of all completed entries, in insertion order.
    pub fn completed(&self) -> impl Iterator<Item = &ProcessedFile> {
        self.entries.iter().filter_map(|e| e.result())
    }

    /// All derived locations across completed entries.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.completed().flat_map(|r| r.locations.iter())
    }

    /// Number of derived locations across completed entries.
    pub fn total_locations(&self) -> usize {
        self.locations().count()
    }

    /// Combined emissions across completed entries, rounded to two decimals.
    pub fn total_emissions(&self) -> f64 {
        crate::summary::total_emissions(self.locations())
    }

    /// Settled entries (completed or failed) out of all tracked entries.
    pub fn progress(&self) -> (usize, usize) {
        let settled = self
            .entries
            .iter()
            .filter(|e| {
                matches!(
                    e.status,
                    FileStatus::Completed { .. } | FileStatus::Failed { .. }
                )
            })
            .count();
        (settled, self.entries.len())
    }

    /// Process every pending entry in insertion order. A failing file marks
    /// its own entry and the batch moves on.
    pub async fn process_all(&mut self) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for index in 0..self.entries.len() {
            if !matches!(self.entries[index].status, FileStatus::Pending) {
                continue;
            }
            self.process_entry(index).await;
            match self.entries[index].status {
                FileStatus::Completed { .. } => outcome.completed += 1,
                FileStatus::Failed { .. } => outcome.failed += 1,
                _ => {}
            }
        }
        tracing::info!(
            completed = outcome.completed,
            failed = outcome.failed,
            "batch finished"
        );
        outcome
    }

    /// Re-run one entry through the pipeline. The call succeeds when the
    /// entry could be re-run at all; the per-file outcome lands in its
    /// status as usual.
    pub async fn retry(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CarbontallyError::EntryNotFound { id })?;

        if self.entries[index].source.is_none() {
            return Err(CarbontallyError::RetryUnavailable {
                file_name: self.entries[index].file_name.clone(),
            });
        }

        tracing::info!(file = %self.entries[index].file_name, "retrying file");
        self.process_entry(index).await;
        Ok(())
    }

    /// Drop one entry from the session.
    pub fn remove(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CarbontallyError::EntryNotFound { id })?;
        let entry = self.entries.remove(index);
        tracing::debug!(file = %entry.file_name, "file removed from session");
        Ok(())
    }

    /// Drop all entries. The random stream keeps its position.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    async fn process_entry(&mut self, index: usize) {
        let source = match self.entries[index].source.take() {
            Some(source) => source,
            None => return,
        };
        self.entries[index].status = FileStatus::Processing;

        let outcome = self.registry.process_file(&source, &mut self.ctx).await;
        match outcome {
            Ok(result) => {
                self.entries[index].status = FileStatus::Completed { result };
            }
            Err(e) => {
                tracing::error!(file = %source.name, error = %e, "file processing failed");
                self.entries[index].status = FileStatus::Failed {
                    error: e.to_string(),
                };
                self.entries[index].source = Some(source);
            }
        }
    }
}

impl Default for IngestSession {
    fn default() -> Self {
        Self::new(IngestOptions::default())
    }
}
