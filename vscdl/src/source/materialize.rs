//! Materialization of a flattened source tree onto disk

use std::path::{Component, Path, PathBuf};

use futures::stream::{self, StreamExt};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::errors::FetchError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;
use crate::source::api::SourceApi;
use crate::source::flatten::{EntryKind, FlatEntry};

/// How one entry settled
#[derive(Debug)]
pub enum Settlement {
    /// Directory created
    Created,
    /// File written
    Downloaded { bytes: u64 },
    /// Something already existed at the path; left untouched
    Skipped,
    Failed(FetchError),
}

impl Settlement {
    pub fn is_failure(&self) -> bool {
        matches!(self, Settlement::Failed(_))
    }
}

/// Settlement of a single flat entry
#[derive(Debug)]
pub struct EntryOutcome {
    pub path: String,
    pub kind: EntryKind,
    pub settlement: Settlement,
}

impl EntryOutcome {
    fn new(entry: &FlatEntry, settlement: Settlement) -> Self {
        Self {
            path: entry.path().to_string(),
            kind: entry.kind.clone(),
            settlement,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.settlement {
            Settlement::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }
}

/// Outcome of a whole run, one [`EntryOutcome`] per entry in input order
#[derive(Debug)]
pub struct MaterializeReport {
    pub deployment_id: String,
    pub destination: PathBuf,
    pub outcomes: Vec<EntryOutcome>,
}

impl MaterializeReport {
    pub fn files_downloaded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.settlement, Settlement::Downloaded { .. }))
            .count()
    }

    pub fn directories_created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.settlement, Settlement::Created))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.settlement, Settlement::Skipped))
            .count()
    }

    pub fn bytes_written(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| match o.settlement {
                Settlement::Downloaded { bytes } => bytes,
                _ => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| o.settlement.is_failure())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// There was at least one file and none of them could be written
    pub fn is_total_failure(&self) -> bool {
        let mut files = self.outcomes.iter().filter(|o| o.is_file()).peekable();
        files.peek().is_some() && files.all(|o| o.settlement.is_failure())
    }
}

/// Downloads in flight at once when not configured otherwise
pub const DEFAULT_MAX_CONCURRENT_DOWNLOADS: usize = 16;

/// Recreates flat entries under a destination directory.
///
/// Directories are created in entry order before any download starts; the
/// downloads then run concurrently on the current task and the run waits
/// for all of them. At most `max_concurrent` downloads hold a local file and
/// a connection at any time. A failed entry never stops its siblings.
pub struct Materializer<'a, A: SourceApi + ?Sized> {
    api: &'a A,
    max_concurrent: usize,
}

impl<'a, A: SourceApi + ?Sized> Materializer<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            max_concurrent: DEFAULT_MAX_CONCURRENT_DOWNLOADS,
        }
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Wipe `destination`, recreate it, then write every entry into it
    pub async fn materialize(
        &self,
        deployment_id: &str,
        entries: &[FlatEntry],
        destination: &Path,
    ) -> Result<MaterializeReport, FetchError> {
        info!("Recreating {}", destination.display());
        Dir::new(destination).reset().await?;
        Ok(self
            .materialize_entries(deployment_id, entries, destination)
            .await)
    }

    /// Write every entry under an existing `destination`, leaving any path
    /// that already exists untouched
    pub async fn materialize_entries(
        &self,
        deployment_id: &str,
        entries: &[FlatEntry],
        destination: &Path,
    ) -> MaterializeReport {
        let mut outcomes = Vec::with_capacity(entries.len());
        let mut downloads = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let local = match local_path(destination, entry) {
                Ok(local) => local,
                Err(e) => {
                    warn!("Refusing to write {}: {}", entry.path(), e);
                    outcomes.push((index, EntryOutcome::new(entry, Settlement::Failed(e))));
                    continue;
                }
            };

            match entry.uid() {
                None => {
                    let settlement = create_directory(&local).await;
                    outcomes.push((index, EntryOutcome::new(entry, settlement)));
                }
                Some(uid) => {
                    // Lazy: the local file is only opened once the future is polled
                    downloads.push(async move {
                        let settlement = self.download(deployment_id, uid, &local).await;
                        (index, EntryOutcome::new(entry, settlement))
                    });
                }
            }
        }

        debug!(
            "Starting {} downloads, {} at a time",
            downloads.len(),
            self.max_concurrent
        );
        let settled: Vec<_> = stream::iter(downloads)
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;
        outcomes.extend(settled);
        outcomes.sort_by_key(|(index, _)| *index);

        MaterializeReport {
            deployment_id: deployment_id.to_string(),
            destination: destination.to_path_buf(),
            outcomes: outcomes.into_iter().map(|(_, outcome)| outcome).collect(),
        }
    }

    async fn download(&self, deployment_id: &str, uid: &str, local: &Path) -> Settlement {
        let file = File::new(local);
        let mut handle = match file.create_new().await {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                debug!("Skipping existing {}", local.display());
                return Settlement::Skipped;
            }
            Err(e) => return Settlement::Failed(FetchError::download(local, e)),
        };

        debug!("Downloading {}", local.display());
        let result = match self.api.download_file(deployment_id, uid, &mut handle).await {
            Ok(bytes) => handle.flush().await.map(|_| bytes).map_err(FetchError::from),
            Err(e) => Err(e),
        };
        drop(handle);

        match result {
            Ok(bytes) => Settlement::Downloaded { bytes },
            Err(e) => {
                warn!("Failed to download {}: {}", local.display(), e);
                // No truncated files
                if let Err(cleanup) = file.delete().await {
                    warn!("Could not remove {}: {}", local.display(), cleanup);
                }
                Settlement::Failed(FetchError::download(local, e))
            }
        }
    }
}

async fn create_directory(local: &Path) -> Settlement {
    match Dir::new(local).create_if_absent().await {
        Ok(true) => Settlement::Created,
        Ok(false) => {
            debug!("Skipping existing {}", local.display());
            Settlement::Skipped
        }
        Err(e) => {
            warn!("Failed to create {}: {}", local.display(), e);
            Settlement::Failed(FetchError::download(local, e))
        }
    }
}

/// Join the entry's relative path onto `destination`, accepting only plain
/// names as segments
fn local_path(destination: &Path, entry: &FlatEntry) -> Result<PathBuf, FetchError> {
    let mut local = destination.to_path_buf();

    for segment in entry.relative_path().split('/') {
        let mut components = Path::new(segment).components();
        let plain = !segment.contains('\\')
            && matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            );
        if !plain {
            return Err(FetchError::UnsafePath(entry.path().to_string()));
        }
        local.push(segment);
    }

    Ok(local)
}
