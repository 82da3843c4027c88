//! File watcher for configuration hot-reload.
//!
//! Watches the application config file and the declared file-backed
//! fragment sources. Emits reload events through a tokio watch channel,
//! with debouncing to coalesce rapid file changes.

use notify_debouncer_mini::{DebouncedEventKind, new_debouncer};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Event types emitted when watched files change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The application config file changed; sources may need rebuilding.
    AppConfig(PathBuf),
    /// A fragment file changed; the next aggregation will observe it.
    Fragment(PathBuf),
    /// Multiple watched files changed in quick succession.
    Batch(Vec<PathBuf>),
    /// Watcher encountered an error.
    Error(String),
}

impl ChangeEvent {
    /// True when this event should trigger a rebuild/re-export.
    pub fn requires_reload(&self) -> bool {
        !matches!(self, ChangeEvent::Error(_))
    }

    /// True when the provider set itself must be rebuilt (the source
    /// declarations may have changed, not just fragment contents).
    pub fn requires_rebuild(&self) -> bool {
        match self {
            ChangeEvent::AppConfig(_) => true,
            ChangeEvent::Batch(_) => true,
            _ => false,
        }
    }
}

/// Files to watch for changes.
#[derive(Debug, Clone, Default)]
pub struct WatchPaths {
    /// The application config file, if one exists on disk.
    pub config_file: Option<PathBuf>,
    /// Declared fragment files (already resolved to real paths).
    pub fragment_files: Vec<PathBuf>,
}

impl WatchPaths {
    /// Parent directories to register with the OS watcher, deduplicated.
    fn watch_dirs(&self) -> BTreeSet<PathBuf> {
        self.config_file
            .iter()
            .chain(self.fragment_files.iter())
            .filter_map(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect()
    }

    fn is_watched(&self, path: &Path) -> bool {
        self.config_file.as_deref() == Some(path)
            || self.fragment_files.iter().any(|f| f == path)
    }
}

/// Handle to the running watcher.
pub struct WatcherHandle {
    /// Receiver for change events; cloning allows multiple consumers.
    pub events: watch::Receiver<Option<ChangeEvent>>,
    /// Handle to the watcher task (dropping this stops the watcher).
    _task_handle: tokio::task::JoinHandle<()>,
}

impl WatcherHandle {
    /// Wait for the next change event.
    pub async fn wait_for_change(&mut self) -> Option<ChangeEvent> {
        // Skip the initial None value
        loop {
            if self.events.changed().await.is_err() {
                return None; // Sender dropped
            }
            let event = self.events.borrow().clone();
            if event.is_some() {
                return event;
            }
        }
    }
}

/// Start watching the given files.
///
/// Directories are registered non-recursively; events for unrelated
/// files in the same directories are dropped during classification.
pub fn start_watcher(
    paths: WatchPaths,
    debounce: Duration,
) -> Result<WatcherHandle, notify::Error> {
    let (event_tx, event_rx) = watch::channel(None);
    let (notify_tx, notify_rx) = mpsc::channel();

    let mut debouncer = new_debouncer(debounce, notify_tx)?;
    let watcher = debouncer.watcher();

    for dir in paths.watch_dirs() {
        if dir.exists() {
            info!("Watching directory: {}", dir.display());
            watcher.watch(&dir, notify::RecursiveMode::NonRecursive)?;
        } else {
            warn!("Directory does not exist, skipping watch: {}", dir.display());
        }
    }

    let task_handle = tokio::task::spawn_blocking(move || {
        // Keep the debouncer alive for the lifetime of the task
        let _debouncer = debouncer;
        process_notify_events(notify_rx, event_tx, &paths);
    });

    Ok(WatcherHandle {
        events: event_rx,
        _task_handle: task_handle,
    })
}

/// Pump debounced notify events into classified change events.
fn process_notify_events(
    rx: mpsc::Receiver<Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    tx: watch::Sender<Option<ChangeEvent>>,
    paths: &WatchPaths,
) {
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                if let Some(event) = classify_events(events, paths) {
                    debug!("Change detected: {:?}", event);
                    if tx.send(Some(event)).is_err() {
                        info!("Watcher receiver dropped, stopping");
                        return;
                    }
                }
            }
            Ok(Err(e)) => {
                error!("File watcher error: {}", e);
                let _ = tx.send(Some(ChangeEvent::Error(e.to_string())));
            }
            Err(_) => {
                info!("Watcher channel closed, stopping");
                return;
            }
        }
    }
}

/// Collapse a debounced event batch into at most one change event.
fn classify_events(
    events: Vec<notify_debouncer_mini::DebouncedEvent>,
    paths: &WatchPaths,
) -> Option<ChangeEvent> {
    let mut changed: Vec<PathBuf> = Vec::new();
    for event in events {
        if !matches!(
            event.kind,
            DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous
        ) {
            continue;
        }
        if paths.is_watched(&event.path) && !changed.contains(&event.path) {
            changed.push(event.path);
        }
    }

    match changed.len() {
        0 => None,
        1 => {
            let path = changed.into_iter().next().unwrap_or_default();
            Some(classify_path(path, paths))
        }
        _ => Some(ChangeEvent::Batch(changed)),
    }
}

/// Classify a single watched path.
fn classify_path(path: PathBuf, paths: &WatchPaths) -> ChangeEvent {
    if paths.config_file.as_deref() == Some(path.as_path()) {
        ChangeEvent::AppConfig(path)
    } else {
        ChangeEvent::Fragment(path)
    }
}
