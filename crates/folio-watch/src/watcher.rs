//! File watching for rebuild on change.

use std::path::{Path, PathBuf};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// What happened to a watched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEventKind {
    Created,
    Modified,
    Deleted,
}

/// A change to one path under a watched root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: WatchEventKind,
    pub path: PathBuf,
}

/// File watcher over a set of roots.
///
/// Directories are watched recursively, single files on their own. Events
/// stop when the watcher is dropped.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// Returns the watcher and a channel to receive events. Paths that do not
    /// exist are skipped with a warning.
    pub fn new(
        paths: &[PathBuf],
    ) -> Result<(Self, mpsc::UnboundedReceiver<WatchEvent>), notify::Error> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    for path in &event.paths {
                        if let Some(e) = classify_event(path, &event.kind) {
                            let _ = tx.send(e);
                        }
                    }
                }
                Err(e) => tracing::warn!("Watch error: {}", e),
            }
        })?;

        for path in paths {
            if !path.exists() {
                tracing::warn!("Not watching {}: path does not exist", path.display());
                continue;
            }

            let mode = if path.is_dir() {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            watcher
                .watch(path, mode)
                .map_err(|e| e.add_path(path.clone()))?;
            tracing::debug!("Watching {}", path.display());
        }

        Ok((Self { _watcher: watcher }, rx))
    }
}

/// Classify a notify event into a WatchEvent. Access notifications are not
/// changes and yield `None`.
fn classify_event(path: &Path, kind: &EventKind) -> Option<WatchEvent> {
    let kind = match kind {
        EventKind::Create(_) => WatchEventKind::Created,
        EventKind::Remove(_) => WatchEventKind::Deleted,
        EventKind::Modify(_) => WatchEventKind::Modified,
        _ => return None,
    };

    Some(WatchEvent {
        kind,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn classifies_events() {
        let path = Path::new("templates/docs.md");

        assert_eq!(
            classify_event(path, &EventKind::Create(CreateKind::File)).map(|e| e.kind),
            Some(WatchEventKind::Created)
        );
        assert_eq!(
            classify_event(path, &EventKind::Modify(ModifyKind::Any)).map(|e| e.kind),
            Some(WatchEventKind::Modified)
        );
        assert_eq!(
            classify_event(path, &EventKind::Remove(RemoveKind::File)).map(|e| e.kind),
            Some(WatchEventKind::Deleted)
        );
        assert_eq!(
            classify_event(path, &EventKind::Access(AccessKind::Any)),
            None
        );
    }

    #[tokio::test]
    async fn reports_edits_under_templates() {
        let temp = tempdir().unwrap();
        let templates = temp.path().join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("docs.md"), "# Docs").unwrap();

        let (_watcher, mut rx) = FileWatcher::new(&[templates.clone()]).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(templates.join("docs.md"), "# Docs, revised").unwrap();

        let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
        let mut seen = None;
        while let Ok(Some(event)) = tokio::time::timeout_at(deadline, rx.recv()).await {
            if event.path.ends_with("docs.md") {
                seen = Some(event);
                break;
            }
        }

        let event = seen.expect("no event for templates/docs.md");
        assert!(matches!(
            event.kind,
            WatchEventKind::Created | WatchEventKind::Modified
        ));
    }

    #[tokio::test]
    async fn skips_missing_roots() {
        let temp = tempdir().unwrap();

        let result = FileWatcher::new(&[temp.path().join("missing")]);

        assert!(result.is_ok());
    }
}
