//! The watch loop: file events in, coalesced rebuild passes out.

use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use folio_static::SiteBuilder;

use crate::gate::RebuildGate;
use crate::watcher::{FileWatcher, WatchEvent};

/// Configuration for watch mode.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Roots to watch; directories recursively
    pub paths: Vec<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("templates"),
                PathBuf::from("src"),
                PathBuf::from("README.md"),
            ],
        }
    }
}

/// Errors that can occur in watch mode.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Failed to establish file watch: {0}")]
    Watch(#[from] notify::Error),
}

/// Re-runs the site build whenever a watched path changes.
pub struct WatchSession {
    builder: Arc<SiteBuilder>,
    config: WatchConfig,
    gate: Arc<RebuildGate>,
    passes: Arc<AtomicUsize>,
}

impl WatchSession {
    pub fn new(builder: Arc<SiteBuilder>, config: WatchConfig) -> Self {
        Self {
            builder,
            config,
            gate: Arc::new(RebuildGate::new()),
            passes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of rebuild passes completed by this session, successful or not.
    pub fn pass_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.passes)
    }

    /// Watch until `shutdown` resolves or the watcher goes away.
    ///
    /// Only failing to establish the watches is an error; build failures are
    /// logged and the session keeps running.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), WatchError>
    where
        F: Future<Output = ()>,
    {
        let (watcher, mut rx) = FileWatcher::new(&self.config.paths)?;
        tracing::info!("Watching for changes...");

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                event = rx.recv() => match event {
                    Some(event) => self.on_event(event),
                    None => break,
                },
            }
        }

        drop(watcher);
        tracing::info!("Stopped watching");
        Ok(())
    }

    fn on_event(&self, event: WatchEvent) {
        tracing::info!(
            "File {} {:?}. Rebuilding...",
            event.path.display(),
            event.kind
        );

        if !self.gate.request() {
            tracing::debug!("Build in progress, rebuild queued");
            return;
        }

        let builder = Arc::clone(&self.builder);
        let gate = Arc::clone(&self.gate);
        let passes = Arc::clone(&self.passes);

        tokio::spawn(async move {
            loop {
                match builder.build().await {
                    Ok(report) if report.is_success() => {
                        tracing::info!(
                            "Rebuilt {} artifacts in {}ms",
                            report.generated(),
                            report.duration_ms
                        );
                    }
                    Ok(report) => {
                        tracing::error!(
                            "Rebuild finished with {} failed artifact(s)",
                            report.failures().count()
                        );
                    }
                    Err(e) => tracing::error!("Rebuild failed: {}", e),
                }
                passes.fetch_add(1, Ordering::SeqCst);

                if !gate.finish() {
                    break;
                }
                tracing::debug!("Changes arrived during build, running again");
            }
        });
    }
}
