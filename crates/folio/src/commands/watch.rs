//! Watch mode: build once, then rebuild on change until interrupted.

use std::sync::Arc;

use anyhow::Result;
use folio_static::{SiteBuilder, SiteConfig};
use folio_watch::{WatchConfig, WatchSession};

use super::build::build_once;

/// Run the initial pass, then watch.
///
/// A front page or output directory failure in the initial pass ends the
/// process; artifact failures are only logged so they can be fixed live.
pub async fn run(config: SiteConfig, watch: WatchConfig) -> Result<()> {
    let builder = Arc::new(SiteBuilder::new(config));

    let report = build_once(&builder).await?;
    if !report.is_success() {
        tracing::warn!("Initial build has failures, watching anyway");
    }

    WatchSession::new(builder, watch)
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}
