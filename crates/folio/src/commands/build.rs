//! Single build pass.

use anyhow::{bail, Context, Result};
use folio_static::{BuildReport, SiteBuilder, SiteConfig};

/// Run one pass and fail if any artifact that must build did not.
pub async fn run(config: SiteConfig) -> Result<()> {
    let builder = SiteBuilder::new(config);
    let report = build_once(&builder).await?;

    if !report.is_success() {
        let failed: Vec<&str> = report
            .failures()
            .map(|r| r.name.as_str())
            .collect();
        bail!("Build failed: {}", failed.join(", "));
    }

    Ok(())
}

/// Run one pass and log a summary. Errors only for failures that abort a pass.
pub async fn build_once(builder: &SiteBuilder) -> Result<BuildReport> {
    tracing::info!("Building site...");

    let report = builder.build().await.context("Error compiling docs")?;

    tracing::info!(
        "Built {} of {} artifacts in {}ms",
        report.generated(),
        report.results.len(),
        report.duration_ms
    );
    tracing::info!("Output: {}", report.output_dir.display());

    Ok(report)
}
