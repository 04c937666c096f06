//! Site builder.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use folio_markdown::{render_markdown, MarkdownOptions};
use tokio::fs;

use crate::artifact::{Artifact, ArtifactKind, ArtifactResult, FailurePolicy, Outcome};
use crate::assets::{copy_tree, StyleCompiler};
use crate::config::SiteConfig;
use crate::templates::PageTemplate;

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to compile stylesheet {}: {message}", .path.display())]
    Style { path: PathBuf, message: String },

    #[error("Failed to copy {}: {source}", .path.display())]
    Copy { path: PathBuf, source: io::Error },
}

/// Result of one build pass.
#[derive(Debug)]
pub struct BuildReport {
    /// One entry per artifact, in build order
    pub results: Vec<ArtifactResult>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

impl BuildReport {
    /// False when an artifact whose failure fails the build did not generate.
    pub fn is_success(&self) -> bool {
        !self
            .failures()
            .any(|r| r.policy == FailurePolicy::FailBuild)
    }

    /// Artifacts that failed, whatever their policy. Skipped ones are not failures.
    pub fn failures(&self) -> impl Iterator<Item = &ArtifactResult> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// Artifacts that had nothing to generate.
    pub fn skipped(&self) -> impl Iterator<Item = &ArtifactResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Skipped(_)))
    }

    /// Number of artifacts generated.
    pub fn generated(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Result for the artifact called `name`.
    pub fn get(&self, name: &str) -> Option<&ArtifactResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

/// Static site builder.
pub struct SiteBuilder {
    config: SiteConfig,
    artifacts: Vec<Artifact>,
    page: PageTemplate,
    styles: StyleCompiler,
    markdown: MarkdownOptions,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: SiteConfig) -> Self {
        Self {
            artifacts: Artifact::for_site(&config),
            page: PageTemplate::new(&config),
            styles: StyleCompiler::new(config.style_load_paths.clone()),
            markdown: MarkdownOptions::default(),
            config,
        }
    }

    /// Run one full pass over every artifact.
    ///
    /// Returns an error only when the output directory cannot be created or an
    /// artifact with [`FailurePolicy::Abort`] fails. Other failures are logged
    /// and recorded in the report.
    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| BuildError::Write {
                path: self.config.output_dir.clone(),
                source: e,
            })?;

        let mut results = Vec::with_capacity(self.artifacts.len());

        for artifact in &self.artifacts {
            let outcome = match self.generate(artifact).await {
                Ok(Outcome::Skipped(reason)) => {
                    tracing::warn!("Skipped: {} ({})", artifact.name, reason);
                    Outcome::Skipped(reason)
                }
                Ok(outcome) => {
                    tracing::info!("Generated: {}", artifact.name);
                    outcome
                }
                Err(e) if artifact.policy == FailurePolicy::Abort => {
                    tracing::error!("Error generating {}: {}", artifact.name, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!("Error generating {}: {}", artifact.name, e);
                    Outcome::Failure(e.to_string())
                }
            };

            results.push(ArtifactResult {
                name: artifact.name.clone(),
                output: artifact.output.clone(),
                policy: artifact.policy,
                outcome,
            });
        }

        Ok(BuildReport {
            results,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    async fn generate(&self, artifact: &Artifact) -> Result<Outcome, BuildError> {
        match &artifact.kind {
            ArtifactKind::FrontPage { title } => {
                let fragment = read_source(&artifact.source).await?;
                let html = self.page.render(title, &fragment)?;
                write_output(&artifact.output, html).await?;
            }
            ArtifactKind::Markdown => {
                let markdown = read_source(&artifact.source).await?;
                let content = render_markdown(&markdown, self.markdown);
                let html = self.page.render(&base_name(&artifact.source), &content)?;
                write_output(&artifact.output, html).await?;
            }
            ArtifactKind::Stylesheet => self.compile_stylesheet(artifact).await?,
            ArtifactKind::AssetTree => return self.copy_assets(artifact).await,
        }
        Ok(Outcome::Success)
    }

    async fn compile_stylesheet(&self, artifact: &Artifact) -> Result<(), BuildError> {
        let compiler = self.styles.clone();
        let entry = artifact.source.clone();

        let compiled = tokio::task::spawn_blocking(move || compiler.compile(&entry))
            .await
            .map_err(|e| BuildError::Style {
                path: artifact.source.clone(),
                message: e.to_string(),
            })??;

        let out_dir = artifact.output.parent().unwrap_or(Path::new("."));
        for asset in &compiled.assets {
            let target = out_dir.join(&asset.file_name);
            fs::copy(&asset.source, &target)
                .await
                .map_err(|e| BuildError::Copy {
                    path: asset.source.clone(),
                    source: e,
                })?;
            tracing::debug!("Copied {} -> {}", asset.source.display(), target.display());
        }

        write_output(&artifact.output, compiled.css).await
    }

    async fn copy_assets(&self, artifact: &Artifact) -> Result<Outcome, BuildError> {
        if !artifact.source.exists() {
            return Ok(Outcome::Skipped(format!(
                "asset directory not found at {}",
                artifact.source.display()
            )));
        }

        let src = artifact.source.clone();
        let dst = artifact.output.clone();
        let copied = tokio::task::spawn_blocking(move || copy_tree(&src, &dst))
            .await
            .map_err(|e| BuildError::Copy {
                path: artifact.source.clone(),
                source: io::Error::other(e),
            })??;

        for path in &copied {
            tracing::debug!("Copied: {}", path.display());
        }
        Ok(Outcome::Success)
    }
}

async fn read_source(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path)
        .await
        .map_err(|e| BuildError::Read {
            path: path.to_path_buf(),
            source: e,
        })
}

async fn write_output(path: &Path, contents: String) -> Result<(), BuildError> {
    fs::write(path, contents)
        .await
        .map_err(|e| BuildError::Write {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Page title for a Markdown source: its file name.
fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
