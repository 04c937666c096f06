//! The set of outputs produced by one build pass.

use std::fmt;
use std::path::PathBuf;

use crate::config::SiteConfig;

/// How a generated output is rendered from its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Raw HTML fragment wrapped in the page template under a fixed title
    FrontPage { title: String },

    /// Markdown document titled after its source file name
    Markdown,

    /// SCSS entry compiled into one minified stylesheet
    Stylesheet,

    /// Directory tree copied as is
    AssetTree,
}

/// What a failed artifact does to the rest of the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the pass and return the error
    Abort,

    /// Log and carry on; the build still counts as successful
    Isolate,

    /// Log and carry on, but report the build as failed
    FailBuild,
}

/// One output of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Display name used in logs
    pub name: String,

    /// Input file or directory
    pub source: PathBuf,

    /// Output file or directory
    pub output: PathBuf,

    pub kind: ArtifactKind,

    pub policy: FailurePolicy,
}

impl Artifact {
    /// The artifacts for a site, in build order.
    pub fn for_site(config: &SiteConfig) -> Vec<Artifact> {
        let out = &config.output_dir;

        let mut artifacts = vec![
            Artifact {
                name: "index.html".to_string(),
                source: config.frontpage_path.clone(),
                output: out.join("index.html"),
                kind: ArtifactKind::FrontPage {
                    title: config.title.clone(),
                },
                policy: FailurePolicy::Abort,
            },
            Artifact {
                name: "README.html".to_string(),
                source: config.readme_path.clone(),
                output: out.join("README.html"),
                kind: ArtifactKind::Markdown,
                policy: FailurePolicy::Isolate,
            },
            Artifact {
                name: "docs.html".to_string(),
                source: config.docs_path.clone(),
                output: out.join("docs.html"),
                kind: ArtifactKind::Markdown,
                policy: FailurePolicy::Isolate,
            },
            Artifact {
                name: "style.css".to_string(),
                source: config.style_entry_path.clone(),
                output: out.join("style.css"),
                kind: ArtifactKind::Stylesheet,
                policy: FailurePolicy::FailBuild,
            },
        ];

        artifacts.extend(config.assets.iter().map(|asset| Artifact {
            name: format!("{}/", asset.target.display()),
            source: asset.source.clone(),
            output: out.join(&asset.target),
            kind: ArtifactKind::AssetTree,
            policy: FailurePolicy::Isolate,
        }));

        artifacts
    }
}

/// Outcome of generating one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Nothing to generate, e.g. an asset directory that does not exist
    Skipped(String),
    Failure(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => f.write_str("ok"),
            Outcome::Skipped(reason) => write!(f, "skipped: {}", reason),
            Outcome::Failure(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Result of one artifact in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactResult {
    pub name: String,
    pub output: PathBuf,
    pub policy: FailurePolicy,
    pub outcome: Outcome,
}

impl ArtifactResult {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetDir;

    #[test]
    fn default_site_has_four_artifacts() {
        let artifacts = Artifact::for_site(&SiteConfig::default());

        let names: Vec<_> = artifacts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            ["index.html", "README.html", "docs.html", "style.css"]
        );
        assert_eq!(artifacts[0].policy, FailurePolicy::Abort);
        assert_eq!(artifacts[1].policy, FailurePolicy::Isolate);
        assert_eq!(artifacts[2].policy, FailurePolicy::Isolate);
        assert_eq!(artifacts[3].policy, FailurePolicy::FailBuild);
    }

    #[test]
    fn outputs_land_in_output_dir() {
        let config = SiteConfig {
            output_dir: PathBuf::from("site"),
            assets: vec![AssetDir {
                source: PathBuf::from("vendor/fonts"),
                target: PathBuf::from("fonts"),
            }],
            ..Default::default()
        };

        let artifacts = Artifact::for_site(&config);

        assert_eq!(artifacts.len(), 5);
        assert!(artifacts.iter().all(|a| a.output.starts_with("site")));
        assert_eq!(artifacts[4].kind, ArtifactKind::AssetTree);
        assert_eq!(artifacts[4].output, PathBuf::from("site/fonts"));
    }

    #[test]
    fn front_page_uses_site_title() {
        let config = SiteConfig {
            title: "Elsewhere".to_string(),
            ..Default::default()
        };

        let artifacts = Artifact::for_site(&config);

        assert_eq!(
            artifacts[0].kind,
            ArtifactKind::FrontPage {
                title: "Elsewhere".to_string()
            }
        );
    }

    #[test]
    fn skipped_is_neither_success_nor_failure() {
        let result = ArtifactResult {
            name: "fonts/".to_string(),
            output: PathBuf::from("site/fonts"),
            policy: FailurePolicy::Isolate,
            outcome: Outcome::Skipped("asset directory not found at vendor/fonts".to_string()),
        };

        assert!(!result.is_success());
        assert!(!result.is_failure());
        assert_eq!(
            result.outcome.to_string(),
            "skipped: asset directory not found at vendor/fonts"
        );
    }
}
