//! Build pipeline for the folio documentation site.
//!
//! Renders the front page, the README and the docs page through a shared
//! page template, compiles the site stylesheet and copies static assets.

pub mod artifact;
pub mod assets;
pub mod builder;
pub mod config;
pub mod templates;

pub use artifact::{Artifact, ArtifactKind, ArtifactResult, FailurePolicy, Outcome};
pub use assets::{copy_tree, StyleCompiler};
pub use builder::{BuildError, BuildReport, SiteBuilder};
pub use config::{AssetDir, SiteConfig};
