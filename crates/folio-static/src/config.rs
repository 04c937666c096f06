//! Site configuration.

use std::path::PathBuf;

/// A directory copied verbatim into the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDir {
    /// Directory to copy from
    pub source: PathBuf,

    /// Destination, relative to the output directory
    pub target: PathBuf,
}

/// Configuration for building the site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Raw HTML fragment rendered as the front page
    pub frontpage_path: PathBuf,

    /// Markdown README (the project's own or a vendored copy)
    pub readme_path: PathBuf,

    /// Markdown documentation page
    pub docs_path: PathBuf,

    /// SCSS entry point
    pub style_entry_path: PathBuf,

    /// Extra directories searched when resolving `@use` / `@import`
    pub style_load_paths: Vec<PathBuf>,

    /// Output directory
    pub output_dir: PathBuf,

    /// Render the fixed bottom navigation bar
    pub include_nav: bool,

    /// Title of the front page
    pub title: String,

    /// Source repository linked from the navigation bar
    pub repository_url: String,

    /// Package registry page linked from the navigation bar
    pub package_url: String,

    /// Google Analytics measurement id; empty disables the snippet
    pub analytics_id: String,

    /// Directories copied into the output
    pub assets: Vec<AssetDir>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            frontpage_path: PathBuf::from("templates/frontpage.html"),
            readme_path: PathBuf::from("README.md"),
            docs_path: PathBuf::from("templates/docs.md"),
            style_entry_path: PathBuf::from("src/style.scss"),
            style_load_paths: vec![],
            output_dir: PathBuf::from("."),
            include_nav: true,
            title: "Testeranto".to_string(),
            repository_url: "https://github.com/adamwong246/testeranto".to_string(),
            package_url: "https://www.npmjs.com/package/testeranto".to_string(),
            analytics_id: "G-2BREL4738L".to_string(),
            assets: vec![],
        }
    }
}
