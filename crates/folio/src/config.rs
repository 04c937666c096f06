//! Configuration file structure (folio.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_static::{AssetDir, SiteConfig};
use folio_watch::WatchConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    site: SiteSection,
    #[serde(default)]
    paths: PathsSection,
    #[serde(default)]
    assets: Vec<AssetEntry>,
    #[serde(default)]
    watch: WatchSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SiteSection {
    title: String,
    include_nav: bool,
    repository_url: String,
    package_url: String,
    /// Empty string disables analytics
    analytics_id: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        let site = SiteConfig::default();
        Self {
            title: site.title,
            include_nav: site.include_nav,
            repository_url: site.repository_url,
            package_url: site.package_url,
            analytics_id: site.analytics_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PathsSection {
    frontpage: PathBuf,
    readme: PathBuf,
    docs: PathBuf,
    style_entry: PathBuf,
    style_load_paths: Vec<PathBuf>,
    output: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        let site = SiteConfig::default();
        Self {
            frontpage: site.frontpage_path,
            readme: site.readme_path,
            docs: site.docs_path,
            style_entry: site.style_entry_path,
            style_load_paths: site.style_load_paths,
            output: site.output_dir,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AssetEntry {
    source: PathBuf,
    target: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct WatchSection {
    paths: Vec<PathBuf>,
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            paths: WatchConfig::default().paths,
        }
    }
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn site_config(&self) -> SiteConfig {
        SiteConfig {
            frontpage_path: self.paths.frontpage.clone(),
            readme_path: self.paths.readme.clone(),
            docs_path: self.paths.docs.clone(),
            style_entry_path: self.paths.style_entry.clone(),
            style_load_paths: self.paths.style_load_paths.clone(),
            output_dir: self.paths.output.clone(),
            include_nav: self.site.include_nav,
            title: self.site.title.clone(),
            repository_url: self.site.repository_url.clone(),
            package_url: self.site.package_url.clone(),
            analytics_id: self.site.analytics_id.clone(),
            assets: self
                .assets
                .iter()
                .map(|a| AssetDir {
                    source: a.source.clone(),
                    target: a.target.clone(),
                })
                .collect(),
        }
    }

    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig {
            paths: self.watch.paths.clone(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = ConfigFile::parse(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}
