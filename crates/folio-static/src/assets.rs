//! Stylesheet compilation and static asset copying.

use std::fs;
use std::path::{Path, PathBuf};

use lightningcss::dependencies::{Dependency, DependencyOptions};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use walkdir::WalkDir;

use crate::builder::BuildError;

/// A file referenced by `url()` that is copied next to the stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAsset {
    /// Resolved location of the referenced file
    pub source: PathBuf,
    /// File name in the output directory, unique within one stylesheet
    pub file_name: String,
}

/// Output of compiling a stylesheet.
#[derive(Debug, Clone)]
pub struct CompiledStyle {
    /// Minified CSS with local `url()` references rewritten
    pub css: String,
    /// Local files the CSS now points at
    pub assets: Vec<StyleAsset>,
}

/// Compiles an SCSS entry point into one minified stylesheet.
#[derive(Debug, Clone, Default)]
pub struct StyleCompiler {
    load_paths: Vec<PathBuf>,
}

impl StyleCompiler {
    /// Create a compiler that also searches `load_paths` for `@use` / `@import`.
    pub fn new(load_paths: Vec<PathBuf>) -> Self {
        Self { load_paths }
    }

    /// Compile `entry`. Partials resolve relative to the importing file, then
    /// the load paths.
    pub fn compile(&self, entry: &Path) -> Result<CompiledStyle, BuildError> {
        let css = self.lower_scss(entry)?;
        self.bundle(entry, &css)
    }

    /// Run the SCSS preprocessor.
    fn lower_scss(&self, entry: &Path) -> Result<String, BuildError> {
        let options = self
            .load_paths
            .iter()
            .fold(grass::Options::default(), |options, path| {
                options.load_path(path)
            })
            .style(grass::OutputStyle::Expanded);

        grass::from_path(entry, &options).map_err(|e| BuildError::Style {
            path: entry.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Minify plain CSS and collect the local files it references.
    fn bundle(&self, entry: &Path, css: &str) -> Result<CompiledStyle, BuildError> {
        let style_error = |message: String| BuildError::Style {
            path: entry.to_path_buf(),
            message,
        };

        let mut stylesheet = StyleSheet::parse(
            css,
            ParserOptions {
                filename: entry.display().to_string(),
                ..Default::default()
            },
        )
        .map_err(|e| style_error(format!("CSS parse error: {}", e)))?;

        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| style_error(format!("CSS minify error: {}", e)))?;

        let printed = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                analyze_dependencies: Some(DependencyOptions {
                    remove_imports: false,
                }),
                ..Default::default()
            })
            .map_err(|e| style_error(format!("CSS print error: {}", e)))?;

        let base_dir = entry.parent().unwrap_or(Path::new(""));
        let mut code = printed.code;
        let mut assets: Vec<StyleAsset> = Vec::new();

        for dependency in printed.dependencies.unwrap_or_default() {
            let (placeholder, replacement) = match dependency {
                // Plain-CSS imports that survived SCSS lowering keep their URL.
                Dependency::Import(import) => (import.placeholder, import.url),
                Dependency::Url(url_dep) if is_external(&url_dep.url) => {
                    (url_dep.placeholder, url_dep.url)
                }
                Dependency::Url(url_dep) => {
                    let (path_part, suffix) = split_url_suffix(&url_dep.url);
                    let source = self.resolve_asset(base_dir, path_part).ok_or_else(|| {
                        style_error(format!("referenced asset not found: {}", url_dep.url))
                    })?;

                    let file_name = match assets.iter().find(|a| a.source == source) {
                        Some(existing) => existing.file_name.clone(),
                        None => {
                            let file_name = output_name(&assets, &source, path_part);
                            assets.push(StyleAsset {
                                source,
                                file_name: file_name.clone(),
                            });
                            file_name
                        }
                    };

                    let replacement = format!("{}{}", file_name, suffix);
                    (url_dep.placeholder, replacement)
                }
            };

            code = code.replace(&placeholder, &replacement);
        }

        Ok(CompiledStyle { css: code, assets })
    }

    fn resolve_asset(&self, base_dir: &Path, relative: &str) -> Option<PathBuf> {
        std::iter::once(base_dir)
            .chain(self.load_paths.iter().map(PathBuf::as_path))
            .map(|dir| dir.join(relative))
            .find(|candidate| candidate.is_file())
    }
}

/// Output file name for `source`: its own file name, or `stem-N.ext` when a
/// different file already took that name.
fn output_name(taken: &[StyleAsset], source: &Path, fallback: &str) -> String {
    let file_name = source
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(fallback)
        .to_string();
    let is_taken = |name: &str| taken.iter().any(|a| a.file_name == name);
    if !is_taken(file_name.as_str()) {
        return file_name;
    }

    let (stem, ext) = match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name.as_str(), ""),
    };
    (1..)
        .map(|n| format!("{}-{}{}", stem, n, ext))
        .find(|candidate| !is_taken(candidate.as_str()))
        .unwrap_or(file_name.clone())
}

/// URLs that are not files on disk.
fn is_external(url: &str) -> bool {
    url.starts_with("http:")
        || url.starts_with("https:")
        || url.starts_with("//")
        || url.starts_with("data:")
        || url.starts_with('#')
        || url.starts_with('/')
}

/// Split `fonts/a.eot?#iefix` into `("fonts/a.eot", "?#iefix")`.
fn split_url_suffix(url: &str) -> (&str, &str) {
    match url.find(['?', '#']) {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    }
}

/// Copy every file under `src` into `dst`, creating directories as needed.
///
/// Returns the destination paths of the copied files.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut copied = Vec::new();

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| BuildError::Copy {
            path: src.to_path_buf(),
            source: e.into(),
        })?;
        let path = entry.path();
        let relative = path.strip_prefix(src).unwrap_or(path);
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| BuildError::Copy {
                path: target.clone(),
                source: e,
            })?;
        } else {
            fs::copy(path, &target).map_err(|e| BuildError::Copy {
                path: path.to_path_buf(),
                source: e,
            })?;
            copied.push(target);
        }
    }

    Ok(copied)
}
