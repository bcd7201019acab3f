//! Site configuration.
//!
//! A run is driven by one immutable [`Configuration`]: the absolute source
//! root, the absolute location of the site config file, the reserved folder
//! names, and the classification knobs the crawler consults. It is built from
//! stock defaults with an optional TOML overlay read from the config file.
//!
//! ## Config File
//!
//! The config file lives in the site root (default `_config.toml`) and is
//! itself never published. Every key is optional:
//!
//! ```toml
//! includes_dir = "_includes"
//! layouts_dir = "_layouts"
//! plugins_dir = "_plugins"
//! output_dir = "_site"
//! layout = "auto-detect"          # auto-detect | markdown | plain
//! safe = false
//! blog_marker = ".blog"
//! blog_attribution = "last-match" # last-match | longest-prefix
//! binary_extensions = ["png", "jpg", "css", "js", "otf", "zip"]
//! vcs_dirs = [".git", ".svn", "CVS"]
//! date_formats = ["%a %b %d %H:%M:%S %Z %Y", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d", "%d-%m-%Y"]
//! strict_dates = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::dates::{DEFAULT_DATE_FORMATS, DateParser};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the site config, looked up in the root when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "_config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// How the renderer decides whether a renderable body is markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Markdown for `.md`/`.markdown` files, passthrough for everything else.
    #[default]
    AutoDetect,
    /// Every renderable body is markdown.
    Markdown,
    /// Bodies are published as written.
    Plain,
}

/// Which blog a renderable is attributed to when several blog roots contain it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlogAttribution {
    /// Every containing blog lists the resource; the back-reference points at
    /// the last containing blog in discovery order.
    #[default]
    LastMatch,
    /// Only the deepest containing blog lists the resource.
    LongestPrefix,
}

/// The on-disk overlay. All fields default, so a config file need only name
/// the keys it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteOptions {
    pub includes_dir: String,
    pub layouts_dir: String,
    pub plugins_dir: String,
    /// Exclusive write target of the exporter; must not exist before a build.
    pub output_dir: String,
    pub layout: LayoutMode,
    /// Disables author-supplied extensions (raw HTML in markdown bodies).
    pub safe: bool,
    /// File whose presence turns its directory into a blog root.
    pub blog_marker: String,
    pub blog_attribution: BlogAttribution,
    /// Extensions copied verbatim without looking for front matter.
    pub binary_extensions: Vec<String>,
    /// Version-control folders skipped at every depth.
    pub vcs_dirs: Vec<String>,
    /// chrono format strings tried in order against the `date` key.
    pub date_formats: Vec<String>,
    /// Refuse to order blog listings when a member has no publish date.
    pub strict_dates: bool,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            includes_dir: "_includes".to_string(),
            layouts_dir: "_layouts".to_string(),
            plugins_dir: "_plugins".to_string(),
            output_dir: "_site".to_string(),
            layout: LayoutMode::default(),
            safe: false,
            blog_marker: ".blog".to_string(),
            blog_attribution: BlogAttribution::default(),
            binary_extensions: ["png", "jpg", "css", "js", "otf", "zip"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vcs_dirs: [".git", ".svn", "CVS"].iter().map(|s| s.to_string()).collect(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect(),
            strict_dates: false,
        }
    }
}

impl SiteOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, name) in [
            ("includes_dir", &self.includes_dir),
            ("layouts_dir", &self.layouts_dir),
            ("plugins_dir", &self.plugins_dir),
            ("output_dir", &self.output_dir),
            ("blog_marker", &self.blog_marker),
        ] {
            if name.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain name, got '{name}'"
                )));
            }
        }
        if let Some(ext) = self
            .binary_extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "binary_extensions entries are bare extensions like \"png\", got '{ext}'"
            )));
        }
        if self.date_formats.is_empty() {
            return Err(ConfigError::Validation(
                "date_formats must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Absolute form of `path` without trailing separators or `.` segments, so
/// root-relative export paths always keep their leading `/`.
fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    Ok(std::path::absolute(path)?.components().collect())
}

/// Resolved, immutable settings for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Configuration {
    root: PathBuf,
    config_file: PathBuf,
    options: SiteOptions,
}

impl Configuration {
    /// Stock defaults for a site rooted at `root`.
    pub fn new(root: &Path, config_file: &Path) -> Result<Self, ConfigError> {
        Self::from_options(root, config_file, SiteOptions::default())
    }

    /// Validates `options` and anchors both paths absolutely.
    pub fn from_options(
        root: &Path,
        config_file: &Path,
        options: SiteOptions,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            root: absolute_path(root)?,
            config_file: absolute_path(config_file)?,
            options,
        })
    }

    /// Load `config_file` (or `<root>/_config.toml`) over the stock defaults.
    pub fn load(root: &Path, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(root, config_file, |_| {})
    }

    /// Like [`load`](Self::load), letting the caller override loaded options
    /// (command-line flags) before validation.
    pub fn load_with(
        root: &Path,
        config_file: Option<&Path>,
        adjust: impl FnOnce(&mut SiteOptions),
    ) -> Result<Self, ConfigError> {
        let config_file = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join(DEFAULT_CONFIG_FILE));
        let mut options = load_options(&config_file)?;
        adjust(&mut options);
        Self::from_options(root, &config_file, options)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn options(&self) -> &SiteOptions {
        &self.options
    }

    pub fn includes_dir(&self) -> &str {
        &self.options.includes_dir
    }

    pub fn layouts_dir(&self) -> &str {
        &self.options.layouts_dir
    }

    pub fn plugins_dir(&self) -> &str {
        &self.options.plugins_dir
    }

    pub fn output_dir(&self) -> &str {
        &self.options.output_dir
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.options.layout
    }

    pub fn safe(&self) -> bool {
        self.options.safe
    }

    pub fn blog_marker(&self) -> &str {
        &self.options.blog_marker
    }

    pub fn blog_attribution(&self) -> BlogAttribution {
        self.options.blog_attribution
    }

    pub fn strict_dates(&self) -> bool {
        self.options.strict_dates
    }

    /// `<root>/<output_dir>`, the exporter's target.
    pub fn output_root(&self) -> PathBuf {
        self.root.join(&self.options.output_dir)
    }

    /// Reserved folders, honoured only at the top of the tree.
    pub fn is_reserved_dir(&self, name: &str) -> bool {
        [
            &self.options.includes_dir,
            &self.options.layouts_dir,
            &self.options.plugins_dir,
            &self.options.output_dir,
        ]
        .iter()
        .any(|reserved| reserved.as_str() == name)
    }

    pub fn is_vcs_dir(&self, name: &str) -> bool {
        self.options.vcs_dirs.iter().any(|v| v == name)
    }

    pub fn is_binary_extension(&self, ext: &str) -> bool {
        self.options
            .binary_extensions
            .iter()
            .any(|b| b.eq_ignore_ascii_case(ext))
    }

    pub fn date_parser(&self) -> DateParser {
        DateParser::new(self.options.date_formats.clone())
    }
}

// =============================================================================
// Loading and merging
// =============================================================================

/// Stock defaults as a `toml::Value::Table`, the base layer for overlays.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteOptions::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read the config file as raw TOML. `Ok(None)` when it does not exist.
pub fn load_raw_options(config_file: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_file.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_file)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Stock defaults with the config file (if any) merged on top, validated.
pub fn load_options(config_file: &Path) -> Result<SiteOptions, ConfigError> {
    let merged = match load_raw_options(config_file)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let options: SiteOptions = merged.try_into()?;
    options.validate()?;
    Ok(options)
}

/// A fully commented config file holding every default, for `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Hearth Configuration
# ====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Reserved folders (skipped when they sit directly in the site root)
# ---------------------------------------------------------------------------
includes_dir = "_includes"
layouts_dir = "_layouts"
plugins_dir = "_plugins"

# Build output. A build refuses to start while this folder exists: a leftover
# output folder means the previous run did not finish cleanly.
output_dir = "_site"

# ---------------------------------------------------------------------------
# Rendering
# ---------------------------------------------------------------------------
# auto-detect: markdown for .md/.markdown files, others published as written
# markdown:    every page body is markdown
# plain:       every page body is published as written
layout = "auto-detect"

# Drop raw HTML embedded in markdown bodies.
safe = false

# ---------------------------------------------------------------------------
# Blogs
# ---------------------------------------------------------------------------
# A directory containing this file becomes a blog root.
blog_marker = ".blog"

# last-match:     pages under nested blogs are listed by every enclosing blog
#                 and belong to the last one discovered
# longest-prefix: pages belong only to their innermost blog
blog_attribution = "last-match"

# Fail the build instead of sorting undated posts last.
strict_dates = false

# Formats tried in order against the `date` front matter key.
date_formats = ["%a %b %d %H:%M:%S %Z %Y", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d", "%d-%m-%Y"]

# ---------------------------------------------------------------------------
# Classification
# ---------------------------------------------------------------------------
# Always copied verbatim, never scanned for front matter.
binary_extensions = ["png", "jpg", "css", "js", "otf", "zip"]

# Skipped at every depth.
vcs_dirs = [".git", ".svn", "CVS"]
"##
}
