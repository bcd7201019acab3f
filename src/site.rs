//! The end-to-end build: scan, render, export.
//!
//! ```text
//! scan        root/      →  Inventory       (fatal on unreadable directories)
//! index       blogs      →  generated pages  (fatal only under strict_dates)
//! prepare     _site/     →  created          (fatal if it already exists)
//! render      renderable →  content          (failures collected, page skipped)
//! export      resources  →  _site/…          (failures collected, run continues)
//! ```
//!
//! Every fatal check runs before the output folder is claimed, and the folder
//! is claimed before anything is rendered, so a failed run leaves nothing
//! written.

use crate::blog::blog_indexes;
use crate::config::Configuration;
use crate::export::{ExportError, ExportReport, Exporter};
use crate::frontmatter::{DelimitedFrontMatter, FrontMatterDetector};
use crate::ordering::OrderingError;
use crate::render::{MarkdownRenderer, RenderError, Renderer};
use crate::resource::{GeneratedResource, Resource};
use crate::scan::{Inventory, ScanError, scan_with};
use crate::tidy::{HtmlNormalizer, LineEndingTidy};
use log::{info, warn};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    #[error("Ordering error: {0}")]
    Ordering(#[from] OrderingError),
}

/// A renderable that could not be rendered and was left out of the output.
#[derive(Debug)]
pub struct RenderFailure {
    pub path: PathBuf,
    pub error: RenderError,
}

#[derive(Debug)]
pub struct BuildReport {
    /// The scanned inventory, renderables carrying their rendered content.
    pub inventory: Inventory,
    pub export: ExportReport,
    pub render_failures: Vec<RenderFailure>,
    pub generated: Vec<GeneratedResource>,
}

impl BuildReport {
    /// No render or export failures.
    pub fn is_clean(&self) -> bool {
        self.render_failures.is_empty() && self.export.is_clean()
    }
}

/// The collaborators a build is run with.
pub struct Toolchain<'a> {
    pub detector: &'a dyn FrontMatterDetector,
    pub renderer: &'a dyn Renderer,
    pub tidy: &'a dyn HtmlNormalizer,
}

impl Default for Toolchain<'static> {
    /// `---` front matter, pulldown-cmark rendering, line ending tidy.
    fn default() -> Self {
        Self {
            detector: &DelimitedFrontMatter,
            renderer: &MarkdownRenderer,
            tidy: &LineEndingTidy,
        }
    }
}

pub fn build(config: &Configuration, tools: &Toolchain<'_>) -> Result<BuildReport, BuildError> {
    let mut inventory = scan_with(config, tools.detector)?;
    let generated = blog_indexes(&inventory, config)?;

    let mut exporter = Exporter::new(config, tools.tidy);
    exporter.prepare_output_root()?;

    info!("Rendering {} page(s)", inventory.renderables.len());
    let mut render_failures = Vec::new();
    for resource in &mut inventory.renderables {
        match tools.renderer.render(resource, config) {
            Ok(content) => resource.set_content(content),
            Err(error) => {
                warn!("Skipping {}: {}", resource.path().display(), error);
                render_failures.push(RenderFailure {
                    path: resource.path().to_path_buf(),
                    error,
                });
            }
        }
    }

    for resource in &inventory.renderables {
        // Failed renders are already reported; exporting them would only
        // add a NotRendered record for the same page.
        if resource.content().is_some() {
            exporter.export(Resource::from(resource))?;
        }
    }
    for resource in &inventory.non_renderables {
        exporter.export(Resource::from(resource))?;
    }
    for resource in &generated {
        exporter.export(Resource::from(resource))?;
    }

    let export = exporter.finish();
    info!(
        "Wrote {} file(s), {} failure(s)",
        export.written.len(),
        export.failures.len() + render_failures.len()
    );

    Ok(BuildReport {
        inventory,
        export,
        render_failures,
        generated,
    })
}
