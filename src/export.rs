//! Writing resources into the output folder.
//!
//! The [`Exporter`] exclusively owns `<root>/<output_dir>` for one run. The
//! folder must not exist beforehand: a leftover one means an earlier run
//! did not finish cleanly, and the build refuses to mix old and new output.
//! The folder is created on first use, or up front with
//! [`Exporter::prepare_output_root`] so that check happens before any work.
//!
//! | Resource | Written as |
//! |----------|------------|
//! | renderable | rendered content, passed through the [`HtmlNormalizer`] |
//! | static | byte-for-byte copy of the source |
//! | generated | its content string, untouched |
//! | blog | nothing |
//!
//! Only the output root itself can fail fatally ([`ExportError`]). A single
//! file that cannot be written is recorded in the [`ExportReport`] and the
//! run carries on.

use crate::config::Configuration;
use crate::resource::{RenderableResource, Resource};
use crate::tidy::HtmlNormalizer;
use log::{debug, info, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Output folder {0} already exists (stale output from a previous run?); remove it and build again")]
    OutputExists(PathBuf),
    #[error("Cannot create output folder {path}: {source}")]
    CreateOutputRoot {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ExportFailureCause {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no rendered content attached")]
    NotRendered,
    #[error("export path leaves the output folder")]
    EscapesOutputRoot,
}

/// One resource that could not be written.
#[derive(Debug)]
pub struct ExportFailure {
    pub export_path: String,
    /// Resolved destination, when resolution got that far.
    pub target: Option<PathBuf>,
    pub cause: ExportFailureCause,
}

#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written, in export order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Exporter<'a> {
    config: &'a Configuration,
    tidy: &'a dyn HtmlNormalizer,
    output_root: Option<PathBuf>,
    report: ExportReport,
}

impl<'a> Exporter<'a> {
    /// Touches nothing on disk until the first export or an explicit
    /// [`prepare_output_root`](Self::prepare_output_root).
    pub fn new(config: &'a Configuration, tidy: &'a dyn HtmlNormalizer) -> Self {
        Self {
            config,
            tidy,
            output_root: None,
            report: ExportReport::default(),
        }
    }

    /// Create the output folder, refusing if it already exists. Idempotent
    /// within one exporter.
    pub fn prepare_output_root(&mut self) -> Result<PathBuf, ExportError> {
        if let Some(root) = &self.output_root {
            return Ok(root.clone());
        }
        let root = self.config.output_root();
        if root.is_dir() {
            return Err(ExportError::OutputExists(root));
        }
        fs::create_dir_all(&root).map_err(|source| ExportError::CreateOutputRoot {
            path: root.clone(),
            source,
        })?;
        info!("Exporting to {}", root.display());
        self.output_root = Some(root.clone());
        Ok(root)
    }

    /// Tidy `content` and write it at the renderable's export path.
    pub fn export_rendered(
        &mut self,
        resource: &RenderableResource,
        content: &str,
    ) -> Result<(), ExportError> {
        let export_path = resource.export_path(self.config.root());
        let tidied = self.tidy.tidy(content);
        self.write(export_path, |target| fs::write(target, tidied.as_bytes()))
    }

    /// Export any resource. Renderables use their attached content.
    pub fn export(&mut self, resource: Resource<'_>) -> Result<(), ExportError> {
        let export_path = resource.export_path(self.config.root());
        match resource {
            Resource::Renderable(r) => match r.content() {
                Some(content) => self.export_rendered(r, content),
                None => {
                    self.prepare_output_root()?;
                    self.record_failure(export_path, None, ExportFailureCause::NotRendered);
                    Ok(())
                }
            },
            Resource::NonRenderable(r) => {
                let source = r.path();
                self.write(export_path, |target| fs::copy(source, target).map(|_| ()))
            }
            Resource::Generated(g) => {
                let content = g.content();
                self.write(export_path, |target| fs::write(target, content.as_bytes()))
            }
            Resource::Blog(b) => {
                debug!("blog {} has no file of its own", b.base_path().display());
                Ok(())
            }
        }
    }

    pub fn report(&self) -> &ExportReport {
        &self.report
    }

    pub fn finish(self) -> ExportReport {
        self.report
    }

    fn write(
        &mut self,
        export_path: String,
        write: impl FnOnce(&Path) -> std::io::Result<()>,
    ) -> Result<(), ExportError> {
        let output_root = self.prepare_output_root()?;
        let Some(target) = resolve_target(&output_root, &export_path) else {
            self.record_failure(export_path, None, ExportFailureCause::EscapesOutputRoot);
            return Ok(());
        };

        let result = match target.parent() {
            Some(parent) => fs::create_dir_all(parent),
            None => Ok(()),
        }
        .and_then(|_| write(&target));

        match result {
            Ok(()) => {
                debug!("wrote {}", target.display());
                self.report.written.push(target);
            }
            Err(err) => self.record_failure(export_path, Some(target), err.into()),
        }
        Ok(())
    }

    fn record_failure(
        &mut self,
        export_path: String,
        target: Option<PathBuf>,
        cause: ExportFailureCause,
    ) {
        warn!("Failed to export {export_path}: {cause}");
        self.report.failures.push(ExportFailure {
            export_path,
            target,
            cause,
        });
    }
}

/// `export_path` below `output_root`, or `None` when it would climb out.
fn resolve_target(output_root: &Path, export_path: &str) -> Option<PathBuf> {
    let relative = Path::new(export_path.trim_start_matches(['/', '\\']));
    let mut target = output_root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if target == output_root {
        return None;
    }
    Some(target)
}
