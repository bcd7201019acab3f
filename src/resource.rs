//! The resource model: everything the crawler discovers.
//!
//! Classification happens exactly once, in [`crate::scan`], before any of
//! these values exist. A resource never changes variant afterwards.
//!
//! | Variant | Backed by | Exported as |
//! |---------|-----------|-------------|
//! | [`RenderableResource`] | a file with front matter | rendered, tidied content |
//! | [`NonRenderableResource`] | any other publishable file | byte-for-byte copy |
//! | [`GeneratedResource`] | nothing (in-memory content) | its content string |
//! | [`BlogResource`] | a directory holding the blog marker | nothing by itself |
//!
//! ## Export paths
//!
//! A resource's export path is its absolute source path with the site root
//! stripped as a literal prefix: root `/site`, file `/site/posts/a.md` gives
//! `/posts/a.md`. A renderable may override this with a `permalink` front
//! matter key. Generated resources carry their export path explicitly.

use crate::frontmatter::{FrontMatter, Metadata, PERMALINK_KEY, TITLE_KEY};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Index of a blog in [`crate::scan::Inventory::blogs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BlogId(pub usize);

/// `path` with `root` stripped as a literal string prefix, or `path`
/// unchanged when it does not start with `root`.
pub fn default_export_path(path: &Path, root: &Path) -> String {
    let path = path.to_string_lossy();
    let root = root.to_string_lossy();
    match path.strip_prefix(root.as_ref()) {
        Some(rest) => rest.to_string(),
        None => path.into_owned(),
    }
}

/// A file whose leading front matter makes it renderable content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableResource {
    path: PathBuf,
    metadata: Metadata,
    line_count: usize,
    publish_date: Option<NaiveDateTime>,
    blog: Option<BlogId>,
    #[serde(skip)]
    content: Option<String>,
}

impl RenderableResource {
    pub fn new(path: PathBuf, front_matter: FrontMatter, publish_date: Option<NaiveDateTime>) -> Self {
        Self {
            path,
            metadata: front_matter.metadata,
            line_count: front_matter.line_count,
            publish_date,
            blog: None,
            content: None,
        }
    }

    /// Absolute source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Front matter lines to skip before the body starts.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn publish_date(&self) -> Option<NaiveDateTime> {
        self.publish_date
    }

    /// The blog this resource is attributed to, if any.
    pub fn blog(&self) -> Option<BlogId> {
        self.blog
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata
            .get(TITLE_KEY)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }

    /// The explicit output path override, when the front matter sets one.
    pub fn permalink(&self) -> Option<&str> {
        self.metadata
            .get(PERMALINK_KEY)
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
    }

    /// The permalink when set, otherwise the default derived path.
    pub fn export_path(&self, root: &Path) -> String {
        match self.permalink() {
            Some(permalink) if permalink.starts_with('/') => permalink.to_string(),
            Some(permalink) => format!("/{permalink}"),
            None => default_export_path(&self.path, root),
        }
    }

    /// Rendered output, once the renderer has produced it.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn set_content(&mut self, content: String) {
        self.content = Some(content);
    }

    pub(crate) fn set_blog(&mut self, blog: BlogId) {
        self.blog = Some(blog);
    }
}

/// A file published exactly as it is on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonRenderableResource {
    path: PathBuf,
}

impl NonRenderableResource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn export_path(&self, root: &Path) -> String {
        default_export_path(&self.path, root)
    }
}

/// Output synthesized in memory, with no source file behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedResource {
    export_path: String,
    content: String,
}

impl GeneratedResource {
    /// `export_path` is relative to the output root; a leading `/` is added
    /// when missing.
    pub fn new(export_path: impl Into<String>, content: impl Into<String>) -> Self {
        let export_path = export_path.into();
        let export_path = if export_path.starts_with('/') {
            export_path
        } else {
            format!("/{export_path}")
        };
        Self {
            export_path,
            content: content.into(),
        }
    }

    pub fn export_path(&self) -> &str {
        &self.export_path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A directory marked as a blog root, with the renderables found under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogResource {
    base_path: PathBuf,
    marker: PathBuf,
    members: Vec<usize>,
}

impl BlogResource {
    /// Anchor a blog at the directory holding `marker`.
    pub fn from_marker(marker: PathBuf) -> Self {
        let base_path = marker
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| marker.clone());
        Self {
            base_path,
            marker,
            members: Vec::new(),
        }
    }

    /// The directory whose subtree forms the blog.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn marker(&self) -> &Path {
        &self.marker
    }

    /// Positions of member renderables in the inventory, in discovery order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// True when `path` lies strictly under the base path.
    pub fn contains(&self, path: &Path) -> bool {
        let mut prefix = self.base_path.to_string_lossy().into_owned();
        prefix.push(std::path::MAIN_SEPARATOR);
        path.to_string_lossy().starts_with(&prefix)
    }

    pub fn export_path(&self, root: &Path) -> String {
        default_export_path(&self.base_path, root)
    }

    pub(crate) fn add_member(&mut self, index: usize) {
        self.members.push(index);
    }
}

/// Any resource, borrowed. Export and reporting match on this instead of
/// asking each value what it is.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Renderable(&'a RenderableResource),
    NonRenderable(&'a NonRenderableResource),
    Generated(&'a GeneratedResource),
    Blog(&'a BlogResource),
}

impl Resource<'_> {
    /// The backing file or directory; `None` for generated output.
    pub fn source_path(&self) -> Option<&Path> {
        match self {
            Resource::Renderable(r) => Some(r.path()),
            Resource::NonRenderable(r) => Some(r.path()),
            Resource::Generated(_) => None,
            Resource::Blog(b) => Some(b.base_path()),
        }
    }

    pub fn export_path(&self, root: &Path) -> String {
        match self {
            Resource::Renderable(r) => r.export_path(root),
            Resource::NonRenderable(r) => r.export_path(root),
            Resource::Generated(g) => g.export_path().to_string(),
            Resource::Blog(b) => b.export_path(root),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Renderable(_) => "renderable",
            Resource::NonRenderable(_) => "static",
            Resource::Generated(_) => "generated",
            Resource::Blog(_) => "blog",
        }
    }
}

impl<'a> From<&'a RenderableResource> for Resource<'a> {
    fn from(r: &'a RenderableResource) -> Self {
        Resource::Renderable(r)
    }
}

impl<'a> From<&'a NonRenderableResource> for Resource<'a> {
    fn from(r: &'a NonRenderableResource) -> Self {
        Resource::NonRenderable(r)
    }
}

impl<'a> From<&'a GeneratedResource> for Resource<'a> {
    fn from(g: &'a GeneratedResource) -> Self {
        Resource::Generated(g)
    }
}

impl<'a> From<&'a BlogResource> for Resource<'a> {
    fn from(b: &'a BlogResource) -> Self {
        Resource::Blog(b)
    }
}
