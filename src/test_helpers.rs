//! Shared test utilities for the hearth test suite.
//!
//! Provides tree builders and lookup helpers that work with scan-phase data
//! (`Inventory`, `RenderableResource`). Paths are reported relative to the
//! site root with `/` separators so assertions read the same on every
//! platform.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = site_tree(&[
//!     ("blog/.blog", ""),
//!     ("blog/hello.md", "---\ntitle: Hello\n---\n"),
//! ]);
//! let inventory = scan(&config_for(&tmp)).unwrap();
//!
//! let hello = find_renderable(&inventory, "blog/hello.md");
//! assert_eq!(hello.title(), Some("Hello"));
//! assert_eq!(blog_member_names(&inventory, BlogId(0)), vec!["blog/hello.md"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{Configuration, DEFAULT_CONFIG_FILE};
use crate::resource::{BlogId, RenderableResource};
use crate::scan::Inventory;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Build a site in a temp directory from `(relative path, contents)` pairs.
/// Parent directories are created as needed.
pub fn site_tree(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, contents) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
    }
    tmp
}

/// Stock configuration rooted at the temp dir.
pub fn config_for(tmp: &TempDir) -> Configuration {
    Configuration::new(tmp.path(), &tmp.path().join(DEFAULT_CONFIG_FILE)).unwrap()
}

// =========================================================================
// Inventory lookups: panic with a clear message on miss
// =========================================================================

/// `path` relative to `root`, `/`-separated.
pub fn relative_name(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn relative_names(paths: &[PathBuf], root: &Path) -> Vec<String> {
    paths.iter().map(|p| relative_name(p, root)).collect()
}

/// Find a renderable by its root-relative path. Panics if not found.
pub fn find_renderable<'a>(inventory: &'a Inventory, rel: &str) -> &'a RenderableResource {
    let root = &inventory.root;
    inventory
        .renderables
        .iter()
        .find(|r| relative_name(r.path(), root) == rel)
        .unwrap_or_else(|| {
            let names = renderable_names(inventory);
            panic!("renderable '{rel}' not found. Available: {names:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Root-relative renderable paths in discovery order.
pub fn renderable_names(inventory: &Inventory) -> Vec<String> {
    let root = &inventory.root;
    inventory
        .renderables
        .iter()
        .map(|r| relative_name(r.path(), root))
        .collect()
}

/// Root-relative static file paths in discovery order.
pub fn non_renderable_names(inventory: &Inventory) -> Vec<String> {
    let root = &inventory.root;
    inventory
        .non_renderables
        .iter()
        .map(|r| relative_name(r.path(), root))
        .collect()
}

/// Root-relative paths of a blog's members, in membership order.
pub fn blog_member_names(inventory: &Inventory, id: BlogId) -> Vec<String> {
    let root = &inventory.root;
    inventory
        .blog_members(id)
        .iter()
        .map(|r| relative_name(r.path(), root))
        .collect()
}
