//! CLI output formatting for scan and build.
//!
//! # Information-First Display
//!
//! Every entity leads with its positional index and identity (title for
//! pages, path for static files and blogs). Filesystem details follow as
//! indented context lines. All paths are shown relative to the site root.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 About
//!     Source: about.md
//! 002 Hello
//!     Source: blog/hello.md
//!     Date: 2012-03-03
//!     Blog: blog/
//!
//! Static
//! 001 style.css
//!
//! Blogs
//! 001 blog/ (1 post)
//!     001 Hello
//!
//! Hidden
//!     .htaccess
//!     blog/.blog
//!
//! Demoted
//!     broken.md: front matter is never closed by a `---` line
//! ```
//!
//! ## Build
//!
//! ```text
//! About → about.md
//! Hello → blog/hello.md
//! style.css → style.css
//! blog/ index → blog/index.html
//!
//! Failed
//!     notes.md: IO error: permission denied
//!
//! Wrote 4 files (2 pages, 1 static, 1 generated), 1 failure
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::resource::RenderableResource;
use crate::scan::Inventory;
use crate::site::BuildReport;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `path` relative to `root`, `/`-separated.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Directory display: trailing `/`, and `./` for the root itself.
fn relative_dir(path: &Path, root: &Path) -> String {
    let rel = relative(path, root);
    if rel.is_empty() {
        "./".to_string()
    } else {
        format!("{rel}/")
    }
}

/// Title when set, otherwise the file name in parens.
fn page_label(page: &RenderableResource) -> String {
    match page.title() {
        Some(title) => title.to_string(),
        None => format!(
            "({})",
            page.path()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        ),
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format the inventory a scan produced.
pub fn format_scan_output(inventory: &Inventory) -> Vec<String> {
    let root = &inventory.root;
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for (i, page) in inventory.renderables.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page_label(page)));
        lines.push(format!("{}Source: {}", indent(1), relative(page.path(), root)));
        if let Some(date) = page.publish_date() {
            lines.push(format!("{}Date: {}", indent(1), date.format("%Y-%m-%d")));
        }
        if let Some(permalink) = page.permalink() {
            lines.push(format!("{}Permalink: {}", indent(1), permalink));
        }
        if let Some(blog) = inventory.blog_of(page) {
            lines.push(format!(
                "{}Blog: {}",
                indent(1),
                relative_dir(blog.base_path(), root)
            ));
        }
    }

    if !inventory.non_renderables.is_empty() {
        lines.push(String::new());
        lines.push("Static".to_string());
        for (i, file) in inventory.non_renderables.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), relative(file.path(), root)));
        }
    }

    if !inventory.blogs.is_empty() {
        lines.push(String::new());
        lines.push("Blogs".to_string());
        for (i, id) in inventory.blog_ids().enumerate() {
            let Some(blog) = inventory.blog(id) else {
                continue;
            };
            let members = inventory.blog_members(id);
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                relative_dir(blog.base_path(), root),
                plural(members.len(), "post", "posts")
            ));
            for (j, post) in members.iter().enumerate() {
                lines.push(format!("{}{} {}", indent(1), format_index(j + 1), page_label(post)));
            }
        }
    }

    if !inventory.hidden_files.is_empty() {
        lines.push(String::new());
        lines.push("Hidden".to_string());
        for path in &inventory.hidden_files {
            lines.push(format!("{}{}", indent(1), relative(path, root)));
        }
    }

    if !inventory.demotions.is_empty() {
        lines.push(String::new());
        lines.push("Demoted".to_string());
        for demotion in &inventory.demotions {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                relative(&demotion.path, root),
                demotion.reason
            ));
        }
    }

    lines
}

pub fn print_scan_output(inventory: &Inventory) {
    for line in format_scan_output(inventory) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format what a build wrote and what it could not.
pub fn format_build_output(report: &BuildReport, output_root: &Path) -> Vec<String> {
    let inventory = &report.inventory;
    let root = &inventory.root;
    let written = |export_path: &str| {
        report
            .export
            .written
            .iter()
            .any(|w| relative(w, output_root) == export_path.trim_start_matches('/'))
    };

    let mut lines = Vec::new();
    let mut pages = 0;
    for page in &inventory.renderables {
        let export_path = page.export_path(root);
        if written(&export_path) {
            pages += 1;
            lines.push(format!(
                "{} → {}",
                page_label(page),
                export_path.trim_start_matches('/')
            ));
        }
    }

    let mut statics = 0;
    for file in &inventory.non_renderables {
        let export_path = file.export_path(root);
        if written(&export_path) {
            statics += 1;
            lines.push(format!(
                "{} → {}",
                relative(file.path(), root),
                export_path.trim_start_matches('/')
            ));
        }
    }

    let mut generated = 0;
    for resource in &report.generated {
        if written(resource.export_path()) {
            generated += 1;
            let export_path = resource.export_path().trim_start_matches('/');
            let label = match export_path.rsplit_once('/') {
                Some((dir, _)) => format!("{dir}/ index"),
                None => "./ index".to_string(),
            };
            lines.push(format!("{label} → {export_path}"));
        }
    }

    let failures = report.render_failures.len() + report.export.failures.len();
    if failures > 0 {
        lines.push(String::new());
        lines.push("Failed".to_string());
        for failure in &report.render_failures {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                relative(&failure.path, root),
                failure.error
            ));
        }
        for failure in &report.export.failures {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                failure.export_path.trim_start_matches('/'),
                failure.cause
            ));
        }
    }

    lines.push(String::new());
    let mut summary = format!(
        "Wrote {} ({} pages, {} static, {} generated)",
        plural(report.export.written.len(), "file", "files"),
        pages,
        statics,
        generated
    );
    if failures > 0 {
        summary.push_str(&format!(", {}", plural(failures, "failure", "failures")));
    }
    lines.push(summary);

    lines
}

pub fn print_build_output(report: &BuildReport, output_root: &Path) {
    for line in format_build_output(report, output_root) {
        println!("{}", line);
    }
}
