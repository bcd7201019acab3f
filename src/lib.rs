//! # Hearth
//!
//! A blog-aware static site generator. Your source tree is the site: files
//! with front matter are rendered, everything else is copied, and any folder
//! holding a `.blog` marker becomes a blog whose posts are listed newest
//! first.
//!
//! # Architecture: Scan, Render, Export
//!
//! ```text
//! 1. Scan     root/       →  Inventory      (classify every file exactly once)
//! 2. Render   renderables →  HTML strings   (front matter skipped, body converted)
//! 3. Export   resources   →  _site/         (exclusive, must not pre-exist)
//! ```
//!
//! Classification is final. Once the scan has decided that a file is a page,
//! a static file, a blog marker, or nothing at all, no later stage revisits
//! that decision. Later stages match on [`resource::Resource`] instead of
//! asking each resource what it is.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the root, classifies files, attributes pages to blogs |
//! | [`render`] | Stage 2: `Renderer` trait and the pulldown-cmark renderer |
//! | [`export`] | Stage 3: writes resources below the output folder, collects failures |
//! | [`site`] | The whole build wired together, with its report |
//! | [`resource`] | The four resource variants and export path rules |
//! | [`frontmatter`] | `---` fenced YAML detection behind a trait |
//! | [`dates`] | Publish-date parsing against an ordered format list |
//! | [`ordering`] | Newest-first ordering of pages |
//! | [`blog`] | Generated blog index pages (Maud) |
//! | [`tidy`] | Post-render HTML normalization |
//! | [`config`] | `_config.toml` loading, validation, and defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Reserved Names Only Count at the Top
//!
//! `_includes`, `_layouts`, `_plugins` and `_site` are skipped only when they
//! sit directly in the site root. A `docs/_site/` folder is ordinary content.
//! Version-control folders (`.git`, `.svn`, `CVS`) are skipped at any depth.
//!
//! ## Stale Output Is an Error
//!
//! The output folder must not exist when a build starts. A leftover folder
//! means the previous build did not finish, or someone is about to overwrite
//! hand-edited output; either way the build stops before writing anything.
//!
//! ## Failures Are Reported, Not Swallowed
//!
//! Only an unreadable directory, a stale output folder, or (under
//! `strict_dates`) an undated blog post stop a build. A page whose front
//! matter is broken is published as a static file and listed under
//! `Demoted`. A file that cannot be written is listed under `Failed`. The
//! build exits non-zero whenever anything was left out.

pub mod blog;
pub mod config;
pub mod dates;
pub mod export;
pub mod frontmatter;
pub mod ordering;
pub mod output;
pub mod render;
pub mod resource;
pub mod scan;
pub mod site;
pub mod tidy;

#[cfg(test)]
pub(crate) mod test_helpers;
