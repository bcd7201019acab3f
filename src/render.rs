//! Rendering of renderable bodies to HTML.
//!
//! The build hands each [`RenderableResource`] to a [`Renderer`] and attaches
//! the returned string as the resource's content. A failure affects only that
//! resource: it is reported and skipped, never published half-rendered.
//!
//! [`MarkdownRenderer`] is the stock renderer. It reads the source, drops the
//! front matter lines, and converts the body with pulldown-cmark according to
//! [`LayoutMode`]:
//!
//! | Mode | `.md` / `.markdown` | anything else |
//! |------|---------------------|---------------|
//! | `auto-detect` | markdown → HTML | as written |
//! | `markdown` | markdown → HTML | markdown → HTML |
//! | `plain` | as written | as written |
//!
//! In safe mode raw HTML embedded in markdown is dropped.

use crate::config::{Configuration, LayoutMode};
use crate::resource::RenderableResource;
use pulldown_cmark::{Event, Options, Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot render {path}: {reason}")]
    UnsupportedContent { path: PathBuf, reason: String },
}

pub trait Renderer {
    fn render(
        &self,
        resource: &RenderableResource,
        config: &Configuration,
    ) -> Result<String, RenderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(
        &self,
        resource: &RenderableResource,
        config: &Configuration,
    ) -> Result<String, RenderError> {
        let bytes = fs::read(resource.path())?;
        let text = String::from_utf8(bytes).map_err(|_| RenderError::UnsupportedContent {
            path: resource.path().to_path_buf(),
            reason: "body is not valid UTF-8".to_string(),
        })?;
        let body = skip_lines(&text, resource.line_count());

        if is_markdown(resource.path(), config.layout_mode()) {
            Ok(markdown_to_html(body, config.safe()))
        } else {
            Ok(body.to_string())
        }
    }
}

fn is_markdown(path: &Path, mode: LayoutMode) -> bool {
    match mode {
        LayoutMode::Markdown => true,
        LayoutMode::Plain => false,
        LayoutMode::AutoDetect => path.extension().is_some_and(|ext| {
            let ext = ext.to_string_lossy();
            ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown")
        }),
    }
}

/// The text after the first `count` lines.
fn skip_lines(text: &str, count: usize) -> &str {
    if count == 0 {
        return text;
    }
    match text.match_indices('\n').nth(count - 1) {
        Some((offset, _)) => &text[offset + 1..],
        None => "",
    }
}

/// CommonMark plus tables, footnotes and strikethrough. `safe` drops raw HTML.
pub fn markdown_to_html(body: &str, safe: bool) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(body, options)
        .filter(|event| !(safe && matches!(event, Event::Html(_) | Event::InlineHtml(_))));

    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}
