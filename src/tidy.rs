//! Post-render cleanup of HTML output.
//!
//! The exporter passes every rendered page through an [`HtmlNormalizer`]
//! before writing it. Static files and generated pages are never tidied.

use normalize_line_endings::normalized;

pub trait HtmlNormalizer {
    fn tidy(&self, content: &str) -> String;
}

/// Leaves content untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTidy;

impl HtmlNormalizer for NoTidy {
    fn tidy(&self, content: &str) -> String {
        content.to_string()
    }
}

/// `\n` line endings, no trailing whitespace on the last line, and exactly
/// one final newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEndingTidy;

impl HtmlNormalizer for LineEndingTidy {
    fn tidy(&self, content: &str) -> String {
        let mut out: String = normalized(content.chars()).collect();
        out.truncate(out.trim_end().len());
        out.push('\n');
        out
    }
}
