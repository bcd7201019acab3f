//! Front matter detection.
//!
//! A page opts into rendering by starting with a YAML block fenced by `---`:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2012-03-03
//! published: false
//! ---
//! Body starts here.
//! ```
//!
//! The crawler only needs to know whether such a block exists, what it says,
//! and how many lines it spans (so the renderer can skip it). Scalar values
//! land in [`Metadata`] as strings; lists and nested maps are skipped.
//! Detection sits behind [`FrontMatterDetector`] so alternative syntaxes can
//! be plugged in; [`DelimitedFrontMatter`] is the stock implementation.

use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use thiserror::Error;

/// Parsed front matter keys, sorted by key.
pub type Metadata = BTreeMap<String, String>;

pub const DELIMITER: &str = "---";
pub const TITLE_KEY: &str = "title";
pub const DATE_KEY: &str = "date";
pub const PUBLISHED_KEY: &str = "published";
pub const PERMALINK_KEY: &str = "permalink";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("front matter is never closed by a `---` line")]
    Unterminated,
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a mapping of keys to values")]
    NotAMapping,
}

/// Result of looking for front matter at the top of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    /// Lines consumed by the block, both fences included. Zero when the file
    /// has no front matter.
    pub line_count: usize,
    pub metadata: Metadata,
}

impl FrontMatter {
    pub fn is_present(&self) -> bool {
        self.line_count > 0
    }

    /// True when `published` is explicitly `false`, in any case.
    pub fn is_unpublished(&self) -> bool {
        self.metadata
            .get(PUBLISHED_KEY)
            .is_some_and(|v| v.eq_ignore_ascii_case("false"))
    }
}

pub trait FrontMatterDetector {
    fn detect(&self, path: &Path) -> Result<FrontMatter, FrontMatterError>;
}

/// `---` fenced YAML blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedFrontMatter;

impl FrontMatterDetector for DelimitedFrontMatter {
    fn detect(&self, path: &Path) -> Result<FrontMatter, FrontMatterError> {
        let file = File::open(path)?;
        parse_front_matter(BufReader::new(file))
    }
}

/// Read the leading block from `reader`, stopping at the closing fence.
pub fn parse_front_matter<R: BufRead>(reader: R) -> Result<FrontMatter, FrontMatterError> {
    let mut lines = reader.lines();

    let opened = match lines.next() {
        Some(Ok(first)) => first.trim_start_matches('\u{feff}').trim_end() == DELIMITER,
        // Binary content: nothing to detect.
        Some(Err(err)) if err.kind() == ErrorKind::InvalidData => false,
        Some(Err(err)) => return Err(err.into()),
        None => false,
    };
    if !opened {
        return Ok(FrontMatter::default());
    }

    let mut block = String::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');

        if line.trim() == DELIMITER {
            return Ok(FrontMatter {
                line_count: i + 2,
                metadata: parse_metadata(&block)?,
            });
        }
        block.push_str(line);
        block.push('\n');
    }

    Err(FrontMatterError::Unterminated)
}

/// Flatten a YAML mapping into string metadata.
fn parse_metadata(block: &str) -> Result<Metadata, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }
    let mapping = match serde_yaml::from_str::<Value>(block)? {
        Value::Null => return Ok(Metadata::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(FrontMatterError::NotAMapping),
    };

    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        let (Some(key), Some(value)) = (scalar_text(&key), scalar_text(&value)) else {
            log::debug!("skipping non-scalar front matter entry {key:?}");
            continue;
        };
        if !key.is_empty() {
            metadata.insert(key, value);
        }
    }
    Ok(metadata)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
