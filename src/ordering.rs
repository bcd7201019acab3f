//! Newest-first ordering of renderables by publish date.
//!
//! Blog listings are chronological, most recent first. Sorting is stable, so
//! resources sharing a publish date keep their discovery order and repeated
//! builds list them identically.
//!
//! Undated resources have two possible treatments. [`sort_newest_first`]
//! places them after every dated resource (in discovery order).
//! [`sort_newest_first_strict`] refuses to order the slice at all and names
//! the first undated resource instead.

use crate::resource::RenderableResource;
use std::cmp::Ordering;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OrderingError {
    #[error("No publish date for {0}; add a `date` key or disable strict_dates")]
    MissingPublishDate(PathBuf),
}

/// Descending by publish date; undated compares after dated.
pub fn compare_by_publish_date(a: &RenderableResource, b: &RenderableResource) -> Ordering {
    match (a.publish_date(), b.publish_date()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn sort_newest_first(resources: &mut [&RenderableResource]) {
    resources.sort_by(|a, b| compare_by_publish_date(a, b));
}

/// Like [`sort_newest_first`], but every resource must carry a publish date.
/// On error the slice is left untouched.
pub fn sort_newest_first_strict(resources: &mut [&RenderableResource]) -> Result<(), OrderingError> {
    if let Some(undated) = resources.iter().find(|r| r.publish_date().is_none()) {
        return Err(OrderingError::MissingPublishDate(undated.path().to_path_buf()));
    }
    sort_newest_first(resources);
    Ok(())
}
