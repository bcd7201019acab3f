//! Blog index pages.
//!
//! Every blog gets a generated listing at `<blog export path>/index.html`:
//! its members, newest first, each linking to the member's export path.
//! An author who writes their own page at that path keeps it; no listing
//! is generated then.

use crate::config::Configuration;
use crate::ordering::{OrderingError, sort_newest_first, sort_newest_first_strict};
use crate::resource::{BlogResource, GeneratedResource, RenderableResource};
use crate::scan::Inventory;
use log::debug;
use maud::{DOCTYPE, Markup, html};

pub const INDEX_FILE: &str = "index.html";

/// One listing per blog, in blog discovery order.
///
/// With `strict_dates` set, a blog holding an undated member fails the whole
/// call instead of listing that member last.
pub fn blog_indexes(
    inventory: &Inventory,
    config: &Configuration,
) -> Result<Vec<GeneratedResource>, OrderingError> {
    let root = config.root();
    let mut indexes = Vec::new();

    for id in inventory.blog_ids() {
        let Some(blog) = inventory.blog(id) else {
            continue;
        };
        let index_path = format!("{}/{INDEX_FILE}", blog.export_path(root).trim_end_matches('/'));
        let authored = inventory
            .renderables
            .iter()
            .map(|r| r.export_path(root))
            .chain(inventory.non_renderables.iter().map(|r| r.export_path(root)))
            .any(|path| path == index_path);
        if authored {
            debug!("{index_path} is authored, not generating a listing");
            continue;
        }

        let mut members = inventory.blog_members(id);
        if config.strict_dates() {
            sort_newest_first_strict(&mut members)?;
        } else {
            sort_newest_first(&mut members);
        }

        let markup = render_index(&blog_title(blog), &members, config);
        debug!("generated {index_path} listing {} post(s)", members.len());
        indexes.push(GeneratedResource::new(index_path, markup.into_string()));
    }
    Ok(indexes)
}

fn blog_title(blog: &BlogResource) -> String {
    blog.base_path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Blog".to_string())
}

fn entry_title(resource: &RenderableResource) -> String {
    resource
        .title()
        .map(str::to_string)
        .or_else(|| {
            resource
                .path()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_default()
}

fn render_index(title: &str, members: &[&RenderableResource], config: &Configuration) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                main.blog-index {
                    h1 { (title) }
                    ul.posts {
                        @for post in members {
                            li {
                                @if let Some(date) = post.publish_date() {
                                    time datetime=(date.format("%Y-%m-%d")) {
                                        (date.format("%B %-d, %Y"))
                                    }
                                    " "
                                }
                                a href=(post.export_path(config.root())) { (entry_title(post)) }
                            }
                        }
                    }
                }
            }
        }
    }
}
