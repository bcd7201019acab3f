//! Crawling and classification of the source tree.
//!
//! Stage 1 of the build. Walks the site root once, depth first, and sorts
//! every file into exactly one bucket of the returned [`Inventory`]:
//!
//! ```text
//! site/
//! ├── _config.toml        # config file: skipped at the top level
//! ├── _layouts/           # reserved folder: skipped at the top level
//! ├── _site/              # output folder: skipped at the top level
//! ├── .git/               # version control: skipped at any depth
//! ├── about.md            # front matter → renderable
//! ├── logo.png            # binary extension → static, never opened
//! ├── notes.txt           # no front matter → static
//! ├── .htaccess           # hidden → recorded, never published
//! └── blog/
//!     ├── .blog           # marker → blog rooted at blog/
//!     ├── 2012-hello.md   # renderable, member of blog/
//!     └── draft.md        # `published: false` → dropped entirely
//! ```
//!
//! ## Classification
//!
//! For each file, in order:
//!
//! 1. The config file, when it sits in the root or one level below, is skipped.
//! 2. Names starting with `.` are recorded as hidden. The blog marker creates
//!    a [`BlogResource`] for its directory. Neither is ever content.
//! 3. A binary extension makes the file static without opening it.
//! 4. Otherwise front matter is looked for. Present and not explicitly
//!    unpublished → renderable. Present and `published: false` → no resource.
//!    Absent → static. Detection failure → static, recorded as a demotion.
//!
//! ## Blog attribution
//!
//! After the walk, every renderable is tested against every blog base path
//! (see [`BlogAttribution`] for how several containing blogs are resolved).
//!
//! ## Failures
//!
//! A directory that cannot be listed aborts the scan with
//! [`ScanError::Crawl`] naming the path. Per-file detection failures never
//! abort; they show up in [`Inventory::demotions`].

use crate::config::{BlogAttribution, Configuration};
use crate::dates::DateParser;
use crate::frontmatter::{DATE_KEY, DelimitedFrontMatter, FrontMatterDetector};
use crate::resource::{BlogId, BlogResource, NonRenderableResource, RenderableResource, Resource};
use log::{debug, info, trace, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Site root is not a directory: {0}")]
    RootNotFound(PathBuf),
    #[error("Cannot read {path}: {source}")]
    Crawl {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// A file that had front matter trouble and was published verbatim instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Demotion {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything one scan found, in discovery order (depth first, entries
/// within a directory sorted by file name).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inventory {
    /// The absolute site root the scan started from.
    pub root: PathBuf,
    pub renderables: Vec<RenderableResource>,
    pub non_renderables: Vec<NonRenderableResource>,
    pub blogs: Vec<BlogResource>,
    /// Dot files, blog markers included. Diagnostic only.
    pub hidden_files: Vec<PathBuf>,
    /// Front matter failures that downgraded a file to static.
    pub demotions: Vec<Demotion>,
    /// Files dropped by `published: false`. Diagnostic only.
    pub unpublished: Vec<PathBuf>,
}

impl Inventory {
    pub fn blog(&self, id: BlogId) -> Option<&BlogResource> {
        self.blogs.get(id.0)
    }

    /// The blog a renderable was attributed to.
    pub fn blog_of(&self, resource: &RenderableResource) -> Option<&BlogResource> {
        resource.blog().and_then(|id| self.blog(id))
    }

    /// Member renderables of a blog, in discovery order.
    pub fn blog_members(&self, id: BlogId) -> Vec<&RenderableResource> {
        self.blog(id)
            .map(|blog| {
                blog.members()
                    .iter()
                    .filter_map(|&i| self.renderables.get(i))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn blog_ids(&self) -> impl Iterator<Item = BlogId> + '_ {
        (0..self.blogs.len()).map(BlogId)
    }

    /// Every resource: renderables, then static files, then blogs.
    pub fn resources(&self) -> impl Iterator<Item = Resource<'_>> {
        self.renderables
            .iter()
            .map(Resource::from)
            .chain(self.non_renderables.iter().map(Resource::from))
            .chain(self.blogs.iter().map(Resource::from))
    }
}

/// Scan `config.root()` with the stock front matter detector.
pub fn scan(config: &Configuration) -> Result<Inventory, ScanError> {
    scan_with(config, &DelimitedFrontMatter)
}

pub fn scan_with(
    config: &Configuration,
    detector: &dyn FrontMatterDetector,
) -> Result<Inventory, ScanError> {
    let root = config.root();
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    info!("Scanning {}", root.display());

    let mut classifier = Classifier {
        config,
        detector,
        dates: config.date_parser(),
        inventory: Inventory {
            root: root.to_path_buf(),
            ..Inventory::default()
        },
    };

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e, config));

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Crawl {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            trace!("entering {}", entry.path().display());
            continue;
        }
        // Symlinks are published when they point at a file; linked
        // directories are not descended into.
        if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
            classifier.classify(entry.path(), entry.depth() - 1);
        } else {
            debug!("skipping {}: not a regular file", entry.path().display());
        }
    }

    let mut inventory = classifier.inventory;
    attribute_blogs(&mut inventory, config.blog_attribution());

    info!(
        "Found {} renderable, {} static, {} blog(s)",
        inventory.renderables.len(),
        inventory.non_renderables.len(),
        inventory.blogs.len()
    );
    Ok(inventory)
}

/// Directories pruned from the walk. The root itself is never pruned.
fn is_skipped_dir(entry: &DirEntry, config: &Configuration) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if config.is_vcs_dir(&name) {
        debug!("skipping version control dir {}", entry.path().display());
        return true;
    }
    if entry.depth() <= 1 && config.is_reserved_dir(&name) {
        debug!("skipping reserved dir {}", entry.path().display());
        return true;
    }
    false
}

struct Classifier<'a> {
    config: &'a Configuration,
    detector: &'a dyn FrontMatterDetector,
    dates: DateParser,
    inventory: Inventory,
}

impl Classifier<'_> {
    /// `dir_depth` is the depth of the directory holding `path` (root = 0).
    fn classify(&mut self, path: &Path, dir_depth: usize) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if dir_depth <= 1 && path == self.config.config_file() {
            debug!("skipping config file {}", path.display());
            return;
        }

        let hidden = name.starts_with('.');
        if hidden {
            self.inventory.hidden_files.push(path.to_path_buf());
        }
        if name == self.config.blog_marker() {
            debug!("blog marker {}", path.display());
            self.inventory
                .blogs
                .push(BlogResource::from_marker(path.to_path_buf()));
            return;
        }
        if hidden {
            trace!("hidden {}", path.display());
            return;
        }

        let binary = path
            .extension()
            .is_some_and(|ext| self.config.is_binary_extension(&ext.to_string_lossy()));
        if binary {
            trace!("static (binary extension) {}", path.display());
            self.push_static(path);
            return;
        }

        match self.detector.detect(path) {
            Ok(front_matter) if front_matter.is_present() => {
                if front_matter.is_unpublished() {
                    debug!("unpublished, dropping {}", path.display());
                    self.inventory.unpublished.push(path.to_path_buf());
                    return;
                }
                let publish_date = front_matter
                    .metadata
                    .get(DATE_KEY)
                    .and_then(|text| self.dates.parse(text));
                debug!("renderable {}", path.display());
                self.inventory.renderables.push(RenderableResource::new(
                    path.to_path_buf(),
                    front_matter,
                    publish_date,
                ));
            }
            Ok(_) => {
                trace!("static (no front matter) {}", path.display());
                self.push_static(path);
            }
            Err(err) => {
                warn!("{}: {}; publishing as-is", path.display(), err);
                self.inventory.demotions.push(Demotion {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
                self.push_static(path);
            }
        }
    }

    fn push_static(&mut self, path: &Path) {
        self.inventory
            .non_renderables
            .push(NonRenderableResource::new(path.to_path_buf()));
    }
}

/// Attach each renderable to the blog(s) whose base path contains it.
fn attribute_blogs(inventory: &mut Inventory, policy: BlogAttribution) {
    let Inventory {
        renderables, blogs, ..
    } = inventory;

    for (index, resource) in renderables.iter_mut().enumerate() {
        let containing: Vec<usize> = blogs
            .iter()
            .enumerate()
            .filter(|(_, blog)| blog.contains(resource.path()))
            .map(|(i, _)| i)
            .collect();

        let owner = match policy {
            BlogAttribution::LastMatch => {
                for &i in &containing {
                    blogs[i].add_member(index);
                }
                containing.last().copied()
            }
            BlogAttribution::LongestPrefix => {
                let deepest = containing
                    .iter()
                    .copied()
                    .max_by_key(|&i| blogs[i].base_path().components().count());
                if let Some(i) = deepest {
                    blogs[i].add_member(index);
                }
                deepest
            }
        };

        if let Some(i) = owner {
            if containing.len() > 1 {
                debug!(
                    "{} sits under {} blogs, attributed to {}",
                    resource.path().display(),
                    containing.len(),
                    blogs[i].base_path().display()
                );
            }
            resource.set_blog(BlogId(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteOptions;
    use crate::frontmatter::{FrontMatter, FrontMatterError};
    use crate::test_helpers::*;
    use std::fs;

    #[test]
    fn config_file_skipped_and_page_renderable() {
        let tmp = site_tree(&[
            ("_config.yml", "title: My Site\n"),
            ("about.md", "---\ntitle: About\n---\nHello\n"),
        ]);
        let config = Configuration::new(tmp.path(), &tmp.path().join("_config.yml")).unwrap();
        let inventory = scan(&config).unwrap();

        assert_eq!(renderable_names(&inventory), vec!["about.md"]);
        assert!(inventory.non_renderables.is_empty());

        let about = find_renderable(&inventory, "about.md");
        assert_eq!(about.metadata().len(), 1);
        assert_eq!(about.title(), Some("About"));
        assert_eq!(about.blog(), None);
    }

    #[test]
    fn config_file_one_level_down_is_skipped() {
        let tmp = site_tree(&[
            ("conf/_config.toml", "plain"),
            ("conf/other.toml", "plain"),
        ]);
        let config =
            Configuration::new(tmp.path(), &tmp.path().join("conf/_config.toml")).unwrap();
        let inventory = scan(&config).unwrap();
        assert_eq!(non_renderable_names(&inventory), vec!["conf/other.toml"]);
    }

    #[test]
    fn config_file_deeper_is_not_special() {
        let tmp = site_tree(&[("a/b/_config.toml", "plain")]);
        let config = Configuration::new(tmp.path(), &tmp.path().join("a/b/_config.toml")).unwrap();
        let inventory = scan(&config).unwrap();
        assert_eq!(non_renderable_names(&inventory), vec!["a/b/_config.toml"]);
    }

    #[test]
    fn hidden_files_recorded_not_classified() {
        let tmp = site_tree(&[
            (".htaccess", "---\ntitle: sneaky\n---\n"),
            ("docs/.DS_Store", "junk"),
            ("index.md", "---\ntitle: Home\n---\n"),
        ]);
        let inventory = scan(&config_for(&tmp)).unwrap();

        assert_eq!(renderable_names(&inventory), vec!["index.md"]);
        assert!(inventory.non_renderables.is_empty());
        assert_eq!(
            relative_names(&inventory.hidden_files, tmp.path()),
            vec![".htaccess", "docs/.DS_Store"]
        );
    }

    #[test]
    fn binary_extensions_never_renderable() {
        let tmp = site_tree(&[
            ("style.css", "---\ntitle: not really\n---\nbody {}"),
            ("img/logo.png", "---\n---\n"),
            ("app.js", "---\n---\n"),
        ]);
        let inventory = scan(&config_for(&tmp)).unwrap();

        assert!(inventory.renderables.is_empty());
        assert_eq!(
            non_renderable_names(&inventory),
            vec!["app.js", "img/logo.png", "style.css"]
        );
    }

    #[test]
    fn binary_extensions_configurable() {
        let tmp = site_tree(&[("doc.pdf", "---\n---\n"), ("style.css", "---\n---\n")]);
        let options = SiteOptions {
            binary_extensions: vec!["pdf".to_string()],
            ..SiteOptions::default()
        };
        let config = Configuration::from_options(
            tmp.path(),
            &tmp.path().join("_config.toml"),
            options,
        )
        .unwrap();
        let inventory = scan(&config).unwrap();

        assert_eq!(renderable_names(&inventory), vec!["style.css"]);
        assert_eq!(non_renderable_names(&inventory), vec!["doc.pdf"]);
    }

    #[test]
    fn unpublished_produces_nothing() {
        let tmp = site_tree(&[
            ("draft.md", "---\ntitle: Draft\npublished: FALSE\n---\n"),
            ("live.md", "---\npublished: true\n---\n"),
        ]);
        let inventory = scan(&config_for(&tmp)).unwrap();

        assert_eq!(renderable_names(&inventory), vec!["live.md"]);
        assert!(inventory.non_renderables.is_empty());
        assert_eq!(
            relative_names(&inventory.unpublished, tmp.path()),
            vec!["draft.md"]
        );
    }

    #[test]
    fn no_front_matter_is_static() {
        let tmp = site_tree(&[("notes.txt", "just text\n"), ("empty.md", "")]);
        let inventory = scan(&config_for(&tmp)).unwrap();
        assert!(inventory.renderables.is_empty());
        assert_eq!(non_renderable_names(&inventory), vec!["empty.md", "notes.txt"]);
        assert!(inventory.demotions.is_empty());
    }

    #[test]
    fn broken_front_matter_demoted() {
        let tmp = site_tree(&[("broken.md", "---\ntitle: never closed\n")]);
        let inventory = scan(&config_for(&tmp)).unwrap();

        assert!(inventory.renderables.is_empty());
        assert_eq!(non_renderable_names(&inventory), vec!["broken.md"]);
        assert_eq!(inventory.demotions.len(), 1);
        assert!(inventory.demotions[0].reason.contains("never closed"));
    }

    #[test]
    fn yaml_list_in_front_matter_stays_renderable() {
        let tmp = site_tree(&[(
            "post.md",
            "---\ntitle: Hello\ntags:\n  - rust\n  - blog\n---\nbody",
        )]);
        let inventory = scan(&config_for(&tmp)).unwrap();

        assert_eq!(renderable_names(&inventory), vec!["post.md"]);
        assert!(inventory.non_renderables.is_empty());
        assert!(inventory.demotions.is_empty());
        let post = find_renderable(&inventory, "post.md");
        assert_eq!(post.title(), Some("Hello"));
        assert_eq!(post.line_count(), 6);
    }

    struct FailingDetector;

    impl FrontMatterDetector for FailingDetector {
        fn detect(&self, path: &Path) -> Result<FrontMatter, FrontMatterError> {
            Err(FrontMatterError::Io(std::io::Error::other(format!(
                "cannot inspect {}",
                path.display()
            ))))
        }
    }

    #[test]
    fn detector_failure_demotes_not_aborts() {
        let tmp = site_tree(&[("a.md", "---\n---\n"), ("b.md", "---\n---\n")]);
        let inventory = scan_with(&config_for(&tmp), &FailingDetector).unwrap();

        assert!(inventory.renderables.is_empty());
        assert_eq!(non_renderable_names(&inventory), vec!["a.md", "b.md"]);
        assert_eq!(inventory.demotions.len(), 2);
    }

    #[test]
    fn reserved_dirs_skipped_only_at_top() {
        let tmp = site_tree(&[
            ("_layouts/default.html", "---\n---\n"),
            ("_includes/nav.html", "x"),
            ("_plugins/p.rb", "x"),
            ("_site/old.html", "x"),
            ("docs/_layouts/kept.md", "---\ntitle: Kept\n---\n"),
            ("docs/_site/kept.txt", "x"),
        ]);
        let inventory = scan(&config_for(&tmp)).unwrap();

        assert_eq!(renderable_names(&inventory), vec!["docs/_layouts/kept.md"]);
        assert_eq!(non_renderable_names(&inventory), vec!["docs/_site/kept.txt"]);
    }

    #[test]
    fn vcs_dirs_skipped_at_any_depth() {
        let tmp = site_tree(&[
            (".git/HEAD", "ref"),
            ("docs/.svn/entries", "x"),
            ("docs/deep/CVS/Root", "x"),
            ("docs/deep/page.txt", "x"),
        ]);
        let inventory = scan(&config_for(&tmp)).unwrap();

        assert_eq!(non_renderable_names(&inventory), vec!["docs/deep/page.txt"]);
        assert!(inventory.hidden_files.is_empty());
    }

    #[test]
    fn discovery_order_is_depth_first() {
        let tmp = site_tree(&[
            ("b.md", "---\n---\n"),
            ("a/z.md", "---\n---\n"),
            ("a/b/c.md", "---\n---\n"),
            ("c.md", "---\n---\n"),
        ]);
        let inventory = scan(&config_for(&tmp)).unwrap();
        assert_eq!(
            renderable_names(&inventory),
            vec!["a/b/c.md", "a/z.md", "b.md", "c.md"]
        );
    }

    #[test]
    fn publish_date_parsed_from_front_matter() {
        let tmp = site_tree(&[
            ("dated.md", "---\ndate: 2021-06-01\n---\n"),
            ("garbled.md", "---\ndate: someday\n---\n"),
        ]);
        let inventory = scan(&config_for(&tmp)).unwrap();

        let dated = find_renderable(&inventory, "dated.md");
        assert_eq!(
            dated.publish_date().map(|d| d.date().to_string()),
            Some("2021-06-01".to_string())
        );
        assert_eq!(find_renderable(&inventory, "garbled.md").publish_date(), None);
    }

    #[test]
    fn blog_marker_creates_blog_with_members() {
        let tmp = site_tree(&[
            ("about.md", "---\ntitle: About\n---\n"),
            ("blog/.blog", ""),
            ("blog/first.md", "---\ntitle: First\n---\n"),
            ("blog/2020/second.md", "---\ntitle: Second\n---\n"),
            ("blog/photo.png", "png"),
            ("blogroll/links.md", "---\ntitle: Links\n---\n"),
        ]);
        let inventory = scan(&config_for(&tmp)).unwrap();

        assert_eq!(inventory.blogs.len(), 1);
        let blog = &inventory.blogs[0];
        assert_eq!(blog.base_path(), tmp.path().join("blog"));
        assert_eq!(
            blog_member_names(&inventory, BlogId(0)),
            vec!["blog/2020/second.md", "blog/first.md"]
        );
        assert_eq!(find_renderable(&inventory, "blog/first.md").blog(), Some(BlogId(0)));
        assert_eq!(find_renderable(&inventory, "about.md").blog(), None);
        assert_eq!(find_renderable(&inventory, "blogroll/links.md").blog(), None);

        // marker is hidden bookkeeping, never content
        assert_eq!(
            relative_names(&inventory.hidden_files, tmp.path()),
            vec!["blog/.blog"]
        );
        assert_eq!(non_renderable_names(&inventory), vec!["blog/photo.png"]);
    }

    #[test]
    fn custom_marker_without_dot_is_not_content() {
        let tmp = site_tree(&[("journal/BLOG", ""), ("journal/day.md", "---\n---\n")]);
        let options = SiteOptions {
            blog_marker: "BLOG".to_string(),
            ..SiteOptions::default()
        };
        let config =
            Configuration::from_options(tmp.path(), &tmp.path().join("_config.toml"), options)
                .unwrap();
        let inventory = scan(&config).unwrap();

        assert_eq!(inventory.blogs.len(), 1);
        assert!(inventory.non_renderables.is_empty());
        assert!(inventory.hidden_files.is_empty());
        assert_eq!(blog_member_names(&inventory, BlogId(0)), vec!["journal/day.md"]);
    }

    fn nested_blogs() -> tempfile::TempDir {
        site_tree(&[
            ("blog/.blog", ""),
            ("blog/outer.md", "---\n---\n"),
            ("blog/travel/.blog", ""),
            ("blog/travel/inner.md", "---\n---\n"),
        ])
    }

    #[test]
    fn nested_blogs_last_match_wins() {
        let tmp = nested_blogs();
        let inventory = scan(&config_for(&tmp)).unwrap();

        // blog/ is discovered before blog/travel/
        assert_eq!(inventory.blogs[0].base_path(), tmp.path().join("blog"));
        assert_eq!(inventory.blogs[1].base_path(), tmp.path().join("blog/travel"));

        assert_eq!(
            blog_member_names(&inventory, BlogId(0)),
            vec!["blog/outer.md", "blog/travel/inner.md"]
        );
        assert_eq!(
            blog_member_names(&inventory, BlogId(1)),
            vec!["blog/travel/inner.md"]
        );
        assert_eq!(
            find_renderable(&inventory, "blog/travel/inner.md").blog(),
            Some(BlogId(1))
        );
    }

    #[test]
    fn nested_blogs_longest_prefix() {
        let tmp = nested_blogs();
        let options = SiteOptions {
            blog_attribution: BlogAttribution::LongestPrefix,
            ..SiteOptions::default()
        };
        let config =
            Configuration::from_options(tmp.path(), &tmp.path().join("_config.toml"), options)
                .unwrap();
        let inventory = scan(&config).unwrap();

        assert_eq!(blog_member_names(&inventory, BlogId(0)), vec!["blog/outer.md"]);
        assert_eq!(
            blog_member_names(&inventory, BlogId(1)),
            vec!["blog/travel/inner.md"]
        );
        assert_eq!(
            find_renderable(&inventory, "blog/travel/inner.md").blog(),
            Some(BlogId(1))
        );
    }

    #[test]
    fn scanning_twice_is_identical() {
        let tmp = site_tree(&[
            ("z.md", "---\ndate: 2020-01-01\n---\n"),
            ("a/.blog", ""),
            ("a/p.md", "---\n---\n"),
            ("m.png", "x"),
            (".hidden", "x"),
        ]);
        let config = config_for(&tmp);
        assert_eq!(scan(&config).unwrap(), scan(&config).unwrap());
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path().join("nope");
        let config = Configuration::new(&root, &root.join("_config.toml")).unwrap();
        assert!(matches!(scan(&config), Err(ScanError::RootNotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_dir_is_crawl_failure() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = site_tree(&[("locked/secret.md", "---\n---\n")]);
        let locked = tmp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // root ignores permission bits; nothing to assert there
        let readable = fs::read_dir(&locked).is_ok();

        let result = scan(&config_for(&tmp));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            match result {
                Err(ScanError::Crawl { path, .. }) => assert_eq!(path, locked),
                other => panic!("expected crawl failure, got {other:?}"),
            }
        }
    }

    #[test]
    fn fixture_site_classification() {
        let tmp = setup_fixtures();
        let config = Configuration::load(tmp.path(), None).unwrap();
        let inventory = scan(&config).unwrap();

        assert_eq!(
            renderable_names(&inventory),
            vec!["about.md", "blog/2012/hello.md", "blog/2012/second.md", "blog/undated.md"]
        );
        assert_eq!(
            non_renderable_names(&inventory),
            vec!["assets/favicon.ico", "assets/site.css", "drafts/broken.md", "notes.txt"]
        );
        assert_eq!(
            relative_names(&inventory.unpublished, tmp.path()),
            vec!["blog/draft.md"]
        );
        let second = find_renderable(&inventory, "blog/2012/second.md");
        assert_eq!(second.title(), Some("Second: the sequel"));
        assert_eq!(inventory.blog_of(second).map(|b| b.base_path()), Some(tmp.path().join("blog").as_path()));
    }

    #[test]
    fn resources_iterates_every_bucket() {
        let tmp = site_tree(&[
            ("blog/.blog", ""),
            ("blog/p.md", "---\n---\n"),
            ("x.png", "x"),
        ]);
        let inventory = scan(&config_for(&tmp)).unwrap();
        let kinds: Vec<&str> = inventory.resources().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec!["renderable", "static", "blog"]);
    }
}
