//! Files that must not ship in a deployment artifact
//!
//! Composer and the theme toolchain leave version-control metadata behind:
//! nested `.git` directories in vendored packages, `CHANGELOG.txt` files and
//! theme `.gitignore` files that would hide build output from the commit.

use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};
use tracing::debug;

/// Depth below `themes/custom` searched for `.gitignore` files.
const THEME_IGNORE_DEPTH: usize = 3;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SanitizeScan {
    pub git_dirs: Vec<PathBuf>,
    pub changelogs: Vec<PathBuf>,
    pub theme_ignores: Vec<PathBuf>,
}

impl SanitizeScan {
    /// Scan `project_root/vendor` and `app_root` for nested `.git`
    /// directories, the whole project for `CHANGELOG.txt`, and the custom
    /// themes for `.gitignore` files.
    pub fn run(project_root: &Path, app_root: &Path) -> Self {
        let mut git_dirs = nested_git_dirs(&project_root.join("vendor"));
        git_dirs.extend(nested_git_dirs(app_root));
        Self {
            git_dirs,
            changelogs: changelogs(project_root),
            theme_ignores: theme_ignores(&app_root.join("themes").join("custom")),
        }
    }

    /// Everything to delete, directories first.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.git_dirs
            .iter()
            .chain(&self.changelogs)
            .chain(&self.theme_ignores)
            .cloned()
            .collect()
    }
}

fn walker(root: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));
    builder
}

fn named(entry: &DirEntry, name: &str) -> bool {
    entry.file_name() == name
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
}

fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_file())
}

fn collect(builder: &WalkBuilder, keep: impl Fn(&DirEntry) -> bool) -> Vec<PathBuf> {
    builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.depth() > 0 && keep(entry))
        .map(DirEntry::into_path)
        .collect()
}

fn nested_git_dirs(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }
    let mut builder = walker(root);
    // Report `.git` itself but never descend into it.
    builder.filter_entry(|entry| {
        entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .map_or(true, |parent| parent != ".git")
    });
    collect(&builder, |entry| is_dir(entry) && named(entry, ".git"))
}

fn changelogs(root: &Path) -> Vec<PathBuf> {
    let mut builder = walker(root);
    builder.filter_entry(|entry| !(is_dir(entry) && named(entry, ".git")));
    collect(&builder, |entry| is_file(entry) && named(entry, "CHANGELOG.txt"))
}

fn theme_ignores(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }
    let mut builder = walker(root);
    builder.max_depth(Some(THEME_IGNORE_DEPTH));
    collect(&builder, |entry| {
        is_file(entry) && entry.file_name().to_string_lossy().ends_with(".gitignore")
    })
}
