use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::FrontendError;

/// Build-tool configs that must exist at most once per tree, keyed by stem.
const CONFIG_STEMS: [&str; 5] = [
    "tailwind.config",
    "nuxt.config",
    "postcss.config",
    "vite.config",
    "app.config",
];
const CONFIG_EXTENSIONS: [&str; 5] = ["js", "cjs", "mjs", "ts", "cts"];
const DESCRIPTOR_STEM: &str = "frontend";
const DESCRIPTOR_EXTENSIONS: [&str; 2] = ["toml", "json"];
const SKIPPED_DIRS: [&str; 6] = ["node_modules", ".git", "target", ".nuxt", ".output", "dist"];

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Config stem shared by every file in the group, e.g. `tailwind.config`.
    pub kind: String,
    pub files: Vec<PathBuf>,
    /// All files have byte-identical content.
    pub identical: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HygieneReport {
    pub root: PathBuf,
    pub config_files: usize,
    pub duplicates: Vec<DuplicateGroup>,
}

impl HygieneReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
    }
}

/// Walks `root` and reports build configs defined more than once.
///
/// # Errors
///
/// Returns an error when the tree or a config file cannot be read.
pub fn scan_duplicates(root: &Path) -> Result<HygieneReport, FrontendError> {
    let mut groups: BTreeMap<&'static str, Vec<PathBuf>> = BTreeMap::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            FrontendError::Scan {
                path,
                source: err.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(kind) = config_kind(&entry.file_name().to_string_lossy()) {
            debug!("Found {} at '{}'", kind, entry.path().display());
            groups.entry(kind).or_default().push(entry.into_path());
        }
    }

    let config_files = groups.values().map(Vec::len).sum();
    let mut duplicates = Vec::new();
    for (kind, files) in groups {
        if files.len() < 2 {
            continue;
        }
        let identical = all_identical(&files)?;
        warn!(
            "{} is defined {} times ({}).",
            kind,
            files.len(),
            if identical { "identical" } else { "divergent" }
        );
        duplicates.push(DuplicateGroup {
            kind: kind.to_owned(),
            files,
            identical,
        });
    }

    Ok(HygieneReport {
        root: root.to_path_buf(),
        config_files,
        duplicates,
    })
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && SKIPPED_DIRS
            .iter()
            .any(|name| entry.file_name() == std::ffi::OsStr::new(name))
}

fn config_kind(file_name: &str) -> Option<&'static str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if CONFIG_EXTENSIONS.contains(&ext) {
        return CONFIG_STEMS.iter().copied().find(|known| *known == stem);
    }
    if stem == DESCRIPTOR_STEM && DESCRIPTOR_EXTENSIONS.contains(&ext) {
        return Some(DESCRIPTOR_STEM);
    }
    None
}

fn all_identical(files: &[PathBuf]) -> Result<bool, FrontendError> {
    let read = |path: &PathBuf| {
        std::fs::read(path).map_err(|err| FrontendError::Scan {
            path: path.clone(),
            source: err,
        })
    };
    let Some((first, rest)) = files.split_first() else {
        return Ok(true);
    };
    let first = read(first)?;
    for path in rest {
        if read(path)? != first {
            return Ok(false);
        }
    }
    Ok(true)
}
