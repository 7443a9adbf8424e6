use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::thread_rng;
use tracing::debug;

use crate::error::{AppError, AppResult, HttpError};

/// Size-class prefixes and their share of the weighted pool, in percent.
pub const WEIGHTED_GROUPS: [(&str, usize); 3] = [("L", 30), ("M", 50), ("S", 20)];

/// Image extensions picked up from a samples directory (matched case-insensitively).
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// A payload file read once at startup.
#[derive(Debug)]
pub struct SampleFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Arc<[u8]>,
}

impl SampleFile {
    /// Reads the file into memory.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing, unreadable, or has no file name.
    pub fn load(path: &Path) -> AppResult<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                AppError::http(HttpError::SampleFileNameMissing {
                    path: path.to_path_buf(),
                })
            })?;
        let bytes = std::fs::read(path).map_err(|err| {
            AppError::http(HttpError::ReadSampleFile {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
        debug!("Loaded sample '{}' ({} bytes)", path.display(), bytes.len());
        Ok(Self {
            path: path.to_path_buf(),
            mime: mime_for(path),
            file_name,
            bytes: Arc::from(bytes),
        })
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Samples chosen uniformly per iteration. Weighting is expressed by repeating
/// entries, so a file can appear many times.
#[derive(Debug, Clone)]
pub struct SamplePool {
    entries: Vec<Arc<SampleFile>>,
}

impl SamplePool {
    /// Loads every listed file; each is equally likely.
    ///
    /// # Errors
    ///
    /// Returns an error when the list is empty or a file cannot be read.
    pub fn from_files(paths: &[PathBuf]) -> AppResult<Self> {
        if paths.is_empty() {
            return Err(AppError::http(HttpError::SampleListEmpty));
        }
        let entries = paths
            .iter()
            .map(|path| SampleFile::load(path).map(Arc::new))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Scans `dir` for L-*, M-* and S-* images and repeats each group's files
    /// by the group weight from [`WEIGHTED_GROUPS`].
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be read, a file cannot be
    /// loaded, or no file falls into a weighted group.
    pub fn weighted_from_dir(dir: &Path) -> AppResult<Self> {
        let read_dir_err = |err| {
            AppError::http(HttpError::ReadSampleDir {
                path: dir.to_path_buf(),
                source: err,
            })
        };
        let mut names: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            if !entry.file_type().map_err(read_dir_err)?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_image(&name) {
                names.push(name);
            }
        }
        names.sort();

        let mut entries = Vec::new();
        for (group, weight) in WEIGHTED_GROUPS {
            for name in names.iter().filter(|name| group_of(name) == group) {
                let sample = Arc::new(SampleFile::load(&dir.join(name))?);
                entries.extend(std::iter::repeat_n(sample, weight));
            }
        }
        if entries.is_empty() {
            return Err(AppError::http(HttpError::NoWeightedSamples {
                path: dir.to_path_buf(),
            }));
        }
        debug!(
            "Weighted sample pool from '{}' has {} entries",
            dir.display(),
            entries.len()
        );
        Ok(Self { entries })
    }

    #[must_use]
    pub fn pick(&self) -> Option<&Arc<SampleFile>> {
        self.entries.choose(&mut thread_rng())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many pool entries refer to a file with this name.
    #[cfg(test)]
    pub(crate) fn occurrences(&self, file_name: &str) -> usize {
        self.entries
            .iter()
            .filter(|sample| sample.file_name == file_name)
            .count()
    }
}

fn is_image(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

fn group_of(name: &str) -> String {
    name.split('-').next().unwrap_or_default().to_ascii_uppercase()
}
