//! Sort the files of a directory tree into category folders by extension.
//!
//! Category folders live directly under the root being sorted. Files with a
//! known extension are moved there from anywhere in the tree, and
//! sub-directories left empty afterwards are removed. Archives are unpacked
//! into `archives/<stem>/` and the archive file is deleted.

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

const ARCHIVES: &str = "archives";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub folder: &'static str,
    /// Lower-case, without the leading dot
    pub extensions: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        folder: "images",
        extensions: &["jpeg", "png", "jpg", "svg"],
    },
    Category {
        folder: "video",
        extensions: &["avi", "mp4", "mov", "mkv"],
    },
    Category {
        folder: "audio",
        extensions: &["mp3", "ogg", "wav", "amr"],
    },
    Category {
        folder: "documents",
        extensions: &["doc", "docx", "txt", "pdf", "xlsx", "pptx"],
    },
    Category {
        folder: ARCHIVES,
        extensions: &["zip", "gz", "tar"],
    },
];

/// Category for a file extension, ignoring case.
pub fn category_for(extension: &str) -> Option<&'static Category> {
    let ext = extension.to_lowercase();
    CATEGORIES
        .iter()
        .find(|c| c.extensions.iter().any(|e| *e == ext))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SortReport {
    /// Category folder -> file names moved into it
    pub sorted: BTreeMap<&'static str, Vec<String>>,
    /// Extensions that were sorted, as seen on disk (with the dot)
    pub known_extensions: BTreeSet<String>,
    pub unknown_extensions: BTreeSet<String>,
    pub failures: Vec<(PathBuf, String)>,
    pub removed_dirs: usize,
}

impl SortReport {
    pub fn moved_count(&self) -> usize {
        self.sorted.values().map(Vec::len).sum()
    }
}

/// Sort everything under `root`. Per-file move failures are collected in
/// the report; failing to read the tree is an error.
pub fn sort_directory(root: &Path) -> Result<SortReport> {
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }

    for category in CATEGORIES {
        let dir = root.join(category.folder);
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut report = SortReport::default();
    sort_dir(root, root, &mut report)?;
    tracing::info!(
        root = %root.display(),
        moved = report.moved_count(),
        failed = report.failures.len(),
        "directory sorted"
    );
    Ok(report)
}

fn sort_dir(dir: &Path, root: &Path, report: &mut SortReport) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if dir == root && is_category_folder(&entry.file_name().to_string_lossy()) {
                continue;
            }
            sort_dir(&path, root, report)?;
            if fs::read_dir(&path)?.next().is_none() {
                fs::remove_dir(&path).with_context(|| format!("removing {}", path.display()))?;
                report.removed_dirs += 1;
            }
        } else if file_type.is_file() {
            sort_file(&path, root, report);
        }
    }

    Ok(())
}

fn sort_file(path: &Path, root: &Path, report: &mut SortReport) {
    let Some(extension) = path.extension().map(|e| e.to_string_lossy().into_owned()) else {
        return;
    };
    let Some(category) = category_for(&extension) else {
        report.unknown_extensions.insert(format!(".{}", extension));
        return;
    };
    let Some(file_name) = path.file_name() else {
        return;
    };

    if category.folder == ARCHIVES {
        unpack_file(path, &extension, root, report);
        return;
    }

    let target = root.join(category.folder).join(file_name);
    if target.exists() {
        report
            .failures
            .push((path.to_path_buf(), format!("{} already exists", target.display())));
        return;
    }

    match fs::rename(path, &target) {
        Ok(()) => {
            tracing::debug!(from = %path.display(), to = %target.display(), "file moved");
            record_sorted(report, category.folder, file_name, &extension);
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "file move failed");
            report.failures.push((path.to_path_buf(), e.to_string()));
        }
    }
}

fn record_sorted(report: &mut SortReport, folder: &'static str, file_name: &OsStr, extension: &str) {
    report.known_extensions.insert(format!(".{}", extension));
    report
        .sorted
        .entry(folder)
        .or_default()
        .push(file_name.to_string_lossy().into_owned());
}

/// Unpack into `<root>/archives/<stem>/`, then delete the archive. On
/// failure the archive stays where it was and nothing is left behind.
fn unpack_file(path: &Path, extension: &str, root: &Path, report: &mut SortReport) {
    let (Some(file_name), Some(stem)) = (path.file_name(), path.file_stem()) else {
        return;
    };
    let target = root.join(ARCHIVES).join(stem);
    if target.exists() {
        report
            .failures
            .push((path.to_path_buf(), format!("{} already exists", target.display())));
        return;
    }

    let result = unpack(path, extension, &target).and_then(|()| {
        fs::remove_file(path).with_context(|| format!("removing {}", path.display()))
    });
    match result {
        Ok(()) => {
            tracing::debug!(from = %path.display(), to = %target.display(), "archive unpacked");
            record_sorted(report, ARCHIVES, file_name, extension);
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "archive unpack failed");
            if target.exists() {
                if let Err(e) = fs::remove_dir_all(&target) {
                    tracing::warn!(path = %target.display(), error = %e, "cleanup failed");
                }
            }
            report.failures.push((path.to_path_buf(), format!("{:#}", e)));
        }
    }
}

/// `.zip`, `.tar`, and `.gz` (a gzipped tarball when the stem ends in
/// `.tar`, a single compressed file otherwise).
fn unpack(path: &Path, extension: &str, target: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    fs::create_dir_all(target).with_context(|| format!("creating {}", target.display()))?;

    match extension.to_lowercase().as_str() {
        "zip" => {
            let mut archive = zip::ZipArchive::new(BufReader::new(file))
                .with_context(|| format!("reading zip archive {}", path.display()))?;
            archive
                .extract(target)
                .with_context(|| format!("extracting {}", path.display()))?;
        }
        "tar" => {
            tar::Archive::new(BufReader::new(file))
                .unpack(target)
                .with_context(|| format!("extracting {}", path.display()))?;
        }
        "gz" => {
            let stem = Path::new(path.file_stem().unwrap_or_default());
            let mut gz = GzDecoder::new(BufReader::new(file));
            if stem.extension().is_some_and(|e| e.eq_ignore_ascii_case("tar")) {
                tar::Archive::new(gz)
                    .unpack(target)
                    .with_context(|| format!("extracting {}", path.display()))?;
            } else {
                let mut out = File::create(target.join(stem))?;
                io::copy(&mut gz, &mut out)
                    .with_context(|| format!("decompressing {}", path.display()))?;
            }
        }
        other => bail!("unsupported archive type .{}", other),
    }
    Ok(())
}

fn is_category_folder(name: &str) -> bool {
    CATEGORIES.iter().any(|c| c.folder == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_category_for_ignores_case() {
        assert_eq!(category_for("JPG").unwrap().folder, "images");
        assert_eq!(category_for("pdf").unwrap().folder, "documents");
        assert_eq!(category_for("Tar").unwrap().folder, "archives");
        assert!(category_for("exe").is_none());
    }

    #[test]
    fn test_sort_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("photo.JPG"));
        touch(&root.join("notes.txt"));
        touch(&root.join("nested/deeper/song.mp3"));
        touch(&root.join("nested/clip.mkv"));
        touch(&root.join("keep/tool.exe"));
        touch(&root.join("README"));

        let report = sort_directory(root).unwrap();

        assert!(root.join("images/photo.JPG").is_file());
        assert!(root.join("documents/notes.txt").is_file());
        assert!(root.join("audio/song.mp3").is_file());
        assert!(root.join("video/clip.mkv").is_file());
        assert!(root.join("archives").is_dir());

        // Emptied directories are removed, others stay
        assert!(!root.join("nested").exists());
        assert!(root.join("keep/tool.exe").is_file());
        assert!(root.join("README").is_file());

        assert_eq!(report.moved_count(), 4);
        assert_eq!(report.sorted["images"], ["photo.JPG"]);
        assert!(report.known_extensions.contains(".JPG"));
        assert_eq!(
            report.unknown_extensions.iter().cloned().collect::<Vec<_>>(),
            [".exe"]
        );
        assert_eq!(report.removed_dirs, 2);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_category_folders_are_not_resorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("documents/old.pdf"));

        let report = sort_directory(root).unwrap();
        assert_eq!(report.moved_count(), 0);
        assert!(root.join("documents/old.pdf").is_file());
    }

    #[test]
    fn test_name_collision_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("documents/a.txt"));
        touch(&root.join("sub/a.txt"));

        let report = sort_directory(root).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(root.join("sub/a.txt").is_file());
    }

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        use std::io::Write;
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, data) in entries {
            zip.start_file(*name, zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_zip_is_unpacked() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("inbox")).unwrap();
        write_zip(
            &root.join("inbox/photos.zip"),
            &[("a.txt", b"alpha"), ("sub/b.txt", b"beta")],
        );

        let report = sort_directory(root).unwrap();

        assert_eq!(fs::read(root.join("archives/photos/a.txt")).unwrap(), b"alpha");
        assert_eq!(fs::read(root.join("archives/photos/sub/b.txt")).unwrap(), b"beta");
        assert!(!root.join("archives/photos.zip").exists());
        assert!(!root.join("inbox").exists());
        assert_eq!(report.sorted["archives"], ["photos.zip"]);
        assert!(report.known_extensions.contains(".zip"));
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_tar_gz_is_unpacked() {
        use flate2::{write::GzEncoder, Compression};

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let file = File::create(root.join("backup.tar.gz")).unwrap();
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        let data = b"hello";
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, "inner.txt", &data[..]).unwrap();
        builder.into_inner().unwrap().finish().unwrap();

        let report = sort_directory(root).unwrap();

        assert_eq!(fs::read(root.join("archives/backup.tar/inner.txt")).unwrap(), b"hello");
        assert!(!root.join("backup.tar.gz").exists());
        assert_eq!(report.moved_count(), 1);
    }

    #[test]
    fn test_broken_archive_is_reported_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("broken.zip"));

        let report = sort_directory(root).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, root.join("broken.zip"));
        assert!(root.join("broken.zip").is_file());
        assert!(!root.join("archives/broken").exists());
        assert_eq!(report.moved_count(), 0);
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(sort_directory(&dir.path().join("nope")).is_err());
    }
}
