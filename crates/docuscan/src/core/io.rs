//! File enumeration utilities.
//!
//! The batch runner works on a snapshot: the input directory is walked
//! once per run and never re-scanned mid-run.

use crate::{DocuscanError, Result};
use std::path::{Path, PathBuf};

/// Image extensions eligible for OCR, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff"];

/// Whether a path carries one of the supported image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lowered = e.to_lowercase();
            IMAGE_EXTENSIONS.contains(&lowered.as_str())
        })
        .unwrap_or(false)
}

/// Traverse a directory and return all file paths matching a filter.
///
/// # Errors
///
/// Returns `DocuscanError::Validation` if `dir` is not a directory and
/// `DocuscanError::Io` for filesystem errors.
pub fn traverse_directory<F>(dir: impl AsRef<Path>, recursive: bool, filter: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let dir = dir.as_ref();
    let mut files = Vec::new();

    if !dir.is_dir() {
        return Err(DocuscanError::validation(format!(
            "Path is not a directory: {}",
            dir.display()
        )));
    }

    traverse_directory_impl(dir, recursive, &filter, &mut files)?;
    Ok(files)
}

fn traverse_directory_impl<F>(dir: &Path, recursive: bool, filter: &F, files: &mut Vec<PathBuf>) -> Result<()>
where
    F: Fn(&Path) -> bool,
{
    let entries = std::fs::read_dir(dir).map_err(DocuscanError::Io)?;

    for entry in entries {
        let entry = entry.map_err(DocuscanError::Io)?;
        let path = entry.path();

        if path.is_file() {
            if filter(&path) {
                files.push(path);
            }
        } else if path.is_dir() && recursive {
            traverse_directory_impl(&path, recursive, filter, files)?;
        }
    }

    Ok(())
}

/// Enumerate all OCR-eligible images under `dir`, recursively.
///
/// The result is sorted so a run processes a stable snapshot regardless
/// of directory iteration order.
pub fn collect_image_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = traverse_directory(dir, true, is_supported_image)?;
    files.sort();
    Ok(files)
}

/// Base name of a path as a UTF-8 string, falling back to a lossy
/// rendering for non-UTF-8 names.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_is_supported_image_case_insensitive() {
        assert!(is_supported_image(Path::new("a.jpg")));
        assert!(is_supported_image(Path::new("a.JPEG")));
        assert!(is_supported_image(Path::new("a.Png")));
        assert!(is_supported_image(Path::new("a.TIFF")));
        assert!(!is_supported_image(Path::new("a.txt")));
        assert!(!is_supported_image(Path::new("a.PDF")));
        assert!(!is_supported_image(Path::new("noextension")));
    }

    #[test]
    fn test_collect_image_files_filters_and_recurses() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("scan1.jpg")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(dir.path().join("report.PDF")).unwrap();

        std::fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("scan2.PNG")).unwrap();

        let files = collect_image_files(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names.len(), 2, "{:?}", names);
        assert!(names.contains(&"scan1.jpg".to_string()));
        assert!(names.contains(&"scan2.PNG".to_string()));
    }

    #[test]
    fn test_collect_image_files_sorted() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b.png")).unwrap();
        File::create(dir.path().join("a.png")).unwrap();
        File::create(dir.path().join("c.png")).unwrap();

        let files = collect_image_files(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_traverse_non_recursive_skips_subdirs() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("top.png")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("deep.png")).unwrap();

        let files = traverse_directory(dir.path(), false, is_supported_image).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_traverse_invalid_path_is_validation_error() {
        let result = traverse_directory("/nonexistent/directory", true, |_| true);
        assert!(matches!(result, Err(DocuscanError::Validation { .. })));
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("/in/dir/doc1.png")), "doc1.png");
        assert_eq!(file_name_of(Path::new("doc1.png")), "doc1.png");
    }
}
