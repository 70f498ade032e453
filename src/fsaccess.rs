//! The filesystem seam the walk runs against.
//!
//! [`FileSystemAccess`] is the only boundary the traversal touches: listing,
//! kind checks, name splitting, modification times, and today's date all go
//! through it, so tests can drive the walk from a simulated tree and a
//! frozen clock. [`NativeFileSystem`] is the `std::fs`-backed implementation
//! used against real content directories.
//!
//! Paths cross this seam as strings. The name-splitting and joining methods
//! are pure string algebra shared by every implementation, so they live on
//! the trait as default methods.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::io;
use std::path::Path;

pub trait FileSystemAccess {
    /// Names of the entries in `path`, in traversal order.
    fn list_dir(&self, path: &str) -> io::Result<Vec<String>>;

    fn is_dir(&self, path: &str) -> bool;

    /// The file's last modification time, in local time.
    fn get_file_modification_time(&self, path: &str) -> io::Result<NaiveDateTime>;

    /// Today, for expiry checks.
    fn current_date(&self) -> NaiveDate;

    /// The final suffix including its dot (`photo.jpg` → `.jpg`), or an
    /// empty string when there is none. A leading dot marks a hidden file,
    /// not a suffix.
    fn get_file_suffix(&self, path: &str) -> String {
        split_main_and_suffix(path).1.to_string()
    }

    /// The path with its final suffix removed (`photo.jpg` → `photo`).
    fn get_file_main_name(&self, path: &str) -> String {
        split_main_and_suffix(path).0.to_string()
    }

    /// Join two path segments with exactly one separator, tolerating
    /// missing or extra separators at the joint. Empty segments disappear.
    fn join(&self, left: &str, right: &str) -> String {
        let left = left.trim_end_matches('/');
        let right = right.trim_start_matches('/');
        if left.is_empty() {
            return right.to_string();
        }
        if right.is_empty() {
            return left.to_string();
        }
        format!("{left}/{right}")
    }
}

/// Split off the final suffix of the last path component.
///
/// Dots that merely lead the component (`.hidden`, `..x`) don't start a
/// suffix.
fn split_main_and_suffix(path: &str) -> (&str, &str) {
    let base_start = path.rfind('/').map_or(0, |index| index + 1);
    let base = &path[base_start..];
    let trimmed = base.trim_start_matches('.');
    let leading_dots = base.len() - trimmed.len();
    match trimmed.rfind('.') {
        Some(index) => path.split_at(base_start + leading_dots + index),
        None => (path, ""),
    }
}

/// Production [`FileSystemAccess`] over `std::fs`.
///
/// Listings are sorted by name so two runs over the same tree produce the
/// same plan regardless of what order the OS returns entries in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFileSystem;

impl FileSystemAccess for NativeFileSystem {
    fn list_dir(&self, path: &str) -> io::Result<Vec<String>> {
        let mut names: Vec<String> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn get_file_modification_time(&self, path: &str) -> io::Result<NaiveDateTime> {
        let modified = std::fs::metadata(path)?.modified()?;
        Ok(DateTime::<Local>::from(modified).naive_local())
    }

    fn current_date(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn suffix_includes_the_dot() {
        let fs = NativeFileSystem;
        assert_eq!(fs.get_file_suffix("photo.jpg"), ".jpg");
        assert_eq!(fs.get_file_suffix("dir/photo.JPEG"), ".JPEG");
    }

    #[test]
    fn suffix_empty_without_extension() {
        let fs = NativeFileSystem;
        assert_eq!(fs.get_file_suffix("README"), "");
        assert_eq!(fs.get_file_suffix("dir.d/README"), "");
    }

    #[test]
    fn hidden_files_have_no_suffix() {
        let fs = NativeFileSystem;
        assert_eq!(fs.get_file_suffix(".hidden"), "");
        assert_eq!(fs.get_file_main_name(".hidden"), ".hidden");
        assert_eq!(fs.get_file_suffix(".config.toml"), ".toml");
    }

    #[test]
    fn main_name_strips_only_the_final_suffix() {
        let fs = NativeFileSystem;
        assert_eq!(fs.get_file_main_name("a@dur5.jpg"), "a@dur5");
        assert_eq!(fs.get_file_main_name("archive.tar.gz"), "archive.tar");
        assert_eq!(fs.get_file_main_name("dir/photo.jpg"), "dir/photo");
    }

    #[test]
    fn join_normalizes_the_joint() {
        let fs = NativeFileSystem;
        assert_eq!(fs.join("a", "b"), "a/b");
        assert_eq!(fs.join("a/", "b"), "a/b");
        assert_eq!(fs.join("a", "/b"), "a/b");
        assert_eq!(fs.join("a/", "/b"), "a/b");
    }

    #[test]
    fn join_drops_empty_segments() {
        let fs = NativeFileSystem;
        assert_eq!(fs.join("", "b"), "b");
        assert_eq!(fs.join("a", ""), "a");
        assert_eq!(fs.join("", ""), "");
    }

    #[test]
    fn list_dir_is_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.jpg"), b"x").unwrap();
        fs::write(tmp.path().join("a.jpg"), b"x").unwrap();
        fs::create_dir(tmp.path().join("c")).unwrap();

        let fs = NativeFileSystem;
        let names = fs.list_dir(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c"]);
    }

    #[test]
    fn list_dir_missing_directory_errors() {
        let fs = NativeFileSystem;
        assert!(fs.list_dir("/no/such/directory/anywhere").is_err());
    }

    #[test]
    fn is_dir_distinguishes_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.jpg"), b"x").unwrap();
        fs::create_dir(tmp.path().join("d")).unwrap();

        let fs = NativeFileSystem;
        assert!(fs.is_dir(tmp.path().join("d").to_str().unwrap()));
        assert!(!fs.is_dir(tmp.path().join("a.jpg").to_str().unwrap()));
    }

    #[test]
    fn modification_time_is_recent_for_fresh_files() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.jpg");
        fs::write(&file, b"x").unwrap();

        let fs = NativeFileSystem;
        let modified = fs
            .get_file_modification_time(file.to_str().unwrap())
            .unwrap();
        let now = Local::now().naive_local();
        assert!((now - modified).num_seconds().abs() < 60);
    }
}
