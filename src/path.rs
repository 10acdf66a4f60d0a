//! Output path resolution for produced documents.
//!
//! `{title}_{subject}_{timestamp}.{ext}` inside the destination directory.
//! Filesystem-unsafe characters are sanitized here so the composer never
//! has to care; an existing file gets a `-N` counter suffix instead of
//! being overwritten.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Timestamp component of generated file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces separator and wildcard characters as well as whitespace with
/// underscores. CJK text passes through untouched.
fn sanitize(part: &str) -> String {
    let cleaned: String = part
        .chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) || c.is_whitespace() { '_' } else { c })
        .collect();
    if cleaned.is_empty() { "document".to_string() } else { cleaned }
}

/// Resolves the output path for one document.
///
/// Deterministic for a given `(title, subject, timestamp)`; if the
/// resulting path already exists on disk, a counter suffix is appended
/// until a free name is found.
pub fn document_path(
    directory: &Path,
    title: &str,
    extension: &str,
    subject: &str,
    timestamp: DateTime<Local>,
) -> PathBuf {
    let stem = format!(
        "{}_{}_{}",
        sanitize(title),
        sanitize(subject),
        timestamp.format(TIMESTAMP_FORMAT)
    );
    let mut path = directory.join(format!("{stem}.{extension}"));
    let mut counter = 2;
    while path.exists() {
        path = directory.join(format!("{stem}-{counter}.{extension}"));
        counter += 1;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(seconds: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 12, 0, seconds).unwrap()
    }

    #[test]
    fn distinct_timestamps_yield_distinct_paths() {
        let dir = Path::new("/tmp/letters");
        let a = document_path(dir, "紹介状", "pdf", "田中太郎", ts(0));
        let b = document_path(dir, "紹介状", "pdf", "田中太郎", ts(1));
        assert_ne!(a, b);
    }

    #[test]
    fn cjk_is_kept_and_unsafe_characters_are_replaced() {
        let path = document_path(Path::new("/tmp"), "紹介状", "pdf", "田中/太郎 ", ts(0));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "紹介状_田中_太郎__20240601120000.pdf");
    }

    #[test]
    fn empty_subject_falls_back_to_a_placeholder() {
        let path = document_path(Path::new("/tmp"), "紹介状", "pdf", "", ts(0));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("紹介状_document_"));
    }

    #[test]
    fn existing_files_get_a_counter_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let first = document_path(dir.path(), "紹介状", "pdf", "田中太郎", ts(0));
        std::fs::write(&first, b"x").unwrap();
        let second = document_path(dir.path(), "紹介状", "pdf", "田中太郎", ts(0));
        assert_ne!(first, second);
        assert!(second.to_str().unwrap().ends_with("-2.pdf"));
    }
}
