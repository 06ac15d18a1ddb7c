//! Verbatim file I/O for documents.
//!
//! Every handle is opened and dropped inside one function.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::config::FileFilter;
use crate::error::DocumentError;

/// Read a whole file as UTF-8 text.
///
/// Invalid UTF-8 is an error, not a lossy decode.
pub fn read_text(path: &Path) -> Result<String, DocumentError> {
    let read_err = |source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(read_err)?;
    let mut text = String::new();
    file.read_to_string(&mut text).map_err(read_err)?;
    Ok(text)
}

/// Write `text` to `path`, creating or truncating the file.
pub fn write_text(path: &Path, text: &str) -> Result<(), DocumentError> {
    let write_err = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(write_err)?;
    file.write_all(text.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)
}

/// Rename `from` to `to`, refusing to replace an existing file.
pub fn rename(from: &Path, to: &Path) -> Result<(), DocumentError> {
    if to.exists() {
        return Err(DocumentError::DestinationExists {
            path: to.to_path_buf(),
        });
    }
    fs::rename(from, to).map_err(|source| DocumentError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Resolve the user's rename input against the current file.
///
/// The filter extension is appended when missing, and a relative name lands
/// in the current file's directory.
pub fn rename_target(current: &Path, name: &str, filter: &FileFilter) -> PathBuf {
    let name = filter.ensure_extension(name);
    let candidate = PathBuf::from(name);
    if candidate.is_absolute() {
        return candidate;
    }
    current
        .parent()
        .map_or_else(|| candidate.clone(), |dir| dir.join(&candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        let content = "first\r\nsecond\n\ttabbed\n";

        write_text(&path, content).unwrap();
        assert_eq!(read_text(&path).unwrap(), content);
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "a much longer previous content").unwrap();

        write_text(&path, "short").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_read_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn test_read_invalid_utf8_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = read_text(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_text(&dir.path().join("nope/file.txt"), "x").unwrap_err();
        assert!(matches!(err, DocumentError::Write { .. }));
    }

    #[test]
    fn test_rename_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("old.txt");
        let to = dir.path().join("new.txt");
        fs::write(&from, "body").unwrap();

        rename(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "body");
    }

    #[test]
    fn test_rename_refuses_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("old.txt");
        let to = dir.path().join("taken.txt");
        fs::write(&from, "mine").unwrap();
        fs::write(&to, "theirs").unwrap();

        let err = rename(&from, &to).unwrap_err();
        assert!(matches!(err, DocumentError::DestinationExists { .. }));
        assert_eq!(fs::read_to_string(&to).unwrap(), "theirs");
    }

    #[test]
    fn test_rename_target_resolves_next_to_current_file() {
        let filter = FileFilter::default();
        let current = Path::new("/dir/old.txt");
        assert_eq!(
            rename_target(current, "notes", &filter),
            PathBuf::from("/dir/notes.txt")
        );
        assert_eq!(
            rename_target(current, "sub/notes.txt", &filter),
            PathBuf::from("/dir/sub/notes.txt")
        );
        assert_eq!(
            rename_target(current, "/elsewhere/x", &filter),
            PathBuf::from("/elsewhere/x.txt")
        );
    }
}
