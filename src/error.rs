//! Error types for document file operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the file operations behind Open, Save and Rename.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot open {} for reading: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open {} for writing: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("destination file already exists: {}", path.display())]
    DestinationExists { path: PathBuf },
}

impl DocumentError {
    /// Text shown in the warning dialog.
    ///
    /// I/O failures show the operating system's error string only; the
    /// path is already visible to the user in the prompt they just answered.
    pub fn user_message(&self) -> String {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } | Self::Rename { source, .. } => {
                source.to_string()
            }
            Self::DestinationExists { .. } => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_os_error_string() {
        let err = DocumentError::Read {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.user_message(), "No such file or directory");
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_destination_exists_message_names_path() {
        let err = DocumentError::DestinationExists {
            path: PathBuf::from("notes.txt"),
        };
        assert_eq!(
            err.user_message(),
            "destination file already exists: notes.txt"
        );
    }
}
