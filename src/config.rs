use std::fmt;
use std::path::{Path, PathBuf};

/// Application name shown in the title bar when no document is open.
pub const APP_NAME: &str = "TextEdit";

/// Title used for a document that has never been saved.
pub const UNTITLED_NAME: &str = "Untitled.txt";

/// The single file-type filter used by pickers and by rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub label: String,
    pub extension: String,
}

impl FileFilter {
    pub fn new(label: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            extension: extension.into(),
        }
    }

    /// Glob-style pattern, e.g. `*.txt`.
    pub fn pattern(&self) -> String {
        format!("*.{}", self.extension)
    }

    /// Whether a path carries this filter's extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// Append the extension to `name` unless it already ends with it.
    pub fn ensure_extension(&self, name: &str) -> String {
        let suffix = format!(".{}", self.extension);
        if name.ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{name}{suffix}")
        }
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new("Text File", "txt")
    }
}

impl fmt::Display for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.pattern())
    }
}

/// Fixed editor settings. There is no config file; these are built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub app_name: String,
    pub untitled_name: String,
    pub filter: FileFilter,
}

impl EditorConfig {
    /// Suggested file name for the first save of an untitled document.
    pub fn default_file_name(&self) -> PathBuf {
        PathBuf::from(&self.untitled_name)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            untitled_name: UNTITLED_NAME.to_string(),
            filter: FileFilter::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_displays_label_and_pattern() {
        let filter = FileFilter::default();
        assert_eq!(filter.to_string(), "Text File (*.txt)");
    }

    #[test]
    fn test_filter_matches_extension_case_insensitively() {
        let filter = FileFilter::default();
        assert!(filter.matches(Path::new("notes.txt")));
        assert!(filter.matches(Path::new("/tmp/NOTES.TXT")));
        assert!(!filter.matches(Path::new("notes.md")));
        assert!(!filter.matches(Path::new("txt")));
    }

    #[test]
    fn test_ensure_extension_appends_when_missing() {
        let filter = FileFilter::default();
        assert_eq!(filter.ensure_extension("notes"), "notes.txt");
        assert_eq!(filter.ensure_extension("notes.txt"), "notes.txt");
        assert_eq!(filter.ensure_extension("notes.md"), "notes.md.txt");
    }

    #[test]
    fn test_default_config_names() {
        let config = EditorConfig::default();
        assert_eq!(config.app_name, "TextEdit");
        assert_eq!(config.default_file_name(), PathBuf::from("Untitled.txt"));
    }
}
