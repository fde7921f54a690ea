//! Persisted set of hidden scene identifiers
//!
//! Stored as plain text, one identifier per line, no header. Insertion order
//! is preserved so that hiding and re-showing a scene leaves the file exactly
//! as it was.

use std::fs;
use std::path::PathBuf;

use indexmap::IndexSet;
use log::{debug, info, warn};

use crate::error::{Result, SwitcherError};

/// Identifiers of scenes suppressed from the launcher view
#[derive(Debug, Clone)]
pub struct HiddenSet {
    path: PathBuf,
    ids: IndexSet<String>,
}

impl HiddenSet {
    /// Create an empty set bound to `path` without touching the disk
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ids: IndexSet::new(),
        }
    }

    /// Load the set from `path`, creating an empty file if none exists.
    ///
    /// An unreadable file degrades to an empty set.
    pub fn load_or_create(path: impl Into<PathBuf>) -> Self {
        let mut set = Self::empty(path);

        if !set.path.exists() {
            match set.persist() {
                Ok(()) => info!("Created hidden scene list at {}", set.path.display()),
                Err(e) => warn!("Could not create hidden scene list: {}", e),
            }
            return set;
        }

        match fs::read_to_string(&set.path) {
            Ok(contents) => set.ids = parse(&contents),
            Err(e) => warn!(
                "Could not read hidden scene list {}, treating as empty: {}",
                set.path.display(),
                e
            ),
        }
        debug!("Loaded {} hidden scene(s)", set.ids.len());
        set
    }

    /// Check whether a scene is hidden
    pub fn contains(&self, guid: &str) -> bool {
        self.ids.contains(guid)
    }

    /// Mark a scene hidden or visible. Returns true if the set changed.
    pub fn set_hidden(&mut self, guid: &str, hidden: bool) -> bool {
        if hidden {
            self.ids.insert(guid.to_string())
        } else {
            self.ids.shift_remove(guid)
        }
    }

    /// Iterate over hidden identifiers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// File contents for the current set
    pub fn to_contents(&self) -> String {
        let mut contents = String::new();
        for id in &self.ids {
            contents.push_str(id);
            contents.push('\n');
        }
        contents
    }

    /// Overwrite the backing file with the current set
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| SwitcherError::io(parent, e))?;
            }
        }
        fs::write(&self.path, self.to_contents()).map_err(|e| SwitcherError::io(&self.path, e))
    }
}

fn parse(contents: &str) -> IndexSet<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn settings_path(dir: &TempDir) -> PathBuf {
        dir.path()
            .join("ProjectSettings")
            .join("Packages")
            .join("QuickSceneSwitcher.txt")
    }

    #[test]
    fn test_missing_file_is_created_empty() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);

        let set = HiddenSet::load_or_create(&path);

        assert!(set.is_empty());
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_persist_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);

        let mut set = HiddenSet::empty(&path);
        set.set_hidden("aaa", true);
        set.set_hidden("ccc", true);
        set.set_hidden("bbb", true);
        set.persist().unwrap();

        let reloaded = HiddenSet::load_or_create(&path);
        let expected: HashSet<&str> = set.iter().collect();
        let actual: HashSet<&str> = reloaded.iter().collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_persist_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);

        let mut set = HiddenSet::empty(&path);
        set.set_hidden("one", true);
        set.set_hidden("two", true);

        set.persist().unwrap();
        let first = fs::read(&path).unwrap();
        set.persist().unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(String::from_utf8(first).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_hide_then_show_restores_file() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "zeta\nalpha\n").unwrap();

        let mut set = HiddenSet::load_or_create(&path);
        let before = fs::read(&path).unwrap();

        assert!(set.set_hidden("mid", true));
        set.persist().unwrap();
        assert!(set.set_hidden("mid", false));
        set.persist().unwrap();

        assert_eq!(fs::read(&path).unwrap(), before);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_set_hidden_reports_changes() {
        let mut set = HiddenSet::empty("unused.txt");
        assert!(set.set_hidden("a", true));
        assert!(!set.set_hidden("a", true));
        assert!(set.contains("a"));
        assert!(set.set_hidden("a", false));
        assert!(!set.set_hidden("a", false));
        assert!(!set.contains("a"));
    }

    #[test]
    fn test_blank_lines_and_crlf_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hidden.txt");
        fs::write(&path, "abc\r\n\r\ndef\n\n").unwrap();

        let set = HiddenSet::load_or_create(&path);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["abc", "def"]);
    }

    #[test]
    fn test_unreadable_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hidden.txt");
        // A directory at the settings path cannot be read as text
        fs::create_dir_all(&path).unwrap();

        let set = HiddenSet::load_or_create(&path);
        assert!(set.is_empty());
    }
}
