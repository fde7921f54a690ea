//! Scene entries listed by the switcher
//!
//! An entry is re-derived from the asset index on every reload and never
//! mutated afterwards; the list is replaced wholesale.

mod hidden;

pub use hidden::HiddenSet;

use std::cmp::Ordering;

/// A scene document known to the asset index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneEntry {
    /// Stable content-addressed identifier
    pub guid: String,
    /// Project-relative asset path, `/` separated
    pub path: String,
    /// First two path segments, used for grouping
    pub category: String,
    /// Display name of the scene
    pub name: String,
}

impl SceneEntry {
    /// Create an entry, deriving its category from the path
    pub fn new(guid: impl Into<String>, path: impl Into<String>, name: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            guid: guid.into(),
            category: scene_category(&path),
            path,
            name: name.into(),
        }
    }

    /// Ordering used for the list: category first, then name, each compared
    /// case-insensitively before falling back to exact byte order. The path
    /// breaks remaining ties so the order is total.
    pub fn list_order(&self, other: &Self) -> Ordering {
        caseless_cmp(&self.category, &other.category)
            .then_with(|| caseless_cmp(&self.name, &other.name))
            .then_with(|| self.path.cmp(&other.path))
    }
}

/// Category of a scene: its first two path segments joined with `/`
pub fn scene_category(path: &str) -> String {
    path.split(['/', '\\'])
        .take(2)
        .collect::<Vec<_>>()
        .join("/")
}

fn caseless_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort entries into list order
pub fn sort_entries(entries: &mut [SceneEntry]) {
    entries.sort_by(SceneEntry::list_order);
}

/// Display name derived from a document path (file stem)
pub fn scene_name_from_path(path: &str) -> String {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => file_name[..dot].to_string(),
        _ => file_name.to_string(),
    }
}
