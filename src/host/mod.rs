//! Host services the switcher depends on
//!
//! The panel never touches the authoring tool directly. It queries an
//! [`AssetIndex`] for scene documents and drives a [`SceneSession`] to open
//! them.

pub mod filesystem;
#[cfg(test)]
pub(crate) mod memory;

pub use filesystem::{FilesystemHost, SaveChoice, SavePrompt};

use crate::error::Result;

/// Where the package owning an asset comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageSource {
    /// Package folder living inside the project's `Packages` directory
    Embedded,
    /// Package referenced from a local folder outside the project
    Local,
    /// Package referenced from a local tarball
    LocalTarball,
    /// Package downloaded from a registry
    Registry,
    /// Package cloned from a git repository
    Git,
    /// Module shipped with the host itself
    BuiltIn,
}

impl PackageSource {
    /// True when content from this source belongs to the project
    pub fn is_project_local(self) -> bool {
        matches!(self, PackageSource::Embedded | PackageSource::Local)
    }
}

/// True when an asset with the given owning package should be listed.
/// Assets with no owning package are project-native.
pub fn is_project_owned(source: Option<PackageSource>) -> bool {
    source.map_or(true, PackageSource::is_project_local)
}

/// A loadable scene document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneAsset {
    pub name: String,
}

/// The project's asset database
pub trait AssetIndex {
    /// Identifiers of every scene document known to the index
    fn find_scene_guids(&self) -> Vec<String>;

    /// Resolve an identifier to its asset path
    fn guid_to_path(&self, guid: &str) -> Option<String>;

    /// Resolve an asset path to its identifier
    fn path_to_guid(&self, path: &str) -> Option<String>;

    /// Source of the package owning `path`, or `None` for project-native assets
    fn package_source(&self, path: &str) -> Option<PackageSource>;

    /// Load the scene at `path`; `None` if it no longer resolves to a real asset
    fn load_scene(&self, path: &str) -> Option<SceneAsset>;
}

/// The host's document session
pub trait SceneSession {
    /// Whether authored content is currently running live
    fn is_playing(&self) -> bool;

    /// Path of the currently active scene, if any
    fn active_scene_path(&self) -> Option<String>;

    /// Offer to save modified scenes. Returns false if the user cancelled.
    fn save_modified_scenes_if_user_wants(&mut self) -> bool;

    /// Close the active scene and open the one at `path`
    fn open_scene(&mut self, path: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_ownership() {
        assert!(is_project_owned(None));
        assert!(is_project_owned(Some(PackageSource::Embedded)));
        assert!(is_project_owned(Some(PackageSource::Local)));
        assert!(!is_project_owned(Some(PackageSource::LocalTarball)));
        assert!(!is_project_owned(Some(PackageSource::Registry)));
        assert!(!is_project_owned(Some(PackageSource::Git)));
        assert!(!is_project_owned(Some(PackageSource::BuiltIn)));
    }
}
