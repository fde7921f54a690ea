//! Project-directory host
//!
//! Treats a project folder on disk as the asset index and keeps a minimal
//! document session (active scene, dirty flag, play state). Layout:
//!
//! - `Assets/**` holds project-native documents
//! - `Packages/<name>/**` holds embedded packages
//! - `Packages/manifest.json` lists dependencies; registry and git packages
//!   are cached under `Library/PackageCache/<name>@<version>/`

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;
use uuid::Uuid;

use super::{AssetIndex, PackageSource, SceneAsset, SceneSession};
use crate::constants::project;
use crate::error::{Result, SwitcherError};
use crate::scenes::scene_name_from_path;

/// Answer to the "save modified scene?" question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// Asks the user whether to save a modified scene before it is replaced
pub trait SavePrompt {
    fn ask_save(&mut self, scene_path: &str) -> SaveChoice;
}

/// Package manifest file contents
#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
}

/// A package known to the project, with the folder its assets live in
#[derive(Debug, Clone)]
struct PackageRoot {
    name: String,
    source: PackageSource,
    dir: Option<PathBuf>,
}

/// A scene document found on disk
#[derive(Debug, Clone)]
struct SceneRecord {
    guid: String,
    path: String,
    file: PathBuf,
    source: Option<PackageSource>,
}

#[derive(Debug, Default)]
struct ScanCache {
    packages: Vec<PackageRoot>,
    scenes: Vec<SceneRecord>,
}

/// Asset index and scene session backed by a project directory
pub struct FilesystemHost {
    root: PathBuf,
    scene_extension: String,
    cache: RefCell<ScanCache>,
    prompt: Box<dyn SavePrompt>,
    active_scene: Option<String>,
    dirty: bool,
    playing: bool,
}

impl FilesystemHost {
    /// Create a host for the project at `root`
    pub fn new(root: impl Into<PathBuf>, scene_extension: &str, prompt: Box<dyn SavePrompt>) -> Self {
        Self {
            root: root.into(),
            scene_extension: scene_extension.trim_start_matches('.').to_string(),
            cache: RefCell::new(ScanCache::default()),
            prompt,
            active_scene: None,
            dirty: false,
            playing: false,
        }
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scene_extension(&self) -> &str {
        &self.scene_extension
    }

    /// Mark the active scene as modified
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the active scene has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Enter or leave live execution
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Rescan the project directory and rebuild the index
    pub fn rescan(&self) {
        let packages = self.discover_packages();
        let mut scenes = Vec::new();

        let assets_dir = self.root.join(project::ASSETS_DIR);
        for file in collect_files(&assets_dir, &self.scene_extension) {
            if let Some(rel) = relative_asset_path(&assets_dir, &file) {
                let path = format!("{}/{}", project::ASSETS_DIR, rel);
                scenes.push(SceneRecord {
                    guid: read_guid(&file, &path),
                    path,
                    file,
                    source: None,
                });
            }
        }

        for package in &packages {
            let Some(dir) = &package.dir else { continue };
            for file in collect_files(dir, &self.scene_extension) {
                if let Some(rel) = relative_asset_path(dir, &file) {
                    let path = format!("{}/{}/{}", project::PACKAGES_DIR, package.name, rel);
                    scenes.push(SceneRecord {
                        guid: read_guid(&file, &path),
                        path,
                        file,
                        source: Some(package.source),
                    });
                }
            }
        }

        debug!(
            "Scanned {}: {} scene(s) across {} package(s)",
            self.root.display(),
            scenes.len(),
            packages.len()
        );
        *self.cache.borrow_mut() = ScanCache { packages, scenes };
    }

    fn discover_packages(&self) -> Vec<PackageRoot> {
        let packages_dir = self.root.join(project::PACKAGES_DIR);
        let mut packages = Vec::new();

        if let Ok(read_dir) = fs::read_dir(&packages_dir) {
            for entry in read_dir.flatten() {
                let dir = entry.path();
                if dir.is_dir() && !is_ignored(&dir) {
                    packages.push(PackageRoot {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        source: PackageSource::Embedded,
                        dir: Some(dir),
                    });
                }
            }
        }

        let manifest = match self.read_manifest() {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!("{}", e);
                PackageManifest::default()
            }
        };

        for (name, spec) in manifest.dependencies {
            // An embedded copy overrides the manifest entry
            if packages.iter().any(|p| p.name == name) {
                continue;
            }
            let source = classify_dependency(&name, &spec);
            let dir = match source {
                PackageSource::Local => {
                    let target = Path::new(spec.trim_start_matches("file:"));
                    Some(if target.is_absolute() {
                        target.to_path_buf()
                    } else {
                        packages_dir.join(target)
                    })
                }
                PackageSource::Registry | PackageSource::Git => {
                    self.find_cached_package(&name, &spec)
                }
                _ => None,
            };
            packages.push(PackageRoot { name, source, dir });
        }

        packages
    }

    fn read_manifest(&self) -> Result<PackageManifest> {
        let path = self
            .root
            .join(project::PACKAGES_DIR)
            .join(project::PACKAGE_MANIFEST);
        if !path.exists() {
            return Ok(PackageManifest::default());
        }
        let contents = fs::read_to_string(&path).map_err(|e| SwitcherError::io(&path, e))?;
        serde_json::from_str(&contents).map_err(|source| SwitcherError::Manifest { path, source })
    }

    /// Cache folder of a registry or git package. The folder for the declared
    /// version wins; otherwise the greatest `<name>@*` folder is used.
    fn find_cached_package(&self, name: &str, spec: &str) -> Option<PathBuf> {
        let [library, cache] = project::PACKAGE_CACHE_DIR;
        let cache_dir = self.root.join(library).join(cache);

        let exact = cache_dir.join(format!("{}@{}", name, spec));
        if exact.is_dir() {
            return Some(exact);
        }

        let prefix = format!("{}@", name);
        let mut matches: Vec<PathBuf> = fs::read_dir(cache_dir)
            .ok()?
            .flatten()
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(&prefix))
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        matches.sort();
        matches.pop()
    }

    /// Map an asset path to the file backing it
    fn resolve_file(&self, path: &str) -> Option<PathBuf> {
        let cache = self.cache.borrow();
        if let Some(record) = cache.scenes.iter().find(|r| r.path == path) {
            return Some(record.file.clone());
        }

        let mut segments = path.split('/');
        match segments.next()? {
            project::ASSETS_DIR => Some(self.root.join(path)),
            project::PACKAGES_DIR => {
                let name = segments.next()?;
                let dir = cache.packages.iter().find(|p| p.name == name)?.dir.clone()?;
                Some(segments.fold(dir, |acc, segment| acc.join(segment)))
            }
            _ => None,
        }
    }
}

impl AssetIndex for FilesystemHost {
    fn find_scene_guids(&self) -> Vec<String> {
        self.rescan();
        self.cache
            .borrow()
            .scenes
            .iter()
            .map(|record| record.guid.clone())
            .collect()
    }

    fn guid_to_path(&self, guid: &str) -> Option<String> {
        self.cache
            .borrow()
            .scenes
            .iter()
            .find(|record| record.guid == guid)
            .map(|record| record.path.clone())
    }

    fn path_to_guid(&self, path: &str) -> Option<String> {
        self.cache
            .borrow()
            .scenes
            .iter()
            .find(|record| record.path == path)
            .map(|record| record.guid.clone())
    }

    fn package_source(&self, path: &str) -> Option<PackageSource> {
        let cache = self.cache.borrow();
        if let Some(record) = cache.scenes.iter().find(|r| r.path == path) {
            return record.source;
        }
        let mut segments = path.split('/');
        if segments.next()? != project::PACKAGES_DIR {
            return None;
        }
        let name = segments.next()?;
        cache.packages.iter().find(|p| p.name == name).map(|p| p.source)
    }

    fn load_scene(&self, path: &str) -> Option<SceneAsset> {
        let file = self.resolve_file(path)?;
        if !file.is_file() {
            return None;
        }
        Some(SceneAsset {
            name: scene_name_from_path(path),
        })
    }
}

impl SceneSession for FilesystemHost {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn active_scene_path(&self) -> Option<String> {
        self.active_scene.clone()
    }

    fn save_modified_scenes_if_user_wants(&mut self) -> bool {
        if !self.dirty {
            return true;
        }
        let active = self.active_scene.clone().unwrap_or_default();
        match self.prompt.ask_save(&active) {
            SaveChoice::Save => {
                info!("Saved scene {}", active);
                self.dirty = false;
                true
            }
            SaveChoice::Discard => true,
            SaveChoice::Cancel => false,
        }
    }

    fn open_scene(&mut self, path: &str) -> Result<()> {
        let file = self.resolve_file(path).ok_or_else(|| SwitcherError::OpenScene {
            path: path.to_string(),
            reason: "path is not inside the project".to_string(),
        })?;
        if !file.is_file() {
            return Err(SwitcherError::OpenScene {
                path: path.to_string(),
                reason: format!("{} does not exist", file.display()),
            });
        }
        info!("Opened scene {}", path);
        self.active_scene = Some(path.to_string());
        self.dirty = false;
        Ok(())
    }
}

/// Classify a manifest dependency by its version specifier
fn classify_dependency(name: &str, spec: &str) -> PackageSource {
    if let Some(target) = spec.strip_prefix("file:") {
        if target.ends_with(".tgz") {
            PackageSource::LocalTarball
        } else {
            PackageSource::Local
        }
    } else if name.starts_with(project::BUILTIN_MODULE_PREFIX) {
        PackageSource::BuiltIn
    } else if spec.starts_with("git")
        || spec.starts_with("https://")
        || spec.starts_with("ssh://")
        || spec.contains(".git")
    {
        PackageSource::Git
    } else {
        PackageSource::Registry
    }
}

/// Folders the asset index skips: dot-folders and `~`-suffixed folders
fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            name.starts_with('.') || name.ends_with('~')
        })
        .unwrap_or(false)
}

/// Recursively collect files with the given extension
fn collect_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let Ok(read_dir) = fs::read_dir(&current) else {
            continue;
        };
        for entry in read_dir.flatten() {
            let path = entry.path();
            if is_ignored(&path) {
                continue;
            }
            // Symlinked folders can loop back into the tree
            let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
            if path.is_dir() {
                if !is_symlink {
                    pending.push(path);
                }
            } else if path.extension().and_then(|e| e.to_str()) == Some(extension) {
                files.push(path);
            }
        }
    }

    files
}

/// `/`-separated path of `file` relative to `base`
fn relative_asset_path(base: &Path, file: &Path) -> Option<String> {
    let rel = file.strip_prefix(base).ok()?;
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(segments.join("/"))
}

/// Identifier from the sibling `.meta` file, or a name-based UUID of the path
fn read_guid(file: &Path, asset_path: &str) -> String {
    let mut meta = file.as_os_str().to_owned();
    meta.push(".");
    meta.push(project::META_EXTENSION);

    if let Ok(contents) = fs::read_to_string(PathBuf::from(meta)) {
        for line in contents.lines() {
            if let Some(guid) = line.trim().strip_prefix("guid:") {
                let guid = guid.trim();
                if !guid.is_empty() {
                    return guid.to_string();
                }
            }
        }
    }

    Uuid::new_v5(&Uuid::NAMESPACE_URL, asset_path.as_bytes())
        .simple()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct ScriptedPrompt {
        answer: SaveChoice,
    }

    impl SavePrompt for ScriptedPrompt {
        fn ask_save(&mut self, _scene_path: &str) -> SaveChoice {
            self.answer
        }
    }

    fn host(root: &Path, answer: SaveChoice) -> FilesystemHost {
        FilesystemHost::new(root, "unity", Box::new(ScriptedPrompt { answer }))
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn project_fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("Assets/Levels/World1/A.unity"));
        touch(&root.join("Assets/Levels/World1/notes.txt"));
        touch(&root.join("Assets/.trash/Old.unity"));
        touch(&root.join("Packages/com.studio.tools/Scenes/Tools.unity"));
        touch(&root.join("Library/PackageCache/com.vendor.kit@1.2.0/Demo.unity"));
        fs::write(
            root.join("Packages/manifest.json"),
            r#"{
                "dependencies": {
                    "com.vendor.kit": "1.2.0",
                    "com.unity.modules.audio": "1.0.0",
                    "com.studio.shared": "file:../Shared",
                    "com.studio.archive": "file:../archive.tgz",
                    "com.other.lib": "https://github.com/other/lib.git"
                }
            }"#,
        )
        .unwrap();
        touch(&root.join("Shared/Arena.unity"));
        dir
    }

    #[test]
    fn test_classify_dependency() {
        assert_eq!(classify_dependency("com.a", "1.0.0"), PackageSource::Registry);
        assert_eq!(classify_dependency("com.a", "file:../A"), PackageSource::Local);
        assert_eq!(classify_dependency("com.a", "file:a.tgz"), PackageSource::LocalTarball);
        assert_eq!(classify_dependency("com.a", "https://host/a.git"), PackageSource::Git);
        assert_eq!(classify_dependency("com.a", "git@host:a.git"), PackageSource::Git);
        assert_eq!(
            classify_dependency("com.unity.modules.physics", "1.0.0"),
            PackageSource::BuiltIn
        );
    }

    #[test]
    fn test_scan_finds_scenes_with_sources() {
        let dir = project_fixture();
        let host = host(dir.path(), SaveChoice::Save);

        let guids = host.find_scene_guids();
        let mut paths: Vec<String> = guids.iter().filter_map(|g| host.guid_to_path(g)).collect();
        paths.sort();

        assert_eq!(
            paths,
            vec![
                "Assets/Levels/World1/A.unity",
                "Packages/com.studio.shared/Arena.unity",
                "Packages/com.studio.tools/Scenes/Tools.unity",
                "Packages/com.vendor.kit/Demo.unity",
            ]
        );
        assert_eq!(host.package_source("Assets/Levels/World1/A.unity"), None);
        assert_eq!(
            host.package_source("Packages/com.studio.tools/Scenes/Tools.unity"),
            Some(PackageSource::Embedded)
        );
        assert_eq!(
            host.package_source("Packages/com.studio.shared/Arena.unity"),
            Some(PackageSource::Local)
        );
        assert_eq!(
            host.package_source("Packages/com.vendor.kit/Demo.unity"),
            Some(PackageSource::Registry)
        );
    }

    #[test]
    fn test_cached_package_uses_declared_version() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("Library/PackageCache/com.vendor.kit@1.9.0/Old.unity"));
        touch(&root.join("Library/PackageCache/com.vendor.kit@1.10.0/Demo.unity"));
        touch(&root.join("Library/PackageCache/com.other.lib@0a1b2c/Lib.unity"));
        touch(&root.join("Packages/manifest.json"));
        fs::write(
            root.join("Packages/manifest.json"),
            r#"{"dependencies": {
                "com.vendor.kit": "1.10.0",
                "com.other.lib": "https://github.com/other/lib.git"
            }}"#,
        )
        .unwrap();

        let host = host(root, SaveChoice::Save);
        let mut paths: Vec<String> = host
            .find_scene_guids()
            .iter()
            .filter_map(|g| host.guid_to_path(g))
            .collect();
        paths.sort();

        assert_eq!(
            paths,
            vec!["Packages/com.other.lib/Lib.unity", "Packages/com.vendor.kit/Demo.unity"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_folders_are_not_followed() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("Assets/Levels/A.unity"));
        std::os::unix::fs::symlink(dir.path().join("Assets"), dir.path().join("Assets/Levels/Loop"))
            .unwrap();

        let host = host(dir.path(), SaveChoice::Save);
        let guids = host.find_scene_guids();

        assert_eq!(guids.len(), 1);
        assert_eq!(host.guid_to_path(&guids[0]).as_deref(), Some("Assets/Levels/A.unity"));
    }

    #[test]
    fn test_guid_prefers_meta_file() {
        let dir = TempDir::new().unwrap();
        let scene = dir.path().join("Assets/Main.unity");
        touch(&scene);
        fs::write(
            dir.path().join("Assets/Main.unity.meta"),
            "fileFormatVersion: 2\nguid: 0123456789abcdef0123456789abcdef\n",
        )
        .unwrap();
        touch(&dir.path().join("Assets/Other.unity"));

        let host = host(dir.path(), SaveChoice::Save);
        host.find_scene_guids();

        assert_eq!(
            host.path_to_guid("Assets/Main.unity").as_deref(),
            Some("0123456789abcdef0123456789abcdef")
        );
        let derived = host.path_to_guid("Assets/Other.unity").unwrap();
        assert_eq!(derived.len(), 32);
        assert_eq!(derived, read_guid(Path::new("missing"), "Assets/Other.unity"));
    }

    #[test]
    fn test_deleted_scene_does_not_load() {
        let dir = TempDir::new().unwrap();
        let scene = dir.path().join("Assets/Gone.unity");
        touch(&scene);

        let host = host(dir.path(), SaveChoice::Save);
        host.find_scene_guids();
        assert!(host.load_scene("Assets/Gone.unity").is_some());

        fs::remove_file(&scene).unwrap();
        assert!(host.load_scene("Assets/Gone.unity").is_none());
    }

    #[test]
    fn test_session_save_prompt() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("Assets/A.unity"));

        let mut cancelling = host(dir.path(), SaveChoice::Cancel);
        assert!(cancelling.save_modified_scenes_if_user_wants());
        cancelling.mark_dirty();
        assert!(!cancelling.save_modified_scenes_if_user_wants());
        assert!(cancelling.is_dirty());

        let mut saving = host(dir.path(), SaveChoice::Save);
        saving.mark_dirty();
        assert!(saving.save_modified_scenes_if_user_wants());
        assert!(!saving.is_dirty());

        let mut discarding = host(dir.path(), SaveChoice::Discard);
        discarding.mark_dirty();
        assert!(discarding.save_modified_scenes_if_user_wants());
    }

    #[test]
    fn test_open_scene() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("Assets/A.unity"));

        let mut host = host(dir.path(), SaveChoice::Save);
        host.find_scene_guids();

        host.open_scene("Assets/A.unity").unwrap();
        assert_eq!(host.active_scene_path().as_deref(), Some("Assets/A.unity"));

        assert!(host.open_scene("Assets/Missing.unity").is_err());
        assert!(host.open_scene("Elsewhere/B.unity").is_err());
        assert_eq!(host.active_scene_path().as_deref(), Some("Assets/A.unity"));
    }
}
