//! In-memory host used by unit tests

use super::{AssetIndex, PackageSource, SceneAsset, SceneSession};
use crate::error::{Result, SwitcherError};
use crate::scenes::scene_name_from_path;

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    pub guid: String,
    pub path: String,
    pub source: Option<PackageSource>,
    pub exists: bool,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    pub documents: Vec<MemoryDocument>,
    pub playing: bool,
    pub active_path: Option<String>,
    pub cancel_save: bool,
    pub fail_open: bool,
    pub save_prompts: usize,
    pub opened: Vec<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene(mut self, guid: &str, path: &str) -> Self {
        self.add_scene(guid, path, None);
        self
    }

    pub fn add_scene(&mut self, guid: &str, path: &str, source: Option<PackageSource>) {
        self.documents.push(MemoryDocument {
            guid: guid.to_string(),
            path: path.to_string(),
            source,
            exists: true,
        });
    }

    pub fn delete_scene(&mut self, guid: &str) {
        for doc in self.documents.iter_mut().filter(|doc| doc.guid == guid) {
            doc.exists = false;
        }
    }
}

impl AssetIndex for MemoryHost {
    fn find_scene_guids(&self) -> Vec<String> {
        self.documents.iter().map(|doc| doc.guid.clone()).collect()
    }

    fn guid_to_path(&self, guid: &str) -> Option<String> {
        self.documents
            .iter()
            .find(|doc| doc.guid == guid)
            .map(|doc| doc.path.clone())
    }

    fn path_to_guid(&self, path: &str) -> Option<String> {
        self.documents
            .iter()
            .find(|doc| doc.path == path)
            .map(|doc| doc.guid.clone())
    }

    fn package_source(&self, path: &str) -> Option<PackageSource> {
        self.documents
            .iter()
            .find(|doc| doc.path == path)
            .and_then(|doc| doc.source)
    }

    fn load_scene(&self, path: &str) -> Option<SceneAsset> {
        self.documents
            .iter()
            .find(|doc| doc.path == path && doc.exists)
            .map(|doc| SceneAsset {
                name: scene_name_from_path(&doc.path),
            })
    }
}

impl SceneSession for MemoryHost {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn active_scene_path(&self) -> Option<String> {
        self.active_path.clone()
    }

    fn save_modified_scenes_if_user_wants(&mut self) -> bool {
        self.save_prompts += 1;
        !self.cancel_save
    }

    fn open_scene(&mut self, path: &str) -> Result<()> {
        if self.fail_open {
            return Err(SwitcherError::OpenScene {
                path: path.to_string(),
                reason: "refused by test host".to_string(),
            });
        }
        self.opened.push(path.to_string());
        self.active_path = Some(path.to_string());
        Ok(())
    }
}
