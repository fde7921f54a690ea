//! Quick scene switcher
//!
//! A panel that lists the scene documents owned by a project, opens one with
//! unsaved-change protection, and lets the user hide entries per project.

// Public modules
pub mod app;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod host;
pub mod manager;
pub mod scenes;
pub mod theme;

// Re-export commonly used types
pub use config::{AppConfig, SwitcherConfig};
pub use error::{Result, SwitcherError};
pub use host::{AssetIndex, PackageSource, SceneAsset, SceneSession};
pub use manager::{PanelAction, PanelMode, PanelRow, SceneListManager, SwitchOutcome};
pub use scenes::{scene_category, HiddenSet, SceneEntry};
