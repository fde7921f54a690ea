//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

use std::time::Duration;

/// Interval between automatic rescans of the scene list
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(15);

/// Default file extension of scene documents
pub const DEFAULT_SCENE_EXTENSION: &str = "unity";

/// Persisted settings locations, relative to the project root
pub mod settings {
    /// Directory holding per-project tool settings
    pub const SETTINGS_DIR: [&str; 2] = ["ProjectSettings", "Packages"];

    /// Hidden scene list, one identifier per line
    pub const HIDDEN_SCENES_FILE: &str = "QuickSceneSwitcher.txt";
}

/// Project directory layout understood by the filesystem host
pub mod project {
    pub const ASSETS_DIR: &str = "Assets";
    pub const PACKAGES_DIR: &str = "Packages";
    pub const PACKAGE_MANIFEST: &str = "manifest.json";
    pub const PACKAGE_CACHE_DIR: [&str; 2] = ["Library", "PackageCache"];
    pub const META_EXTENSION: &str = "meta";
    pub const BUILTIN_MODULE_PREFIX: &str = "com.unity.modules.";
}

/// Menu and window labels
pub mod menu {
    /// Menu path under which the panel is registered
    pub const PANEL_MENU_PATH: &str = "Window/Quick Scene Switcher";

    /// Title of the panel window
    pub const PANEL_TITLE: &str = "Scene Switcher";

    /// Heading drawn at the top of the panel
    pub const PANEL_HEADING: &str = " Quick Scene Switcher";
}

/// UI spacing and sizing constants
pub mod ui {
    /// Height of row buttons and labels
    pub const ROW_HEIGHT: f32 = 22.0;

    /// Width of the square marker button at the start of each row
    pub const MARKER_WIDTH: f32 = 25.0;

    /// Vertical gap before every category header except the first
    pub const CATEGORY_SPACING: f32 = 20.0;

    /// Height of the informational placeholder buttons
    pub const PLACEHOLDER_HEIGHT: f32 = 30.0;

    /// Heading font size
    pub const HEADING_SIZE: f32 = 14.0;

    /// Default panel window size
    pub const DEFAULT_PANEL_SIZE: [f32; 2] = [320.0, 480.0];
}

/// User facing strings
pub mod text {
    pub const EDIT_MODE: &str = " Edit Mode ";
    pub const EXIT_EDIT_MODE: &str = " Exit Edit Mode ";
    pub const PLAY_MODE_NOTICE: &str = "This tool is not usable in play mode.";
    pub const NO_SCENES: &str = "There are no scenes.";
    pub const MARKER_OPEN: &str = "O";
    pub const MARKER_CURRENT: &str = "X";
    pub const MARKER_HIDE: &str = "-";
    pub const MARKER_SHOW: &str = "+";
}
