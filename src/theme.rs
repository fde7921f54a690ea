//! Centralized theme and styling constants for the scene switcher
//!
//! This module provides a single source of truth for all colors and
//! dimensions used by the panel.

use egui::{Color32, Vec2};

use crate::constants::ui;

/// Color palette for the scene switcher panel
pub struct Colors {
    // Row markers
    pub current_scene: Color32,
    pub hidden_marker: Color32,
    pub visible_marker: Color32,

    // Text
    pub category_header: Color32,
    pub scene_path: Color32,
    pub hidden_scene: Color32,
    pub footer: Color32,
}

impl Colors {
    /// Get the default color palette
    pub fn default() -> Self {
        Self {
            current_scene: Color32::from_rgb(100, 150, 255),
            hidden_marker: Color32::from_rgb(120, 70, 70),
            visible_marker: Color32::from_rgb(70, 120, 90),

            category_header: Color32::from_rgb(200, 200, 200),
            scene_path: Color32::from_rgb(127, 127, 127),
            hidden_scene: Color32::from_rgb(96, 96, 96),
            footer: Color32::from_rgba_unmultiplied(255, 255, 255, 64),
        }
    }
}

/// Dimension constants for the scene switcher panel
pub struct Dimensions {
    pub marker_size: Vec2,
    pub row_height: f32,
    pub category_spacing: f32,
    pub placeholder_height: f32,
    pub heading_size: f32,
}

impl Dimensions {
    /// Get the default dimensions
    pub fn default() -> Self {
        Self {
            marker_size: Vec2::new(ui::MARKER_WIDTH, ui::ROW_HEIGHT),
            row_height: ui::ROW_HEIGHT,
            category_spacing: ui::CATEGORY_SPACING,
            placeholder_height: ui::PLACEHOLDER_HEIGHT,
            heading_size: ui::HEADING_SIZE,
        }
    }
}

/// Complete theme containing all styling constants
pub struct Theme {
    pub colors: Colors,
    pub dimensions: Dimensions,
}

impl Theme {
    /// Get the default theme
    pub fn default() -> Self {
        Self {
            colors: Colors::default(),
            dimensions: Dimensions::default(),
        }
    }
}

/// Global theme instance
static GLOBAL_THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get the global theme
pub fn theme() -> &'static Theme {
    &GLOBAL_THEME
}

/// Convenience functions for commonly used values
pub fn colors() -> &'static Colors {
    &theme().colors
}

pub fn dimensions() -> &'static Dimensions {
    &theme().dimensions
}
