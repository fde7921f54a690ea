//! Menu bar entries for the scene switcher

use egui::Color32;

use crate::constants::menu;

/// Actions requested from the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    TogglePanel,
    TogglePlay,
    MarkSceneModified,
}

/// Standard menu styling for consistency across all menus
pub fn apply_menu_style(ui: &mut egui::Ui) {
    ui.style_mut().visuals.window_fill = Color32::from_rgb(28, 28, 28);
    ui.style_mut().visuals.widgets.hovered.bg_fill = Color32::from_rgb(48, 48, 48);
    ui.style_mut().visuals.widgets.hovered.fg_stroke.color = Color32::WHITE;
}

/// Split a `Menu/Item` path into the top-level menu and the item label
pub fn split_menu_path(path: &str) -> (&str, &str) {
    path.split_once('/').unwrap_or(("", path))
}

/// Render the menu bar. `panel_open` and `playing` drive the item labels.
pub fn render_menu_bar(ui: &mut egui::Ui, panel_open: bool, playing: bool) -> MenuAction {
    let mut action = MenuAction::None;
    let (window_menu, panel_item) = split_menu_path(menu::PANEL_MENU_PATH);

    egui::menu::bar(ui, |ui| {
        ui.menu_button(window_menu, |ui| {
            apply_menu_style(ui);
            if ui.selectable_label(panel_open, panel_item).clicked() {
                action = MenuAction::TogglePanel;
                ui.close_menu();
            }
        });

        ui.menu_button("Session", |ui| {
            apply_menu_style(ui);
            let play_label = if playing { "Stop" } else { "Play" };
            if ui.button(play_label).clicked() {
                action = MenuAction::TogglePlay;
                ui.close_menu();
            }
            if ui.add_enabled(!playing, egui::Button::new("Mark Scene Modified")).clicked() {
                action = MenuAction::MarkSceneModified;
                ui.close_menu();
            }
        });
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_menu_path() {
        assert_eq!(
            split_menu_path(menu::PANEL_MENU_PATH),
            ("Window", "Quick Scene Switcher")
        );
        assert_eq!(split_menu_path("Tools/Scenes/Switcher"), ("Tools", "Scenes/Switcher"));
        assert_eq!(split_menu_path("Switcher"), ("", "Switcher"));
    }
}
