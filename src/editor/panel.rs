//! Scene switcher panel
//!
//! Draws the manager's rows with egui. Nothing is retained between frames
//! except what the manager owns: every frame rebuilds the rows, collects the
//! user's actions while drawing, and applies them afterwards.

use std::time::Instant;

use egui::{Align, Button, Context, Layout, RichText, Ui, Vec2};

use crate::config::SwitcherConfig;
use crate::constants::{menu, text, ui as ui_consts};
use crate::host::{AssetIndex, SceneSession};
use crate::manager::{PanelAction, PanelMode, PanelRow, SceneListManager};
use crate::scenes::SceneEntry;
use crate::theme::{colors, dimensions};

/// An open scene switcher panel
pub struct ScenePanel {
    manager: SceneListManager,
    default_size: [f32; 2],
}

impl ScenePanel {
    /// Open the panel, loading the scene list immediately
    pub fn open(config: SwitcherConfig, index: &dyn AssetIndex) -> Self {
        Self {
            manager: SceneListManager::open(config, index),
            default_size: ui_consts::DEFAULT_PANEL_SIZE,
        }
    }

    pub fn manager(&self) -> &SceneListManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut SceneListManager {
        &mut self.manager
    }

    /// Render the panel as a floating window below the menu bar.
    /// Returns false once the user has closed it.
    pub fn render_window<H>(&mut self, ctx: &Context, host: &mut H, menu_bar_height: f32) -> bool
    where
        H: AssetIndex + SceneSession,
    {
        let mut is_open = true;

        egui::Window::new(menu::PANEL_TITLE)
            .id(egui::Id::new("scene_switcher_panel"))
            .open(&mut is_open)
            .default_size(self.default_size)
            .resizable(true)
            .collapsible(true)
            .constrain_to(egui::Rect::from_min_size(
                egui::Pos2::new(0.0, menu_bar_height),
                egui::Vec2::new(
                    ctx.screen_rect().width(),
                    ctx.screen_rect().height() - menu_bar_height,
                ),
            ))
            .show(ctx, |ui| self.show(ui, host));

        is_open
    }

    /// Render the panel contents into `ui`
    pub fn show<H>(&mut self, ui: &mut Ui, host: &mut H)
    where
        H: AssetIndex + SceneSession,
    {
        self.manager.maybe_auto_reload(&*host);

        let playing = host.is_playing();
        self.manager.sync_play_state(playing);

        let active_scene = host.active_scene_path();
        let rows = self.manager.rows(playing, active_scene.as_deref());
        let mode = self.manager.mode();
        let footer = (mode == PanelMode::Edit && !playing).then(|| footer_text(&self.manager));

        let mut actions = Vec::new();

        egui::ScrollArea::vertical()
            .id_salt("scene_switcher_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                render_title_bar(ui, mode, playing, &mut actions);

                for row in &rows {
                    render_row(ui, row, &mut actions);
                }

                if let Some(footer) = &footer {
                    ui.add_space(dimensions().category_spacing);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(footer).small().color(colors().footer));
                    });
                    ui.add_space(5.0);
                }
            });

        // Apply after drawing so the rows above were built from one state
        for action in actions {
            self.manager.apply(action, &mut *host);
        }

        ui.ctx()
            .request_repaint_after(self.manager.time_until_reload(Instant::now()));
    }
}

fn render_title_bar(ui: &mut Ui, mode: PanelMode, playing: bool, actions: &mut Vec<PanelAction>) {
    let dims = dimensions();

    ui.add_space(5.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new(menu::PANEL_HEADING).strong().size(dims.heading_size));

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let editing = mode == PanelMode::Edit;
            let label = if editing { text::EXIT_EDIT_MODE } else { text::EDIT_MODE };
            let toggle = Button::new(RichText::new(label).strong())
                .selected(editing)
                .min_size(Vec2::new(0.0, dims.row_height));

            if ui.add_enabled(!playing, toggle).clicked() {
                actions.push(PanelAction::ToggleEditMode);
            }
        });
    });
    ui.add_space(3.0);
}

fn render_row(ui: &mut Ui, row: &PanelRow, actions: &mut Vec<PanelAction>) {
    let dims = dimensions();
    let colors = colors();

    match row {
        PanelRow::Header {
            category,
            spacing_before,
        } => {
            if *spacing_before {
                ui.add_space(dims.category_spacing);
            }
            ui.label(RichText::new(category).strong().color(colors.category_header));
        }
        PanelRow::Launch { entry, is_current } => {
            ui.horizontal(|ui| {
                if *is_current {
                    let marker = Button::new(
                        RichText::new(text::MARKER_CURRENT)
                            .strong()
                            .color(colors.current_scene),
                    )
                    .selected(true)
                    .min_size(dims.marker_size);
                    ui.add_enabled(false, marker);
                } else {
                    let marker = Button::new(RichText::new(text::MARKER_OPEN).strong())
                        .min_size(dims.marker_size);
                    if ui.add(marker).on_hover_text(&entry.path).clicked() {
                        actions.push(PanelAction::SwitchTo(entry.clone()));
                    }
                }
                scene_label(ui, entry, *is_current, false);
            });
        }
        PanelRow::Toggle { entry, hidden } => {
            ui.horizontal(|ui| {
                let (marker_text, marker_color) = if *hidden {
                    (text::MARKER_SHOW, colors.hidden_marker)
                } else {
                    (text::MARKER_HIDE, colors.visible_marker)
                };
                let marker = Button::new(RichText::new(marker_text).strong().color(marker_color))
                    .min_size(dims.marker_size);
                if ui.add(marker).clicked() {
                    actions.push(PanelAction::SetHidden {
                        guid: entry.guid.clone(),
                        hidden: !*hidden,
                    });
                }
                scene_label(ui, entry, false, *hidden);
            });
        }
        PanelRow::Notice(message) => {
            ui.add_space(2.0);
            let width = ui.available_width();
            ui.add_enabled(
                false,
                Button::new(*message).min_size(Vec2::new(width, dims.placeholder_height)),
            );
        }
    }
}

/// Read-only scene name followed by its muted path
fn scene_label(ui: &mut Ui, entry: &SceneEntry, is_current: bool, hidden: bool) {
    let colors = colors();

    let mut name = RichText::new(&entry.name);
    if is_current {
        name = name.strong();
    }
    if hidden {
        name = name.color(colors.hidden_scene);
    }

    ui.label(name).on_hover_text(&entry.guid);
    ui.label(RichText::new(&entry.path).small().color(colors.scene_path));
}

/// Edit-mode footer: scene count, hidden count and last refresh time
pub fn footer_text(manager: &SceneListManager) -> String {
    let total = manager.entries().len();
    let hidden = manager
        .entries()
        .iter()
        .filter(|entry| manager.is_hidden(&entry.guid))
        .count();
    let refreshed = manager
        .last_reload()
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    format!("{} scenes, {} hidden · refreshed {}", total, hidden, refreshed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;
    use tempfile::TempDir;

    fn host() -> MemoryHost {
        MemoryHost::new()
            .with_scene("guid-a", "Levels/World1/A")
            .with_scene("guid-b", "Levels/World1/B")
            .with_scene("guid-c", "UI/Menus/C")
    }

    fn run_frame(ctx: &Context, panel: &mut ScenePanel, host: &mut MemoryHost) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| panel.show(ui, &mut *host));
        });
    }

    #[test]
    fn test_panel_renders_both_modes() {
        let dir = TempDir::new().unwrap();
        let mut host = host();
        host.active_path = Some("Levels/World1/B".to_string());
        let mut panel = ScenePanel::open(SwitcherConfig::for_project(dir.path()), &host);
        let ctx = Context::default();

        run_frame(&ctx, &mut panel, &mut host);
        assert_eq!(panel.manager().mode(), PanelMode::Launcher);

        panel.manager_mut().toggle_edit_mode(false);
        run_frame(&ctx, &mut panel, &mut host);
        assert_eq!(panel.manager().mode(), PanelMode::Edit);
        assert!(host.opened.is_empty());
    }

    #[test]
    fn test_panel_leaves_edit_mode_while_playing() {
        let dir = TempDir::new().unwrap();
        let mut host = host();
        let mut panel = ScenePanel::open(SwitcherConfig::for_project(dir.path()), &host);
        panel.manager_mut().toggle_edit_mode(false);
        host.playing = true;

        let ctx = Context::default();
        run_frame(&ctx, &mut panel, &mut host);

        assert_eq!(panel.manager().mode(), PanelMode::Launcher);
    }

    #[test]
    fn test_render_window_stays_open() {
        let dir = TempDir::new().unwrap();
        let mut host = host();
        let mut panel = ScenePanel::open(SwitcherConfig::for_project(dir.path()), &host);

        let ctx = Context::default();
        let mut open = false;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            open = panel.render_window(ctx, &mut host, 0.0);
        });
        assert!(open);
    }

    #[test]
    fn test_footer_counts_listed_hidden_scenes() {
        let dir = TempDir::new().unwrap();
        let host = host();
        let mut panel = ScenePanel::open(SwitcherConfig::for_project(dir.path()), &host);
        panel.manager_mut().set_hidden("guid-a", true);
        panel.manager_mut().set_hidden("no-longer-exists", true);

        let footer = footer_text(panel.manager());
        assert!(footer.starts_with("3 scenes, 1 hidden · refreshed "));
    }
}
