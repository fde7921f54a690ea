//! Standalone host application
//!
//! Hosts the scene switcher panel over a project directory, with a menu bar
//! for opening the panel and for driving the session (play state, modified
//! flag) the way an authoring tool would.

use egui::RichText;
use log::info;

use crate::config::SwitcherConfig;
use crate::editor::{render_menu_bar, MenuAction, ScenePanel};
use crate::host::{FilesystemHost, SaveChoice, SavePrompt, SceneSession};

/// Save prompt backed by a native message dialog
pub struct DialogPrompt;

impl SavePrompt for DialogPrompt {
    fn ask_save(&mut self, scene_path: &str) -> SaveChoice {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title("Scene Has Been Modified")
            .set_description(format!(
                "Do you want to save the changes you made in {}?\n\nYour changes will be lost if you don't save them.",
                scene_path
            ))
            .set_buttons(rfd::MessageButtons::YesNoCancel)
            .show();

        match result {
            rfd::MessageDialogResult::Yes => SaveChoice::Save,
            rfd::MessageDialogResult::No => SaveChoice::Discard,
            _ => SaveChoice::Cancel,
        }
    }
}

/// The standalone scene switcher application
pub struct SwitcherApp {
    config: SwitcherConfig,
    host: FilesystemHost,
    panel: Option<ScenePanel>,
}

impl SwitcherApp {
    /// Create the app for a project, with the panel already open
    pub fn new(config: SwitcherConfig, prompt: Box<dyn SavePrompt>) -> Self {
        let host = FilesystemHost::new(&config.project_root, &config.scene_extension, prompt);
        let mut app = Self {
            config,
            host,
            panel: None,
        };
        app.open_panel();
        app
    }

    pub fn host(&self) -> &FilesystemHost {
        &self.host
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel.is_some()
    }

    /// Open the panel; its state is created fresh each time
    pub fn open_panel(&mut self) {
        if self.panel.is_none() {
            info!("Opening scene switcher for {}", self.config.project_root.display());
            self.panel = Some(ScenePanel::open(self.config.clone(), &self.host));
        }
    }

    /// Close the panel and drop its state
    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    pub(crate) fn handle_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::None => {}
            MenuAction::TogglePanel => {
                if self.is_panel_open() {
                    self.close_panel();
                } else {
                    self.open_panel();
                }
            }
            MenuAction::TogglePlay => {
                let playing = !self.host.is_playing();
                self.host.set_playing(playing);
                info!("{} play mode", if playing { "Entered" } else { "Exited" });
            }
            MenuAction::MarkSceneModified => self.host.mark_dirty(),
        }
    }

    fn render_session_summary(&self, ui: &mut egui::Ui) {
        ui.heading("Project");
        ui.label(self.config.project_root.display().to_string());
        ui.add_space(8.0);

        let active = self
            .host
            .active_scene_path()
            .unwrap_or_else(|| "(none)".to_string());
        let modified = if self.host.is_dirty() { "*" } else { "" };
        ui.label(format!("Active scene: {}{}", active, modified));

        if self.host.is_playing() {
            ui.label(RichText::new("Playing").strong().color(egui::Color32::LIGHT_GREEN));
        }
    }
}

impl eframe::App for SwitcherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let panel_open = self.is_panel_open();
        let playing = self.host.is_playing();

        let menu = egui::TopBottomPanel::top("menu_bar")
            .show(ctx, |ui| render_menu_bar(ui, panel_open, playing));
        let menu_bar_height = menu.response.rect.height();
        self.handle_menu_action(menu.inner);

        egui::CentralPanel::default().show(ctx, |ui| self.render_session_summary(ui));

        let still_open = match self.panel.as_mut() {
            Some(panel) => panel.render_window(ctx, &mut self.host, menu_bar_height),
            None => true,
        };
        if !still_open {
            self.close_panel();
        }
    }
}
