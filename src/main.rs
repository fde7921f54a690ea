//! Scene Switcher - standalone host for the quick scene switcher panel
//!
//! Opens the project given as the first argument (or the last project, or
//! the current directory) and shows the panel over it.

use std::path::PathBuf;

use eframe::egui;
use log::warn;

use scene_switcher::app::{DialogPrompt, SwitcherApp};
use scene_switcher::constants::{menu, ui};
use scene_switcher::AppConfig;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app_config = AppConfig::load();
    let project_root = app_config.resolve_project(std::env::args_os().nth(1).map(PathBuf::from));
    let project_root = project_root.canonicalize().unwrap_or(project_root);

    app_config.last_project = Some(project_root.clone());
    if let Err(e) = app_config.save() {
        warn!("Could not remember project: {}", e);
    }

    let switcher_config = app_config.switcher_config(project_root);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([ui::DEFAULT_PANEL_SIZE[0] + 480.0, ui::DEFAULT_PANEL_SIZE[1] + 120.0]),
        ..Default::default()
    };

    eframe::run_native(
        menu::PANEL_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(SwitcherApp::new(switcher_config, Box::new(DialogPrompt))))),
    )
}
