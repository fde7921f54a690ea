//! Editor-facing UI: the switcher panel and its menu entries

pub mod menus;
pub mod panel;

pub use menus::{render_menu_bar, MenuAction};
pub use panel::ScenePanel;
