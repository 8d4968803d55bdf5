//! Terminal UI: the interactive game view with selectable pits and
//! swappable board themes.

mod app;
pub mod board_widget;
mod game_view;
pub mod theme;

pub use app::App;
pub use theme::{BoardTheme, ClassicTheme, MidnightTheme, ThemeKind};
