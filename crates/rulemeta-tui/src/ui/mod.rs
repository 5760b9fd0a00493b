pub mod app;
pub mod components;
pub mod notifications;
pub mod tag_picker;
pub mod terminal;
pub mod theme;
pub mod tooltips;
pub mod views;

pub use app::App;
pub use tag_picker::{TagPicker, TagPickerWidget};
pub use terminal::{init as init_terminal, restore as restore_terminal, Tui};
