pub mod app;
pub mod camera_controls;
pub mod event_log;
pub mod map_view;
pub mod settings_panel;

pub use app::App;
pub use map_view::MapView;
