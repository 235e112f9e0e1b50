pub mod app;
pub mod creation;
pub mod input;
pub mod notification;
pub mod render;
pub mod theme;
pub mod view_state;

pub use app::run;
