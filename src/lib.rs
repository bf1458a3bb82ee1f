pub mod animation;
pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod math;
pub mod scene;
pub mod scenes;
pub mod session;
pub mod shell;
pub mod types;
pub mod ui;

pub use config::AppConfig;
pub use error::RenderError;
pub use session::Session;
