pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod screen;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
