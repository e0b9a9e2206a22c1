pub mod args;
pub mod config;
pub mod loader;

pub use args::Args;
pub use config::{Backend, ConfigFile};
pub use loader::{Settings, SettingsLoader};
