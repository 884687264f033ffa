//! Shell configuration: TOML on disk, typed in memory.

mod loader;
mod store;
mod types;

pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{AnimationConfig, Config, GatewayConfig, NavigationConfig, NavigationMode};
