mod models;
mod defaults;
mod loader;
mod errors;

pub use models::*;
pub use errors::ConfigError;
