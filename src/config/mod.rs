//! Application configuration
//!
//! Static configuration is loaded once at startup from a TOML file and then
//! overridden by environment variables. Dotenv files are layered before the
//! override pass (see `main.rs`): `.env` takes precedence over `.env.dev`,
//! and real environment variables beat both.

mod r#impl;
mod structs;

pub use r#impl::{get_config, init_config, load_config_from};
pub use structs::*;
