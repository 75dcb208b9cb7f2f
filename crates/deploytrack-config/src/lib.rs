//! KDL configuration parsing for deploytrack.
//!
//! Handles the optional server configuration file (listen address, CORS
//! origin and startup seeding).

pub mod error;
pub mod server;

pub use error::{ConfigError, ConfigResult};
pub use server::{ServerConfig, load_server_config, loopback_url, parse_server_config};
