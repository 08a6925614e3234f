use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_SERVER: &str = "http://localhost:8271";
pub const CONFIG_FILE: &str = "treedrive.json";

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct Config {
    pub server: String,
}

impl Config {
    /// Resolve the effective config: explicit flag, then `treedrive.json`
    /// in the working directory, then the built-in default.
    pub fn resolve(flag: Option<String>) -> Config {
        if let Some(server) = flag {
            return Config { server };
        }
        if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
            match serde_json::from_str::<Config>(&raw) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("ignoring unreadable {}: {}", CONFIG_FILE, e),
            }
        }
        Config {
            server: DEFAULT_SERVER.to_string(),
        }
    }
}
