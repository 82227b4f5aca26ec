use std::{env, path::PathBuf};

pub const ADDRESS_VAR: &str = "MISSION_PLANNER_ADDRESS";
pub const STATIC_DIR_VAR: &str = "MISSION_PLANNER_STATIC_DIR";

const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_STATIC_DIR: &str = "./resources/www/";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub address: String,
    /// Directory the map frontend is served from.
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = lookup(ADDRESS_VAR)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_owned());
        let static_dir = lookup(STATIC_DIR_VAR)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned())
            .into();
        Self {
            address,
            static_dir,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
