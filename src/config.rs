use std::env;
use std::path::PathBuf;

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_DATA_FILE: &str = "data.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server_address: String,
    pub data_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            server_address: get("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.into()),
            data_file: get("DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.into()).into(),
        }
    }
}
