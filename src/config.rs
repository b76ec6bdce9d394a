use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "servers.json";

/// Root of `servers.json`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerList {
    pub servers: Vec<ServerConfig>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    #[serde(rename = "envs")]
    pub environments: Vec<ServerEnvironment>,
}

/// A single deployment target: where to connect, as whom, and what to run there.
#[derive(Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerEnvironment {
    pub name: String,
    /// `host:port`
    pub server: String,
    pub user: String,
    pub pass: String,
    pub dir: String,
    pub command: String,
}

// keeps the password out of logs
impl fmt::Debug for ServerEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerEnvironment")
            .field("name", &self.name)
            .field("server", &self.server)
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .field("dir", &self.dir)
            .field("command", &self.command)
            .finish()
    }
}

impl ServerList {
    pub fn from_json(path: &Path, contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_json(path, &contents)?;
        log::debug!(
            "Loaded {} server(s) from {}",
            list.servers.len(),
            path.display()
        );
        Ok(list)
    }
}
