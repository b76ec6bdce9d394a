use crate::config::{ServerEnvironment, ServerList};
use crate::error::{Error, Result};

/// Finds the environment `env_name` of server `server_name`.
///
/// Servers and their environments are scanned in file order and the first
/// exact match wins, so duplicated names resolve to the earliest entry.
pub fn resolve<'a>(
    list: &'a ServerList,
    server_name: &str,
    env_name: &str,
) -> Result<&'a ServerEnvironment> {
    list.servers
        .iter()
        .filter(|s| s.name == server_name)
        .flat_map(|s| s.environments.iter())
        .find(|e| e.name == env_name)
        .ok_or_else(|| Error::NotFound {
            server: server_name.to_string(),
            env: env_name.to_string(),
        })
}
