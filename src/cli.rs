use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub const USAGE: &str = "Usage: deploy --server=serverName --env=envName";
pub const USAGE_EXAMPLE: &str = "Example: deploy --server=testserver --env=prod";

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), author, about, version, long_about = None)]
pub struct Command {
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    // Server to deploy
    #[arg(long)]
    pub server: Option<String>,
    // Environment to deploy
    #[arg(long)]
    pub env: Option<String>,
    // Path to servers.json, overrides the lookup next to the executable
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// The (server, environment) pair to deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub server: String,
    pub env: String,
}

impl Command {
    /// `None` unless both `--server` and `--env` are given and non-empty.
    pub fn target(&self) -> Option<Target> {
        match (self.server.as_deref(), self.env.as_deref()) {
            (Some(server), Some(env)) if !server.is_empty() && !env.is_empty() => Some(Target {
                server: server.to_string(),
                env: env.to_string(),
            }),
            _ => None,
        }
    }
}

pub fn print_usage() {
    println!("{USAGE}");
    println!("{USAGE_EXAMPLE}");
}
