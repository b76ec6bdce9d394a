use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No such server or environment found ({server}, {env})")]
    NotFound { server: String, env: String },

    #[error("failed to connect to {server}")]
    Connect {
        server: String,
        #[source]
        source: russh::Error,
    },

    #[error("authentication failed for {user}@{server}")]
    Auth { user: String, server: String },

    #[error("failed to open session")]
    Session(#[source] russh::Error),

    #[error("failed to run command")]
    Run(#[source] russh::Error),

    #[error("server refused to run the command")]
    Rejected,

    #[error("command exited with status {status}")]
    ExitStatus { status: u32 },

    #[error("command killed by signal {signal}")]
    ExitSignal { signal: String },

    #[error("command finished without reporting an exit status")]
    ExitMissing,
}
