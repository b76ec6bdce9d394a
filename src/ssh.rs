use std::borrow::Cow;
use std::net::Ipv6Addr;
use std::sync::Arc;

use async_trait::async_trait;
use russh::client::{self, Handle, Msg};
use russh::{Channel, ChannelMsg, Disconnect};
use russh_keys::key;

use crate::config::ServerEnvironment;
use crate::error::{Error, Result};

const DEFAULT_PORT: u16 = 22;

pub struct Client {
    server: String,
}

#[async_trait]
impl client::Handler for Client {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &key::PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        // host keys are not verified
        log::debug!(
            "{} presented host key {} {}",
            self.server,
            server_public_key.name(),
            server_public_key.fingerprint()
        );
        Ok(true)
    }
}

/// The shell line sent to the remote side. Both parts are passed through verbatim.
pub fn remote_command(env: &ServerEnvironment) -> String {
    format!("cd {} && {}", env.dir, env.command)
}

/// Appends the standard SSH port when `server` does not carry one.
///
/// IPv6 hosts take a port in brackets (`[::1]:2222`); a bare `::1` gets
/// bracketed and `:22` appended.
pub fn server_address(server: &str) -> Cow<'_, str> {
    if server.parse::<Ipv6Addr>().is_ok() {
        return Cow::Owned(format!("[{server}]:{DEFAULT_PORT}"));
    }
    if let Some(host) = server.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return Cow::Owned(format!("[{host}]:{DEFAULT_PORT}"));
    }
    if server.contains(':') {
        Cow::Borrowed(server)
    } else {
        Cow::Owned(format!("{server}:{DEFAULT_PORT}"))
    }
}

/// Runs the environment's command on its server and returns what it printed on stdout.
pub async fn execute(env: &ServerEnvironment) -> Result<String> {
    let address = server_address(&env.server);
    log::info!("Connecting to {} as {}", address, env.user);

    let config = Arc::new(client::Config::default());
    let handler = Client {
        server: address.to_string(),
    };
    let mut handle = client::connect(config, address.as_ref(), handler)
        .await
        .map_err(|source| Error::Connect {
            server: address.to_string(),
            source,
        })?;

    let result = run_on(&mut handle, env, &address).await;

    if let Err(e) = handle
        .disconnect(Disconnect::ByApplication, "", "English")
        .await
    {
        log::debug!("disconnect from {} failed: {}", address, e);
    }

    result
}

async fn run_on(
    handle: &mut Handle<Client>,
    env: &ServerEnvironment,
    address: &str,
) -> Result<String> {
    let authenticated = handle
        .authenticate_password(env.user.as_str(), env.pass.as_str())
        .await
        .map_err(|source| Error::Connect {
            server: address.to_string(),
            source,
        })?;
    if !authenticated {
        return Err(Error::Auth {
            user: env.user.clone(),
            server: address.to_string(),
        });
    }
    log::debug!("Authenticated as {}", env.user);

    let mut channel = handle.channel_open_session().await.map_err(Error::Session)?;

    let result = run_command(&mut channel, &remote_command(env)).await;

    if let Err(e) = channel.close().await {
        log::debug!("closing channel failed: {}", e);
    }

    result
}

async fn run_command(channel: &mut Channel<Msg>, command: &str) -> Result<String> {
    log::info!("Running `{}`", command);
    channel.exec(true, command).await.map_err(Error::Run)?;

    let mut stdout: Vec<u8> = vec![];
    let mut exit_status = None;
    let mut exit_signal = None;

    while let Some(msg) = channel.wait().await {
        match msg {
            ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
            ChannelMsg::ExtendedData { ref data, ext } => {
                log::debug!("discarding {} bytes on stream {}", data.len(), ext);
            }
            ChannelMsg::ExitStatus { exit_status: code } => exit_status = Some(code),
            ChannelMsg::ExitSignal { signal_name, .. } => {
                exit_signal = Some(format!("{signal_name:?}"))
            }
            ChannelMsg::Failure => return Err(Error::Rejected),
            _ => {}
        }
    }

    match (exit_status, exit_signal) {
        (Some(0), _) => Ok(String::from_utf8_lossy(&stdout).into_owned()),
        (Some(status), _) => Err(Error::ExitStatus { status }),
        (None, Some(signal)) => Err(Error::ExitSignal { signal }),
        (None, None) => Err(Error::ExitMissing),
    }
}
