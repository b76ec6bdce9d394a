#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use deploy::ServerEnvironment;
use russh::server::{self, Auth, Msg, Session};
use russh::{Channel, ChannelId, CryptoVec, MethodSet, Sig};
use russh_keys::key::KeyPair;

pub const USER: &str = "deployer";
pub const PASSWORD: &str = "correct horse";

/// How the test server answers once the client is authenticated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    /// Run exec requests with `sh -c` on this machine.
    Run,
    RefuseChannel,
    RefuseExec,
    KillWithSignal,
}

/// Accepts one user/password and answers sessions according to `behavior`.
#[derive(Clone)]
pub struct TestServer {
    pub behavior: Behavior,
}

impl server::Server for TestServer {
    type Handler = Self;
    fn new_client(&mut self, _addr: Option<std::net::SocketAddr>) -> Self {
        self.clone()
    }
}

#[async_trait]
impl server::Handler for TestServer {
    type Error = anyhow::Error;

    async fn auth_password(&mut self, user: &str, password: &str) -> Result<Auth, Self::Error> {
        if user == USER && password == PASSWORD {
            return Ok(Auth::Accept);
        }
        Ok(Auth::Reject {
            proceed_with_methods: None,
        })
    }

    async fn channel_open_session(
        &mut self,
        _channel: Channel<Msg>,
        _session: &mut Session,
    ) -> Result<bool, Self::Error> {
        Ok(self.behavior != Behavior::RefuseChannel)
    }

    async fn exec_request(
        &mut self,
        channel_id: ChannelId,
        command_bytes: &[u8],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        match self.behavior {
            Behavior::RefuseExec => {
                session.channel_failure(channel_id);
                return Ok(());
            }
            Behavior::KillWithSignal => {
                session.channel_success(channel_id);
                session.exit_signal_request(
                    channel_id,
                    Sig::KILL,
                    false,
                    "killed",
                    "en-US",
                );
            }
            _ => {
                let command = String::from_utf8(command_bytes.to_vec())?;
                session.channel_success(channel_id);

                let output = tokio::process::Command::new("/bin/sh")
                    .arg("-c")
                    .arg(&command)
                    .output()
                    .await?;

                session.data(channel_id, CryptoVec::from_slice(&output.stdout));
                session.extended_data(channel_id, 1, CryptoVec::from_slice(&output.stderr));
                session.exit_status_request(channel_id, output.status.code().unwrap_or(255) as u32);
            }
        }
        session.eof(channel_id);
        session.close(channel_id);
        Ok(())
    }
}

/// Starts a test server on a free local port and returns its address.
pub async fn start_server(behavior: Behavior) -> String {
    let port = free_port();
    let address = format!("127.0.0.1:{port}");

    let config = server::Config {
        methods: MethodSet::PASSWORD,
        auth_rejection_time: Duration::from_millis(10),
        auth_rejection_time_initial: Some(Duration::from_secs(0)),
        keys: vec![KeyPair::generate_ed25519().unwrap()],
        ..Default::default()
    };
    let listen = address.clone();
    tokio::spawn(async move {
        let mut server = TestServer { behavior };
        server::Server::run_on_address(&mut server, Arc::new(config), listen)
            .await
            .unwrap();
    });

    for _ in 0..100 {
        if tokio::net::TcpStream::connect(&address).await.is_ok() {
            return address;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("test server did not start on {address}");
}

pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

pub fn environment(server: &str, password: &str, dir: &str, command: &str) -> ServerEnvironment {
    ServerEnvironment {
        name: "prod".to_string(),
        server: server.to_string(),
        user: USER.to_string(),
        pass: password.to_string(),
        dir: dir.to_string(),
        command: command.to_string(),
    }
}
