use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use scriptlink_common::network::endpoint::loopback_url;

use crate::error::ExecError;
use crate::link::{Reply, ServerLink};

/// Scripted peer. Ports without a script refuse the connection.
#[derive(Default)]
pub(crate) struct FakeLink {
    handshakes: HashMap<u16, Reply>,
    execute_reply: Option<Reply>,
    pub(crate) probed: Mutex<Vec<u16>>,
    pub(crate) posted: Mutex<Vec<(u16, String, String)>>,
}

impl FakeLink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn answering(mut self, port: u16, status: u16, body: &str) -> Self {
        self.handshakes.insert(port, Reply::new(status, body));
        self
    }

    pub(crate) fn executing(mut self, status: u16, body: &str) -> Self {
        self.execute_reply = Some(Reply::new(status, body));
        self
    }

    pub(crate) fn probed(&self) -> Vec<u16> {
        self.probed.lock().unwrap().clone()
    }

    pub(crate) fn posted(&self) -> Vec<(u16, String, String)> {
        self.posted.lock().unwrap().clone()
    }
}

fn refused(port: u16, path: &str) -> ExecError {
    ExecError::transport(
        loopback_url(port, path),
        io::Error::new(io::ErrorKind::ConnectionRefused, format!("connection refused on {port}")),
    )
}

#[async_trait]
impl ServerLink for FakeLink {
    async fn get(&self, port: u16, path: &str) -> Result<Reply, ExecError> {
        self.probed.lock().unwrap().push(port);
        match self.handshakes.get(&port) {
            Some(reply) if reply.is_success() => Ok(reply.clone()),
            Some(reply) => Ok(Reply::new(reply.status, "")),
            None => Err(refused(port, path)),
        }
    }

    async fn post_text(&self, port: u16, path: &str, payload: &str) -> Result<Reply, ExecError> {
        self.posted
            .lock()
            .unwrap()
            .push((port, path.to_string(), payload.to_string()));
        self.execute_reply.clone().ok_or_else(|| refused(port, path))
    }
}
