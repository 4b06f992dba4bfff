use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use scriptlink_common::network::endpoint::loopback_url;

use crate::error::ExecError;
use crate::link::{Reply, ServerLink};

const TEXT_PLAIN: &str = "text/plain";

/// [`ServerLink`] backed by a reqwest [`Client`].
///
/// Environment proxies are ignored and redirects are never followed, so every
/// request stays on the loopback port it was addressed to. A 3xx comes back as
/// an ordinary [`Reply`].
#[derive(Debug, Clone)]
pub struct HttpLink {
    client: Client,
}

impl HttpLink {
    /// `timeout` of `None` keeps reqwest's default, which never times out a request.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ExecError> {
        let mut builder = Client::builder().no_proxy().redirect(Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client: Client = builder
            .build()
            .map_err(|e| ExecError::HttpClient(Box::new(e)))?;
        Ok(Self { client })
    }

    async fn read_reply(url: &str, response: Response) -> Result<Reply, ExecError> {
        let status: u16 = response.status().as_u16();
        let body: String = response
            .text()
            .await
            .map_err(|e| ExecError::transport(url, e))?;
        Ok(Reply { status, body })
    }
}

#[async_trait]
impl ServerLink for HttpLink {
    async fn get(&self, port: u16, path: &str) -> Result<Reply, ExecError> {
        let url: String = loopback_url(port, path);
        let response: Response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExecError::transport(url.as_str(), e))?;

        if !response.status().is_success() {
            return Ok(Reply::new(response.status().as_u16(), ""));
        }
        Self::read_reply(&url, response).await
    }

    async fn post_text(&self, port: u16, path: &str, payload: &str) -> Result<Reply, ExecError> {
        let url: String = loopback_url(port, path);
        let response: Response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, TEXT_PLAIN)
            .body(payload.to_owned())
            .send()
            .await
            .map_err(|e| ExecError::transport(url.as_str(), e))?;
        Self::read_reply(&url, response).await
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
