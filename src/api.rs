//! HTTP client for the server process manager.
//!
//! This module provides:
//!
//! - `ServerClient`: reqwest wrapper for the `/server/*` endpoints
//! - `ServerBackend`: the seam the poller and dispatcher talk through
//! - `poll_once`: one status (+ joinability) poll cycle
//!
//! The process manager itself lives elsewhere. Every way a call can go wrong
//! (connection refused, timeout, non-2xx, bad JSON) collapses into
//! [`ApiError`], and on the read path into [`PollOutcome::Failed`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::status::{JoinablePayload, PollOutcome, ProcessStatus, StatusPayload};

/// User agent for API requests
const USER_AGENT: &str = concat!("GameHub/", env!("CARGO_PKG_VERSION"));

/// Errors talking to the process manager
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server manager returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Command sent to the process manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerAction {
    Start,
    Stop,
}

impl ServerAction {
    /// Path segment of the action endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerAction::Start => "start",
            ServerAction::Stop => "stop",
        }
    }
}

impl FromStr for ServerAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" => Ok(ServerAction::Start),
            "stop" => Ok(ServerAction::Stop),
            other => anyhow::bail!("Unknown action: {} (expected start or stop)", other),
        }
    }
}

impl fmt::Display for ServerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /server/{action}`
#[derive(Debug, Serialize)]
struct ActionBody<'a> {
    server: &'a str,
}

/// Operations the dashboard needs from the process manager.
///
/// Implemented by [`ServerClient`] over HTTP; tests substitute a scripted
/// backend.
pub trait ServerBackend: Clone + Send + Sync + 'static {
    /// Read the process status for a game
    fn status(&self, game_id: &str)
    -> impl Future<Output = Result<StatusPayload, ApiError>> + Send;

    /// Read whether a running game has finished loading its world
    fn joinable(
        &self,
        game_id: &str,
    ) -> impl Future<Output = Result<JoinablePayload, ApiError>> + Send;

    /// Ask the manager to start or stop a game
    fn dispatch(
        &self,
        action: ServerAction,
        game_id: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Process manager API client
#[derive(Clone)]
pub struct ServerClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServerClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host:3000/api`)
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// API root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint below the API root
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Turn a non-2xx response into an error, passing successes through
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        game_id: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(&[("server", game_id)])
            .send()
            .await?;

        let text = Self::check(response).await?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl ServerBackend for ServerClient {
    async fn status(&self, game_id: &str) -> Result<StatusPayload, ApiError> {
        self.get_json("server/status", game_id).await
    }

    async fn joinable(&self, game_id: &str) -> Result<JoinablePayload, ApiError> {
        self.get_json("server/joinable", game_id).await
    }

    async fn dispatch(&self, action: ServerAction, game_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("server/{}", action.as_str()));
        tracing::info!("POST {} ({})", url, game_id);

        let response = self
            .client
            .post(&url)
            .json(&ActionBody { server: game_id })
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}

/// Run one poll cycle against `backend`.
///
/// When joinability is tracked both reads run concurrently, and a failure of
/// either one fails the whole cycle.
pub async fn poll_once<B: ServerBackend>(
    backend: &B,
    game_id: &str,
    track_joinability: bool,
) -> PollOutcome {
    let (status, joinable) = if track_joinability {
        let (status, joinable) =
            futures::join!(backend.status(game_id), backend.joinable(game_id));
        (status, joinable.map(|j| j.is_joinable()))
    } else {
        (backend.status(game_id).await, Ok(false))
    };

    match (status, joinable) {
        (Ok(payload), Ok(joinable)) => {
            let status: ProcessStatus = payload.status_for(game_id);
            tracing::debug!("Poll {}: status={} joinable={}", game_id, status, joinable);
            PollOutcome::Reported { status, joinable }
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Failed to fetch status for {}: {}", game_id, e);
            PollOutcome::Failed
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{FakeBackend, Reply};
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// Answer every connection with the same canned response.
    /// Returns the API base URL and a channel of the raw requests received.
    async fn canned_server(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/api", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
                let _ = tx.send(request);
            }
        });

        (base_url, rx)
    }

    /// Read one request: headers plus a `Content-Length` body
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut request = String::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            request.push_str(&String::from_utf8_lossy(&buf[..n]));
            if let Some(end) = request.find("\r\n\r\n") {
                let length = request[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + length {
                    break;
                }
            }
        }
        request
    }

    fn client(base_url: &str) -> ServerClient {
        ServerClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client = ServerClient::new("http://10.0.0.2:3000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.2:3000/api");
        assert_eq!(
            client.endpoint("server/status"),
            "http://10.0.0.2:3000/api/server/status"
        );
        assert_eq!(
            client.endpoint("/server/start"),
            "http://10.0.0.2:3000/api/server/start"
        );
    }

    #[test]
    fn test_action_parse_and_display() {
        assert_eq!("start".parse::<ServerAction>().unwrap(), ServerAction::Start);
        assert_eq!("STOP".parse::<ServerAction>().unwrap(), ServerAction::Stop);
        assert!("restart".parse::<ServerAction>().is_err());
        assert_eq!(ServerAction::Stop.to_string(), "stop");
    }

    #[test]
    fn test_action_body_shape() {
        let body = serde_json::to_string(&ActionBody { server: "minecraft" }).unwrap();
        assert_eq!(body, r#"{"server":"minecraft"}"#);
    }

    #[tokio::test]
    async fn test_poll_once_reports_status_and_joinable() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("STARTED"));
        backend.set_joinable(Some(true));

        let outcome = poll_once(&backend, "minecraft", true).await;
        assert_eq!(
            outcome,
            PollOutcome::Reported {
                status: ProcessStatus::Started,
                joinable: true
            }
        );
        assert_eq!(backend.status_calls(), vec!["minecraft".to_string()]);
    }

    #[tokio::test]
    async fn test_poll_once_defaults_missing_fields() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Missing);
        backend.set_joinable(None);

        let outcome = poll_once(&backend, "rust", true).await;
        assert_eq!(
            outcome,
            PollOutcome::Reported {
                status: ProcessStatus::Offline,
                joinable: false
            }
        );
    }

    #[tokio::test]
    async fn test_poll_once_without_tracking_ignores_joinable() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("ONLINE"));
        backend.fail_joinable(true);

        let outcome = poll_once(&backend, "satisfactory", false).await;
        assert_eq!(
            outcome,
            PollOutcome::Reported {
                status: ProcessStatus::Online,
                joinable: false
            }
        );
    }

    #[tokio::test]
    async fn test_poll_once_any_failure_fails_cycle() {
        let backend = FakeBackend::new();
        backend.push_status(Reply::Fail);
        assert_eq!(poll_once(&backend, "conan", true).await, PollOutcome::Failed);

        let backend = FakeBackend::new();
        backend.push_status(Reply::Status("ONLINE"));
        backend.fail_joinable(true);
        assert_eq!(poll_once(&backend, "conan", true).await, PollOutcome::Failed);
    }

    #[tokio::test]
    async fn test_client_reads_status_for_game() {
        let (base_url, mut requests) = canned_server("200 OK", r#"{"status":"STARTED"}"#).await;
        let client = client(&base_url);

        let outcome = poll_once(&client, "minecraft", false).await;
        assert_eq!(
            outcome,
            PollOutcome::Reported {
                status: ProcessStatus::Started,
                joinable: false
            }
        );

        let request = requests.recv().await.unwrap();
        assert!(
            request.starts_with("GET /api/server/status?server=minecraft HTTP/1.1"),
            "{}",
            request
        );
    }

    #[tokio::test]
    async fn test_client_reads_joinable_for_game() {
        let (base_url, mut requests) = canned_server("200 OK", r#"{"joinable":true}"#).await;
        let client = client(&base_url);

        assert!(client.joinable("rust").await.unwrap().is_joinable());
        let request = requests.recv().await.unwrap();
        assert!(request.starts_with("GET /api/server/joinable?server=rust "), "{}", request);
    }

    #[tokio::test]
    async fn test_client_non_success_fails_poll() {
        let (base_url, _requests) =
            canned_server("500 Internal Server Error", r#"{"error":"manager down"}"#).await;
        let client = client(&base_url);

        match client.status("rust").await {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert!(body.contains("manager down"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
        assert_eq!(poll_once(&client, "rust", false).await, PollOutcome::Failed);
    }

    #[tokio::test]
    async fn test_client_malformed_body_fails_poll() {
        let (base_url, _requests) = canned_server("200 OK", "not").await;
        let client = client(&base_url);

        assert!(matches!(client.status("conan").await, Err(ApiError::Decode(_))));
        assert_eq!(poll_once(&client, "conan", true).await, PollOutcome::Failed);
    }

    #[tokio::test]
    async fn test_client_dispatch_posts_server_body() {
        let (base_url, mut requests) = canned_server("200 OK", "{}").await;
        let client = client(&base_url);

        client.dispatch(ServerAction::Start, "conan").await.unwrap();

        let request = requests.recv().await.unwrap();
        assert!(request.starts_with("POST /api/server/start HTTP/1.1"), "{}", request);
        assert!(request.contains(r#"{"server":"conan"}"#), "{}", request);
    }

    #[tokio::test]
    async fn test_client_dispatch_rejected() {
        let (base_url, _requests) = canned_server("409 Conflict", r#"{"error":"busy"}"#).await;
        let client = client(&base_url);

        let err = client.dispatch(ServerAction::Stop, "minecraft").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status, .. } if status == reqwest::StatusCode::CONFLICT));
    }
}
