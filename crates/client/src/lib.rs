//! Blocking HTTP transport for the runo game server.

mod config;

pub use config::ClientConfig;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use runo_core::{BackendError, ColorChoice, Difficulty, GameBackend, GameSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ActionRequest {
    action_index: u32,
}

#[derive(Debug, Serialize)]
struct ColorChoiceRequest {
    color: &'static str,
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// A `GameBackend` speaking the server's HTTP API. Calls block; the session
/// treats each one as its single suspension point.
#[derive(Debug)]
pub struct HttpGameClient {
    http: Client,
    base_url: String,
}

impl HttpGameClient {
    pub fn new(config: ClientConfig) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| BackendError::NoResponse(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn read_snapshot(response: Response) -> Result<GameSnapshot, BackendError> {
        let status = response.status();
        if !status.is_success() {
            return Err(rejected(status, response));
        }
        response
            .json::<GameSnapshot>()
            .map_err(|err| BackendError::Malformed(err.to_string()))
    }
}

fn rejected(status: StatusCode, response: Response) -> BackendError {
    let detail = response
        .json::<ErrorBody>()
        .ok()
        .and_then(|body| body.detail);
    warn!(status = status.as_u16(), detail = ?detail, "server rejected request");
    BackendError::Rejected {
        status: status.as_u16(),
        detail,
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    warn!(error = %err, "no response from server");
    BackendError::NoResponse(err.to_string())
}

impl GameBackend for HttpGameClient {
    fn start_game(&mut self, difficulty: Difficulty) -> Result<GameSnapshot, BackendError> {
        debug!(level = difficulty.level(), "starting a new game");
        let response = self
            .http
            .post(self.url("/start_game"))
            .query(&[("difficulty", difficulty.level())])
            .send()
            .map_err(transport)?;
        Self::read_snapshot(response)
    }

    fn query_state(&mut self) -> Result<Option<GameSnapshot>, BackendError> {
        let response = self
            .http
            .get(self.url("/game_state"))
            .send()
            .map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("server reports no active game");
            return Ok(None);
        }
        Self::read_snapshot(response).map(Some)
    }

    fn play_action(&mut self, action_index: u32) -> Result<GameSnapshot, BackendError> {
        debug!(action_index, "submitting action");
        let response = self
            .http
            .post(self.url("/play_action"))
            .json(&ActionRequest { action_index })
            .send()
            .map_err(transport)?;
        Self::read_snapshot(response)
    }

    fn choose_color(&mut self, color: ColorChoice) -> Result<GameSnapshot, BackendError> {
        debug!(color = color.code(), "resolving wild color");
        let response = self
            .http
            .post(self.url("/choose_color"))
            .json(&ColorChoiceRequest {
                color: color.code(),
            })
            .send()
            .map_err(transport)?;
        Self::read_snapshot(response)
    }
}
