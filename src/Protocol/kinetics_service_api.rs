//! # Kinetics Service API Module
//!
//! ## Aim
//! This module is the HTTP layer of the client. It talks to the remote
//! chemical-kinetics calculator, which owns all the actual numerics: mechanism
//! parsing, rate-law evaluation, temperature sweeps and plot rendering. The
//! client side only transports documents, snapshots and decoded replies.
//!
//! ## Main Data Structures and Logic
//! - `HttpClient`: trait with dependency injection for the HTTP transport (enables testing)
//! - `KineticsServiceClient<C>`: endpoint construction and request/reply classification
//! - `ServiceError`: the full failure taxonomy, validation and transport alike
//! - `SessionWire`, `RatesWire`, `PlotsWire`: serde images of the three reply shapes
//!
//! ## Protocol
//! Three endpoints, all JSON over POST:
//! - `/session` with `{data: <raw mechanism text>}` creates a session and
//!   returns its opaque id plus the derived species and equation lists
//! - `/rates/<sid>` with one key per species plus `_temp` returns progress and
//!   reaction rate arrays indexed like the session lists
//! - `/plots/<sid>/<tlow>/<thigh>` with the same body returns base64 PNG images
//!
//! Every reply may instead carry `{status: "failed", reason}`; any other status
//! string counts as success (deployed servers answer both `"success"` and `"ok"`).
//! Non-200 answers are a separate failure class carrying only the numeric code.
//!
//! ## Usage
//! ```rust, ignore
//! let service = KineticsServiceClient::with_base_url("http://127.0.0.1:5000")?;
//! let session = service.create_session(&raw_xml)?;
//! ```

use log::{error, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// HTTP client trait for dependency injection
pub trait HttpClient {
    fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, reqwest::Error>;
}

/// raw transport outcome: numeric status plus the untouched body text
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

// Implementation for the real reqwest client
impl HttpClient for Client {
    fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, reqwest::Error> {
        let response = self.post(url).json(body).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpReply { status, body })
    }
}

/// error types for the session protocol; the first group is raised by
/// client-side validation and never reaches the network, the second group only
/// after a round trip
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no mechanism uploaded, create a session first")]
    NoActiveSession,
    #[error("invalid concentration for species '{0}'")]
    InvalidInput(String),
    #[error("temperature must be a positive number")]
    InvalidTemperature,
    #[error("temperature range must satisfy 0 <= T_low < T_high")]
    InvalidRange,
    #[error("no plot kind selected")]
    InvalidMode,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Server returned HTTP {0}")]
    Transport(u16),
    #[error("Server rejected request: {0}")]
    Rejected(String),
    #[error("Malformed server reply: {0}")]
    BadReply(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// session-creation reply: the id names the uploaded mechanism on the server,
/// the species and equation lists are the decode keys for every later reply
/// in this session's lifetime
#[derive(Debug, Deserialize, Clone)]
pub struct SessionWire {
    pub id: String,
    pub species: Vec<String>,
    pub equations: Vec<String>,
}

/// rates reply; `ks` (rate constants per reaction) and the echoed species list
/// are sent by some server versions and absent from others
#[derive(Debug, Deserialize, Clone)]
pub struct RatesWire {
    pub progress_rates: Vec<f64>,
    pub reaction_rates: Vec<f64>,
    #[serde(default)]
    pub ks: Option<Vec<f64>>,
    #[serde(default)]
    pub species: Option<Vec<String>>,
}

/// plots reply: base64 PNG payloads keyed by rate family; servers may return
/// one or both
#[derive(Debug, Deserialize, Clone)]
pub struct PlotsWire {
    #[serde(default)]
    pub progress_rates: Option<String>,
    #[serde(default)]
    pub reaction_rates: Option<String>,
}

pub struct KineticsServiceClient<C: HttpClient> {
    base_url: Url,
    client: C,
}

impl KineticsServiceClient<Client> {
    /// client against the base URL from the persisted service configuration
    pub fn new() -> Result<Self, ServiceError> {
        let base_url = crate::service_config::with_service_config(|cfg| cfg.base_url().to_string());
        Self::with_client(&base_url, Client::new())
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_client(base_url, Client::new())
    }
}

impl<C: HttpClient> KineticsServiceClient<C> {
    pub fn with_client(base_url: &str, client: C) -> Result<Self, ServiceError> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn session_url(&self) -> Result<Url, ServiceError> {
        Ok(Url::parse(&format!("{}/session", self.base()))?)
    }

    pub fn rates_url(&self, session_id: &str) -> Result<Url, ServiceError> {
        Ok(Url::parse(&format!("{}/rates/{}", self.base(), session_id))?)
    }

    pub fn plots_url(&self, session_id: &str, t_low: f64, t_high: f64) -> Result<Url, ServiceError> {
        Ok(Url::parse(&format!(
            "{}/plots/{}/{}/{}",
            self.base(),
            session_id,
            t_low,
            t_high
        ))?)
    }

    /// one round trip: send the body, classify the outcome. A non-200 answer
    /// carries only its status code; a 200 answer is parsed and checked for
    /// the `status: "failed"` marker before being handed back for decoding.
    fn post(&self, url: &Url, body: &Value) -> Result<Value, ServiceError> {
        let reply = self.client.post_json(url.as_str(), body)?;
        if reply.status != 200 {
            error!("{} answered HTTP {}", url, reply.status);
            return Err(ServiceError::Transport(reply.status));
        }
        let value: Value = serde_json::from_str(&reply.body)
            .map_err(|e| ServiceError::BadReply(format!("reply is not JSON: {}", e)))?;
        if value.get("status").and_then(Value::as_str) == Some("failed") {
            let reason = value
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("no reason given")
                .to_string();
            return Err(ServiceError::Rejected(reason));
        }
        Ok(value)
    }

    /// Uploads the raw mechanism text. The document format belongs to the
    /// server-side parser, this layer transports it untouched.
    pub fn create_session(&self, raw_document: &str) -> Result<SessionWire, ServiceError> {
        let url = self.session_url()?;
        info!("creating session at {}", url);
        let body = serde_json::json!({ "data": raw_document });
        let value = self.post(&url, &body)?;
        let wire: SessionWire = serde_json::from_value(value)
            .map_err(|e| ServiceError::BadReply(format!("session reply: {}", e)))?;
        info!(
            "session {} created: {} species, {} reactions",
            wire.id,
            wire.species.len(),
            wire.equations.len()
        );
        Ok(wire)
    }

    pub fn get_rates(&self, session_id: &str, body: &Value) -> Result<RatesWire, ServiceError> {
        let url = self.rates_url(session_id)?;
        let value = self.post(&url, body)?;
        serde_json::from_value(value)
            .map_err(|e| ServiceError::BadReply(format!("rates reply: {}", e)))
    }

    pub fn get_plots(
        &self,
        session_id: &str,
        t_low: f64,
        t_high: f64,
        body: &Value,
    ) -> Result<PlotsWire, ServiceError> {
        let url = self.plots_url(session_id, t_low, t_high)?;
        let value = self.post(&url, body)?;
        serde_json::from_value(value)
            .map_err(|e| ServiceError::BadReply(format!("plots reply: {}", e)))
    }
}
