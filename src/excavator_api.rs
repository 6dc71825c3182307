use crate::config::RigConfig;
use crate::error::ApiError;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, warn};

/// One JSON-RPC-shaped command, passed as the `command` query parameter
#[derive(Debug, Clone, Serialize)]
pub struct ApiCommand {
    pub id: u32,
    pub method: String,
    pub params: Vec<String>,
}

impl ApiCommand {
    fn new(method: &str, params: Vec<String>) -> Self {
        Self {
            id: 1,
            method: method.to_string(),
            params,
        }
    }

    pub fn info() -> Self {
        Self::new("info", Vec::new())
    }

    pub fn devices_get() -> Self {
        Self::new("devices.get", Vec::new())
    }

    pub fn algorithm_list() -> Self {
        Self::new("algorithm.list", Vec::new())
    }

    pub fn worker_list() -> Self {
        Self::new("worker.list", Vec::new())
    }

    /// Bind `algorithm` to `target_id`.
    ///
    /// Depending on the daemon revision the identifier addresses either a
    /// device slot or an existing worker; the daemon stringifies both the
    /// same way on the wire.
    pub fn worker_add(algorithm: &str, target_id: u32) -> Self {
        Self::new(
            "worker.add",
            vec![algorithm.to_string(), target_id.to_string()],
        )
    }

    pub fn worker_free(worker_id: u32) -> Self {
        Self::new("worker.free", vec![worker_id.to_string()])
    }

    pub fn algorithm_add(algorithm: &str) -> Self {
        Self::new("algorithm.add", vec![algorithm.to_string()])
    }
}

/// HTTP transport for the Excavator daemon API.
///
/// One GET per call against `<host>:<port>/api?command=<json>`. Every
/// failure mode (connection, non-200, daemon `error` field, bad JSON) comes
/// back as an [`ApiError`]; nothing panics past this boundary.
pub struct ExcavatorApi {
    host_address: String,
    host_port: u16,
    auth_token: RwLock<Option<String>>,
    debug_logging: bool,
    http: Client,
}

impl ExcavatorApi {
    pub fn new(config: &RigConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            host_address: format_host_address(&config.host_address),
            host_port: config.host_port,
            auth_token: RwLock::new(config.auth_token.clone()),
            debug_logging: config.debug_logging,
            http,
        }
    }

    /// Swap the auth token at runtime. In-flight requests are unaffected.
    pub fn update_auth_token(&self, token: &str) {
        let token = if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        };
        *self.auth_token.write().expect("auth token lock poisoned") = token;
    }

    /// Send one command and return the decoded response body.
    pub async fn request(&self, command: &ApiCommand) -> Result<Value, ApiError> {
        let url = self.api_url(command)?;
        if self.debug_logging {
            debug!("GET {url}");
        }
        let result = self.send(&url).await;
        if let Err(e) = &result {
            if self.debug_logging {
                warn!("request to {url} failed: {e}");
            }
        }
        result
    }

    async fn send(&self, url: &str) -> Result<Value, ApiError> {
        let mut request = self.http.get(url);
        let token = self.auth_token.read().expect("auth token lock poisoned").clone();
        if let Some(token) = token {
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.text().await?;
        let json: Value = serde_json::from_str(&body)?;
        match json.get("error") {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) if s.is_empty() => {}
            Some(error) => {
                let message = error
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                return Err(ApiError::Application(message));
            }
        }
        Ok(json)
    }

    fn api_url(&self, command: &ApiCommand) -> Result<String, ApiError> {
        let json = serde_json::to_string(command)?;
        Ok(format!(
            "{}:{}/api?command={}",
            self.host_address,
            self.host_port,
            urlencoding::encode(&json)
        ))
    }
}

/// Prefix `http://` when the host carries no scheme. Never double-prefixes.
pub fn format_host_address(host_address: &str) -> String {
    if host_address.starts_with("http://") || host_address.starts_with("https://") {
        host_address.to_string()
    } else {
        format!("http://{host_address}")
    }
}
