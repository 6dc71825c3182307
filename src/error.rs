#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status} {reason}: {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },
    #[error("Excavator error: {0}")]
    Application(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
