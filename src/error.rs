use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfGateError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid metric input: {0}")]
    InvalidMetricInput(String),

    #[error("metrics input parse error: {0}")]
    MetricsParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfGateError>;
