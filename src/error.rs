use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date {input:?}, expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")]
    Parse { input: String },

    #[error("energy balance request failed with HTTP {status}")]
    Http { status: u16 },

    #[error("response was not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
