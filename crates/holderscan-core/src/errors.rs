/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the handler
/// layer can render failures consistently (user-facing reply vs fatal).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream query failure (transport, API error, bad execution state,
    /// malformed result). Display is the bare description so it can be
    /// embedded in the user-visible error reply.
    #[error("{0}")]
    Query(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
