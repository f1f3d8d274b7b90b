use thiserror::Error;
use wangmap_core::WangId;

/// Errors raised while resolving tiles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No tile in the Wang set carries the required signature.
    /// Recoverable: callers draw the default tile instead.
    #[error("no tile matches signature [{signature}]")]
    NoMatchingTile { signature: WangId },
    #[error("tileset has no wangset named '{0}'")]
    UnknownWangSet(String),
}

/// Errors raised while loading a resolver configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
