/// Errors raised by a cache store.
///
/// The gate never propagates these to a request: a failing cache degrades
/// to a miss.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// The backing cache could not be reached.
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type CacheResult<T> = Result<T, CacheError>;
