use thiserror::Error;

/// Why a domain ended up without a usable certificate. Tagged by the
/// fetcher at the point of failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// DNS resolution, TCP connect, TLS handshake or timeout failure.
    #[error("{0}")]
    Connection(String),

    /// The handshake succeeded but the server offered no certificate.
    #[error("no certificate")]
    NoCertificate,

    /// The leaf certificate was presented but its validity window could not be read.
    #[error("unreadable certificate: {0}")]
    Certificate(String),
}

impl FetchError {
    /// Short, human-facing classification of the failure.
    ///
    /// Transport errors are usually chains like `lookup x: no such host`;
    /// only the innermost cause is kept for them.
    pub fn status(&self) -> String {
        match self {
            FetchError::Connection(message) => message
                .rsplit(':')
                .next()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            other => other.to_string(),
        }
    }
}
