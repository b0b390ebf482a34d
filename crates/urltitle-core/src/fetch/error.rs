//! Fetch failures and curl error classification.

use thiserror::Error;

/// Why a fetch produced no usable reply.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connect or transfer timeout.
    #[error("timed out: {0}")]
    Timeout(String),
    /// DNS, refused or reset connection, empty reply.
    #[error("connection failed: {0}")]
    Connection(String),
    /// Final response of the redirect chain was not 2xx.
    #[error("HTTP {0}")]
    Status(u32),
    /// Anything else reported by the transport (bad URL, TLS, malformed response).
    #[error("transport error: {0}")]
    Transport(String),
}

/// Maps a curl error onto a [`FetchError`].
pub fn classify_curl_error(e: &curl::Error) -> FetchError {
    let msg = e.to_string();
    if e.is_operation_timedout() {
        return FetchError::Timeout(msg);
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FetchError::Connection(msg);
    }
    FetchError::Transport(msg)
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        classify_curl_error(&e)
    }
}
