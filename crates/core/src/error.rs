//! Unified error types for campus-chat.
//!
//! Everything here is recoverable: a failed fetch or a bad page degrades one
//! reply, never the process. The server layer converts these into apology
//! text or a structured `{"error": ...}` payload.

/// Unified error types for the content pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resource URL could not be built or parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The origin answered with a non-success status.
    #[error("http status {0}")]
    HttpStatus(u16),

    /// Network-level failure (DNS, timeout, connection reset).
    #[error("http error: {0}")]
    HttpError(String),

    /// Response body exceeded the configured size cap.
    #[error("response too large: {0} bytes")]
    TooLarge(usize),

    /// Headless browser launch, navigation, or page read failed.
    #[error("render failed: {0}")]
    RenderFailed(String),

    /// Every configured fetch strategy failed for the URL.
    #[error("all fetch strategies failed: {0}")]
    FetchFailed(String),

    /// The FAQ table could not be loaded at startup.
    #[error("faq table: {0}")]
    FaqTable(String),
}
