use thiserror::Error;

/// Errors that can occur when parsing raw feed markup
#[derive(Error, Debug)]
pub enum FeedError {
    /// The input is not well-formed XML. Dialect detection is never attempted
    /// on input that fails here.
    #[error("invalid feed markup: {0}")]
    Malformed(#[from] quick_xml::Error),

    /// An element was still open when the document ended.
    #[error("invalid feed markup: unclosed <{0}> element")]
    UnclosedTag(String),

    /// The markup is well-formed but a field could not be extracted from it.
    #[error("failed to extract feed fields: {0}")]
    Unparseable(#[source] quick_xml::Error),
}

/// Transport-level failure reported by an [`HttpClient`](crate::http::HttpClient)
/// implementation
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// The request failed before any HTTP status was received. Blocked
    /// cross-origin requests surface exactly this way, so the fetcher maps
    /// this variant to [`FetchError::CrossOrigin`].
    #[error("fetch failed: {0}")]
    Opaque(String),
}

/// Errors that can occur when fetching and parsing a feed from a URL
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch feed from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(
        "unable to fetch {url} directly ({reason}); the feed host may not allow \
         cross-origin access, try a different feed URL"
    )]
    CrossOrigin { url: String, reason: String },

    #[error("HTTP error {status} for {url}")]
    Status { url: String, status: u16 },

    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// A host document mutation or lookup failed. The host backend is opaque to
/// this crate, so only its message survives.
#[derive(Error, Debug)]
#[error("host operation failed: {0}")]
pub struct HostError(pub String);

/// Top-level errors for feed insertion and reload operations
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("invalid URL format: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no active page to operate on")]
    NoActivePage,

    #[error("no feed block found for {url}")]
    FeedNotFound { url: String },

    #[error(transparent)]
    Host(#[from] HostError),
}
