use thiserror::Error;

/// Failures surfaced by the board API and the output appender.
///
/// The pipeline never retries on these (page fetches excepted, see
/// `search.page_fetch_retries`); each one ends the unit of work it hit.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("decoding {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("encoding {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("response is missing `{0}`")]
    MissingEnvelope(&'static str),

    #[error("output file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
