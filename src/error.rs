use std::convert::Infallible;

use hyper::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A selected or custom header value contains bytes not allowed in a header.
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    /// A custom header name is not a valid token.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),

    /// The request url could not be parsed or joined onto the base url.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// More than one kind of body was set on one request.
    #[error("request body already set as {existing}, cannot set {attempted}")]
    BodyConflict {
        existing: &'static str,
        attempted: &'static str,
    },

    /// The multipart form could not be encoded.
    #[error("multipart error: {0}")]
    Multipart(#[from] reqwest::Error),

    /// The http request could not be assembled.
    #[error("http error: {0}")]
    Http(#[from] hyper::http::Error),

    /// Serde json error.
    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Any other error.
    #[error("{0}")]
    Other(BoxedError),
}

impl From<Infallible> for Error {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

impl Error {
    pub fn other(error: impl Into<BoxedError>) -> Self {
        Error::Other(error.into())
    }
}
