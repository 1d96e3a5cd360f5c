//! `Accept` and `Content-Type` selection for generated api clients.
//!
//! [`HeaderSelector`](http::HeaderSelector) turns the media types an
//! operation declares into the headers a call should send, ranking json
//! types first with descending `q` weights. [`ApiClient`](client::ApiClient)
//! and [`RequestBuilder`](http::RequestBuilder) merge those headers into
//! outgoing `hyper` requests.

pub mod client;
pub mod error;
pub mod http;

use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::client::ApiClient;
    pub use crate::error::Error;
    pub use crate::http::{
        is_json_mime, HeaderSelector, Mime, Operation, RequestBuilder, SelectedHeaders,
    };
}
