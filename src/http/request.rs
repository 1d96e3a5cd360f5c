use std::fmt;

use bytes::Bytes;
use hyper::{
    body::HttpBody,
    header::{AsHeaderName, IntoHeaderName, CONTENT_TYPE},
    http::HeaderValue,
    Body, HeaderMap, Method, Request,
};
use once_cell::sync::Lazy;
use reqwest::multipart::Form;
use serde::Serialize;
use url::Url;

use super::{is_json_mime, operation::Operation, selector::HeaderSelector};
use crate::error::Error;

static JSON_CONTENT_TYPE: Lazy<HeaderValue> =
    Lazy::new(|| HeaderValue::from_static("application/json"));
static FORM_CONTENT_TYPE: Lazy<HeaderValue> =
    Lazy::new(|| HeaderValue::from_static("application/x-www-form-urlencoded"));

enum Payload {
    Empty,
    Bytes(Bytes),
    Json(Vec<u8>),
    Fields(Vec<(String, String)>),
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Payload::Empty => "empty",
            Payload::Bytes(_) => "bytes",
            Payload::Json(_) => "json",
            Payload::Fields(_) => "form fields",
        }
    }
}

/// Assembles one outgoing api request.
///
/// Headers added by the caller take precedence over the ones the
/// [`HeaderSelector`] picks for the [`Operation`]. Errors from any step are
/// held until [`RequestBuilder::build`].
pub struct RequestBuilder {
    url: Result<Url, url::ParseError>,
    method: Method,
    headers: HeaderMap,
    queries: Vec<(String, String)>,
    operation: Option<Operation>,
    selector: HeaderSelector,
    payload: Payload,
    error: Option<Error>,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("operation", &self.operation)
            .field("payload", &self.payload.kind())
            .finish()
    }
}

impl RequestBuilder {
    pub fn new(url: impl AsRef<str>, method: Method) -> RequestBuilder {
        RequestBuilder {
            url: Url::parse(url.as_ref()),
            method,
            headers: HeaderMap::new(),
            queries: Vec::new(),
            operation: None,
            selector: HeaderSelector,
            payload: Payload::Empty,
            error: None,
        }
    }
    pub fn method(&self) -> &Method {
        &self.method
    }
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
    pub fn header<K: AsHeaderName>(&self, key: K) -> Option<&str> {
        self.headers.get(key).and_then(|v| v.to_str().ok())
    }
    /// Seeds headers that later [`add_header`](Self::add_header) calls may replace.
    pub fn with_headers(mut self, headers: &HeaderMap) -> Self {
        for (name, value) in headers {
            if !self.headers.contains_key(name) {
                self.headers.insert(name.clone(), value.clone());
            }
        }
        self
    }
    pub fn add_header<N, V>(mut self, name: N, value: V, overwrite: bool) -> Self
    where
        N: IntoHeaderName,
        V: TryInto<HeaderValue>,
        V::Error: Into<Error>,
    {
        match value.try_into() {
            Ok(value) => {
                if overwrite {
                    self.headers.insert(name, value);
                } else {
                    self.headers.append(name, value);
                }
            }
            Err(e) => self.fail(e.into()),
        }
        self
    }
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.queries.push((key.into(), value.to_string()));
        self
    }
    pub fn operation(mut self, operation: &Operation) -> Self {
        self.operation = Some(operation.clone());
        self
    }
    /// Sets a raw body. Only one of `body`, `json` and `text` may be used.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.set_payload(Payload::Bytes(body.into()));
        self
    }
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.set_payload(Payload::Json(bytes)),
            Err(e) => self.fail(e.into()),
        }
        self
    }
    /// Adds a form field. Fields are sent as `multipart/form-data` when the
    /// operation is multipart and url encoded otherwise.
    pub fn text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        let field = (name.into(), value.to_string());
        match &mut self.payload {
            Payload::Fields(fields) => fields.push(field),
            _ => self.set_payload(Payload::Fields(vec![field])),
        }
        self
    }

    fn set_payload(&mut self, payload: Payload) {
        if matches!(self.payload, Payload::Empty) {
            self.payload = payload;
        } else {
            self.fail(Error::BodyConflict {
                existing: self.payload.kind(),
                attempted: payload.kind(),
            });
        }
    }

    fn fail(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn build(self) -> crate::Result<Request<Body>> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let mut url = self.url?;
        if !self.queries.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.queries);
        }

        let mut headers = self.headers;
        let caller_content_type = headers.contains_key(CONTENT_TYPE);
        let multipart = self
            .operation
            .as_ref()
            .map(Operation::is_multipart)
            .unwrap_or(false);
        if let Some(operation) = &self.operation {
            self.selector.select_for(operation).merge_into(&mut headers)?;
        }

        let body = match self.payload {
            Payload::Empty => Body::empty(),
            Payload::Bytes(bytes) => Body::from(bytes),
            Payload::Json(bytes) => {
                let labelled_json = headers
                    .get(CONTENT_TYPE)
                    .and_then(|ct| ct.to_str().ok())
                    .map(is_json_mime)
                    .unwrap_or(false);
                if !caller_content_type && !labelled_json {
                    headers.insert(CONTENT_TYPE, JSON_CONTENT_TYPE.clone());
                }
                Body::from(bytes)
            }
            Payload::Fields(fields) if multipart => {
                // the boundary has to match the encoded body, so it replaces
                // any multipart content type the caller set
                let (ctype, body) = multipart_body(&self.method, &url, fields)?;
                headers.insert(CONTENT_TYPE, ctype);
                body
            }
            Payload::Fields(fields) => {
                if !caller_content_type {
                    headers.insert(CONTENT_TYPE, FORM_CONTENT_TYPE.clone());
                }
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&fields)
                    .finish();
                Body::from(encoded)
            }
        };
        if multipart && !headers.contains_key(CONTENT_TYPE) {
            tracing::warn!(url = %url, "multipart request built without a content type");
        }

        let mut req = Request::builder()
            .method(self.method)
            .uri(url.as_str())
            .body(body)?;
        tracing::debug!(method = %req.method(), uri = %req.uri(), headers = ?headers, "request built");
        *req.headers_mut() = headers;
        Ok(req)
    }
}

fn multipart_body(
    method: &Method,
    url: &Url,
    fields: Vec<(String, String)>,
) -> crate::Result<(HeaderValue, Body)> {
    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));
    let ctype = HeaderValue::from_str(&format!(
        "multipart/form-data; boundary={}",
        form.boundary()
    ))?;
    let mut encoded = reqwest::Client::builder()
        .build()?
        .request(method.clone(), url.clone())
        .multipart(form)
        .build()?;
    let body = match encoded.body_mut().take() {
        Some(body) => Body::wrap_stream(futures_util::stream::unfold(body, |mut body| async move {
            body.data().await.map(|chunk| (chunk, body))
        })),
        None => Body::empty(),
    };
    Ok((ctype, body))
}
