use hyper::{header::IntoHeaderName, http::HeaderValue, HeaderMap, Method};
use url::Url;

use crate::{
    error::Error,
    http::{operation::Operation, request::RequestBuilder},
};

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Url,
    headers: HeaderMap,
}

impl ApiClient {
    pub fn new(base_url: impl AsRef<str>) -> crate::Result<ApiClient> {
        Ok(ApiClient {
            base_url: Url::parse(base_url.as_ref())?,
            headers: HeaderMap::new(),
        })
    }
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
    pub fn with_header<N, V>(mut self, name: N, value: V) -> crate::Result<Self>
    where
        N: IntoHeaderName,
        V: TryInto<HeaderValue>,
        V::Error: Into<Error>,
    {
        let value: HeaderValue = value.try_into().map_err(Into::<Error>::into)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        RequestBuilder::new(self.url(path), method).with_headers(&self.headers)
    }
    pub fn call(&self, method: Method, path: &str, operation: &Operation) -> RequestBuilder {
        self.request(method, path).operation(operation)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }
    pub fn head(&self, path: &str) -> RequestBuilder {
        self.request(Method::HEAD, path)
    }
    pub fn options(&self, path: &str) -> RequestBuilder {
        self.request(Method::OPTIONS, path)
    }
    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }
}
