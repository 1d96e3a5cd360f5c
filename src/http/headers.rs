use std::fmt;

use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    http::HeaderValue,
    HeaderMap,
};

use crate::error::Error;

pub const ACCEPT_NAME: &str = "Accept";
pub const CONTENT_TYPE_NAME: &str = "Content-Type";

/// Headers chosen for one request. Absent means unset, never empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedHeaders {
    pub(crate) accept: Option<String>,
    pub(crate) content_type: Option<String>,
}

impl SelectedHeaders {
    pub fn new(accept: Option<String>, content_type: Option<String>) -> SelectedHeaders {
        SelectedHeaders {
            accept: accept.filter(|v| !v.is_empty()),
            content_type: content_type.filter(|v| !v.is_empty()),
        }
    }
    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
    pub fn get(&self, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case(ACCEPT_NAME) {
            self.accept()
        } else if name.eq_ignore_ascii_case(CONTENT_TYPE_NAME) {
            self.content_type()
        } else {
            None
        }
    }
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
    pub fn len(&self) -> usize {
        self.iter().count()
    }
    pub fn is_empty(&self) -> bool {
        self.accept.is_none() && self.content_type.is_none()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (ACCEPT_NAME, self.accept()),
            (CONTENT_TYPE_NAME, self.content_type()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
    pub fn to_header_map(&self) -> crate::Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(2);
        self.merge_into(&mut headers)?;
        Ok(headers)
    }
    // existing values in `headers` win
    pub fn merge_into(&self, headers: &mut HeaderMap) -> crate::Result<()> {
        if let Some(accept) = self.accept() {
            if !headers.contains_key(ACCEPT) {
                headers.insert(ACCEPT, HeaderValue::from_str(accept)?);
            }
        }
        if let Some(content_type) = self.content_type() {
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type)?);
            }
        }
        Ok(())
    }
}

impl TryFrom<SelectedHeaders> for HeaderMap {
    type Error = Error;

    fn try_from(selected: SelectedHeaders) -> Result<Self, Self::Error> {
        selected.to_header_map()
    }
}

impl fmt::Display for SelectedHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}
