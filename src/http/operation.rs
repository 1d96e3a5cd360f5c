use mime::Mime;
use serde::{Deserialize, Serialize};

/// Media types an API operation declares.
///
/// Deserializes from the shape a client generator emits for each call:
///
/// ```
/// use header_selector::http::Operation;
///
/// let op = Operation::from_json(r#"{
///     "produces": ["application/json", "application/xml"],
///     "consumes": ["multipart/form-data"]
/// }"#).unwrap();
/// assert!(op.is_multipart());
/// assert_eq!(op.content_type(), Some("multipart/form-data"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operation {
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
    /// Overrides multipart detection from `consumes`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multipart: Option<bool>,
}

impl Operation {
    pub fn new() -> Operation {
        Operation::default()
    }
    pub fn from_json(json: &str) -> crate::Result<Operation> {
        Ok(serde_json::from_str(json)?)
    }
    pub fn produces<I, S>(mut self, media: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.produces.extend(media.into_iter().map(Into::into));
        self
    }
    pub fn consumes<I, S>(mut self, media: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumes.extend(media.into_iter().map(Into::into));
        self
    }
    pub fn multipart(mut self, multipart: bool) -> Self {
        self.multipart = Some(multipart);
        self
    }
    pub fn content_type(&self) -> Option<&str> {
        self.consumes
            .iter()
            .map(String::as_str)
            .find(|m| !m.is_empty())
    }
    pub fn is_multipart(&self) -> bool {
        if let Some(multipart) = self.multipart {
            return multipart;
        }
        self.content_type()
            .and_then(|ct| ct.parse::<Mime>().ok())
            .map(|m| m.type_() == mime::MULTIPART)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let op = Operation::from_json("{}").unwrap();
        assert!(op.produces.is_empty());
        assert_eq!(op.content_type(), None);
        assert!(!op.is_multipart());
    }

    #[test]
    fn test_content_type_skips_empty() {
        let op = Operation::new().consumes(["", "application/xml", "application/json"]);
        assert_eq!(op.content_type(), Some("application/xml"));
    }

    #[test]
    fn test_multipart_detection() {
        let op = Operation::new().consumes(["multipart/form-data"]);
        assert!(op.is_multipart());
        let op = Operation::new().consumes(["application/x-www-form-urlencoded"]);
        assert!(!op.is_multipart());
        let op = Operation::new().consumes(["multipart/form-data"]).multipart(false);
        assert!(!op.is_multipart());
        let op = Operation::new().consumes(["not a mime"]);
        assert!(!op.is_multipart());
    }

    #[test]
    fn test_invalid_json() {
        let err = Operation::from_json(r#"{"produces": "application/json"}"#).unwrap_err();
        assert!(matches!(err, crate::error::Error::SerdeJson(_)));
    }

    #[test]
    fn test_serialize_skips_unset_flag() {
        let op = Operation::new().produces(["application/json"]);
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r#"{"produces":["application/json"],"consumes":[]}"#);
    }
}
