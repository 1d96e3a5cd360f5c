pub mod headers;
pub mod operation;
pub mod request;
pub mod selector;
pub mod weight;

pub use mime::{self, Mime};

pub use self::headers::SelectedHeaders;
pub use self::operation::Operation;
pub use self::request::RequestBuilder;
pub use self::selector::HeaderSelector;

const JSON_SUFFIX: &str = "+json";

/// Priority tier of a media type when assembling an `Accept` header.
///
/// Tiers order as `Exact < Suffix < Other`, so sorting or partitioning by
/// rank puts `application/json` first and non-json types last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JsonRank {
    Exact,
    /// `application/<anything>+json`, e.g. `application/hal+json`.
    Suffix,
    Other,
}

impl JsonRank {
    pub fn of(media: &str) -> JsonRank {
        let base = essence(media).to_ascii_lowercase();
        if base.is_empty() {
            return JsonRank::Other;
        }
        if base == mime::APPLICATION_JSON.essence_str() {
            return JsonRank::Exact;
        }
        match base.strip_prefix("application/") {
            Some(subtype) if subtype.len() > JSON_SUFFIX.len() && subtype.ends_with(JSON_SUFFIX) => {
                JsonRank::Suffix
            }
            _ => JsonRank::Other,
        }
    }
    pub fn is_json(self) -> bool {
        !matches!(self, JsonRank::Other)
    }
}

/// Whether `media` names a json media type.
///
/// Matches `application/json` and `application/*+json` case-insensitively,
/// ignoring any `;` parameters. Empty input is never json.
pub fn is_json_mime(media: &str) -> bool {
    JsonRank::of(media).is_json()
}

/// Whether `media` already carries a `q` parameter.
pub fn has_quality(media: &str) -> bool {
    media.split(';').skip(1).any(|param| {
        param
            .split_once('=')
            .map(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
            .unwrap_or(false)
    })
}

fn essence(media: &str) -> &str {
    media.split(';').next().unwrap_or_default().trim()
}

/// A value that may hold a media type string.
///
/// `None` and empty strings hold nothing and are skipped by the selector.
pub trait MediaCandidate {
    fn media(&self) -> Option<&str>;
}

impl MediaCandidate for str {
    fn media(&self) -> Option<&str> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl MediaCandidate for String {
    fn media(&self) -> Option<&str> {
        self.as_str().media()
    }
}

impl MediaCandidate for Mime {
    fn media(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl<T: MediaCandidate + ?Sized> MediaCandidate for &T {
    fn media(&self) -> Option<&str> {
        (**self).media()
    }
}

impl<T: MediaCandidate> MediaCandidate for Option<T> {
    fn media(&self) -> Option<&str> {
        self.as_ref().and_then(|m| m.media())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("application/json")]
    #[case("application/json; charset=UTF-8")]
    #[case("application/json;charset=utf-8")]
    #[case("APPLICATION/JSON")]
    #[case("application/vnd.api+json")]
    #[case("application/vnd.company+json")]
    #[case("application/hal+json")]
    #[case("Application/Problem+JSON; charset=utf-8")]
    #[case("application/json ; q=0.5")]
    fn test_is_json_mime_accepts(#[case] media: &str) {
        assert!(is_json_mime(media), "expected json: {media}");
    }

    #[rstest]
    #[case("")]
    #[case("text/html")]
    #[case("text/json")]
    #[case("application/xml")]
    #[case("application/+json")]
    #[case("application/jsonp")]
    #[case("application/json-seq")]
    #[case("application")]
    #[case(";application/json")]
    fn test_is_json_mime_rejects(#[case] media: &str) {
        assert!(!is_json_mime(media), "expected not json: {media}");
    }

    #[test]
    fn test_json_rank() {
        assert_eq!(JsonRank::of("application/json; charset=utf-8"), JsonRank::Exact);
        assert_eq!(JsonRank::of("application/hal+json"), JsonRank::Suffix);
        assert_eq!(JsonRank::of("text/plain"), JsonRank::Other);
        assert!(JsonRank::Exact < JsonRank::Suffix);
        assert!(JsonRank::Suffix < JsonRank::Other);
    }

    #[test]
    fn test_has_quality() {
        assert!(has_quality("text/html;q=0.9"));
        assert!(has_quality("text/html; Q = 0.2"));
        assert!(has_quality("text/html;level=1;q=0.4"));
        assert!(!has_quality("text/html"));
        assert!(!has_quality("text/html;qs=1"));
        assert!(!has_quality("application/json; charset=utf-8"));
    }

    #[test]
    fn test_media_candidate() {
        assert_eq!("".media(), None);
        assert_eq!("text/html".media(), Some("text/html"));
        assert_eq!(String::from("a/b").media(), Some("a/b"));
        assert_eq!(None::<&str>.media(), None);
        assert_eq!(Some("").media(), None);
        assert_eq!(Some("text/csv").media(), Some("text/csv"));
        assert_eq!(mime::APPLICATION_JSON.media(), Some("application/json"));
    }
}
