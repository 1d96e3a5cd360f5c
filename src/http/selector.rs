use super::{
    has_quality, is_json_mime,
    headers::SelectedHeaders,
    operation::Operation,
    weight::{format_quality, get_next_weight, has_many, MAX_WEIGHT},
    JsonRank, MediaCandidate,
};

/// Builds the `Accept` and `Content-Type` headers for an outgoing API call.
///
/// Stateless; every method is a pure function of its arguments.
///
/// ```
/// use header_selector::http::HeaderSelector;
///
/// let headers = HeaderSelector.select_headers(
///     &["text/html", "application/json"],
///     Some("application/json"),
///     false,
/// );
/// assert_eq!(headers.get("Accept"), Some("application/json,text/html;q=0.9"));
/// assert_eq!(headers.get("Content-Type"), Some("application/json"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderSelector;

impl HeaderSelector {
    pub fn new() -> HeaderSelector {
        HeaderSelector
    }

    pub fn is_json_mime<M: MediaCandidate + ?Sized>(&self, mime: &M) -> bool {
        mime.media().map(is_json_mime).unwrap_or(false)
    }

    /// Whether any of `accepts` is a json media type.
    pub fn accepts_json<I, M>(&self, accepts: I) -> bool
    where
        I: IntoIterator<Item = M>,
        M: MediaCandidate,
    {
        accepts.into_iter().any(|m| self.is_json_mime(&m))
    }

    pub fn get_next_weight(&self, weight: i32, has_many: bool) -> i32 {
        get_next_weight(weight, has_many)
    }

    /// Headers for a call producing one of `accepts` and sending
    /// `content_type`.
    ///
    /// `Content-Type` falls back to `application/json` when none is given,
    /// and is left unset for multipart bodies so the transport can add its
    /// boundary.
    pub fn select_headers<I, M>(
        &self,
        accepts: I,
        content_type: Option<&str>,
        is_multipart: bool,
    ) -> SelectedHeaders
    where
        I: IntoIterator<Item = M>,
        M: MediaCandidate,
    {
        let accept = self.select_accept_header(accepts);
        let content_type = if is_multipart {
            None
        } else {
            Some(
                content_type
                    .filter(|ct| !ct.is_empty())
                    .unwrap_or(mime::APPLICATION_JSON.essence_str())
                    .to_owned(),
            )
        };
        tracing::debug!(
            accept = accept.as_deref(),
            content_type = content_type.as_deref(),
            is_multipart,
            "selected headers"
        );
        SelectedHeaders::new(accept, content_type)
    }

    pub fn select_for(&self, operation: &Operation) -> SelectedHeaders {
        self.select_headers(
            &operation.produces,
            operation.content_type(),
            operation.is_multipart(),
        )
    }

    /// Joins `accepts` into an `Accept` value, json types first.
    ///
    /// Empty and missing entries are dropped. A single candidate is returned
    /// as given. Otherwise candidates are ordered `application/json`, then
    /// other json types, then the rest, keeping input order within each
    /// group, and every candidate after the first gets a descending `q`.
    /// Candidates that already carry a `q` keep it untouched. When nothing
    /// is json the candidates are joined unweighted.
    pub fn select_accept_header<I, M>(&self, accepts: I) -> Option<String>
    where
        I: IntoIterator<Item = M>,
        M: MediaCandidate,
    {
        let candidates = accepts
            .into_iter()
            .filter_map(|m| m.media().map(str::to_owned))
            .collect::<Vec<_>>();
        match candidates.len() {
            0 => return None,
            1 => return candidates.into_iter().next(),
            _ => {}
        }

        let ranked = candidates
            .iter()
            .map(|media| (JsonRank::of(media), media.as_str()))
            .collect::<Vec<_>>();
        if !ranked.iter().any(|(rank, _)| rank.is_json()) {
            return Some(candidates.join(","));
        }

        let has_many = has_many(ranked.len());
        let mut weight = MAX_WEIGHT;
        let mut rendered = Vec::with_capacity(ranked.len());
        for rank in [JsonRank::Exact, JsonRank::Suffix, JsonRank::Other] {
            for media in ranked.iter().filter(|(r, _)| *r == rank).map(|(_, m)| *m) {
                // a caller q on the first entry is kept as is, so the
                // synthesized weights after it may outrank it
                if weight == MAX_WEIGHT && has_quality(media) {
                    tracing::trace!(%media, "caller weight kept on first accept entry");
                }
                rendered.push(weighted(media, weight));
                weight = get_next_weight(weight, has_many);
            }
        }
        let accept = rendered.join(",");
        tracing::trace!(%accept, candidates = ranked.len(), has_many, "weighted accept header");
        Some(accept)
    }
}

fn weighted(media: &str, weight: i32) -> String {
    if has_quality(media) {
        return media.to_owned();
    }
    match format_quality(weight) {
        Some(q) => format!("{};q={}", media.trim_end_matches(|c: char| c == ';' || c == ' '), q),
        None => media.to_owned(),
    }
}
