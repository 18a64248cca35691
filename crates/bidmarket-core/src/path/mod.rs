// ── Filter paths ──
//
// A filter path is the URL form of an applied selection:
// `/{lang}/{route}/{segment}/...?{query}`. The builder and parser are
// inverses over a loaded catalog; `Location` splits pasted hrefs back into
// their parts.

mod builder;
mod parser;

use std::borrow::Cow;

use serde::Serialize;
use url::Url;
use url::form_urlencoded;

use crate::error::CoreError;
use crate::model::{Lang, ListingType};

pub use builder::build_path;
pub use parser::parse_path;

/// Query parameter carrying the free-text search.
pub const SEARCH_PARAM: &str = "search";
pub const MIN_COST_PARAM: &str = "min_cost";
pub const MAX_COST_PARAM: &str = "max_cost";

/// Ordered path segments plus ordered query pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterPath {
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
}

impl FilterPath {
    /// Render the navigable href.
    pub fn to_href(&self, lang: Lang, listing: ListingType) -> String {
        let mut href = format!("/{}/{}", lang.code(), listing.route());
        for segment in &self.segments {
            href.push('/');
            href.push_str(&encode_segment(segment));
        }
        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.query)
                .finish();
            href.push('?');
            href.push_str(&query);
        }
        href
    }

    /// First value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        query_value(&self.query, key)
    }
}

pub(crate) fn query_value<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

// ── Location ────────────────────────────────────────────────────────

/// A page address split into its filter-relevant parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub lang: Lang,
    pub listing: ListingType,
    /// Percent-decoded filter segments after the route.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
}

impl Location {
    /// Parse an absolute URL or a site-relative href.
    ///
    /// A missing or unknown language prefix falls back to `default_lang`;
    /// a missing or unknown route falls back to `default_listing` and the
    /// segment is kept as the first filter segment.
    pub fn parse(
        href: &str,
        default_lang: Lang,
        default_listing: ListingType,
    ) -> Result<Self, CoreError> {
        let url = parse_href(href.trim())?;

        let mut segments: Vec<String> = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect();

        let lang = match segments.first().and_then(|s| s.parse::<Lang>().ok()) {
            Some(lang) => {
                segments.remove(0);
                lang
            }
            None => default_lang,
        };
        let listing = match segments.first().and_then(|s| ListingType::from_route(s)) {
            Some(listing) => {
                segments.remove(0);
                listing
            }
            None => default_listing,
        };
        let query = url.query_pairs().into_owned().collect();

        Ok(Self {
            lang,
            listing,
            segments,
            query,
        })
    }
}

fn parse_href(href: &str) -> Result<Url, CoreError> {
    let invalid = |e: url::ParseError| CoreError::ValidationFailed {
        message: format!("invalid location {href:?}: {e}"),
    };
    let rejected = |reason: &str| CoreError::ValidationFailed {
        message: format!("invalid location {href:?}: {reason}"),
    };
    match Url::parse(href) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        Ok(url) => Err(rejected(&format!("unsupported scheme {:?}", url.scheme()))),
        // Site-relative hrefs only; a bare `host/path` is rejected below.
        Err(url::ParseError::RelativeUrlWithoutBase)
            if href.is_empty() || href.starts_with('/') || href.starts_with('?') =>
        {
            let base = Url::parse("http://localhost/").map_err(invalid)?;
            base.join(href).map_err(invalid)
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Err(rejected("expected an http(s) URL or a path starting with '/'"))
        }
        Err(e) => Err(invalid(e)),
    }
}

/// Escape the characters that would change how a segment splits on
/// re-parse. Unicode letters stay readable.
fn encode_segment(segment: &str) -> Cow<'_, str> {
    let reserved =
        |c: char| c.is_control() || c.is_whitespace() || matches!(c, '%' | '/' | '?' | '#' | '\\');
    if !segment.contains(reserved) {
        return Cow::Borrowed(segment);
    }
    let mut out = String::with_capacity(segment.len() + 8);
    let mut buf = [0u8; 4];
    for c in segment.chars() {
        if reserved(c) {
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), Cow::into_owned)
}
