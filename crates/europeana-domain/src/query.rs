//! Search API query construction.
//!
//! Entity URIs used as search terms must be wrapped in double quotes, and
//! several terms are combined with `AND`:
//!
//! ```
//! use europeana_domain::query::{all_of, quote_uri};
//!
//! let query = all_of([
//!     quote_uri("http://data.europeana.eu/timespan/16"),
//!     quote_uri("http://data.europeana.eu/concept/base/47"),
//! ]);
//! assert_eq!(
//!     query,
//!     r#""http://data.europeana.eu/timespan/16" AND "http://data.europeana.eu/concept/base/47""#
//! );
//! ```

/// Wrap a URI in double quotes (already quoted input is left alone)
pub fn quote_uri(uri: &str) -> String {
    let trimmed = uri.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed.to_string()
    } else {
        format!("\"{}\"", trimmed)
    }
}

/// Join terms with ` AND `, skipping blank ones
pub fn all_of<I, S>(terms: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .filter(|term| !term.as_ref().trim().is_empty())
        .map(|term| term.as_ref().trim().to_string())
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Parameters of a Search API call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Query string (Apache Solr syntax)
    pub query: String,
    /// Restrict to items with media
    pub media: Option<bool>,
    /// Query refinement, e.g. `TYPE:IMAGE`
    pub qf: Option<String>,
}

impl SearchQuery {
    /// Query with no refinements
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Items referencing every given entity URI
    pub fn for_entities<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(all_of(uris.into_iter().map(|uri| quote_uri(uri.as_ref()))))
    }

    /// Set the `media` flag
    pub fn with_media(mut self, media: bool) -> Self {
        self.media = Some(media);
        self
    }

    /// Set the `qf` refinement
    pub fn with_qf(mut self, qf: impl Into<String>) -> Self {
        self.qf = Some(qf.into());
        self
    }
}
