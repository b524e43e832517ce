//! Canonical video identifier parsing.
//!
//! Accepts standard watch URLs, youtu.be short URLs, embed URLs, and bare
//! 11-character video IDs.

use crate::error::{Result, SvarError};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// Canonical 11-character YouTube video identifier.
///
/// Immutable once derived; always obtained from a reference string via
/// [`VideoId::parse`]. Serializes as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

/// Token embedded in a URL: after a `v=` query parameter or a path
/// separator, terminated by `?`, `&`, or end of input.
fn url_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:v=|/)([A-Za-z0-9_-]{11})(?:[?&]|$)").expect("Invalid regex")
    })
}

/// The entire input is exactly an 11-character token.
fn bare_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z0-9_-]{11})$").expect("Invalid regex"))
}

impl VideoId {
    /// Parse a video reference into a canonical ID.
    ///
    /// Recognition rules are tried in order and the first match wins:
    /// 1. an ID embedded in a URL (`v=` query parameter or path segment),
    /// 2. the entire trimmed input is a bare 11-character ID.
    ///
    /// Anything else fails with [`SvarError::InvalidReference`].
    pub fn parse(reference: &str) -> Result<Self> {
        let input = reference.trim();

        for rule in [url_rule(), bare_rule()] {
            if let Some(caps) = rule.captures(input) {
                return Ok(Self(caps[1].to_string()));
            }
        }

        debug!("No recognition rule matched video reference: {:?}", reference);
        Err(SvarError::InvalidReference(reference.to_string()))
    }

    /// The raw 11-character identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Standard watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Thumbnail URL derived from the ID alone; no network call involved.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = SvarError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
