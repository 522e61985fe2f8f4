//! Video identifier parsing.
//!
//! Recognized sharing forms:
//!
//! ```text
//! https://www.youtube.com/watch?v=ID[&...]
//! https://m.youtube.com/watch?feature=share&v=ID
//! https://youtu.be/ID[?si=...]
//! https://www.youtube.com/shorts/ID
//! https://www.youtube.com/embed/ID
//! https://www.youtube.com/live/ID
//! ```
//!
//! The scheme and `www.` prefix are optional. Scheme and host match in any
//! case; the path and the id do not. Anything else is rejected rather than
//! guessed at.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::InvalidIdentifierError;

/// Shortest identifier accepted. Platform ids are 11 characters today; the
/// range leaves a little room either side.
const MIN_ID_LEN: usize = 10;
const MAX_ID_LEN: usize = 12;

static SHARE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?i:https?://)?
        (?:
            (?i:(?:www\.|m\.|music\.)?youtube\.com)/
            (?:
                watch\?(?:[^\#]*&)?v=
              | (?:embed|shorts|live|v)/
            )
          | (?i:(?:www\.)?youtube-nocookie\.com)/embed/
          | (?i:youtu\.be)/
        )
        ([A-Za-z0-9_-]{10,12})
        (?:[?&\#/].*)?$",
    )
    .expect("valid share url regex")
});

/// Opaque platform identifier of a single video.
///
/// Always holds a token of `[A-Za-z0-9_-]` characters of plausible length;
/// construct it with [`VideoId::parse`] or [`extract_video_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Validates a bare identifier token (no URL around it).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifierError`] if `raw` has the wrong length or
    /// contains characters outside `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> Result<Self, InvalidIdentifierError> {
        let token = raw.trim();
        if !(MIN_ID_LEN..=MAX_ID_LEN).contains(&token.len()) {
            return Err(InvalidIdentifierError {
                input: raw.to_owned(),
                reason: "identifier has an unexpected length",
            });
        }
        if !token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            return Err(InvalidIdentifierError {
                input: raw.to_owned(),
                reason: "identifier contains characters outside [A-Za-z0-9_-]",
            });
        }
        Ok(Self(token.to_owned()))
    }

    /// Accepts either a sharing URL or a bare identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifierError`] if `input` is neither.
    pub fn from_url_or_id(input: &str) -> Result<Self, InvalidIdentifierError> {
        extract_video_id(input).or_else(|_| Self::parse(input))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VideoId {
    type Error = InvalidIdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

/// Extracts the video identifier from a sharing URL.
///
/// No network access; the URL is matched purely syntactically.
///
/// # Errors
///
/// Returns [`InvalidIdentifierError`] when the URL is not one of the
/// recognized sharing forms.
pub fn extract_video_id(url: &str) -> Result<VideoId, InvalidIdentifierError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(InvalidIdentifierError {
            input: url.to_owned(),
            reason: "input is empty",
        });
    }

    let captures = SHARE_URL_RE
        .captures(trimmed)
        .ok_or_else(|| InvalidIdentifierError {
            input: url.to_owned(),
            reason: "not a recognized video sharing URL",
        })?;

    VideoId::parse(&captures[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_and_short_forms_extract_the_same_id() {
        let long = extract_video_id("https://www.youtube.com/watch?v=abc123XYZ9").unwrap();
        let short = extract_video_id("https://youtu.be/abc123XYZ9").unwrap();
        assert_eq!(long, short);
        assert_eq!(long.as_str(), "abc123XYZ9");
    }

    #[test]
    fn extracts_eleven_char_id_with_extra_query_params() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s&list=PL1").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn extracts_id_when_v_is_not_the_first_param() {
        let id = extract_video_id("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn extracts_short_link_with_tracking_param() {
        let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=AbCdEf").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn extracts_shorts_embed_and_live_paths() {
        for url in [
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://youtube.com/live/dQw4w9WgXcQ?feature=share",
            "www.youtube-nocookie.com/embed/dQw4w9WgXcQ",
        ] {
            let id = extract_video_id(url).unwrap_or_else(|e| panic!("{url}: {e}"));
            assert_eq!(id.as_str(), "dQw4w9WgXcQ", "url: {url}");
        }
    }

    #[test]
    fn scheme_and_host_are_case_insensitive() {
        for url in [
            "https://WWW.YOUTUBE.COM/watch?v=dQw4w9WgXcQ",
            "HTTPS://youtu.be/dQw4w9WgXcQ",
            "Youtu.be/dQw4w9WgXcQ",
            "Https://M.YouTube.com/shorts/dQw4w9WgXcQ",
        ] {
            let id = extract_video_id(url).unwrap_or_else(|e| panic!("{url}: {e}"));
            assert_eq!(id.as_str(), "dQw4w9WgXcQ", "url: {url}");
        }
    }

    #[test]
    fn id_keeps_its_case() {
        let id = extract_video_id("HTTPS://YOUTU.BE/AbCdEfGhIjK").unwrap();
        assert_eq!(id.as_str(), "AbCdEfGhIjK");
    }

    #[test]
    fn path_stays_case_sensitive() {
        assert!(extract_video_id("https://www.youtube.com/WATCH?v=dQw4w9WgXcQ").is_err());
    }

    #[test]
    fn scheme_is_optional() {
        let id = extract_video_id("youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let id = extract_video_id("  https://youtu.be/dQw4w9WgXcQ \n").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn rejects_unrelated_host() {
        let err = extract_video_id("https://example.com/").unwrap_err();
        assert_eq!(err.input, "https://example.com/");
    }

    #[test]
    fn rejects_lookalike_host_with_watch_path() {
        assert!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ").is_err());
    }

    #[test]
    fn rejects_watch_url_without_v_param() {
        assert!(extract_video_id("https://www.youtube.com/watch?list=PL123").is_err());
    }

    #[test]
    fn rejects_truncated_id() {
        assert!(extract_video_id("https://youtu.be/abc").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(extract_video_id("").is_err());
        assert!(extract_video_id("   ").is_err());
    }

    #[test]
    fn parse_accepts_bare_token() {
        assert_eq!(VideoId::parse("dQw4w9WgXcQ").unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn parse_rejects_bad_characters() {
        assert!(VideoId::parse("dQw4w9Wg.cQ").is_err());
        assert!(VideoId::parse("../../etc/pw").is_err());
    }

    #[test]
    fn from_url_or_id_accepts_both() {
        let a = VideoId::from_url_or_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
        let b = VideoId::from_url_or_id("dQw4w9WgXcQ").unwrap();
        assert_eq!(a, b);
        assert!(VideoId::from_url_or_id("https://example.com/").is_err());
    }

    #[test]
    fn serde_rejects_invalid_id() {
        let ok: VideoId = serde_json::from_str("\"dQw4w9WgXcQ\"").unwrap();
        assert_eq!(ok.as_str(), "dQw4w9WgXcQ");
        assert!(serde_json::from_str::<VideoId>("\"nope\"").is_err());
    }
}
