// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Link location mapping.
//!
//! Linked resources may store their location either as a plain local path
//! through `<location>`, or as a portable URI through `<locationURI>`. Both
//! forms end up as an absolute [`Url`] in memory. This module converts
//! between the two forms.
//!
//! # Local Path Form
//!
//! Local paths are accepted in either separator style. Backslashes are
//! turned into forward slashes, and repeated separators are collapsed, so
//! `C:\abc\\def` and `C:/abc/def` name the same location. Paths must be
//! absolute: either rooted at `/`, or starting with a drive letter such as
//! `D:/`. Any character that cannot appear raw in a URI path is
//! percent-encoded, including a literal `%`.

use percent_encoding::percent_decode_str;
use url::Url;

/// Convert local path string to absolute `file:` URI.
///
/// # Errors
///
/// - Return [`LocationError::Empty`] if path is blank.
/// - Return [`LocationError::Relative`] if path is not absolute.
/// - Return [`LocationError::Malformed`] if the URI cannot be built.
pub fn uri_from_path(path: impl AsRef<str>) -> Result<Url> {
    let path = path.as_ref();
    let normalized = normalize_separators(path.trim());
    if normalized.is_empty() {
        return Err(LocationError::Empty);
    }

    let rooted = if normalized.starts_with('/') {
        normalized
    } else if has_device(&normalized) {
        format!("/{normalized}")
    } else {
        return Err(LocationError::Relative { path: path.into() });
    };

    let mut uri = Url::parse("file:///").map_err(|err| LocationError::Malformed {
        source: err,
        location: path.into(),
    })?;

    // INVARIANT: Literal '%' must survive the trip back through decoding.
    uri.set_path(&rooted.replace('%', "%25"));

    Ok(uri)
}

/// Convert `file:` URI back to local path string.
///
/// Returns [`None`] if the URI does not name a plain local path, i.e., it uses
/// another scheme, names a host, carries a query or fragment, or does not
/// decode to valid UTF-8.
pub fn path_from_uri(uri: &Url) -> Option<String> {
    if uri.scheme() != "file"
        || !uri.host_str().is_none_or(str::is_empty)
        || uri.query().is_some()
        || uri.fragment().is_some()
    {
        return None;
    }

    let decoded = percent_decode_str(uri.path()).decode_utf8().ok()?;
    if let Some(rest) = decoded.strip_prefix('/').filter(|rest| has_device(rest)) {
        return Some(rest.to_owned());
    }

    Some(decoded.into_owned())
}

/// Parse `<locationURI>` text.
///
/// # Errors
///
/// - Return [`LocationError::Malformed`] if text is not an absolute URI.
pub fn parse_uri(text: impl AsRef<str>) -> Result<Url> {
    let text = text.as_ref().trim();
    Url::parse(text).map_err(|err| LocationError::Malformed {
        source: err,
        location: text.into(),
    })
}

fn normalize_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for ch in path.chars().map(|ch| if ch == '\\' { '/' } else { ch }) {
        if ch == '/' && out.ends_with('/') {
            continue;
        }
        out.push(ch);
    }

    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }

    out
}

fn has_device(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), None | Some('/')) if letter.is_ascii_alphabetic()
    )
}

/// Link location mapping error types.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// Location text is blank.
    #[error("location is empty")]
    Empty,

    /// Local path is not absolute.
    #[error("location {path:?} is not an absolute path")]
    Relative { path: String },

    /// Location cannot be represented as URI.
    #[error("location {location:?} is not a valid URI")]
    Malformed {
        #[source]
        source: url::ParseError,
        location: String,
    },
}

/// Friendly result alias :3
pub type Result<T, E = LocationError> = std::result::Result<T, E>;
