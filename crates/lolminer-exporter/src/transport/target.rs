//! Target resolution: caller-supplied address -> fetchable URL.
//!
//! Operators usually pass bare `host:port` targets, so a missing scheme
//! defaults to `http://`. Anything that still fails to parse as an absolute
//! http(s) URL with a host is rejected as `InvalidTarget`.

use std::fmt;

use reqwest::Url;

use lolminer_core::error::{ExporterError, Result};

/// Validated absolute http(s) URL for one scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeTarget {
    url: Url,
}

impl ScrapeTarget {
    /// Resolve a raw `target` query value.
    pub fn resolve(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(ExporterError::MissingTarget);
        }

        let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            format!("http://{raw}")
        };

        check_characters(&candidate)?;

        let url = Url::parse(&candidate)
            .map_err(|e| ExporterError::InvalidTarget(format!("parse \"{candidate}\": {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ExporterError::InvalidTarget(format!(
                "unsupported scheme \"{}\"",
                url.scheme()
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ExporterError::InvalidTarget(format!(
                "parse \"{candidate}\": missing host"
            )));
        }

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ScrapeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// The URL parser silently percent-encodes spaces and tolerates stray `%`;
/// both indicate a mistyped target, so reject them up front.
fn check_characters(candidate: &str) -> Result<()> {
    if let Some(c) = candidate.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(ExporterError::InvalidTarget(format!(
            "parse \"{candidate}\": invalid character {c:?} in URL"
        )));
    }

    let bytes = candidate.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'%' {
            continue;
        }
        let escape = bytes.get(i + 1..i + 3);
        let valid = escape.map_or(false, |e| e.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            let end = (i + 3).min(candidate.len());
            return Err(ExporterError::InvalidTarget(format!(
                "parse \"{candidate}\": invalid URL escape \"{}\"",
                String::from_utf8_lossy(&bytes[i..end])
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_port_gets_http_scheme() {
        let t = ScrapeTarget::resolve("10.0.0.5:8020").unwrap();
        assert_eq!(t.url().scheme(), "http");
        assert_eq!(t.url().host_str(), Some("10.0.0.5"));
        assert_eq!(t.url().port(), Some(8020));
    }

    #[test]
    fn existing_scheme_is_preserved() {
        let t = ScrapeTarget::resolve("https://rig.local:4444/summary").unwrap();
        assert_eq!(t.as_str(), "https://rig.local:4444/summary");

        let t = ScrapeTarget::resolve("http://rig.local").unwrap();
        assert_eq!(t.url().scheme(), "http");
    }

    #[test]
    fn empty_is_missing_not_invalid() {
        assert!(matches!(
            ScrapeTarget::resolve(""),
            Err(ExporterError::MissingTarget)
        ));
    }

    #[test]
    fn raw_space_is_invalid() {
        let err = ScrapeTarget::resolve("bad url").unwrap_err();
        assert!(matches!(err, ExporterError::InvalidTarget(_)));
        assert!(err.client_body().starts_with("400 - Invalid target: "));
    }

    #[test]
    fn malformed_escape_is_invalid() {
        assert!(matches!(
            ScrapeTarget::resolve("rig.local/%zz"),
            Err(ExporterError::InvalidTarget(_))
        ));
        assert!(matches!(
            ScrapeTarget::resolve("rig.local/%4"),
            Err(ExporterError::InvalidTarget(_))
        ));
        assert!(ScrapeTarget::resolve("rig.local/a%20b").is_ok());
    }

    #[test]
    fn missing_host_is_invalid() {
        assert!(matches!(
            ScrapeTarget::resolve("http://"),
            Err(ExporterError::InvalidTarget(_))
        ));
        assert!(matches!(
            ScrapeTarget::resolve(":8080"),
            Err(ExporterError::InvalidTarget(_))
        ));
    }
}
