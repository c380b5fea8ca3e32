//! Shared error type across lolminer crates.

use thiserror::Error;

/// Who is at fault for a failed scrape (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller sent a missing or malformed target.
    ClientInput,
    /// The upstream miner was unreachable or returned garbage.
    Upstream,
    /// A defect inside the exporter itself.
    Internal,
}

impl ErrorClass {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::ClientInput => "CLIENT_INPUT",
            ErrorClass::Upstream => "UPSTREAM",
            ErrorClass::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("missing target")]
    MissingTarget,
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    #[error("failed to build upstream request: {0}")]
    FetchRequest(String),
    #[error("upstream transport error: {0}")]
    FetchTransport(String),
    #[error("failed to read upstream body: {0}")]
    FetchBody(String),
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),
    #[error("decode: {0}")]
    Decode(String),
    #[error("metric registration conflict: {0}")]
    RegistrationConflict(String),
    #[error("encode: {0}")]
    Encode(String),
    #[error("config: {0}")]
    Config(String),
}

impl ExporterError {
    /// Classify the error by the party responsible for it.
    pub fn class(&self) -> ErrorClass {
        match self {
            ExporterError::MissingTarget | ExporterError::InvalidTarget(_) => {
                ErrorClass::ClientInput
            }
            ExporterError::FetchRequest(_)
            | ExporterError::FetchTransport(_)
            | ExporterError::FetchBody(_)
            | ExporterError::UpstreamStatus(_)
            | ExporterError::Decode(_) => ErrorClass::Upstream,
            ExporterError::RegistrationConflict(_)
            | ExporterError::Encode(_)
            | ExporterError::Config(_) => ErrorClass::Internal,
        }
    }

    /// HTTP status code reported to the scraping client.
    pub fn http_status(&self) -> u16 {
        match self.class() {
            ErrorClass::ClientInput => 400,
            ErrorClass::Upstream | ErrorClass::Internal => 500,
        }
    }

    /// Plain-text body reported to the scraping client.
    pub fn client_body(&self) -> String {
        let status = self.http_status();
        match self {
            ExporterError::MissingTarget => format!("{status} - Missing target.\n"),
            ExporterError::InvalidTarget(cause) => {
                format!("{status} - Invalid target: {cause}\n")
            }
            ExporterError::FetchRequest(cause)
            | ExporterError::FetchTransport(cause)
            | ExporterError::FetchBody(cause) => {
                format!("{status} - Failed to scrape target: {cause}\n")
            }
            ExporterError::UpstreamStatus(code) => {
                format!("{status} - Failed to scrape target: upstream returned status {code}\n")
            }
            ExporterError::Decode(cause) => {
                format!("{status} - Failed to parse scraped data: {cause}\n")
            }
            ExporterError::RegistrationConflict(cause) => {
                format!("{status} - Failed to build metrics: {cause}\n")
            }
            ExporterError::Encode(cause) => format!("{status} - Failed to encode metrics: {cause}\n"),
            ExporterError::Config(cause) => format!("{status} - Invalid configuration: {cause}\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_input_maps_to_400() {
        assert_eq!(ExporterError::MissingTarget.http_status(), 400);
        assert_eq!(ExporterError::InvalidTarget("x".into()).http_status(), 400);
    }

    #[test]
    fn upstream_and_internal_map_to_500() {
        assert_eq!(ExporterError::FetchTransport("refused".into()).http_status(), 500);
        assert_eq!(ExporterError::Decode("eof".into()).http_status(), 500);
        assert_eq!(
            ExporterError::RegistrationConflict("dup".into()).class(),
            ErrorClass::Internal
        );
    }

    #[test]
    fn bodies_follow_the_plain_text_templates() {
        assert_eq!(ExporterError::MissingTarget.client_body(), "400 - Missing target.\n");
        assert_eq!(
            ExporterError::FetchBody("connection reset".into()).client_body(),
            "500 - Failed to scrape target: connection reset\n"
        );
        assert_eq!(
            ExporterError::Decode("expected value at line 1 column 1".into()).client_body(),
            "500 - Failed to parse scraped data: expected value at line 1 column 1\n"
        );
    }
}
