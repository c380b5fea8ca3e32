// HTTP polish for scrape failures.
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use lolminer_core::error::ExporterError;

/// Plain-text error response for a failed scrape.
#[derive(Debug)]
pub struct ScrapeFailure(pub ExporterError);

impl IntoResponse for ScrapeFailure {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            self.0.client_body(),
        )
            .into_response()
    }
}
