use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{EmailRecord, ExtractError, ExtractionOutcome, ExtractionStats, FilterMode, ScanMode};

/// Request body for `POST /extract`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractRequest {
    pub urls: Vec<String>,
    pub filter: FilterMode,
    pub scan_mode: ScanMode,
}

/// Request body for `POST /export`.
#[derive(Debug, Clone, Serialize)]
struct ExportRequest<'a> {
    emails: &'a [String],
    format: &'a str,
}

/// Server-rendered export content.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportPayload {
    pub content: String,
    pub filename: String,
}

/// Raw extraction response; `status`/`message` are only present on errors.
#[derive(Debug, Deserialize)]
struct RawExtractionResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    count: usize,
    #[serde(default)]
    emails: Vec<EmailRecord>,
    stats: Option<ExtractionStats>,
    #[serde(default)]
    cached: bool,
}

/// Client for the extraction service's `/extract` and `/export` endpoints.
pub struct ExtractionClient {
    base_url: String,
    http: reqwest::Client,
}

impl ExtractionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ExtractError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mailsift/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Submit a URL batch for extraction.
    ///
    /// Input validation (empty/oversized batches) happens before this is
    /// called; see [`crate::parse_url_lines`].
    pub async fn extract(&self, request: &ExtractRequest) -> Result<ExtractionOutcome, ExtractError> {
        let url = format!("{}/extract", self.base_url);
        tracing::debug!(urls = request.urls.len(), scan_mode = ?request.scan_mode, "extract request");

        let resp = self.http.post(&url).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, "extract request rejected");
            return Err(ExtractError::Http {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let outcome = parse_extraction_response(&body)?;
        tracing::debug!(count = outcome.count, cached = outcome.cached, "extract response");
        Ok(outcome)
    }

    /// Ask the server to render an export of the given addresses.
    pub async fn export(
        &self,
        emails: &[String],
        format: &str,
    ) -> Result<ExportPayload, ExtractError> {
        let url = format!("{}/export", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&ExportRequest { emails, format })
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ExtractError::Http {
                status: status.as_u16(),
            });
        }
        Ok(resp.json::<ExportPayload>().await?)
    }
}

/// Decode an extraction response body, mapping an explicit `status: "error"`
/// to [`ExtractError::Server`].
fn parse_extraction_response(body: &str) -> Result<ExtractionOutcome, ExtractError> {
    let raw: RawExtractionResponse = serde_json::from_str(body)
        .map_err(|e| ExtractError::Server(format!("malformed response: {e}")))?;

    if raw.status.as_deref() == Some("error") {
        return Err(ExtractError::Server(
            raw.message
                .unwrap_or_else(|| "extraction failed".to_string()),
        ));
    }

    let stats = raw.stats.unwrap_or(ExtractionStats {
        scan_mode: ScanMode::Fast,
        urls_processed: 0,
        processing_time: 0.0,
        valid_emails: raw
            .emails
            .iter()
            .filter(|r| r.status == crate::EmailStatus::Valid)
            .count(),
        invalid_emails: raw
            .emails
            .iter()
            .filter(|r| r.status == crate::EmailStatus::Invalid)
            .count(),
    });

    Ok(ExtractionOutcome {
        count: raw.count,
        emails: raw.emails,
        stats,
        cached: raw.cached,
    })
}
