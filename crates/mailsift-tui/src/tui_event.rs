use mailsift_core::{ExtractionOutcome, FilterMode, ScanMode};
use mailsift_reporting::ExportFormat;

/// Commands sent from the TUI to the backend task.
pub enum BackendCommand {
    /// Run an extraction request against the configured server.
    Extract {
        urls: Vec<String>,
        filter: FilterMode,
        scan_mode: ScanMode,
    },
    /// Render an export on the server and write the returned content locally.
    RemoteExport {
        emails: Vec<String>,
        format: ExportFormat,
        output_path: String,
    },
}

/// Events flowing from the backend task to the TUI.
///
/// Every `Extract` command produces exactly one `ExtractionComplete` or
/// `ExtractionFailed` — the loading indicator is cleared on either.
#[derive(Debug)]
pub enum BackendEvent {
    ExtractionStarted,
    ExtractionComplete(Box<ExtractionOutcome>),
    ExtractionFailed(String),
    ExportComplete { path: String },
    ExportFailed(String),
}
