use std::sync::Arc;

use tokio::sync::mpsc;

use mailsift_core::ExtractionClient;
use mailsift_core::client::ExtractRequest;

use crate::tui_event::{BackendCommand, BackendEvent};

/// Backend command listener. Each command spawns its own request task, so a
/// second extraction can be fired while the first is still in flight; the
/// last response to arrive wins the result set. There is no cancellation of
/// in-flight requests.
pub async fn run(
    client: Arc<ExtractionClient>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::Extract {
                urls,
                filter,
                scan_mode,
            } => {
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(BackendEvent::ExtractionStarted);
                    let request = ExtractRequest {
                        urls,
                        filter,
                        scan_mode,
                    };
                    // Exactly one terminal event per request, success or not —
                    // the UI clears its loading indicator on either.
                    match client.extract(&request).await {
                        Ok(outcome) => {
                            let _ = tx.send(BackendEvent::ExtractionComplete(Box::new(outcome)));
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "extraction failed");
                            let _ = tx.send(BackendEvent::ExtractionFailed(e.to_string()));
                        }
                    }
                });
            }
            BackendCommand::RemoteExport {
                emails,
                format,
                output_path,
            } => {
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    match client.export(&emails, format.wire_name()).await {
                        Ok(payload) => {
                            let path = if output_path.is_empty() {
                                payload.filename.clone()
                            } else {
                                output_path
                            };
                            match std::fs::write(&path, payload.content.as_bytes()) {
                                Ok(()) => {
                                    let _ = tx.send(BackendEvent::ExportComplete { path });
                                }
                                Err(e) => {
                                    let _ = tx.send(BackendEvent::ExportFailed(format!(
                                        "failed to write {path}: {e}"
                                    )));
                                }
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "server export failed");
                            let _ = tx.send(BackendEvent::ExportFailed(e.to_string()));
                        }
                    }
                });
            }
        }
    }
}
