use std::io::Write;
use std::path::Path;

use thiserror::Error;

use mailsift_core::EmailRecord;

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Text, ExportFormat::Csv, ExportFormat::Json]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Plain Text",
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Wire name used by the server-side `/export` endpoint.
    pub fn wire_name(self) -> &'static str {
        self.extension()
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render export: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the export set in the given format.
///
/// The caller is expected to pass an already-ordered set (valid before
/// invalid); this function only formats. An empty set is an error so callers
/// never trigger a download of nothing.
pub fn render(records: &[&EmailRecord], format: ExportFormat) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }
    match format {
        ExportFormat::Text => Ok(render_text(records)),
        ExportFormat::Csv => Ok(render_csv(records)),
        ExportFormat::Json => render_json(records),
    }
}

/// Render and write `<path>`, creating parent directories as needed.
pub fn write_export(
    records: &[&EmailRecord],
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let content = render(records, format)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn render_text(records: &[&EmailRecord]) -> String {
    let mut out = String::new();
    for r in records {
        out.push_str(&r.email);
        out.push('\n');
    }
    out
}

fn render_csv(records: &[&EmailRecord]) -> String {
    let mut out = String::from("Email\n");
    for r in records {
        out.push_str(&r.email);
        out.push('\n');
    }
    out
}

fn render_json(records: &[&EmailRecord]) -> Result<String, ExportError> {
    let addresses: Vec<&str> = records.iter().map(|r| r.email.as_str()).collect();
    Ok(serde_json::to_string_pretty(&addresses)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsift_core::EmailStatus;

    fn record(email: &str, status: EmailStatus) -> EmailRecord {
        EmailRecord {
            email: email.to_string(),
            status,
            domain: email.split('@').nth(1).unwrap_or("").to_string(),
            source: "https://example.com".to_string(),
        }
    }

    #[test]
    fn text_is_newline_joined_addresses() {
        let a = record("a@x.com", EmailStatus::Valid);
        let b = record("b@y.org", EmailStatus::Invalid);
        let out = render(&[&a, &b], ExportFormat::Text).unwrap();
        assert_eq!(out, "a@x.com\nb@y.org\n");
    }

    #[test]
    fn csv_has_header_then_one_address_per_line() {
        let a = record("a@x.com", EmailStatus::Valid);
        let out = render(&[&a], ExportFormat::Csv).unwrap();
        assert_eq!(out, "Email\na@x.com\n");
    }

    #[test]
    fn json_is_pretty_array_of_plain_addresses() {
        let a = record("a@x.com", EmailStatus::Valid);
        let b = record("b@y.org", EmailStatus::Invalid);
        let out = render(&[&a, &b], ExportFormat::Json).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, vec!["a@x.com", "b@y.org"]);
        // Pretty-printed: one element per line.
        assert!(out.contains("\n"));
    }

    #[test]
    fn empty_set_is_rejected_without_writing() {
        assert!(matches!(
            render(&[], ExportFormat::Text),
            Err(ExportError::Empty)
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emails.txt");
        assert!(matches!(
            write_export(&[], ExportFormat::Text, &path),
            Err(ExportError::Empty)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn write_export_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("emails.csv");
        let a = record("a@x.com", EmailStatus::Valid);
        write_export(&[&a], ExportFormat::Csv, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Email\na@x.com\n");
    }

    #[test]
    fn extensions_match_wire_names() {
        for f in ExportFormat::all() {
            assert_eq!(f.extension(), f.wire_name());
        }
    }
}
