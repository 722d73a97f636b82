use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use mailsift_core::{FilterMode, ScanMode};

use crate::model::settings::Settings;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub display: Option<DisplayConfig>,
    pub extraction: Option<ExtractionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub rows_per_page: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub scan_mode: Option<String>,
    pub filter: Option<String>,
}

/// Platform config directory path: `<config_dir>/mailsift/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mailsift").join("config.toml"))
}

/// Load config by cascading CWD `.mailsift.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".mailsift.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        server: Some(ServerConfig {
            url: overlay
                .server
                .as_ref()
                .and_then(|s| s.url.clone())
                .or_else(|| base.server.as_ref().and_then(|s| s.url.clone())),
            timeout_secs: overlay
                .server
                .as_ref()
                .and_then(|s| s.timeout_secs)
                .or_else(|| base.server.as_ref().and_then(|s| s.timeout_secs)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
            rows_per_page: overlay
                .display
                .as_ref()
                .and_then(|d| d.rows_per_page)
                .or_else(|| base.display.as_ref().and_then(|d| d.rows_per_page)),
        }),
        extraction: Some(ExtractionConfig {
            scan_mode: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.scan_mode.clone())
                .or_else(|| base.extraction.as_ref().and_then(|e| e.scan_mode.clone())),
            filter: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.filter.clone())
                .or_else(|| base.extraction.as_ref().and_then(|e| e.filter.clone())),
        }),
    }
}

/// Apply file values onto settings. Only sets values present in the file.
pub fn apply_to_settings(file_cfg: &ConfigFile, settings: &mut Settings) {
    if let Some(server) = &file_cfg.server {
        if let Some(ref url) = server.url
            && !url.is_empty()
        {
            settings.server_url = url.clone();
        }
        if let Some(timeout) = server.timeout_secs {
            settings.timeout_secs = timeout.max(1);
        }
    }
    if let Some(display) = &file_cfg.display {
        if let Some(ref theme) = display.theme
            && !theme.is_empty()
        {
            settings.theme_name = theme.clone();
        }
        if let Some(rows) = display.rows_per_page {
            settings.rows_per_page = rows.max(1);
        }
    }
    if let Some(extraction) = &file_cfg.extraction {
        if let Some(ref mode) = extraction.scan_mode {
            settings.scan_mode = parse_scan_mode(mode).unwrap_or(settings.scan_mode);
        }
        if let Some(ref filter) = extraction.filter {
            settings.filter_mode = parse_filter_mode(filter).unwrap_or(settings.filter_mode);
        }
    }
}

pub fn parse_scan_mode(s: &str) -> Option<ScanMode> {
    match s.to_ascii_lowercase().as_str() {
        "fast" => Some(ScanMode::Fast),
        "deep" => Some(ScanMode::Deep),
        _ => None,
    }
}

pub fn parse_filter_mode(s: &str) -> Option<FilterMode> {
    match s.to_ascii_lowercase().as_str() {
        "valid" => Some(FilterMode::Valid),
        "invalid" => Some(FilterMode::Invalid),
        "all" => Some(FilterMode::All),
        _ => None,
    }
}
