use mailsift_core::{FilterMode, ScanMode};

/// Resolved runtime settings: CLI > env > config file > defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub timeout_secs: u64,
    pub scan_mode: ScanMode,
    pub filter_mode: FilterMode,
    pub rows_per_page: usize,
    pub theme_name: String,
}

/// Rows-per-page options the `z` key cycles through.
pub const ROWS_PER_PAGE_CHOICES: &[usize] = &[10, 20, 50, 100];

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
            scan_mode: ScanMode::Fast,
            filter_mode: FilterMode::All,
            rows_per_page: 20,
            theme_name: "hacker".to_string(),
        }
    }
}

impl Settings {
    /// Next rows-per-page choice after the current one.
    pub fn next_rows_per_page(&self) -> usize {
        let idx = ROWS_PER_PAGE_CHOICES
            .iter()
            .position(|&n| n == self.rows_per_page)
            .unwrap_or(0);
        ROWS_PER_PAGE_CHOICES[(idx + 1) % ROWS_PER_PAGE_CHOICES.len()]
    }
}
