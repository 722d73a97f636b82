use url::Url;

use crate::UrlInputError;

/// Hard cap on the number of URLs accepted per extraction request.
pub const MAX_URLS: usize = 10;

/// Parse one-URL-per-line input into a cleaned URL list.
///
/// Blank lines and surrounding whitespace are dropped. Scheme-less entries
/// get an `https://` prefix before validation, matching what the extraction
/// service does with bare hostnames. The cap is checked before validation so
/// oversized input is rejected without touching the network.
pub fn parse_url_lines(input: &str) -> Result<Vec<String>, UrlInputError> {
    let lines: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(UrlInputError::Empty);
    }
    if lines.len() > MAX_URLS {
        return Err(UrlInputError::TooMany { count: lines.len() });
    }

    let mut urls = Vec::with_capacity(lines.len());
    for line in lines {
        urls.push(normalize_url(line)?);
    }
    Ok(urls)
}

fn normalize_url(line: &str) -> Result<String, UrlInputError> {
    let candidate = if line.starts_with("http://") || line.starts_with("https://") {
        line.to_string()
    } else {
        format!("https://{line}")
    };

    match Url::parse(&candidate) {
        Ok(url) if url.host().is_some() => Ok(candidate),
        _ => Err(UrlInputError::Invalid {
            line: line.to_string(),
        }),
    }
}
