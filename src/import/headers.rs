use once_cell::sync::Lazy;
use std::collections::HashMap;

/// How many leading bytes of the file are inspected to pick a delimiter.
pub const SNIFF_BYTES: usize = 1024;

/// Lowercased header spelling → canonical column name.
static CANONICAL_HEADERS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("nome", "nome"),
        ("instrumento", "instrumento"),
        ("localidade", "localidade"),
        ("cidade", "cidade"),
        ("comum", "comum"),
        ("cargo", "cargo"),
        ("nivel", "nivel"),
        ("nível", "nivel"),
    ])
});

/// Map a CSV header to its canonical column name.
///
/// Matching is case-insensitive; headers outside the table come back trimmed
/// and lowercased.
pub fn normalize_header(header: &str) -> String {
    let lowered = header.trim_start_matches('\u{feff}').trim().to_lowercase();
    match CANONICAL_HEADERS.get(lowered.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => lowered,
    }
}

/// Pick `,` or `;` by counting both in `sample`. Ties go to `;`.
pub fn detect_delimiter(sample: &[u8]) -> u8 {
    let sample = &sample[..sample.len().min(SNIFF_BYTES)];
    let commas = sample.iter().filter(|&&b| b == b',').count();
    let semicolons = sample.iter().filter(|&&b| b == b';').count();
    if commas > semicolons {
        b','
    } else {
        b';'
    }
}
