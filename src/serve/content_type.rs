use mime::Mime;
use std::path::Path;

/// Content types forced for web app assets, keyed by lowercase extension.
const PWA_TYPES: &[(&str, &str)] = &[
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("css", "text/css"),
    ("html", "text/html"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("ico", "image/x-icon"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
];

/// Forced content type for `path`, if its extension is one of the web app
/// asset types.
pub fn pwa_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    PWA_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// Content type to serve `path` with: the forced asset type when there is
/// one, otherwise the regular extension lookup.
pub fn content_type_for(path: &Path) -> Mime {
    if let Some(forced) = pwa_mime_type(path).and_then(|m| m.parse().ok()) {
        return forced;
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => actix_files::file_extension_to_mime(ext),
        None => mime::APPLICATION_OCTET_STREAM,
    }
}
