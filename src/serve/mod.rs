// src/serve/mod.rs
use actix_files::NamedFile;
use actix_web::{
    http::Method,
    middleware::DefaultHeaders,
    web, HttpRequest, HttpResponse,
};
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod bind;
pub mod content_type;

pub use bind::{bind_error_message, local_ip};
pub use content_type::{content_type_for, pwa_mime_type};

/// Port used when none is given on the command line.
pub const DEFAULT_PORT: u16 = 8000;

/// File served for a directory request.
const INDEX_FILE: &str = "index.html";

/// Headers added to every response: no caching, basic hardening, and open
/// CORS for local development.
pub const PWA_HEADERS: &[(&str, &str)] = &[
    ("Cache-Control", "no-cache, no-store, must-revalidate"),
    ("Pragma", "no-cache"),
    ("Expires", "0"),
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("X-XSS-Protection", "1; mode=block"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
];

/// Directory the server exposes.
#[derive(Debug, Clone)]
struct ServeRoot(PathBuf);

pub fn pwa_headers() -> DefaultHeaders {
    PWA_HEADERS
        .iter()
        .fold(DefaultHeaders::new(), |headers, &pair| headers.add(pair))
}

/// Register the file service for `root` on an app.
///
/// ```ignore
/// App::new().configure(serve::configure(root))
/// ```
pub fn configure(root: PathBuf) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("")
                .app_data(web::Data::new(ServeRoot(root)))
                .wrap(pwa_headers())
                .route("/{tail:.*}", web::route().to(serve_path)),
        );
    }
}

/// Map a raw (percent-encoded) request path onto `root`.
///
/// The path is fully decoded before splitting. Empty, `.` and `..` segments
/// are dropped, so the result never leaves `root`.
pub fn resolve_path(root: &Path, request_path: &str) -> PathBuf {
    percent_decode_str(request_path)
        .decode_utf8_lossy()
        .split(|c: char| c == '/' || c == '\\')
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

async fn serve_path(
    req: HttpRequest,
    root: web::Data<ServeRoot>,
) -> actix_web::Result<HttpResponse> {
    match *req.method() {
        Method::OPTIONS => return Ok(HttpResponse::Ok().finish()),
        Method::GET | Method::HEAD => {}
        _ => return Ok(HttpResponse::NotImplemented().finish()),
    }

    let mut path = resolve_path(&root.0, req.uri().path());
    if path.is_dir() {
        path.push(INDEX_FILE);
    }
    debug!(path = %path.display(), "serving file");

    let content_type = content_type_for(&path);
    let file = NamedFile::open_async(&path)
        .await?
        .set_content_type(content_type)
        .prefer_utf8(false)
        .disable_content_disposition();
    Ok(file.into_response(&req))
}
