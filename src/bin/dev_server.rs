use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use roster_tools::{logging, serve};
use std::{fs, path::PathBuf};
use tracing::info;

/// Serve a directory for local PWA testing: no caching, open CORS, and
/// correct content types for web app assets.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Port to listen on
    #[arg(default_value_t = serve::DEFAULT_PORT)]
    port: u16,

    /// Directory to serve
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[actix_web::main]
async fn main() -> Result<()> {
    logging::init("info");

    let args = Args::parse();
    let root = fs::canonicalize(&args.root)
        .with_context(|| format!("failed to resolve serve root {}", args.root.display()))?;
    let port = args.port;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(serve::configure(root.clone()))
    })
    .workers(1)
    .bind(("0.0.0.0", port))
    .map_err(|e| anyhow!(serve::bind_error_message(&e, port)))?
    .run();

    info!("PWA server started");
    info!("local:   http://localhost:{}", port);
    info!("network: http://{}:{}", serve::local_ip(), port);
    info!("press Ctrl+C to stop");

    server.await.context("server error")?;
    info!("server stopped by user");
    Ok(())
}
