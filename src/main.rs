use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use roster_tools::{
    import, logging,
    store::{RestTableStore, StoreConfig},
};
use std::path::PathBuf;
use tracing::info;

/// Import a roster CSV into the remote `cadastro` table.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV file to import (comma or semicolon separated, header row required)
    #[arg(default_value = "MUSICOS_ORGANISTAS_REG_ITAPEVI_FINAL.csv")]
    csv_file: PathBuf,

    /// Base URL of the table store project
    #[arg(long, env = "SUPABASE_URL")]
    url: String,

    /// API key for the table store
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    key: String,

    /// Table receiving the rows
    #[arg(long, env = "SUPABASE_TABLE", default_value = "cadastro")]
    table: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init("info");

    // ─── 2) configure store ──────────────────────────────────────────
    let args = Args::parse();
    let config = StoreConfig {
        base_url: args.url,
        api_key: args.key,
    };
    let store = RestTableStore::new(Client::new(), &config).context("configuring table store")?;
    info!(store = %config.base_url, table = %args.table, "startup");

    // ─── 3) read, clean and submit ───────────────────────────────────
    let summary = import::import_csv(&store, &args.table, &args.csv_file).await?;

    info!(
        imported = summary.imported,
        errors = summary.errors,
        processed = summary.processed,
        "import finished"
    );
    Ok(())
}
