// src/import/mod.rs
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::{collections::HashMap, fs, io, path::Path};
use tracing::{error, info};

use crate::store::TableStore;

pub mod clean;
pub mod headers;
pub mod record;

pub use clean::clean_text;
pub use headers::{detect_delimiter, normalize_header};
pub use record::Record;

/// Records per insert request.
pub const BATCH_SIZE: usize = 1000;

/// Accepted rows between progress logs.
const PROGRESS_EVERY: usize = 100;

/// Outcome of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records in batches the store accepted.
    pub imported: usize,
    /// Records in batches the store rejected.
    pub errors: usize,
    /// Records read from the CSV, i.e. rows with a non-empty name.
    pub processed: usize,
}

/// Read and clean every row of `csv_path`.
///
/// Rows whose name is empty after cleaning are skipped. A missing file, a
/// file without a header row, or any parse error fails the whole read.
#[tracing::instrument(level = "info", skip(csv_path), fields(path = %csv_path.as_ref().display()))]
pub fn read_records<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Record>> {
    let csv_path = csv_path.as_ref();
    let data = fs::read(csv_path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            anyhow::Error::new(e).context(format!("CSV file not found: {}", csv_path.display()))
        } else {
            anyhow::Error::new(e).context(format!("failed to read {}", csv_path.display()))
        }
    })?;

    let delimiter = detect_delimiter(&data);
    info!(delimiter = %(delimiter as char), "detected delimiter");

    parse_records(&data, delimiter)
        .with_context(|| format!("failed to process CSV {}", csv_path.display()))
}

fn parse_records(data: &[u8], delimiter: u8) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(data);

    // a repeated header keeps its last position
    let columns: HashMap<String, usize> = rdr
        .headers()
        .context("reading header row")?
        .iter()
        .enumerate()
        .map(|(idx, h)| (normalize_header(h), idx))
        .collect();
    if columns.is_empty() {
        bail!("missing header row");
    }

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 1;
        let row = result.with_context(|| format!("CSV parse error at data row {}", line))?;

        let Some(record) = Record::from_row(|column| columns.get(column).and_then(|&i| row.get(i)))
        else {
            info!(line, "row skipped (empty name)");
            continue;
        };
        records.push(record);

        if records.len() % PROGRESS_EVERY == 0 {
            info!(accepted = records.len(), "rows processed");
        }
    }

    info!(total = records.len(), "records ready for import");
    Ok(records)
}

/// Insert `records` into `table` in batches of [`BATCH_SIZE`], one request
/// per batch, strictly in order.
///
/// A rejected batch counts all its records as errors; later batches are
/// still submitted.
pub async fn submit_batches<S: TableStore>(
    store: &S,
    table: &str,
    records: &[Record],
) -> ImportSummary {
    let mut summary = ImportSummary {
        processed: records.len(),
        ..Default::default()
    };

    for (idx, batch) in records.chunks(BATCH_SIZE).enumerate() {
        let batch_no = idx + 1;
        match store.insert(table, batch).await {
            Ok(()) => {
                summary.imported += batch.len();
                info!(batch = batch_no, rows = batch.len(), "batch imported");
            }
            Err(e) => {
                summary.errors += batch.len();
                error!(batch = batch_no, rows = batch.len(), error = %format!("{:#}", e), "batch failed");
            }
        }
    }

    info!(
        imported = summary.imported,
        errors = summary.errors,
        processed = summary.processed,
        "import summary"
    );
    summary
}

/// Read `csv_path` and insert its records into `table`.
pub async fn import_csv<S, P>(store: &S, table: &str, csv_path: P) -> Result<ImportSummary>
where
    S: TableStore,
    P: AsRef<Path>,
{
    info!(path = %csv_path.as_ref().display(), "reading CSV");
    let records = read_records(csv_path)?;
    info!(table, batches = records.len().div_ceil(BATCH_SIZE), "starting batched import");
    Ok(submit_batches(store, table, &records).await)
}
