use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use sheet_splitter::config::Config;
use sheet_splitter::logging;
use sheet_splitter::services::splitter::{load_file_from_path, write_parts};
use sheet_splitter::{Allocation, AppError, OutputFormat, PartRange, SheetSplitter, SplitRequest};

#[derive(Parser, Debug)]
#[command(name = "sheet-splitter", version)]
#[command(about = "Split a spreadsheet's rows into percentage-sized xlsx or CSV parts")]
struct Cli {
    /// Spreadsheet to split (first sheet only)
    input: Option<PathBuf>,

    /// Number of parts, each starting with an equal share
    #[arg(short, long, conflicts_with = "percentages")]
    parts: Option<usize>,

    /// Explicit share per part, e.g. 20,60,20
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    percentages: Option<Vec<f64>>,

    /// Set one part's share and spread the rest evenly (1-based, repeatable)
    #[arg(short, long = "edit", value_name = "PART=PERCENT")]
    edits: Vec<String>,

    /// Output format: xlsx or csv
    #[arg(short, long)]
    format: Option<String>,

    /// Directory for part_N files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the row ranges without writing files
    #[arg(long)]
    dry_run: bool,

    /// Print a JSON manifest on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct ManifestEntry {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(flatten)]
    range: PartRange,
    data_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    format: OutputFormat,
    shares: &'a [f64],
    dry_run: bool,
    parts: Vec<ManifestEntry>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let json = cli.json;
    let result = match Config::new() {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Split failed: {:#}", e);
            if json {
                let kind = e.downcast_ref::<AppError>().map_or("internal", AppError::kind);
                let report = serde_json::json!({ "error": format!("{:#}", e), "kind": kind });
                println!("{}", report);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let allocation = build_allocation(cli.parts, cli.percentages, &cli.edits)?;
    let format = config.output_format(cli.format.as_deref())?;
    let output_dir = cli.output_dir.unwrap_or(config.output_dir);
    tracing::info!(
        "Allocation {:?} ({} parts), format {}",
        allocation.shares(),
        allocation.parts(),
        format
    );

    let data = load_file_from_path(cli.input.as_deref(), config.max_file_size).await?;
    let splitter: SheetSplitter = SheetSplitter::default();

    if cli.dry_run {
        let (total, ranges) = splitter.plan(Some(&data[..]), &allocation)?;
        let parts = ranges
            .into_iter()
            .map(|range| {
                let data_rows = range.clamped_len(total);
                tracing::info!(
                    "part_{}: rows {}..{} ({} of {} data rows)",
                    range.index,
                    range.start,
                    range.end,
                    data_rows,
                    total
                );
                ManifestEntry {
                    name: format!("part_{}.{}", range.index, format.extension()),
                    path: None,
                    range,
                    data_rows,
                    bytes: None,
                }
            })
            .collect();
        if cli.json {
            print_manifest(&Manifest {
                format,
                shares: allocation.shares(),
                dry_run: true,
                parts,
            })?;
        }
        return Ok(());
    }

    let request = SplitRequest { allocation, format };
    let files = splitter.split(Some(&data[..]), &request)?;
    let paths = write_parts(&output_dir, &files)
        .await
        .with_context(|| format!("writing parts to {}", output_dir.display()))?;
    tracing::info!("Wrote {} parts to {}", paths.len(), output_dir.display());

    if cli.json {
        let parts = files
            .iter()
            .zip(paths)
            .map(|(file, path)| ManifestEntry {
                name: file.name.clone(),
                path: Some(path),
                range: file.range,
                data_rows: file.data_rows,
                bytes: Some(file.bytes.len()),
            })
            .collect();
        print_manifest(&Manifest {
            format,
            shares: request.allocation.shares(),
            dry_run: false,
            parts,
        })?;
    }
    Ok(())
}

fn build_allocation(
    parts: Option<usize>,
    percentages: Option<Vec<f64>>,
    edits: &[String],
) -> Result<Allocation, AppError> {
    let mut allocation = match (parts, percentages) {
        (_, Some(shares)) => Allocation::from_shares(shares)?,
        (Some(parts), None) => Allocation::equal(parts)?,
        (None, None) => Allocation::default(),
    };
    for edit in edits {
        let (index, value) = parse_edit(edit)?;
        allocation.edit(index, value)?;
    }
    Ok(allocation)
}

/// `PART=PERCENT` with a 1-based part number, returned as a 0-based index.
fn parse_edit(raw: &str) -> Result<(usize, f64), AppError> {
    let invalid = || AppError::InvalidInput(format!("expected PART=PERCENT, got {:?}", raw));
    let (part, value) = raw.split_once('=').ok_or_else(invalid)?;
    let part: usize = part.trim().parse().map_err(|_| invalid())?;
    let value: f64 = value.trim().parse().map_err(|_| invalid())?;
    if part == 0 {
        return Err(AppError::InvalidInput("parts are numbered from 1".to_string()));
    }
    Ok((part - 1, value))
}

fn print_manifest(manifest: &Manifest<'_>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(manifest)?);
    Ok(())
}
