//! Command-line front end for character-sheet extraction.
//!
//! Writes JSON to stdout or to `--output`; diagnostics go to stderr and are
//! controlled through `RUST_LOG` (default `warn`).
//!
//! # Usage
//!
//! ```sh
//! charsheet characters "P&P V2.ods" -o characters.json
//! charsheet matrix "Spielleiter-Infos.ods"
//! charsheet sheets "P&P V2.ods"
//! charsheet inspect "P&P V2.ods" Georg
//! charsheet --config layout.yaml characters sheet.fods
//! ```

use anyhow::{Context, Result, bail};
use charsheet::catalog::SheetCatalog;
use charsheet::{
    ExtractConfig, Spreadsheet, extract_alignment_matrix, extract_characters, inspect_sheet,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Extract character records from OpenDocument workbooks
#[derive(Parser, Debug)]
#[command(name = "charsheet", version)]
struct Args {
    /// YAML file overriding the default sheet layout
    #[arg(long, global = true, value_name = "YAML")]
    config: Option<PathBuf>,

    /// Write JSON here instead of stdout
    #[arg(short, long, global = true, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract every character, merging revision sheets over their base
    Characters {
        /// Workbook (.ods or .fods)
        file: PathBuf,
    },
    /// Extract the alignment matrix
    Matrix {
        /// Workbook (.ods or .fods)
        file: PathBuf,

        /// Sheet holding the matrix (default from the configuration)
        #[arg(long)]
        sheet: Option<String>,
    },
    /// List all sheets with their roles
    Sheets {
        /// Workbook (.ods or .fods)
        file: PathBuf,
    },
    /// Show the rows of a sheet that look like they carry data
    Inspect {
        /// Workbook (.ods or .fods)
        file: PathBuf,

        /// Sheet to inspect
        sheet: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ExtractConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => ExtractConfig::default(),
    };

    match &args.command {
        Command::Characters { file } => {
            let spreadsheet = open(file)?;
            let records = extract_characters(&spreadsheet, &config)?;
            write_json(args.output.as_deref(), &records)
        },
        Command::Matrix { file, sheet } => {
            let spreadsheet = open(file)?;
            let matrix = extract_alignment_matrix(&spreadsheet, &config, sheet.as_deref());
            let Some(matrix) = matrix else {
                bail!(
                    "sheet '{}' not found in {}",
                    sheet.as_deref().unwrap_or(&config.matrix.sheet),
                    file.display()
                );
            };
            write_json(args.output.as_deref(), &matrix)
        },
        Command::Sheets { file } => {
            let spreadsheet = open(file)?;
            let catalog = SheetCatalog::from_spreadsheet(&spreadsheet, &config.catalog);
            write_json(args.output.as_deref(), catalog.sheets())
        },
        Command::Inspect { file, sheet } => {
            let spreadsheet = open(file)?;
            let Some(rows) = inspect_sheet(&spreadsheet, &config, sheet)? else {
                bail!("sheet '{}' not found in {}", sheet, file.display());
            };
            write_json(args.output.as_deref(), &rows)
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open(path: &Path) -> Result<Spreadsheet> {
    Spreadsheet::open(path).with_context(|| format!("failed to open {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(output: Option<&Path>, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        },
        None => std::io::stdout().write_all(json.as_bytes())?,
    }
    Ok(())
}
