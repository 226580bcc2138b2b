use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use invoice_to_csv::{
    ExtractOptions, ExtractionReport, LineEnding, PageSelection, QualityMode, extract_pdf_to_csv,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "invoice2csv",
    version,
    about = "Extract invoice header and table fields from a PDF into CSV"
)]
struct Cli {
    /// Input PDF path.
    #[arg(short, long, default_value = "invoice.pdf")]
    input: PathBuf,

    /// Output CSV path.
    #[arg(short, long, default_value = "invoice_data.csv")]
    output: PathBuf,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Output delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Record terminator: crlf or lf.
    #[arg(long, default_value = "crlf")]
    line_ending: String,

    /// Fail when header values do not pair up or the last table row is short.
    #[arg(long, conflicts_with = "skip_partial")]
    strict: bool,

    /// Drop a short last table row instead of writing it.
    #[arg(long, conflicts_with = "strict")]
    skip_partial: bool,

    /// Print the extraction report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(cli: &Cli) -> Result<ExtractOptions> {
    let pages = cli
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid page selection: {error}"))
        .context("failed to parse --pages")?;

    let line_ending = LineEnding::from_str(&cli.line_ending)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --line-ending")?;

    if !cli.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }

    let quality_mode = if cli.strict {
        QualityMode::Strict
    } else if cli.skip_partial {
        QualityMode::SkipPartial
    } else {
        QualityMode::BestEffort
    };

    Ok(ExtractOptions {
        pages,
        delimiter: u8::try_from(cli.delimiter).context("delimiter must fit in one byte")?,
        line_ending,
        quality_mode,
    })
}

fn log_report(report: &ExtractionReport, verbose: bool) {
    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!(
                "  - {:?} value={:?} row_len={:?}: {}",
                warning.code, warning.value, warning.row_len, warning.message
            );
        }
    }
}

fn run(cli: &Cli) -> Result<ExtractionReport> {
    let options = parse_options(cli)?;
    extract_pdf_to_csv(&cli.input, &cli.output, &options).with_context(|| {
        format!(
            "failed to convert '{}' into '{}'",
            cli.input.display(),
            cli.output.display()
        )
    })
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("invoice_to_csv=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) => {
            log_report(&report, cli.verbose);
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(error) => {
                        eprintln!("error: failed to serialize report: {error}");
                        return ExitCode::from(1);
                    }
                }
            }
            if report.row_count() > 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
