// rcheck - match event roster CSVs against a reference registry

mod exit_codes;
mod summary;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use rostercheck_engine::config::DEFAULT_LASTNAME_THRESHOLD;
use rostercheck_engine::{
    compute_summary, match_records, MatchConfig, MatchResult, MatchSummary, Person,
};
use rostercheck_io::{read_persons, write_csv_report, write_html_report};

use exit_codes::{EXIT_INGEST, EXIT_RUNTIME, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "rcheck")]
#[command(about = "Match event roster CSVs against a reference registry")]
#[command(version)]
#[command(after_help = "\
Examples:
  rcheck --ref registry.csv --event evc2025.csv --output report.csv
  rcheck --ref registry.csv --event evc2025.csv --output report.csv --html --summary
  rcheck --ref registry.csv --event evc2025.csv --output report.csv --json
  rcheck --ref registry.csv --event-dir events/ --output-dir reports/")]
struct Cli {
    /// Reference registry CSV file
    #[arg(long = "ref", value_name = "FILE")]
    reference: PathBuf,

    /// Event CSV file to match
    #[arg(long, value_name = "FILE")]
    event: Option<PathBuf>,

    /// Directory of event CSV files (batch mode)
    #[arg(long, value_name = "DIR", conflicts_with = "event")]
    event_dir: Option<PathBuf>,

    /// Report output path (CSV)
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Report output directory (batch mode)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Additionally write an HTML report next to each CSV report
    #[arg(long)]
    html: bool,

    /// Print a console summary per event file
    #[arg(long)]
    summary: bool,

    /// Print the full report as JSON to stdout (single-event mode)
    #[arg(long, conflicts_with = "summary")]
    json: bool,

    /// Fuzzy last-name similarity threshold
    #[arg(long, value_name = "F", default_value_t = DEFAULT_LASTNAME_THRESHOLD)]
    fuzzy_threshold: f64,
}

struct CliError {
    code: u8,
    message: String,
    hint: Option<String>,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError { code, message: message.into(), hint: None }
}

fn usage_err(message: impl Into<String>, hint: impl Into<String>) -> CliError {
    CliError { code: EXIT_USAGE, message: message.into(), hint: Some(hint.into()) }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.event.is_none() && cli.event_dir.is_none() {
        return Err(usage_err(
            "either --event or --event-dir is required",
            "pass --event FILE for one roster or --event-dir DIR for a batch",
        ));
    }
    if cli.event.is_some() && cli.output.is_none() {
        return Err(usage_err("--output is required with --event", "pass --output FILE"));
    }
    if cli.event_dir.is_some() && cli.output_dir.is_none() {
        return Err(usage_err("--output-dir is required with --event-dir", "pass --output-dir DIR"));
    }
    if cli.json && cli.event.is_none() {
        return Err(usage_err(
            "--json is only available in single-event mode",
            "pass --event FILE instead of --event-dir",
        ));
    }

    let config = MatchConfig::with_lastname_threshold(cli.fuzzy_threshold);
    config.validate().map_err(|e| usage_err(e.to_string(), "pass a value between 0.0 and 1.0"))?;

    let reference =
        read_persons(&cli.reference).map_err(|e| cli_err(EXIT_INGEST, e.to_string()))?;

    match (&cli.event, &cli.event_dir, &cli.output, &cli.output_dir) {
        (Some(event), _, Some(output), _) => {
            process_event(&reference, event, output, &config, &cli)
        }
        (_, Some(event_dir), _, Some(output_dir)) => {
            process_batch(&reference, event_dir, output_dir, &config, &cli)
        }
        // The guards above make the remaining combinations unreachable.
        _ => Err(usage_err("invalid argument combination", "see --help")),
    }
}

fn process_event(
    reference: &[Person],
    event_path: &Path,
    output_path: &Path,
    config: &MatchConfig,
    cli: &Cli,
) -> Result<(), CliError> {
    let events = read_persons(event_path).map_err(|e| cli_err(EXIT_INGEST, e.to_string()))?;
    let results = match_records(reference, &events, config);

    write_csv_report(&results, output_path).map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))?;

    let event_name = event_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if cli.html {
        let html_path = output_path.with_extension("html");
        write_html_report(&results, &html_path, &event_name)
            .map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))?;
    }

    if cli.summary {
        summary::print_summary(&compute_summary(&results), &event_name);
    }

    if cli.json {
        let report = MatchReport {
            meta: ReportMeta {
                event: &event_name,
                engine_version: env!("CARGO_PKG_VERSION"),
                run_at: chrono::Utc::now().to_rfc3339(),
                lastname_threshold: config.lastname_threshold,
            },
            summary: compute_summary(&results),
            results: &results,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| cli_err(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    Ok(())
}

fn process_batch(
    reference: &[Person],
    event_dir: &Path,
    output_dir: &Path,
    config: &MatchConfig,
    cli: &Cli,
) -> Result<(), CliError> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        cli_err(EXIT_RUNTIME, format!("cannot create {}: {e}", output_dir.display()))
    })?;

    let event_files = collect_event_files(event_dir, &cli.reference)?;
    if event_files.is_empty() {
        log::warn!("no event CSV files found in {}", event_dir.display());
        return Ok(());
    }

    for event_path in event_files {
        let stem = event_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output_path = output_dir.join(format!("report_{stem}.csv"));
        log::info!("processing {}", event_path.display());
        process_event(reference, &event_path, &output_path, config, cli)?;
    }

    Ok(())
}

/// Event files in a batch directory: `.csv`/`.tsv`, sorted by name, with
/// the reference file itself excluded.
fn collect_event_files(event_dir: &Path, reference: &Path) -> Result<Vec<PathBuf>, CliError> {
    let entries = std::fs::read_dir(event_dir).map_err(|e| {
        cli_err(EXIT_INGEST, format!("cannot read {}: {e}", event_dir.display()))
    })?;

    let reference_canonical = reference.canonicalize().ok();

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv") || ext.eq_ignore_ascii_case("tsv"))
                .unwrap_or(false)
        })
        .filter(|path| path.canonicalize().ok() != reference_canonical)
        .collect();

    files.sort();
    Ok(files)
}

#[derive(serde::Serialize)]
struct ReportMeta<'a> {
    event: &'a str,
    engine_version: &'a str,
    run_at: String,
    lastname_threshold: f64,
}

#[derive(serde::Serialize)]
struct MatchReport<'a> {
    meta: ReportMeta<'a>,
    summary: MatchSummary,
    results: &'a [MatchResult],
}
