// FofaSift - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading, then logging initialisation
// 3. Reading scan dumps from files or stdin (or the built-in sample)
// 4. Running the query and writing a table, CSV or JSON

mod output;

pub use fofasift::app;
pub use fofasift::core;
pub use fofasift::platform;
pub use fofasift::util;

use clap::Parser;
use platform::config::{AppConfig, OutputFormat};
use std::io::Write;
use std::path::{Path, PathBuf};
use util::error::{ExportError, FofaSiftError};

/// FofaSift - parse, filter and export FOFA host-scan dumps.
///
/// Reads raw FOFA result text (as copied from the web UI), extracts one
/// record per `ip:port` block and prints the filtered, sorted view.
#[derive(Parser, Debug)]
#[command(name = "fofasift", version, about)]
struct Cli {
    /// Scan dump files to parse. Reads stdin when omitted or "-".
    inputs: Vec<PathBuf>,

    /// Case-insensitive search across IP, country, organization, domain and title.
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Keep records whose country contains this text.
    #[arg(short = 'c', long = "country")]
    country: Option<String>,

    /// Keep records with exactly this port.
    #[arg(short = 'p', long = "port")]
    port: Option<String>,

    /// Sort by a record field (ip, port, country, region, city, asn,
    /// organization, date, server, title, protocol, domain, cloud).
    #[arg(short = 'k', long = "sort")]
    sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long = "desc")]
    desc: bool,

    /// Output format: table, csv, csv-strict (embedded quotes doubled) or json.
    #[arg(short = 'f', long = "format", value_parser = parse_output_format)]
    format: Option<OutputFormat>,

    /// Write results to a file instead of stdout. "auto" writes
    /// fofa_data_<date>.csv into the configured export directory.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Load the built-in sample dataset instead of reading input.
    #[arg(long = "sample", conflicts_with = "inputs")]
    sample: bool,

    /// Print summary statistics for the loaded records.
    #[arg(long = "summary")]
    summary: bool,

    /// Use this config.toml instead of the platform default.
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_output_format(name: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_name(name)
        .ok_or_else(|| format!("unknown format '{name}' (expected table, csv, csv-strict or json)"))
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "FofaSift failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> util::error::Result<()> {
    // Config is loaded first so its [logging] level can take effect; the
    // warnings it produced are replayed once the subscriber exists.
    let (app_config, config_warnings) = match cli.config {
        Some(ref path) => platform::config::load_config_strict(path)?,
        None => {
            let paths = platform::config::PlatformPaths::resolve();
            platform::config::load_config(&paths.config_file)
        }
    };

    util::logging::init(cli.debug, app_config.log_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        inputs = cli.inputs.len(),
        "FofaSift starting"
    );

    let mut state = app::state::AppState::new();
    if cli.sample {
        state.load_sample();
    } else {
        let raw_text = platform::fs::read_inputs(&cli.inputs)?;
        if !state.load_text(&raw_text) {
            tracing::warn!("Input is empty; nothing to parse");
        }
    }

    state.options.search_term = cli.search.unwrap_or_default();
    state.options.country = cli.country.unwrap_or_default();
    state.options.port = cli.port.unwrap_or_default();
    state.options.sort_key = cli.sort.as_deref().map(crate::core::sort::SortKey::from_name);
    if let Some(crate::core::sort::SortKey::Unknown(ref name)) = state.options.sort_key {
        tracing::warn!(key = %name, "Unknown sort field; keeping input order");
    }
    state.options.sort_direction = if cli.desc {
        crate::core::sort::SortDirection::Descending
    } else {
        crate::core::sort::SortDirection::Ascending
    };
    state.apply_query();

    // Files are exports: default to CSV there unless a format was requested.
    let format = match (cli.format, &cli.output) {
        (Some(format), _) => format,
        (None, Some(_)) => OutputFormat::Csv,
        (None, None) => app_config.output_format,
    };

    let target = cli
        .output
        .as_deref()
        .map(|path| resolve_output_path(path, format, &app_config));

    let label = target
        .clone()
        .unwrap_or_else(|| PathBuf::from("<stdout>"));
    let rendered = render(&state, format, &label, &app_config)?;

    match target {
        Some(ref path) => {
            platform::fs::write_export(path, &rendered)?;
            tracing::info!(
                path = %path.display(),
                records = state.view.len(),
                "Export written"
            );
            eprintln!("Wrote {} records to {}", state.view.len(), path.display());
        }
        None => write_stdout(&rendered, &label)?,
    }

    if cli.summary {
        let summary = output::render_summary(&state.summary());
        // Keep machine-readable stdout clean.
        if target.is_none() && format == OutputFormat::Table {
            write_stdout(format!("\n{summary}").as_bytes(), &label)?;
        } else {
            eprint!("{summary}");
        }
    }

    Ok(())
}

/// Render the current view in the requested format.
fn render(
    state: &app::state::AppState,
    format: OutputFormat,
    label: &Path,
    app_config: &AppConfig,
) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Table => {
            let table = output::render_table(
                &state.visible_records(),
                state.records.len(),
                app_config.max_title_width,
            );
            buf.extend_from_slice(table.as_bytes());
        }
        OutputFormat::Csv => {
            crate::core::export::export_csv(&state.visible_owned(), &mut buf, label)?;
        }
        OutputFormat::CsvStrict => {
            crate::core::export::export_csv_strict(&state.visible_owned(), &mut buf, label)?;
        }
        OutputFormat::Json => {
            crate::core::export::export_json(&state.visible_owned(), &mut buf, label)?;
        }
    }
    Ok(buf)
}

/// Expand `--output auto` into the dated default file name.
fn resolve_output_path(requested: &Path, format: OutputFormat, app_config: &AppConfig) -> PathBuf {
    if requested.as_os_str() != util::constants::AUTO_OUTPUT_NAME {
        return requested.to_path_buf();
    }

    let today = chrono::Utc::now().date_naive();
    let name = PathBuf::from(crate::core::export::default_export_file_name(today));
    let name = match format {
        OutputFormat::Json => name.with_extension("json"),
        OutputFormat::Table => name.with_extension("txt"),
        OutputFormat::Csv | OutputFormat::CsvStrict => name,
    };

    match app_config.export_dir {
        Some(ref dir) => dir.join(name),
        None => name,
    }
}

fn write_stdout(bytes: &[u8], label: &Path) -> Result<(), FofaSiftError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let io_err = |e| ExportError::Io {
        path: label.to_path_buf(),
        source: e,
    };
    handle.write_all(bytes).map_err(io_err)?;
    if !bytes.ends_with(b"\n") {
        handle.write_all(b"\n").map_err(io_err)?;
    }
    handle.flush().map_err(io_err)?;
    Ok(())
}
