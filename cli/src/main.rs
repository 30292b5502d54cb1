use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use iiif_downgrade_core::{convert, ConvertOptions, Diagnostic};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "iiif-downgrade")]
#[command(about = "Convert IIIF Presentation 3 manifests into Presentation 2 manifests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Presentation 3 manifest to Presentation 2
    Convert {
        /// Input manifest: a file path, `-` for stdin, or an http(s) URL
        input: String,

        /// Output manifest file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Publish the v2 manifest under this identifier instead of the source id
        #[arg(long)]
        manifest_id: Option<String>,

        /// Write diagnostics as JSON to this file instead of printing them
        #[arg(long)]
        diagnostics: Option<PathBuf>,

        /// Exit with an error if the conversion produced any diagnostic
        #[arg(long)]
        deny_warnings: bool,

        /// Timeout in seconds when fetching a remote manifest
        #[arg(long, default_value_t = 30)]
        timeout: u64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            manifest_id,
            diagnostics: diagnostics_path,
            deny_warnings,
            timeout,
            format,
        } => {
            let manifest = load_manifest(&input, Duration::from_secs(timeout))?;

            let options = ConvertOptions { manifest_id };

            let result = convert(&manifest, &options)
                .map_err(|e| anyhow::Error::from(e).context("Conversion failed"))?;

            write_json(&result.manifest, output.as_ref(), format)?;

            match diagnostics_path {
                Some(path) => write_json(&result.diagnostics, Some(&path), format)?,
                None => report(&result.diagnostics),
            }

            if deny_warnings && !result.diagnostics.is_empty() {
                anyhow::bail!(
                    "{} diagnostic(s) raised and --deny-warnings is set",
                    result.diagnostics.len()
                );
            }
        }
    }

    Ok(())
}

/// Read the input manifest from a file, stdin, or a URL.
fn load_manifest(input: &str, timeout: Duration) -> Result<serde_json::Value> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read manifest from stdin")?;
        return serde_json::from_str(&text).context("Failed to parse manifest from stdin");
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        return fetch_manifest(input, timeout);
    }

    let file =
        File::open(input).with_context(|| format!("Failed to open input file: {input}"))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse manifest from: {input}"))
}

fn fetch_manifest(url: &str, timeout: Duration) -> Result<serde_json::Value> {
    tracing::debug!(url, "fetching remote manifest");

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/ld+json, application/json")
        .send()
        .with_context(|| format!("HTTP request failed: {url}"))?
        .error_for_status()
        .with_context(|| format!("HTTP error fetching: {url}"))?;

    let text = response
        .text()
        .with_context(|| format!("Failed to read response from: {url}"))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse manifest from: {url}"))
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!(
            "Warning: {} ({})",
            diagnostic.message, diagnostic.resource_id
        );
    }
}

fn write_json<T: serde::Serialize>(
    val: &T,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
