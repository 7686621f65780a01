//! # CLI Module
//!
//! Command-line interface for the photo date watermarker.
//!
//! ## Usage
//! ```bash
//! # Everything on the command line
//! photo-watermark ~/Photos/trip --font-size 40 --color "255 255 255" --position bottom-right
//!
//! # Leave values out to be asked for them
//! photo-watermark ~/Photos/trip
//!
//! # JSON summary for scripting
//! photo-watermark ~/Photos/trip -s 40 -c "0 0 0" -p center --output json
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use photo_date_watermark::core::config::{parse_style, validate_input_dir, StyleInput};
use photo_date_watermark::core::pipeline::{Pipeline, PipelineResult};
use photo_date_watermark::error::{ConfigError, Result};
use photo_date_watermark::events::{Event, EventChannel, FileEvent, ScanEvent};
use std::io::BufRead;
use std::path::PathBuf;
use std::thread;

/// Photo Date Watermark - stamp photos with the day they were taken
#[derive(Parser, Debug)]
#[command(name = "photo-watermark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the photos (asked for if omitted)
    dir: Option<PathBuf>,

    /// Font size in pixels, e.g. 40
    #[arg(short = 's', long)]
    font_size: Option<String>,

    /// Text color as "R G B", e.g. "255 255 255"
    #[arg(short, long)]
    color: Option<String>,

    /// Watermark position: top-left, center or bottom-right
    #[arg(short, long)]
    position: Option<String>,

    /// Font file to use instead of the system fonts
    #[arg(long)]
    font: Option<PathBuf>,

    /// Skip files whose names start with a dot
    #[arg(long)]
    skip_hidden: bool,

    /// Output format for the final summary
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON summary for scripting
    Json,
}

/// Run the CLI
///
/// Fatal errors are printed here as a single line before being returned.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    photo_date_watermark::init_tracing(cli.verbose);

    let term = Term::stdout();
    let result = run_watermark(&term, cli);

    if let Err(ref e) = result {
        term.write_line(&format!("{} {}", style("✗").red().bold(), e))
            .ok();
    }

    result
}

fn run_watermark(term: &Term, cli: Cli) -> Result<()> {
    // The directory is checked before any other question is asked
    let dir = match cli.dir {
        Some(dir) => dir,
        None => PathBuf::from(prompt(term, "Photo directory: ")?),
    };
    let input_dir = validate_input_dir(&dir)?;

    let input = StyleInput {
        font_size: value_or_prompt(term, cli.font_size, "Font size (e.g. 40): ")?,
        color: value_or_prompt(term, cli.color, "Font color as R G B (e.g. 255 255 255): ")?,
        position: value_or_prompt(
            term,
            cli.position,
            "Position (top-left / center / bottom-right): ",
        )?,
        font: cli.font,
    };
    let parsed = parse_style(&input)?;

    if let Some(ref position) = parsed.unrecognized_position {
        term.write_line(&format!(
            "{} Invalid position '{}', defaulting to center",
            style("!").yellow().bold(),
            position
        ))
        .ok();
    }

    let pipeline = Pipeline::builder()
        .input_dir(input_dir)
        .style(parsed.style)
        .include_hidden(!cli.skip_hidden)
        .build()?;

    // Per-file lines go to stdout, unless stdout is reserved for JSON
    let status = match cli.output {
        OutputFormat::Pretty => Term::stdout(),
        OutputFormat::Json => Term::stderr(),
    };

    let (sender, receiver) = EventChannel::new();

    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::File(FileEvent::Saved { output, .. }) => {
                    status
                        .write_line(&format!(
                            "{} Saved: {}",
                            style("✓").green(),
                            output.display()
                        ))
                        .ok();
                }
                Event::File(FileEvent::Skipped { path, reason }) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    status
                        .write_line(&format!(
                            "{} Skipping {}: {}",
                            style("○").dim(),
                            name,
                            reason
                        ))
                        .ok();
                }
                Event::Scan(ScanEvent::Error { path, message }) => {
                    status
                        .write_line(&format!(
                            "{} Could not read {}: {}",
                            style("!").yellow(),
                            path.display(),
                            message
                        ))
                        .ok();
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let result = result?;

    match cli.output {
        OutputFormat::Pretty => print_pretty_results(term, &result),
        OutputFormat::Json => print_json_results(&result),
    }

    Ok(())
}

fn value_or_prompt(
    term: &Term,
    given: Option<String>,
    label: &str,
) -> std::result::Result<String, ConfigError> {
    match given {
        Some(value) => Ok(value),
        None => prompt(term, label),
    }
}

fn prompt(term: &Term, label: &str) -> std::result::Result<String, ConfigError> {
    term.write_str(label).map_err(ConfigError::Prompt)?;

    let line = if term.is_term() {
        term.read_line().map_err(ConfigError::Prompt)?
    } else {
        // Piped answers: console only reads from an attended terminal
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(ConfigError::Prompt)?;
        line
    };

    Ok(line.trim().to_string())
}

fn print_pretty_results(term: &Term, result: &PipelineResult) {
    term.write_line("").ok();
    term.write_line(&format!("{} Done", style("✓").green().bold()))
        .ok();

    term.write_line(&format!(
        "  {} of {} photos watermarked in {:.1}s",
        style(result.saved.len()).cyan(),
        style(result.total_photos).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();

    if !result.skipped.is_empty() {
        term.write_line(&format!(
            "  {} skipped",
            style(result.skipped.len()).yellow()
        ))
        .ok();
    }

    if !result.scan_errors.is_empty() {
        term.write_line(&format!(
            "  {} unreadable entries",
            style(result.scan_errors.len()).yellow()
        ))
        .ok();
    }

    term.write_line(&format!(
        "  Output: {}",
        style(result.output_dir.display()).dim()
    ))
    .ok();
}

fn print_json_results(result: &PipelineResult) {
    let output = serde_json::json!({
        "summary": result.summary(),
        "saved": result.saved.iter().map(|s| {
            serde_json::json!({
                "source": s.source,
                "output": s.output,
                "date": s.date.to_string(),
            })
        }).collect::<Vec<_>>(),
        "skipped": result.skipped.iter().map(|s| {
            serde_json::json!({
                "path": s.path,
                "reason": s.reason.to_string(),
            })
        }).collect::<Vec<_>>(),
        "scan_errors": result.scan_errors,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode summary: {}", e),
    }
}
