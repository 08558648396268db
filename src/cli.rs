//! CLI definition and dispatch.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::FixedOffset;
use clap::{Parser, Subcommand};

use crate::adapters::export::{default_export_name, export_table};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_source_adapter::JsonExportSource;
use crate::domain::correlate::fetch_correlated_hits;
use crate::domain::error::HitscanError;
use crate::domain::hit::CorrelatedHit;
use crate::domain::metrics::format_duration;
use crate::domain::patterns;
use crate::domain::report::{self, Summary};
use crate::domain::settings::ScanSettings;

#[derive(Parser, Debug)]
#[command(name = "hitscan", about = "Target 4 hit tracker for signal channels")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a date window and report correlated Target 4 hits
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        /// Override [window] start_date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// Override [window] end_date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// Override [report] sort_by (hit_time, gain, duration)
        #[arg(long)]
        sort_by: Option<String>,
        /// Override [report] order (ascending, descending)
        #[arg(long)]
        order: Option<String>,
        /// Export the table; without a value the file name is derived from
        /// the window
        #[arg(short, long, num_args = 0..=1)]
        output: Option<Option<PathBuf>>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run both pattern classifiers over one message body
    Inspect {
        /// Read the message body from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Message body given inline
        text: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scan {
            config,
            start_date,
            end_date,
            sort_by,
            order,
            output,
        } => run_scan(
            &config,
            start_date.as_deref(),
            end_date.as_deref(),
            sort_by.as_deref(),
            order.as_deref(),
            output,
        ),
        Command::Validate { config } => run_validate(&config),
        Command::Inspect { file, text } => run_inspect(file.as_ref(), text.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = HitscanError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_scan(
    config_path: &PathBuf,
    start_date: Option<&str>,
    end_date: Option<&str>,
    sort_by: Option<&str>,
    order: Option<&str>,
    output: Option<Option<PathBuf>>,
) -> ExitCode {
    // Stage 1: Load config and build settings
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let mut settings = match ScanSettings::from_config(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 2: Apply CLI overrides
    if let Err(e) = settings.override_dates(start_date, end_date) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = settings.override_sort(sort_by, order) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Scan the window
    eprintln!(
        "Scanning channel {} from {} to {} ({})",
        settings.channel_id, settings.start_date, settings.end_date, settings.utc_offset
    );
    let window = settings.window();
    let mut source = JsonExportSource::new(settings.source_path.clone(), settings.channel_id);
    let mut hits = match fetch_correlated_hits(&mut source, &window) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if hits.is_empty() {
        eprintln!("No Target 4 hits found in the selected date range.");
        return ExitCode::SUCCESS;
    }

    // Stage 4: Order and report
    report::sort_hits(&mut hits, settings.sort_key, settings.sort_direction);
    print_summary(&hits);
    eprintln!(
        "\nSorted by {} {}",
        settings.sort_key, settings.sort_direction
    );
    print_table(&hits, settings.utc_offset);

    // Stage 5: Export
    if let Some(target) = output {
        let path = target
            .unwrap_or_else(|| default_export_name(settings.start_date, settings.end_date));
        let rows = report::export_rows(&hits, settings.utc_offset);
        match export_table(&rows, &path) {
            Ok(written) => {
                eprintln!("\nExported {} rows to {}", rows.len(), written.display())
            }
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_summary(hits: &[CorrelatedHit]) {
    let summary = match Summary::compute(hits) {
        Some(s) => s,
        None => return,
    };

    eprintln!("\n=== Summary ===");
    eprintln!("Total Hits:       {}", summary.total_hits);
    eprintln!("Avg Gain (Top 5): {:.2}%", summary.top_avg_gain);
    eprintln!(
        "Avg Duration:     {}",
        format_duration(summary.avg_duration_minutes)
    );

    eprintln!("\n=== Top 5 Gainers ===");
    for hit in report::top_gainers(hits) {
        eprintln!("  {}: {:.2}%", hit.pair_label(), hit.gain_percent);
    }

    eprintln!("\n=== Fastest 5 Hits ===");
    for hit in report::fastest_hits(hits) {
        eprintln!(
            "  {}: {}",
            hit.pair_label(),
            format_duration(hit.duration_minutes)
        );
    }
}

fn print_table(hits: &[CorrelatedHit], offset: FixedOffset) {
    println!(
        "{:<14} {:>12} {:>12} {:>10} {:>10} {:>12} {:>12}",
        "Pair", "Entry", "Target 4", "Gain %", "Duration", "Signal Time", "Hit Time"
    );
    for row in report::display_rows(hits, offset) {
        println!(
            "{:<14} {:>12} {:>12} {:>10} {:>10} {:>12} {:>12}",
            row.pair, row.entry, row.target4, row.gain, row.duration, row.signal_time, row.hit_time
        );
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match ScanSettings::from_config(&adapter) {
        Ok(settings) => {
            eprintln!("\nSource:   {}", settings.source_path.display());
            eprintln!("Channel:  {}", settings.channel_id);
            eprintln!(
                "Window:   {} to {} ({})",
                settings.start_date, settings.end_date, settings.utc_offset
            );
            eprintln!(
                "Sorting:  {} {}",
                settings.sort_key, settings.sort_direction
            );
            eprintln!("\nConfiguration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_inspect(file: Option<&PathBuf>, text: Option<&str>) -> ExitCode {
    let body = match (file, text) {
        (Some(path), _) => match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                let err = HitscanError::Io(e);
                eprintln!("error: {err}");
                return (&err).into();
            }
        },
        (None, Some(t)) => t.to_string(),
        (None, None) => {
            eprintln!("error: provide a message body inline or via --file");
            return ExitCode::from(2);
        }
    };

    match patterns::parse_signal(&body) {
        Some(signal) => println!(
            "signal post: pair={} entry={} target4={}",
            signal.pair.as_deref().unwrap_or("Unknown"),
            signal.entry_price,
            signal.target4_price
        ),
        None => println!("signal post: no"),
    }

    match patterns::detect_hit(&body) {
        Some(notice) => match notice.override_price {
            Some(price) => println!("hit notice: yes (price {price})"),
            None => println!("hit notice: yes"),
        },
        None => println!("hit notice: no"),
    }

    ExitCode::SUCCESS
}
