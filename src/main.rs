use anyhow::Context;
use clap::Parser;
use colored::*;
use ebird_parser::cli::Args;
use ebird_parser::{ObservationParser, ObservationSummary, ParseSummary, SummaryReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::process;
use std::sync::Arc;
use std::time::Duration;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    if let Err(e) = setup_logging(&args) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = run(&args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, stopping...");
                Err(anyhow::anyhow!("Parsing interrupted by user"))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let collector = Arc::new(ObservationSummary::new());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} observations {msg}")
            .context("Invalid progress template")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    if args.quiet {
        spinner.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let sink = Arc::clone(&collector);
    let progress = spinner.clone();
    let mut parser = ObservationParser::new(args.parser_config());
    let summary = parser
        .parse(&args.csv_path, move |row| {
            sink.record(&row);
            progress.inc(1);
            Ok(())
        })
        .await;
    spinner.finish_and_clear();

    let summary = summary.with_context(|| format!("Failed to parse {}", args.csv_path.display()))?;
    print_summary(&summary, &collector.report(args.top));
    Ok(())
}

/// Set up structured logging on stderr
fn setup_logging(args: &Args) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ebird_parser={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Logging already initialized")?;

    tracing::debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn print_summary(summary: &ParseSummary, report: &SummaryReport) {
    println!("\n{}", "Summary".bright_green().bold());
    println!(
        "  {} {} ({} mode, sort: {})",
        "Observations:".bright_cyan(),
        summary.rows_processed.to_string().bright_white().bold(),
        summary.dispatch_mode,
        summary.pre_sort
    );
    println!(
        "  {} {}",
        "Distinct observations:".bright_cyan(),
        report.distinct_observations
    );
    println!(
        "  {} {} ({} complete)",
        "Checklists:".bright_cyan(),
        report.checklists,
        report.complete_checklists
    );
    println!("  {} {}", "Species:".bright_cyan(), report.species);

    if let (Some(first), Some(last)) = (report.first_seen, report.last_seen) {
        println!("  {} {} to {}", "Date range:".bright_cyan(), first, last);
    }

    if !report.top_species.is_empty() {
        println!("  {}", "Most reported:".bright_cyan());
        for (name, count) in &report.top_species {
            println!("    {}: {}", name, count);
        }
    }

    println!(
        "  {} {:.2}s ({:.0} rows/s)",
        "Time elapsed:".bright_cyan(),
        summary.elapsed.as_secs_f64(),
        summary.rows_per_second()
    );
}
