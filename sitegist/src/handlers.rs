use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use sitegist_core::report::{ReportFormat, render_report, save_report};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Parse a seed-URL argument, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    // Try to parse as-is
    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    // Try adding http://
    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    None
}

// Re-export scan types and functions from sitegist-core
pub use sitegist_core::scan::{
    ScanOptions, ScanProgressCallback, execute_scan, extract_url_path, generate_scan_report,
};

pub async fn handle_scan(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let raw_url = sub_matches.get_one::<String>("url").unwrap();
    let max_pages = *sub_matches.get_one::<usize>("max-pages").unwrap();
    let delay_ms = *sub_matches.get_one::<u64>("delay-ms").unwrap();
    let timeout_secs = *sub_matches.get_one::<u64>("timeout").unwrap();
    let output = sub_matches.get_one::<PathBuf>("output");
    let format_raw = sub_matches.get_one::<String>("format").unwrap();

    let Some(seed_url) = parse_url_line(raw_url) else {
        eprintln!("{} '{}' is not a usable URL", "✗".red().bold(), raw_url);
        std::process::exit(1);
    };

    let Some(format) = ReportFormat::from_str(format_raw) else {
        eprintln!("{} unknown report format '{}'", "✗".red().bold(), format_raw);
        std::process::exit(1);
    };

    println!("\nScanning {}", seed_url.as_str().bold());
    println!("Page budget: {}", max_pages);
    println!("Politeness delay: {} ms\n", delay_ms);
    debug!(
        "scan options: budget={} delay={}ms timeout={}s",
        max_pages, delay_ms, timeout_secs
    );

    let options = ScanOptions {
        url: seed_url.clone(),
        max_pages,
        delay_ms,
        timeout_secs,
        show_progress_bar: true,
    };

    let narrate: ScanProgressCallback = Arc::new(|line: String| {
        eprintln!("{}", line.as_str().dimmed());
    });

    match execute_scan(options, Some(narrate)).await {
        Ok(report) => {
            println!("\n{} Scan complete!\n", "✓".green().bold());

            if let Some(path) = output {
                if let Err(e) = write_report_file(&report, path, &format) {
                    eprintln!("{} {:#}", "✗".red().bold(), e);
                    std::process::exit(1);
                }
            } else if matches!(format, ReportFormat::Text) {
                print!("{}", generate_scan_report(&report));
            } else {
                print!("{}", render_report(&report, &format));
            }
        }
        Err(e) => {
            eprintln!("{} Scan failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn write_report_file(
    report: &sitegist_scanner::ScanReport,
    path: &PathBuf,
    format: &ReportFormat,
) -> Result<()> {
    let expanded = shellexpand::tilde(&path.to_string_lossy().into_owned()).into_owned();
    let target = PathBuf::from(expanded);

    save_report(report, &target, format)
        .with_context(|| format!("failed to write report to {}", target.display()))?;

    println!("{} Report saved to {}", "✓".green().bold(), target.display());
    Ok(())
}
