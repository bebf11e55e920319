use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitegist_scanner::{Crawler, ScanReport};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Options for configuring a scan operation
pub struct ScanOptions {
    pub url: String,
    pub max_pages: usize,
    pub delay_ms: u64,
    pub timeout_secs: u64,
    pub show_progress_bar: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_pages: 30,
            delay_ms: 300,
            timeout_secs: 5,
            show_progress_bar: true,
        }
    }
}

/// Callback for narrating scan progress to the caller
pub type ScanProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute a scan with the given options.
/// Returns the scan report
pub async fn execute_scan(
    options: ScanOptions,
    progress_callback: Option<ScanProgressCallback>,
) -> Result<ScanReport, String> {
    let ScanOptions {
        url,
        max_pages,
        delay_ms,
        timeout_secs,
        show_progress_bar,
    } = options;

    if let Some(ref callback) = progress_callback {
        callback(format!("Scanning {} (budget: {} pages)", url, max_pages));
    }

    // Set up single progress bar for overall scan progress (only if enabled)
    let progress_bar = if show_progress_bar {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:30.cyan} {pos:>3}% {msg}")
                .unwrap(),
        );
        pb.set_message("starting scan...");
        Some(Arc::new(pb))
    } else {
        None
    };

    // Bridge the crawler's (percent, status) channel onto the bar
    let internal_progress: sitegist_scanner::ProgressCallback = if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        Arc::new(move |percent: usize, status: String| {
            pb_clone.set_position(percent as u64);
            pb_clone.set_message(status);
        })
    } else {
        // No-op callback when the progress bar is disabled
        Arc::new(|_percent: usize, _status: String| {})
    };

    // Abandoned pages are narrated, never fatal
    let failure_callback: sitegist_scanner::FailureCallback = {
        let pb_clone = progress_bar.clone();
        let narrate = progress_callback.clone();
        Arc::new(move |url: String, reason: String| {
            let line = format!("[!] abandoned {}: {}", url, reason);
            if let Some(ref pb) = pb_clone {
                pb.println(&line);
            } else if let Some(ref callback) = narrate {
                callback(line);
            }
        })
    };

    let crawler = Crawler::new()
        .with_timeout(timeout_secs)
        .with_delay(Duration::from_millis(delay_ms))
        .with_progress_callback(internal_progress)
        .with_failure_callback(failure_callback);

    let report = crawler
        .crawl(&url, max_pages)
        .await
        .map_err(|e| format!("Failed to scan {}: {}", url, e))?;

    // Finish progress bar (only if enabled)
    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("scan complete: {} pages", report.stats.pages));
    }

    Ok(report)
}

/// Generate an ANSI-colored screen report from a scan
pub fn generate_scan_report(report: &ScanReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "━".repeat(52)));
    out.push_str(&format!("# Scan of {}\n", report.seed_url.as_str().bold()));
    out.push_str(&format!(
        "  Generated: {}\n\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str("# Summary:\n");
    out.push_str(&format!("  Pages scanned: {}\n", report.stats.pages));
    out.push_str(&format!("  Words collected: {}\n", report.stats.words));
    out.push_str(&format!("  Links seen: {}\n", report.stats.links));
    out.push_str(&format!(
        "  Buttons: {}  Inputs: {}  Images: {}\n",
        report.stats.buttons, report.stats.inputs, report.stats.images
    ));
    out.push_str(&format!(
        "  Assets indexed: {} ({} fonts, {} icons, {} images)\n",
        report.assets.total(),
        report.assets.fonts.len(),
        report.assets.icons.len(),
        report.assets.images.len()
    ));

    out.push_str(&format!("\n{}\n\n", "━".repeat(52)));

    out.push_str("## Pages\n");
    for record in &report.structure {
        let path = extract_url_path(&record.url);
        let mut line = format!("  {} {}", path.as_str().green(), record.title);
        if !record.scripts.is_empty() {
            line.push_str(&format!(" \x1b[90m[{} scripts]\x1b[0m", record.scripts.len()));
        }
        out.push_str(&line);
        out.push('\n');
    }

    if report.assets.total() > 0 {
        out.push_str("\n## Assets\n");
        for (label, urls) in [
            ("fonts", &report.assets.fonts),
            ("icons", &report.assets.icons),
            ("images", &report.assets.images),
        ] {
            if urls.is_empty() {
                continue;
            }
            out.push_str(&format!("  {}:\n", label.cyan()));
            for url in urls {
                out.push_str(&format!("    {}\n", url));
            }
        }
    }

    out
}
