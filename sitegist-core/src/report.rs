// Report rendering and file output

use crate::scan::extract_url_path;
use serde::{Deserialize, Serialize};
use sitegist_scanner::ScanReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// Render a scan report in the requested format.
pub fn render_report(report: &ScanReport, format: &ReportFormat) -> String {
    match format {
        ReportFormat::Text => render_text(report),
        ReportFormat::Json => {
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        }
        ReportFormat::Markdown => render_markdown(report),
    }
}

/// Render and write a report to disk.
pub fn save_report(
    report: &ScanReport,
    path: &Path,
    format: &ReportFormat,
) -> std::io::Result<()> {
    let rendered = render_report(report, format);
    let mut file = File::create(path)?;
    file.write_all(rendered.as_bytes())?;
    Ok(())
}

fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Scan of {}\n\n", report.seed_url));

    out.push_str("Summary:\n");
    out.push_str(&format!("  Pages scanned: {}\n", report.stats.pages));
    out.push_str(&format!("  Words collected: {}\n", report.stats.words));
    out.push_str(&format!("  Links seen: {}\n", report.stats.links));
    out.push_str(&format!("  Buttons: {}\n", report.stats.buttons));
    out.push_str(&format!("  Inputs: {}\n", report.stats.inputs));
    out.push_str(&format!("  Images: {}\n", report.stats.images));
    out.push_str(&format!("  Assets indexed: {}\n", report.assets.total()));

    out.push_str("\nPages:\n");
    for record in &report.structure {
        out.push_str(&format!(
            "  {}  {}\n",
            extract_url_path(&record.url),
            record.title
        ));
    }

    out
}

fn render_markdown(report: &ScanReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Site scan: {}\n\n", report.seed_url));

    out.push_str("## Summary\n\n");
    out.push_str(&format!("- Pages scanned: {}\n", report.stats.pages));
    out.push_str(&format!("- Words collected: {}\n", report.stats.words));
    out.push_str(&format!("- Links seen: {}\n", report.stats.links));
    out.push_str(&format!(
        "- Buttons: {} / Inputs: {} / Images: {}\n",
        report.stats.buttons, report.stats.inputs, report.stats.images
    ));

    out.push_str("\n## Pages\n\n");
    for record in &report.structure {
        out.push_str(&format!("- **{}** <{}>", record.title, record.url));
        if !record.scripts.is_empty() {
            out.push_str(&format!(" (scripts: {})", record.scripts.join(", ")));
        }
        out.push('\n');
    }

    for (label, urls) in [
        ("Fonts", &report.assets.fonts),
        ("Icons", &report.assets.icons),
        ("Images", &report.assets.images),
    ] {
        if urls.is_empty() {
            continue;
        }
        out.push_str(&format!("\n## {}\n\n", label));
        for url in urls {
            out.push_str(&format!("- {}\n", url));
        }
    }

    if !report.combined_text.is_empty() {
        out.push_str("\n## Corpus\n\n```\n");
        out.push_str(&report.combined_text);
        out.push_str("\n```\n");
    }

    out
}
