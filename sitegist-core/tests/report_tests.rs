// Tests for report rendering and file output

use sitegist_core::generate_scan_report;
use sitegist_core::report::{ReportFormat, render_report, save_report};
use sitegist_scanner::{AssetIndex, PageRecord, ScanReport, ScanStats};
use std::fs;

fn sample_report() -> ScanReport {
    ScanReport {
        seed_url: "http://example.com/".to_string(),
        combined_text: "=== Home (http://example.com/)\nscripts: /app.js\nWelcome home"
            .to_string(),
        structure: vec![
            PageRecord {
                url: "http://example.com/".to_string(),
                title: "Home".to_string(),
                scripts: vec!["/app.js".to_string()],
            },
            PageRecord {
                url: "http://example.com/about".to_string(),
                title: "About Us".to_string(),
                scripts: vec![],
            },
        ],
        assets: AssetIndex {
            fonts: vec!["https://fonts.googleapis.com/css2?family=Inter".to_string()],
            icons: vec!["http://example.com/favicon.ico".to_string()],
            images: vec!["http://example.com/hero.jpg".to_string()],
        },
        stats: ScanStats {
            pages: 2,
            buttons: 3,
            links: 12,
            images: 4,
            inputs: 1,
            words: 250,
        },
    }
}

#[test]
fn test_report_format_from_str() {
    assert!(matches!(
        ReportFormat::from_str("text"),
        Some(ReportFormat::Text)
    ));
    assert!(matches!(
        ReportFormat::from_str("JSON"),
        Some(ReportFormat::Json)
    ));
    assert!(matches!(
        ReportFormat::from_str("markdown"),
        Some(ReportFormat::Markdown)
    ));
    assert!(matches!(
        ReportFormat::from_str("md"),
        Some(ReportFormat::Markdown)
    ));
    assert!(ReportFormat::from_str("csv").is_none());
}

#[test]
fn test_render_text_summary() {
    let rendered = render_report(&sample_report(), &ReportFormat::Text);

    assert!(rendered.contains("Scan of http://example.com/"));
    assert!(rendered.contains("Pages scanned: 2"));
    assert!(rendered.contains("Words collected: 250"));
    assert!(rendered.contains("Assets indexed: 3"));
    assert!(rendered.contains("/about  About Us"));
}

#[test]
fn test_render_json_round_trips() {
    let rendered = render_report(&sample_report(), &ReportFormat::Json);

    let parsed: ScanReport = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed.stats.pages, 2);
    assert_eq!(parsed.structure.len(), 2);
    assert_eq!(parsed.structure[1].title, "About Us");
    assert_eq!(parsed.assets.fonts.len(), 1);
}

#[test]
fn test_render_markdown_sections() {
    let rendered = render_report(&sample_report(), &ReportFormat::Markdown);

    assert!(rendered.contains("# Site scan: http://example.com/"));
    assert!(rendered.contains("## Pages"));
    assert!(rendered.contains("**Home** <http://example.com/>"));
    assert!(rendered.contains("## Fonts"));
    assert!(rendered.contains("## Corpus"));
    assert!(rendered.contains("Welcome home"));
}

#[test]
fn test_generate_scan_report_metrics() {
    let rendered = generate_scan_report(&sample_report());

    assert!(rendered.contains("Pages scanned: 2"));
    assert!(rendered.contains("Links seen: 12"));
    assert!(rendered.contains("About Us"));
}

#[test]
fn test_save_report_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("scan.md");

    save_report(&sample_report(), &target, &ReportFormat::Markdown).unwrap();

    let contents = fs::read_to_string(&target).unwrap();
    assert!(contents.contains("# Site scan: http://example.com/"));
}

#[test]
fn test_save_report_missing_directory_errors() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nope").join("scan.txt");

    let result = save_report(&sample_report(), &target, &ReportFormat::Text);
    assert!(result.is_err());
}
