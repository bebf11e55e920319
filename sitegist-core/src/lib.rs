pub mod report;
pub mod scan;

pub use scan::{
    ScanOptions, ScanProgressCallback, execute_scan, extract_url_path, generate_scan_report,
};

/// Printed by the CLI unless --quiet is set.
pub fn print_banner() {
    println!(
        r#"
     _ _                  _     _
 ___(_) |_ ___  __ _  ___(_)___| |_
/ __| | __/ _ \/ _` |/ _ \ / __| __|
\__ \ | ||  __/ (_| |  __/ \__ \ |_
|___/_|\__\___|\__, |\___|_|___/\__|
               |___/  v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
