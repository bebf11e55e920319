// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{handle_scan, parse_url_line};

// Re-export scan functionality from sitegist-core
pub use sitegist_core::scan::{
    ScanOptions, ScanProgressCallback, execute_scan, extract_url_path, generate_scan_report,
};
