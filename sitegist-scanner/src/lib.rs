pub mod crawler;
pub mod error;
pub mod extract;
pub mod result;

pub use crawler::{Crawler, FailureCallback, ProgressCallback};
pub use error::ScanError;
pub use result::{AssetIndex, PageRecord, ScanReport, ScanStats};
