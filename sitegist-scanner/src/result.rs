use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-page structure record: the title plus the first few script sources,
/// kept in discovery order across the scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub scripts: Vec<String>,
}

/// Aggregate counters accumulated over every successfully scanned page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub pages: usize,
    pub buttons: usize,
    pub links: usize,
    pub images: usize,
    pub inputs: usize,
    pub words: usize,
}

/// Deduplicated absolute asset URLs discovered across the whole scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetIndex {
    pub fonts: Vec<String>,
    pub icons: Vec<String>,
    pub images: Vec<String>,
}

impl AssetIndex {
    /// Collapse the scan-time sets into sorted sequences.
    pub fn from_sets(
        fonts: HashSet<String>,
        icons: HashSet<String>,
        images: HashSet<String>,
    ) -> Self {
        fn ordered(set: HashSet<String>) -> Vec<String> {
            let mut items: Vec<String> = set.into_iter().collect();
            items.sort();
            items
        }

        Self {
            fonts: ordered(fonts),
            icons: ordered(icons),
            images: ordered(images),
        }
    }

    pub fn total(&self) -> usize {
        self.fonts.len() + self.icons.len() + self.images.len()
    }
}

/// Everything one scan invocation produces. Owned entirely by the caller;
/// the crawler keeps no state between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub seed_url: String,
    pub combined_text: String,
    pub structure: Vec<PageRecord>,
    pub assets: AssetIndex,
    pub stats: ScanStats,
}

impl ScanReport {
    /// Look up the structure record for a URL, if that page was scanned.
    pub fn page(&self, url: &str) -> Option<&PageRecord> {
        self.structure.iter().find(|p| p.url == url)
    }
}
