use crate::error::{Result, ScanError};
use crate::extract::PageExtract;
use crate::result::{AssetIndex, PageRecord, ScanReport, ScanStats};
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Callback for reporting scan progress: percentage (0-100) plus a status line.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Callback invoked with (url, reason) each time a page is abandoned.
pub type FailureCallback = Arc<dyn Fn(String, String) + Send + Sync>;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_DELAY_MS: u64 = 300;

/// Characters of visible text carried into the combined corpus per page.
const TEXT_BLOCK_LIMIT: usize = 4000;
/// Script sources kept in a page's structure record.
const STRUCTURE_SCRIPT_LIMIT: usize = 3;

pub struct Crawler {
    user_agent: String,
    timeout: Duration,
    delay: Duration,
    progress_callback: Option<ProgressCallback>,
    failure_callback: Option<FailureCallback>,
}

impl Crawler {
    pub fn new() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            progress_callback: None,
            failure_callback: None,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout = Duration::from_secs(timeout_secs);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Politeness delay between fetch attempts. Not a correctness knob.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_failure_callback(mut self, callback: FailureCallback) -> Self {
        self.failure_callback = Some(callback);
        self
    }

    /// Breadth-first scan of same-host pages starting at `seed_url`, stopping
    /// once `max_pages` pages have been processed or the frontier runs dry.
    ///
    /// Only a malformed seed URL is an error. Per-page failures (network,
    /// non-success status, unreadable body) abandon that single URL and the
    /// scan carries on, so the returned report may be partial or empty.
    pub async fn crawl(&self, seed_url: &str, max_pages: usize) -> Result<ScanReport> {
        info!("Starting scan of {} (budget: {} pages)", seed_url, max_pages);

        let seed = Url::parse(seed_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", seed_url, e)))?;
        let scope_host = seed
            .host_str()
            .ok_or_else(|| ScanError::InvalidUrl(format!("{} has no host", seed_url)))?
            .to_string();

        // One client per scan: connections are reused across requests, but
        // nothing outlives the invocation.
        let client = Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        let mut frontier: VecDeque<String> = VecDeque::new();
        // Mirror of the frontier's contents; an entry leaves when popped, so
        // a URL that failed its fetch may be re-queued if rediscovered.
        let mut queued: HashSet<String> = HashSet::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut structure: Vec<PageRecord> = Vec::new();
        let mut stats = ScanStats::default();
        let mut fonts: HashSet<String> = HashSet::new();
        let mut icons: HashSet<String> = HashSet::new();
        let mut images: HashSet<String> = HashSet::new();
        let mut text_blocks: Vec<String> = Vec::new();

        frontier.push_back(seed.to_string());
        queued.insert(seed.to_string());

        let mut processed = 0usize;

        while processed < max_pages {
            let Some(url) = frontier.pop_front() else {
                break;
            };
            queued.remove(&url);

            self.report_progress(
                (100 * processed / max_pages.max(1)).min(99),
                format!("scanning {}", url),
            );

            if visited.contains(&url) {
                continue;
            }

            // Frontier entries are produced by Url::to_string, so this parse
            // only fails for a hand-fed frontier; treat it like a bad page.
            let Ok(page_url) = Url::parse(&url) else {
                continue;
            };

            debug!("Fetching {}", url);
            let body = match self.fetch_page(&client, &url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Abandoning {}: {}", url, e);
                    self.report_failure(&url, &e.to_string());
                    tokio::time::sleep(self.delay).await;
                    continue;
                }
            };

            let page = PageExtract::from_html(&body, &page_url);

            stats.pages += 1;
            stats.buttons += page.buttons;
            stats.links += page.anchors;
            stats.images += page.image_count;
            stats.inputs += page.inputs;
            stats.words += page.words;

            structure.push(PageRecord {
                url: url.clone(),
                title: page.title.clone(),
                scripts: page
                    .scripts
                    .iter()
                    .take(STRUCTURE_SCRIPT_LIMIT)
                    .cloned()
                    .collect(),
            });

            fonts.extend(page.fonts.iter().cloned());
            icons.extend(page.icons.iter().cloned());
            images.extend(page.image_assets.iter().cloned());

            text_blocks.push(format_text_block(&url, &page));

            visited.insert(url.clone());
            processed += 1;

            for link in &page.links {
                if link.host_str() != Some(scope_host.as_str()) {
                    continue;
                }
                let candidate = link.to_string();
                if !visited.contains(&candidate) && !queued.contains(&candidate) {
                    queued.insert(candidate.clone());
                    frontier.push_back(candidate);
                }
            }

            tokio::time::sleep(self.delay).await;
        }

        info!("Scan complete: {} pages, {} words", stats.pages, stats.words);
        self.report_progress(100, format!("scan complete: {} pages", processed));

        Ok(ScanReport {
            seed_url: seed.to_string(),
            combined_text: text_blocks.join("\n\n"),
            structure,
            assets: AssetIndex::from_sets(fonts, icons, images),
            stats,
        })
    }

    async fn fetch_page(&self, client: &Client, url: &str) -> Result<String> {
        let response = client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    fn report_progress(&self, percent: usize, status: String) {
        if let Some(ref callback) = self.progress_callback {
            callback(percent, status);
        }
    }

    fn report_failure(&self, url: &str, reason: &str) {
        if let Some(ref callback) = self.failure_callback {
            callback(url.to_string(), reason.to_string());
        }
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

/// One page's contribution to the combined corpus: title, address, detected
/// scripts, and the first `TEXT_BLOCK_LIMIT` characters of visible text.
fn format_text_block(url: &str, page: &PageExtract) -> String {
    let scripts = if page.scripts.is_empty() {
        "none".to_string()
    } else {
        page.scripts.join(", ")
    };
    let body: String = page.text.chars().take(TEXT_BLOCK_LIMIT).collect();
    format!("=== {} ({})\nscripts: {}\n{}", page.title, url, scripts, body)
}
