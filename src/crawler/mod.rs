pub mod search;
pub mod validate;

pub use validate::is_valid_listing_url;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    classifier::RelevanceRules,
    config::CrawlTarget,
    extractor::extract_response,
    fetcher::{Fetcher, Pacer},
    notifier::{Notify, NotifyError},
};

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Counters for one pass over the site/page matrix.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_fetched: usize,
    pub pages_skipped: usize,
    pub listings_checked: usize,
    pub matches: usize,
    pub invalid_urls: usize,
    pub notifications_sent: usize,
}

/// Walks every site root and category page in order, one request at a time.
pub struct Crawler {
    target: CrawlTarget,
    fetcher: Fetcher,
    pacer: Pacer,
    rules: RelevanceRules,
    notifier: Option<Box<dyn Notify>>,
}

impl Crawler {
    pub fn new(target: CrawlTarget, fetcher: Fetcher, rules: RelevanceRules) -> Self {
        let pacer = Pacer::new(target.fast);
        Self {
            target,
            fetcher,
            pacer,
            rules,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notify>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Crawl the whole matrix. Only a notification failure stops the run
    /// early; fetch and URL problems skip the affected page or row.
    pub async fn run(&self) -> Result<CrawlSummary, CrawlError> {
        let mut summary = CrawlSummary::default();
        for site_root in &self.target.site_roots {
            for page in &self.target.pages {
                self.crawl_page(site_root, page, &mut summary).await?;
            }
        }
        info!(
            "done: {} pages fetched, {} skipped, {} listings checked, {} matches",
            summary.pages_fetched, summary.pages_skipped, summary.listings_checked, summary.matches
        );
        Ok(summary)
    }

    async fn crawl_page(
        &self,
        site_root: &str,
        page: &str,
        summary: &mut CrawlSummary,
    ) -> Result<(), CrawlError> {
        let search_url = self.target.search_url(site_root, page);
        debug!("checking {}", search_url);

        let fetched = self.fetcher.fetch(&search_url).await;
        self.pacer.pause().await;

        let response = match fetched {
            Ok(response) if response.is_ok() => response,
            Ok(response) => {
                warn!("Error: {}", response.status.as_u16());
                summary.pages_skipped += 1;
                return Ok(());
            }
            Err(e) => {
                warn!("Error: {}", e);
                summary.pages_skipped += 1;
                return Ok(());
            }
        };
        summary.pages_fetched += 1;

        // Every row advances the counter, but only a valid row can end the
        // page: up to max + 1 valid rows are handled.
        let mut counter = 0usize;
        for link in search::row_links(&response.body_utf8) {
            counter += 1;
            if !self.process_row(site_root, &search_url, link, summary).await? {
                continue;
            }
            if counter > self.target.max_per_page {
                break;
            }
        }
        Ok(())
    }

    /// Returns `false` when the row was skipped for a missing or malformed link.

    async fn process_row(
        &self,
        site_root: &str,
        search_url: &str,
        link: Option<String>,
        summary: &mut CrawlSummary,
    ) -> Result<bool, CrawlError> {
        let Some(link) = link else {
            error!("bad URL: row without a link on {}", search_url);
            summary.invalid_urls += 1;
            return Ok(false);
        };

        let url = format!("{}{}", site_root, link);
        if !is_valid_listing_url(&url) {
            error!("bad URL: {}", url);
            summary.invalid_urls += 1;
            return Ok(false);
        }
        info!("{}", url);

        let fetched = self.fetcher.fetch(&url).await;
        let response = match fetched {
            Ok(response) => response,
            Err(e) => {
                warn!("could not fetch {}: {}", url, e);
                self.pacer.pause().await;
                return Ok(true);
            }
        };
        if !response.is_ok() {
            debug!("listing {} returned {}", url, response.status.as_u16());
        }

        let record = extract_response(&url, &response);
        summary.listings_checked += 1;

        let verdict = self.rules.evaluate(&record);
        debug!(id = %record.id, ?verdict, "classified");
        if verdict.is_interesting() {
            info!("{}", search_url);
            info!("++++ {}", record.title);
            summary.matches += 1;
            if let Some(notifier) = &self.notifier {
                notifier.notify(&record).await?;
                summary.notifications_sent += 1;
            }
        } else {
            debug!("---- {}", record.title);
        }
        info!("-");

        self.pacer.pause().await;
        Ok(true)
    }
}
