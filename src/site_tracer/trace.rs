use jiff::{SignedDuration, Timestamp};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use url::{Origin, Url};

use crate::sitemap::{PageRecord, Sitemap};

use super::frontier::Frontier;

/// Crawl state shared by the driver and every worker.
pub struct Trace {
    root: Url,
    origin: Origin,
    sitemap: Mutex<Sitemap>,
    frontier: Frontier,
    cancel: CancellationToken,
    started: Timestamp,
}

impl Trace {
    pub fn new(root: Url) -> Self {
        let cancel = CancellationToken::new();
        Trace {
            origin: root.origin(),
            sitemap: Mutex::new(Sitemap::new(root.to_string())),
            frontier: Frontier::new(cancel.clone()),
            cancel,
            root,
            started: Timestamp::now(),
        }
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Stops every worker at its next suspension point.
    pub fn abort(&self) {
        self.cancel.cancel();
    }

    /// Enqueues each link not yet in the sitemap. The check and insert happen under one
    /// lock, so a URL reaches the frontier at most once.
    pub async fn discover<'a>(&self, links: impl IntoIterator<Item = &'a String>) -> usize {
        let fresh: Vec<String> = {
            let mut sitemap = self.sitemap.lock().await;
            links
                .into_iter()
                .filter(|link| sitemap.discover(link))
                .cloned()
                .collect()
        };
        let count = fresh.len();
        for link in fresh {
            self.frontier.push(link).await;
        }
        count
    }

    pub async fn record(&self, url: &str, record: PageRecord) {
        self.sitemap.lock().await.record(url, record);
    }

    pub async fn forget(&self, url: &str) {
        self.sitemap.lock().await.forget(url);
    }

    pub async fn result(&self) -> Sitemap {
        self.sitemap.lock().await.clone()
    }

    pub fn elapsed(&self) -> SignedDuration {
        Timestamp::now().duration_since(self.started)
    }

    pub async fn status(&self) -> String {
        let mapped = self.sitemap.lock().await.len();
        let (queued, in_flight) = self.frontier.counts().await;
        format!(
            "Tracing - {} | {} discovered ... {} queued, {} in processing",
            self.root, mapped, queued, in_flight
        )
    }
}
