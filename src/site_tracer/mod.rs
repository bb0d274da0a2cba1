use std::sync::Arc;

use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tracing::Instrument;
use url::Url;

mod frontier;
mod trace;

use crate::page::{read_page, FetchError, Fetched, PageFetcher};
use crate::sitemap::Sitemap;
use trace::Trace;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("transport failure at {0}")]
    Fetch(#[from] FetchError),
    #[error("worker stopped unexpectedly: {0}")]
    Worker(#[from] JoinError),
}

pub struct SiteTracer<T: PageFetcher + 'static> {
    pub fetcher: T,
    pub worker_pool_size: u16,
}

async fn visit<T: PageFetcher>(fetcher: &T, trace: &Trace, url: &str) -> Result<(), TraceError> {
    let fetched = tokio::select! {
        biased;
        _ = trace.cancel_token().cancelled() => return Ok(()),
        fetched = fetcher.fetch(url) => fetched,
    };
    match fetched {
        Ok(Fetched::Page(body)) => {
            let record = read_page(trace.root(), trace.origin(), &body);
            let fresh = trace.discover(&record.links).await;
            tracing::info!("Mapped page, {} new links queued", fresh);
            trace.record(url, record).await;
        }
        Ok(Fetched::Status(code)) => {
            tracing::info!("Dropping page, status {}", code);
            trace.forget(url).await;
        }
        Err(err) => {
            trace.abort();
            return Err(err.into());
        }
    }
    Ok(())
}

async fn worker<T: PageFetcher>(fetcher: T, trace: Arc<Trace>) -> Result<(), TraceError> {
    while let Some(url) = trace.frontier().next().await {
        let outcome = visit(&fetcher, &trace, &url)
            .instrument(tracing::info_span!("page", url = url.as_str()))
            .await;
        trace.frontier().complete().await;
        outcome?;
        tracing::debug!("{}", trace.status().await);
    }
    Ok(())
}

impl<T: PageFetcher + 'static> SiteTracer<T> {
    /// Maps every same-origin page reachable from `root`.
    ///
    /// The root page seeds the crawl but is never a key of the result. A non-success
    /// status on the root yields an empty sitemap; a transport failure anywhere aborts
    /// the whole trace.
    #[tracing::instrument(skip(self, root), fields(root = root.as_str()))]
    pub async fn trace(&self, root: &Url) -> Result<Sitemap, TraceError> {
        tracing::info!("Beginning trace");
        let mut root = root.clone();
        root.set_fragment(None);
        let trace = Arc::new(Trace::new(root));

        let body = match self.fetcher.fetch(trace.root().as_str()).await? {
            Fetched::Page(body) => body,
            Fetched::Status(code) => {
                tracing::warn!("Root responded with status {}, nothing to map", code);
                return Ok(trace.result().await);
            }
        };
        let seed = read_page(trace.root(), trace.origin(), &body).links;
        let seeded = trace.discover(&seed).await;
        tracing::info!("Seeded {} links from root", seeded);

        let mut workers = JoinSet::new();
        for id in 0..self.worker_pool_size.max(1) {
            workers.spawn(
                worker(self.fetcher.clone(), trace.clone())
                    .instrument(tracing::debug_span!("worker", id)),
            );
        }

        let mut failure = None;
        while let Some(joined) = workers.join_next().await {
            let outcome = joined.map_err(TraceError::from).and_then(|res| res);
            if let Err(err) = outcome {
                trace.abort();
                tracing::error!("{}", err);
                if failure.is_none() {
                    failure = Some(err);
                }
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }

        let sitemap = trace.result().await;
        tracing::info!(
            "Finished trace, {} pages in {:#}",
            sitemap.len(),
            trace.elapsed()
        );
        Ok(sitemap)
    }
}
