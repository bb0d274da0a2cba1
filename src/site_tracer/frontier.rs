use std::collections::VecDeque;

use tokio::sync::{Mutex, Notify};
use tokio_util::sync::CancellationToken;

struct Pending {
    queue: VecDeque<String>,
    in_flight: usize,
}

/// URLs waiting for a worker, plus a count of URLs handed out but not yet completed.
///
/// The crawl is quiescent once the queue is empty and nothing is in flight. Only then
/// does [`Frontier::next`] return `None`; an empty queue alone just parks the caller.
pub struct Frontier {
    pending: Mutex<Pending>,
    changed: Notify,
    cancel: CancellationToken,
}

impl Frontier {
    pub fn new(cancel: CancellationToken) -> Self {
        Frontier {
            pending: Mutex::new(Pending {
                queue: VecDeque::new(),
                in_flight: 0,
            }),
            changed: Notify::new(),
            cancel,
        }
    }

    pub async fn push(&self, url: String) {
        self.pending.lock().await.queue.push_back(url);
        self.changed.notify_waiters();
    }

    /// Takes the next URL, counting it as in flight until [`Frontier::complete`].
    /// Returns `None` once quiescent or cancelled.
    pub async fn next(&self) -> Option<String> {
        loop {
            if self.cancel.is_cancelled() {
                return None;
            }
            // registered before the check so a push or complete in between is not missed
            let changed = self.changed.notified();
            {
                let mut pending = self.pending.lock().await;
                if let Some(url) = pending.queue.pop_front() {
                    pending.in_flight += 1;
                    return Some(url);
                }
                if pending.in_flight == 0 {
                    return None;
                }
            }
            tokio::select! {
                _ = self.cancel.cancelled() => return None,
                _ = changed => {}
            }
        }
    }

    pub async fn complete(&self) {
        {
            let mut pending = self.pending.lock().await;
            debug_assert!(pending.in_flight > 0, "complete without a matching next");
            pending.in_flight -= 1;
        }
        self.changed.notify_waiters();
    }

    /// Queued and in-flight counts.
    pub async fn counts(&self) -> (usize, usize) {
        let pending = self.pending.lock().await;
        (pending.queue.len(), pending.in_flight)
    }
}
