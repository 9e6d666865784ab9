//! Debounced, sequenced search requests.
//!
//! A search box fires a request per keystroke. Each request carries a client
//! id and a sequence number that grows with every keystroke. The debouncer
//! holds a request for the configured delay and lets it through only if no
//! newer request from the same client arrived meanwhile. Only waiting
//! requests are tracked; responses echo the sequence number so a client can
//! also discard a late answer to a request that was already served.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Outcome of waiting out the debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// This is still the newest request for its client; serve it.
    Current,
    /// A newer request replaced this one; drop it.
    Superseded,
}

#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    /// Newest sequence number per client, only while a request is waiting.
    latest: Mutex<HashMap<String, u64>>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Mutex::new(HashMap::new()),
        }
    }

    /// Records `seq` as the newest request of `client`, waits for the
    /// debounce delay and reports whether it is still the newest.
    ///
    /// A `seq` not above the one already waiting for `client` is superseded
    /// immediately, so a repeated request is served once.
    #[tracing::instrument(skip(self))]
    pub async fn settle(&self, client: &str, seq: u64) -> Settled {
        let Some(pending) = self.register(client, seq) else {
            tracing::debug!("Dropping out-of-order search request");
            return Settled::Superseded;
        };

        tokio::time::sleep(self.delay).await;

        if pending.finish() {
            Settled::Current
        } else {
            tracing::debug!("Search request replaced by a newer one");
            Settled::Superseded
        }
    }

    fn register<'a>(&'a self, client: &'a str, seq: u64) -> Option<Pending<'a>> {
        let mut latest = self.lock();
        match latest.get(client) {
            Some(&newest) if seq <= newest => None,
            _ => {
                latest.insert(client.to_string(), seq);
                Some(Pending {
                    debouncer: self,
                    client,
                    seq,
                    finished: false,
                })
            }
        }
    }

    /// Forgets `client` if `seq` is still its newest request.
    fn take_if_newest(&self, client: &str, seq: u64) -> bool {
        let mut latest = self.lock();
        if latest.get(client) == Some(&seq) {
            latest.remove(client);
            true
        } else {
            false
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, u64>> {
        self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A registered request. Dropping it, for example when the caller goes away
/// mid-wait, clears its entry.
struct Pending<'a> {
    debouncer: &'a SearchDebouncer,
    client: &'a str,
    seq: u64,
    finished: bool,
}

impl Pending<'_> {
    fn finish(mut self) -> bool {
        self.finished = true;
        self.debouncer.take_if_newest(self.client, self.seq)
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.debouncer.take_if_newest(self.client, self.seq);
        }
    }
}
