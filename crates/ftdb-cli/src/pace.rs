//! Inter-request pacing for provider lookups.

use std::time::Duration;

use ftdb_analysis::{SearchProvider, SearchResult};

/// Wraps a provider and sleeps after every lookup so consecutive requests
/// stay at least `delay` apart. A zero delay disables the sleep entirely.
pub(crate) struct PacedProvider<P> {
    inner: P,
    delay: Duration,
}

impl<P> PacedProvider<P> {
    pub(crate) fn new(inner: P, delay_ms: u64) -> Self {
        Self {
            inner,
            delay: Duration::from_millis(delay_ms),
        }
    }
}

impl<P> SearchProvider for PacedProvider<P>
where
    P: SearchProvider + Sync,
{
    type Error = P::Error;

    async fn search(&self, query: &str) -> Result<SearchResult, P::Error> {
        let result = self.inner.search(query).await;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        result
    }
}
