//! Related works, materialised as full records.

use crate::client::OpenAlexClient;
use crate::error::Result;
use crate::works::WorkRecord;

impl WorkRecord {
    /// Fetch every related work as its own [`WorkRecord`], in API order.
    ///
    /// Requests are sequential with the courtesy delay before each one. The
    /// first failure aborts the whole call.
    pub async fn related_works(&self, client: &OpenAlexClient) -> Result<Vec<WorkRecord>> {
        let related = &self.work().related_works;
        let mut records = Vec::with_capacity(related.len());
        for identifier in related {
            client.delay().wait().await;
            records.push(WorkRecord::fetch(client, identifier).await?);
        }
        tracing::debug!(count = records.len(), "fetched related works");
        Ok(records)
    }
}
