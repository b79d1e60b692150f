//! Works referenced by a work, fetched one at a time.

use crate::client::OpenAlexClient;
use crate::error::Result;
use crate::parse::{parse_summary, referenced_work_id};
use crate::types::ReportEntry;
use crate::works::WorkRecord;
use futures_util::Stream;

impl WorkRecord {
    /// Stream the works this record cites, in reference-list order.
    ///
    /// Each item waits the client's courtesy delay and then fetches one
    /// referenced work. Nothing is fetched until the stream is polled, and the
    /// stream ends after yielding the first error.
    ///
    /// Entries render with the same `" n- Title: ..."` layout as
    /// [`citing_works`](Self::citing_works), including the space after
    /// `Title:`.
    pub fn references<'a>(
        &'a self,
        client: &'a OpenAlexClient,
    ) -> impl Stream<Item = Result<ReportEntry>> + 'a {
        async_stream::try_stream! {
            for (index, url) in self.work().referenced_works.iter().enumerate() {
                let id = referenced_work_id(url)?;
                client.delay().wait().await;
                let body = client.get_work(id).await?;
                let summary = parse_summary(&body)?;
                yield ReportEntry {
                    position: index + 1,
                    summary,
                };
            }
        }
    }
}
