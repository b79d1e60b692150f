//! Works citing a work.

use crate::client::OpenAlexClient;
use crate::error::{Result, WorksError};
use crate::parse::parse_summary_list;
use crate::types::ReportEntry;
use crate::works::WorkRecord;

impl WorkRecord {
    /// Fetch the works citing this record, numbered from 1.
    ///
    /// One request to `cited_by_api_url`; only the first page the API
    /// returns is reported.
    pub async fn citing_works(&self, client: &OpenAlexClient) -> Result<Vec<ReportEntry>> {
        let url = self
            .work()
            .cited_by_api_url
            .as_deref()
            .ok_or(WorksError::MissingField("cited_by_api_url"))?;

        let body = client.get_url(url).await?;
        let entries = parse_summary_list(&body)?
            .into_iter()
            .enumerate()
            .map(|(index, summary)| ReportEntry {
                position: index + 1,
                summary,
            })
            .collect();
        Ok(entries)
    }
}
