//! A single fetched work and its plain and Markdown citation views.

use crate::authors::{join_authors, markdown_links, AuthorJoin};
use crate::chart::{BarChart, ChartRenderer};
use crate::client::OpenAlexClient;
use crate::error::Result;
use crate::parse::{parse_raw, parse_work};
use crate::types::{ExportFormat, Work};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// One OpenAlex work, fetched once and read-only afterwards.
///
/// Keeps the response JSON untouched alongside the validated [`Work`]. To
/// refresh the data, fetch a new record.
#[derive(Debug, Clone)]
pub struct WorkRecord {
    identifier: String,
    raw: serde_json::Value,
    work: Work,
}

impl OpenAlexClient {
    /// Fetch a work by identifier (`W...`, DOI URL, `doi:...`, ...).
    pub async fn work(&self, identifier: &str) -> Result<WorkRecord> {
        WorkRecord::fetch(self, identifier).await
    }
}

impl WorkRecord {
    /// Fetch and validate a work.
    pub async fn fetch(client: &OpenAlexClient, identifier: &str) -> Result<Self> {
        tracing::debug!(identifier, "fetching work");
        let body = client.get_work(identifier).await?;
        Self::from_json(identifier, &body)
    }

    /// Build a record from an already-fetched response body.
    pub fn from_json(identifier: impl Into<String>, body: &str) -> Result<Self> {
        let raw = parse_raw(body)?;
        let work = parse_work(&raw)?;
        Ok(Self {
            identifier: identifier.into(),
            raw,
            work,
        })
    }

    /// The identifier this record was fetched with.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The response JSON, as returned by the API.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Validated view of the record.
    pub fn work(&self) -> &Work {
        &self.work
    }

    /// One-line citation:
    /// `authors, title, volume, issue, pages, (year), doi. cited by: n. id`.
    pub fn citation(&self) -> Result<String> {
        let w = &self.work;
        let authors = join_authors(&w.author_names(), AuthorJoin::Compact)?;
        Ok(format!(
            "{}, {}, {}{}{}, ({}), {}. cited by: {}. {}",
            authors,
            w.title,
            w.biblio.volume.as_deref().unwrap_or(""),
            w.biblio.issue_segment(),
            w.biblio.pages(),
            w.publication_year,
            w.doi,
            w.cited_by_count,
            w.id
        ))
    }

    /// Markdown citation with linked authors and venue, followed by the
    /// citations-per-year chart as an inline PNG.
    pub fn markdown(&self) -> Result<String> {
        self.markdown_with(&BarChart)
    }

    /// Like [`markdown`](Self::markdown) with a custom chart renderer.
    pub fn markdown_with(&self, renderer: &impl ChartRenderer) -> Result<String> {
        let w = &self.work;
        let authors = join_authors(&markdown_links(&w.authorships), AuthorJoin::Spaced)?;
        let venue = w.venue()?;
        let journal = format!("[{}]({})", venue.display_name, venue.id);

        let png = renderer.render_png(&w.counts_by_year)?;
        let chart = format!("![img](data:image/png;base64,{})", STANDARD.encode(png));

        Ok(format!(
            "{}, *{}*, **{}**, {}{}{}, ({}), {}. cited by: {}. [Open Alex]({})<br>{}",
            authors,
            w.title,
            journal,
            w.biblio.volume.as_deref().unwrap_or(""),
            w.biblio.issue_segment(),
            w.biblio.pages(),
            w.publication_year,
            w.doi,
            w.cited_by_count,
            w.id,
            chart
        ))
    }

    /// Render in the given format.
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Plain => self.citation(),
            ExportFormat::Markdown => self.markdown(),
            ExportFormat::Ris => self.ris(),
            ExportFormat::BibTeX => self.bibtex(),
        }
    }
}
