//! Public types for the OpenAlex works client.
//!
//! These are the validated, strongly typed view of a work record. Wire-level
//! structs with everything optional live in [`crate::parse`].

use serde::Serialize;
use std::fmt;

/// A validated OpenAlex work.
#[derive(Debug, Clone, Serialize)]
pub struct Work {
    /// OpenAlex URL of the work (`https://openalex.org/W...`).
    pub id: String,
    /// DOI URL.
    pub doi: String,
    /// Work title.
    pub title: String,
    /// Work type (`journal-article`, `book-chapter`, ...).
    #[serde(rename = "type")]
    pub work_type: WorkType,
    /// Publication year.
    pub publication_year: i32,
    /// Number of citing works.
    pub cited_by_count: u32,
    /// API URL listing citing works.
    pub cited_by_api_url: Option<String>,
    /// Related work identifiers, in API order.
    pub related_works: Vec<String>,
    /// Referenced work URLs, in API order.
    pub referenced_works: Vec<String>,
    /// Authorships, in byline order.
    pub authorships: Vec<Authorship>,
    /// Volume, issue and page range.
    pub biblio: Biblio,
    /// Publishing venue (`host_venue`, or `primary_location.source`).
    pub venue: Option<Venue>,
    /// Citations received per year.
    pub counts_by_year: Vec<CountByYear>,
}

impl Work {
    /// Display names of all authors, in byline order.
    pub fn author_names(&self) -> Vec<&str> {
        self.authorships
            .iter()
            .map(|a| a.author.display_name.as_str())
            .collect()
    }

    /// The venue, or [`WorksError::MissingField`](crate::WorksError::MissingField).
    pub fn venue(&self) -> crate::error::Result<&Venue> {
        self.venue
            .as_ref()
            .ok_or(crate::error::WorksError::MissingField("host_venue"))
    }
}

/// Association between a work and one of its authors.
#[derive(Debug, Clone, Serialize)]
pub struct Authorship {
    pub author: Author,
}

/// An author as listed on a work.
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    /// Name as displayed by OpenAlex.
    pub display_name: String,
    /// OpenAlex author URL.
    pub id: String,
}

/// Volume/issue/page metadata. Every part may be missing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Biblio {
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub first_page: Option<String>,
    pub last_page: Option<String>,
}

impl Biblio {
    /// `first-last`, with missing parts rendered empty.
    pub fn pages(&self) -> String {
        format!(
            "{}-{}",
            self.first_page.as_deref().unwrap_or(""),
            self.last_page.as_deref().unwrap_or("")
        )
    }

    /// Issue segment of a citation line: `", 3"`, or a bare `", "` when absent.
    pub fn issue_segment(&self) -> String {
        match &self.issue {
            Some(issue) => format!(", {}", issue),
            None => ", ".to_string(),
        }
    }
}

/// A journal, repository or other host of a work.
#[derive(Debug, Clone, Serialize)]
pub struct Venue {
    pub display_name: String,
    pub id: String,
}

/// Citations received in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountByYear {
    pub year: i32,
    pub cited_by_count: u32,
}

/// Kind of work, as far as export formats care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum WorkType {
    JournalArticle,
    Other(String),
}

impl WorkType {
    /// Classify an OpenAlex type string.
    pub fn from_api_str(s: &str) -> Self {
        match s {
            "journal-article" => Self::JournalArticle,
            other => Self::Other(other.to_string()),
        }
    }

    /// The OpenAlex type string, verbatim.
    pub fn as_api_str(&self) -> &str {
        match self {
            Self::JournalArticle => "journal-article",
            Self::Other(s) => s,
        }
    }
}

impl From<WorkType> for String {
    fn from(t: WorkType) -> Self {
        t.as_api_str().to_string()
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Lightweight view of a work used by traversal reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    pub doi: Option<String>,
    pub publication_year: Option<i32>,
}

/// One numbered line of a traversal report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// 1-based position in the report.
    pub position: usize,
    pub summary: WorkSummary,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self
            .summary
            .publication_year
            .map(|y| y.to_string())
            .unwrap_or_default();
        writeln!(
            f,
            "{:2}- Title: {}",
            self.position,
            self.summary.title.as_deref().unwrap_or("")
        )?;
        writeln!(f, "Doi: {}", self.summary.doi.as_deref().unwrap_or(""))?;
        writeln!(f, "Publication_year: {}", year)
    }
}

/// Output formats a work record can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportFormat {
    Plain,
    Markdown,
    Ris,
    BibTeX,
}

impl ExportFormat {
    /// Short lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Markdown => "markdown",
            Self::Ris => "ris",
            Self::BibTeX => "bibtex",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "text" | "txt" => Some(Self::Plain),
            "markdown" | "md" => Some(Self::Markdown),
            "ris" => Some(Self::Ris),
            "bibtex" | "bib" => Some(Self::BibTeX),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
