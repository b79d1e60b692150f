//! OpenAlex API response parsing.
//!
//! Wire structs accept whatever the API sends (every field optional); the
//! conversion functions validate them into the public types once, so the
//! renderers never see a half-populated record.

use crate::error::{Result, WorksError};
use crate::types::{Author, Authorship, Biblio, CountByYear, Venue, Work, WorkSummary, WorkType};
use serde::Deserialize;

/// Length of the `https://openalex.org/` prefix on referenced-work URLs.
pub const OPENALEX_URL_PREFIX_LEN: usize = "https://openalex.org/".len();

/// Custom deserializer for biblio fields that accepts both string and integer.
fn deserialize_string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, integer, or null")
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(ValueVisitor).map(Some)
        }
    }

    struct ValueVisitor;

    impl<'de> Visitor<'de> for ValueVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_string<E>(self, v: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_option(OptionVisitor)
}

/// A work record as returned by `/works/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiWork {
    pub id: Option<String>,
    pub doi: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub work_type: Option<String>,
    pub publication_year: Option<i32>,
    pub cited_by_count: Option<u32>,
    pub cited_by_api_url: Option<String>,
    pub related_works: Option<Vec<String>>,
    pub referenced_works: Option<Vec<String>>,
    pub authorships: Option<Vec<ApiAuthorship>>,
    pub biblio: Option<ApiBiblio>,
    pub host_venue: Option<ApiVenue>,
    pub primary_location: Option<ApiLocation>,
    pub counts_by_year: Option<Vec<ApiCountByYear>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiAuthorship {
    pub author: Option<ApiAuthor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiAuthor {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiBiblio {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub volume: Option<String>,
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub issue: Option<String>,
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub first_page: Option<String>,
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub last_page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiVenue {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiLocation {
    pub source: Option<ApiVenue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCountByYear {
    pub year: i32,
    pub cited_by_count: u32,
}

/// Summary fields of a work; used for referenced and citing works.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    pub doi: Option<String>,
    pub publication_year: Option<i32>,
}

/// List response from a filter query such as `cited_by_api_url`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiListResponse {
    pub results: Option<Vec<ApiSummary>>,
}

/// Parse a body into untyped JSON.
pub fn parse_raw(json: &str) -> Result<serde_json::Value> {
    serde_json::from_str(json).map_err(|e| WorksError::Parse(format!("Invalid OpenAlex JSON: {}", e)))
}

/// Validate untyped work JSON into a [`Work`].
pub fn parse_work(raw: &serde_json::Value) -> Result<Work> {
    let api = ApiWork::deserialize(raw)
        .map_err(|e| WorksError::Parse(format!("Invalid work record: {}", e)))?;
    api_to_work(api)
}

/// Parse a single work body into a lenient [`WorkSummary`].
pub fn parse_summary(json: &str) -> Result<WorkSummary> {
    let api: ApiSummary = serde_json::from_str(json)
        .map_err(|e| WorksError::Parse(format!("Invalid work record: {}", e)))?;
    Ok(summary_from_api(api))
}

/// Parse the `results` of a list response into summaries, in API order.
pub fn parse_summary_list(json: &str) -> Result<Vec<WorkSummary>> {
    let response: ApiListResponse = serde_json::from_str(json)
        .map_err(|e| WorksError::Parse(format!("Invalid list response: {}", e)))?;
    let results = response.results.ok_or(WorksError::MissingField("results"))?;
    Ok(results.into_iter().map(summary_from_api).collect())
}

/// Identifier part of a referenced-work URL (`https://openalex.org/W123` -> `W123`).
pub fn referenced_work_id(url: &str) -> Result<&str> {
    url.get(OPENALEX_URL_PREFIX_LEN..)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| WorksError::Parse(format!("Not an OpenAlex work URL: {}", url)))
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(WorksError::MissingField(field))
}

fn summary_from_api(api: ApiSummary) -> WorkSummary {
    WorkSummary {
        id: api.id,
        title: api.title,
        doi: api.doi,
        publication_year: api.publication_year,
    }
}

fn venue_from_api(api: ApiVenue) -> Option<Venue> {
    Some(Venue {
        display_name: api.display_name?,
        id: api.id?,
    })
}

/// Convert a wire record into a [`Work`], rejecting missing required fields.
fn api_to_work(api: ApiWork) -> Result<Work> {
    let authorships = required(api.authorships, "authorships")?
        .into_iter()
        .map(|a| {
            let author = required(a.author, "authorships.author")?;
            Ok(Authorship {
                author: Author {
                    display_name: required(author.display_name, "authorships.author.display_name")?,
                    id: required(author.id, "authorships.author.id")?,
                },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let biblio = required(api.biblio, "biblio")?;

    // host_venue was retired from the API; newer records carry the source instead
    let venue = api
        .host_venue
        .and_then(venue_from_api)
        .or_else(|| api.primary_location.and_then(|l| l.source).and_then(venue_from_api));

    Ok(Work {
        id: required(api.id, "id")?,
        doi: required(api.doi, "doi")?,
        title: required(api.title, "title")?,
        work_type: WorkType::from_api_str(&required(api.work_type, "type")?),
        publication_year: required(api.publication_year, "publication_year")?,
        cited_by_count: required(api.cited_by_count, "cited_by_count")?,
        cited_by_api_url: api.cited_by_api_url,
        related_works: api.related_works.unwrap_or_default(),
        referenced_works: api.referenced_works.unwrap_or_default(),
        authorships,
        biblio: Biblio {
            volume: biblio.volume,
            issue: biblio.issue,
            first_page: biblio.first_page,
            last_page: biblio.last_page,
        },
        venue,
        counts_by_year: api
            .counts_by_year
            .unwrap_or_default()
            .into_iter()
            .map(|c| CountByYear {
                year: c.year,
                cited_by_count: c.cited_by_count,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": "https://openalex.org/W1",
            "doi": "https://doi.org/10.1/x",
            "title": "T",
            "type": "journal-article",
            "publication_year": 2021,
            "cited_by_count": 3,
            "cited_by_api_url": "https://api.openalex.org/works?filter=cites:W1",
            "related_works": ["https://openalex.org/W7"],
            "referenced_works": ["https://openalex.org/W2", "https://openalex.org/W3"],
            "authorships": [
                {"author": {"display_name": "A. One", "id": "https://openalex.org/A1"}},
                {"author": {"display_name": "B. Two", "id": "https://openalex.org/A2"}}
            ],
            "biblio": {"volume": "5", "issue": null, "first_page": "1", "last_page": "9"},
            "host_venue": {"display_name": "Journal of Tests", "id": "https://openalex.org/V1"},
            "counts_by_year": [
                {"year": 2023, "cited_by_count": 2},
                {"year": 2022, "cited_by_count": 1}
            ]
        })
    }

    #[test]
    fn test_parse_work() {
        let work = parse_work(&sample()).unwrap();
        assert_eq!(work.title, "T");
        assert_eq!(work.work_type, WorkType::JournalArticle);
        assert_eq!(work.publication_year, 2021);
        assert_eq!(work.author_names(), vec!["A. One", "B. Two"]);
        assert_eq!(work.biblio.volume.as_deref(), Some("5"));
        assert!(work.biblio.issue.is_none());
        assert_eq!(work.venue().unwrap().display_name, "Journal of Tests");
        assert_eq!(work.referenced_works.len(), 2);
        assert_eq!(
            work.counts_by_year[0],
            CountByYear {
                year: 2023,
                cited_by_count: 2
            }
        );
    }

    #[test]
    fn test_parse_biblio_numbers() {
        let mut raw = sample();
        raw["biblio"] = json!({"volume": 12, "issue": 3, "first_page": 100, "last_page": null});
        let work = parse_work(&raw).unwrap();
        assert_eq!(work.biblio.volume.as_deref(), Some("12"));
        assert_eq!(work.biblio.issue.as_deref(), Some("3"));
        assert_eq!(work.biblio.first_page.as_deref(), Some("100"));
        assert!(work.biblio.last_page.is_none());
    }

    #[test]
    fn test_missing_biblio() {
        let mut raw = sample();
        raw.as_object_mut().unwrap().remove("biblio");
        assert!(matches!(
            parse_work(&raw),
            Err(WorksError::MissingField("biblio"))
        ));
    }

    #[test]
    fn test_null_doi_is_missing() {
        let mut raw = sample();
        raw["doi"] = serde_json::Value::Null;
        assert!(matches!(parse_work(&raw), Err(WorksError::MissingField("doi"))));
    }

    #[test]
    fn test_author_without_name() {
        let mut raw = sample();
        raw["authorships"] = json!([{"author": {"id": "https://openalex.org/A1"}}]);
        assert!(matches!(
            parse_work(&raw),
            Err(WorksError::MissingField("authorships.author.display_name"))
        ));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let mut raw = sample();
        raw["publication_year"] = json!("soon");
        assert!(matches!(parse_work(&raw), Err(WorksError::Parse(_))));
    }

    #[test]
    fn test_venue_falls_back_to_primary_location() {
        let mut raw = sample();
        raw.as_object_mut().unwrap().remove("host_venue");
        raw["primary_location"] = json!({
            "source": {"display_name": "Source Journal", "id": "https://openalex.org/S9"}
        });
        let work = parse_work(&raw).unwrap();
        let venue = work.venue().unwrap();
        assert_eq!(venue.display_name, "Source Journal");
        assert_eq!(venue.id, "https://openalex.org/S9");
    }

    #[test]
    fn test_no_venue_is_lazy() {
        let mut raw = sample();
        raw["host_venue"] = serde_json::Value::Null;
        let work = parse_work(&raw).unwrap();
        assert!(matches!(work.venue(), Err(WorksError::MissingField("host_venue"))));
    }

    #[test]
    fn test_parse_raw_invalid_json() {
        assert!(matches!(parse_raw("<html>"), Err(WorksError::Parse(_))));
    }

    #[test]
    fn test_parse_summary_list() {
        let json = r#"{
            "meta": {"count": 2},
            "results": [
                {"id": "https://openalex.org/W5", "title": "First", "doi": null, "publication_year": 2020},
                {"id": "https://openalex.org/W6", "title": "Second", "doi": "https://doi.org/10.2/z", "publication_year": 2022}
            ]
        }"#;
        let summaries = parse_summary_list(json).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title.as_deref(), Some("First"));
        assert!(summaries[0].doi.is_none());
        assert_eq!(summaries[1].publication_year, Some(2022));
    }

    #[test]
    fn test_parse_summary_list_without_results() {
        assert!(matches!(
            parse_summary_list(r#"{"meta": {}}"#),
            Err(WorksError::MissingField("results"))
        ));
    }

    #[test]
    fn test_referenced_work_id() {
        assert_eq!(
            referenced_work_id("https://openalex.org/W2741809807").unwrap(),
            "W2741809807"
        );
        assert!(matches!(
            referenced_work_id("W123"),
            Err(WorksError::Parse(_))
        ));
    }
}
