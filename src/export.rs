//! RIS and BibTeX export.
//!
//! Field order comes from explicit tables, never from map iteration.

use crate::authors::{join_authors, AuthorJoin};
use crate::error::{Result, WorksError};
use crate::types::WorkType;
use crate::works::WorkRecord;

const BIBTEX_INDENT: &str = "    ";

impl WorkRecord {
    /// RIS entry. Only journal articles are supported.
    ///
    /// The `IS` line is left out entirely when the work has no issue.
    pub fn ris(&self) -> Result<String> {
        let w = self.work();
        if w.work_type != WorkType::JournalArticle {
            return Err(WorksError::UnsupportedType(w.work_type.to_string()));
        }
        if w.authorships.is_empty() {
            return Err(WorksError::EmptyAuthorList);
        }
        let venue = w.venue()?;
        let biblio = &w.biblio;
        let year = w.publication_year.to_string();

        let mut fields: Vec<(&str, &str)> = vec![("TY", "JOUR")];
        fields.extend(w.authorships.iter().map(|a| ("AU", a.author.display_name.as_str())));
        fields.push(("PY", year.as_str()));
        fields.push(("TI", w.title.as_str()));
        fields.push(("JO", venue.display_name.as_str()));
        fields.push(("VL", biblio.volume.as_deref().unwrap_or("")));
        if let Some(issue) = biblio.issue.as_deref().filter(|i| !i.is_empty()) {
            fields.push(("IS", issue));
        }
        fields.push(("SP", biblio.first_page.as_deref().unwrap_or("")));
        fields.push(("EP", biblio.last_page.as_deref().unwrap_or("")));
        fields.push(("DO", w.doi.as_str()));

        let mut lines: Vec<String> = fields
            .into_iter()
            .map(|(tag, value)| format!("{}  - {}", tag, value))
            .collect();
        lines.push("ER  -".to_string());
        Ok(lines.join("\n"))
    }

    /// BibTeX entry, keyed `<last author token><year>`, typed with the
    /// OpenAlex work type verbatim.
    pub fn bibtex(&self) -> Result<String> {
        let w = self.work();
        let authors = join_authors(&w.author_names(), AuthorJoin::Spaced)?;
        let venue = w.venue()?;
        let year = w.publication_year.to_string();

        let surname = authors
            .split_whitespace()
            .last()
            .ok_or(WorksError::MissingField("authorships.author.display_name"))?;
        let key = format!("{}{}", surname, year);

        let pages = w.biblio.pages();
        let fields: [(&str, &str); 7] = [
            ("author", authors.as_str()),
            ("doi", w.doi.as_str()),
            ("journal", venue.display_name.as_str()),
            ("pages", pages.as_str()),
            ("title", w.title.as_str()),
            ("volume", w.biblio.volume.as_deref().unwrap_or("")),
            ("year", year.as_str()),
        ];

        let mut entry = format!("@{}{{{}", w.work_type.as_api_str(), key);
        for (name, value) in fields {
            entry.push_str(&format!(",\n{}{} = {{{}}}", BIBTEX_INDENT, name, value));
        }
        entry.push_str("\n}\n\n");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::WorksError;
    use crate::works::tests::{record, sample_json};
    use serde_json::json;

    #[test]
    fn test_ris_without_issue() {
        let ris = record(sample_json()).ris().unwrap();
        assert_eq!(
            ris,
            "TY  - JOUR\n\
             AU  - A. One\n\
             AU  - B. Two\n\
             PY  - 2021\n\
             TI  - T\n\
             JO  - Venue\n\
             VL  - 5\n\
             SP  - 1\n\
             EP  - 9\n\
             DO  - 10.1/x\n\
             ER  -"
        );
        assert!(!ris.contains("IS  -"));
    }

    #[test]
    fn test_ris_with_issue() {
        let mut value = sample_json();
        value["biblio"]["issue"] = json!("4");
        let ris = record(value).ris().unwrap();
        assert!(ris.contains("VL  - 5\nIS  - 4\nSP  - 1"));
        assert!(!ris.ends_with('\n'));
    }

    #[test]
    fn test_ris_unsupported_type() {
        let mut value = sample_json();
        value["type"] = json!("book-chapter");
        match record(value).ris() {
            Err(WorksError::UnsupportedType(t)) => assert_eq!(t, "book-chapter"),
            other => panic!("expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn test_ris_empty_authors() {
        let mut value = sample_json();
        value["authorships"] = json!([]);
        assert!(matches!(
            record(value).ris(),
            Err(WorksError::EmptyAuthorList)
        ));
    }

    #[test]
    fn test_bibtex_entry() {
        let bib = record(sample_json()).bibtex().unwrap();
        assert_eq!(
            bib,
            "@journal-article{Two2021,\n    \
             author = {A. One and B. Two},\n    \
             doi = {10.1/x},\n    \
             journal = {Venue},\n    \
             pages = {1-9},\n    \
             title = {T},\n    \
             volume = {5},\n    \
             year = {2021}\n\
             }\n\n"
        );
    }

    #[test]
    fn test_bibtex_key_single_author() {
        let mut value = sample_json();
        value["authorships"] = json!([{"author": {"display_name": "Jane Q. Smith", "id": "u9"}}]);
        value["publication_year"] = json!(2020);
        let bib = record(value).bibtex().unwrap();
        assert!(bib.starts_with("@journal-article{Smith2020,\n"));
    }

    #[test]
    fn test_bibtex_missing_pages_are_empty() {
        let mut value = sample_json();
        value["biblio"] = json!({"volume": "5", "issue": null, "first_page": null, "last_page": null});
        let bib = record(value).bibtex().unwrap();
        assert!(bib.contains("    pages = {-},\n"));
    }

    #[test]
    fn test_bibtex_keeps_other_type() {
        let mut value = sample_json();
        value["type"] = json!("book-chapter");
        assert!(record(value).bibtex().unwrap().starts_with("@book-chapter{Two2021"));
    }

    #[test]
    fn test_bibtex_empty_authors() {
        let mut value = sample_json();
        value["authorships"] = json!([]);
        assert!(matches!(
            record(value).bibtex(),
            Err(WorksError::EmptyAuthorList)
        ));
    }
}
