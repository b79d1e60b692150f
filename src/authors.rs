//! Author-list joining shared by every citation renderer.

use crate::error::{Result, WorksError};
use crate::types::Authorship;

/// How the last author is attached to the rest of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorJoin {
    /// `"A, B andC"`: the conjunction is glued to the last name.
    ///
    /// Used by the plain citation string, which has always been rendered
    /// this way; consumers match on it byte-for-byte.
    Compact,
    /// `"A, B and C"`: used by Markdown and BibTeX.
    Spaced,
}

impl AuthorJoin {
    fn conjunction(self) -> &'static str {
        match self {
            Self::Compact => " and",
            Self::Spaced => " and ",
        }
    }
}

/// Join author names: one name is returned as is, otherwise
/// `"first, second, ... <and> last"`.
pub fn join_authors<S: AsRef<str>>(names: &[S], style: AuthorJoin) -> Result<String> {
    let (last, rest) = names.split_last().ok_or(WorksError::EmptyAuthorList)?;
    if rest.is_empty() {
        return Ok(last.as_ref().to_string());
    }

    let head = rest.iter().map(|n| n.as_ref()).collect::<Vec<_>>().join(", ");
    Ok(format!("{}{}{}", head, style.conjunction(), last.as_ref()))
}

/// Each author as a Markdown link to their OpenAlex page.
pub fn markdown_links(authorships: &[Authorship]) -> Vec<String> {
    authorships
        .iter()
        .map(|a| format!("[{}]({})", a.author.display_name, a.author.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Author;

    #[test]
    fn test_single_author_unchanged() {
        for name in ["Jane Q. Smith", "Collaboration", "  padded  ", ""] {
            assert_eq!(join_authors(&[name], AuthorJoin::Compact).unwrap(), name);
            assert_eq!(join_authors(&[name], AuthorJoin::Spaced).unwrap(), name);
        }
    }

    #[test]
    fn test_two_authors() {
        let names = ["A. One", "B. Two"];
        assert_eq!(
            join_authors(&names, AuthorJoin::Compact).unwrap(),
            "A. One andB. Two"
        );
        assert_eq!(
            join_authors(&names, AuthorJoin::Spaced).unwrap(),
            "A. One and B. Two"
        );
    }

    #[test]
    fn test_many_authors_compact() {
        let names = ["A", "B", "C", "D"];
        let joined = join_authors(&names, AuthorJoin::Compact).unwrap();
        assert_eq!(joined, "A, B, C andD");
        assert_eq!(joined.matches(", ").count(), names.len() - 2);
        assert!(joined.ends_with(" andD"));
    }

    #[test]
    fn test_many_authors_spaced() {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_eq!(
            join_authors(&names, AuthorJoin::Spaced).unwrap(),
            "A, B and C"
        );
    }

    #[test]
    fn test_empty_list_rejected() {
        let names: [&str; 0] = [];
        assert!(matches!(
            join_authors(&names, AuthorJoin::Compact),
            Err(WorksError::EmptyAuthorList)
        ));
        assert!(matches!(
            join_authors(&names, AuthorJoin::Spaced),
            Err(WorksError::EmptyAuthorList)
        ));
    }

    #[test]
    fn test_markdown_links() {
        let authorships = vec![Authorship {
            author: Author {
                display_name: "A. One".into(),
                id: "https://openalex.org/A1".into(),
            },
        }];
        assert_eq!(
            markdown_links(&authorships),
            vec!["[A. One](https://openalex.org/A1)"]
        );
    }
}
