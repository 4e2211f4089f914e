use bank::{
    Bank,
    lookup::{PyqItem, select_pyq},
    registry::Branch,
    slug::slugify,
};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct SubjectsQuery {
    pub branch: Option<String>,
    pub semester: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PyqsQuery {
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileQuery {
    pub branch: Option<String>,
    pub sem: Option<String>,
    pub subject: Option<String>,
    pub id: Option<String>,
}

/// A paper resolved all the way down from query strings.
pub struct ResolvedPyq<'a> {
    pub branch: &'a Branch,
    pub semester: &'a str,
    pub subject_slug: String,
    pub pyq: &'a PyqItem,
}

pub fn get_branch<'a>(bank: &'a Bank, branch: Option<&str>) -> Result<&'a Branch, AppError> {
    bank.resolve_branch(branch).ok_or(AppError::InvalidBranch)
}

pub fn get_semester<'a>(branch: &'a Branch, semester: Option<&str>) -> Result<&'a str, AppError> {
    semester
        .and_then(|semester| branch.resolve_semester(semester))
        .ok_or(AppError::InvalidSemester)
}

pub fn get_pyqs<'a>(
    bank: &'a Bank,
    branch: &Branch,
    semester: &str,
    subject: Option<&str>,
) -> Result<&'a [PyqItem], AppError> {
    bank.list_pyqs(branch, semester, subject).ok_or(AppError::NoPyqsYet)
}

pub fn get_pyq<'a>(bank: &'a Bank, query: &FileQuery) -> Result<ResolvedPyq<'a>, AppError> {
    let branch = get_branch(bank, query.branch.as_deref())?;
    let semester = get_semester(branch, query.sem.as_deref())?;
    let pyqs = bank
        .list_pyqs(branch, semester, query.subject.as_deref())
        .ok_or(AppError::SubjectNotFound)?;

    let pyq = select_pyq(pyqs, query.id.as_deref()).ok_or(AppError::PyqNotFound)?;

    Ok(ResolvedPyq {
        branch,
        semester,
        subject_slug: slugify(query.subject.as_deref().unwrap_or_default()),
        pyq,
    })
}

/// Quotes would end the `filename` parameter early.
pub fn attachment_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '\'',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();

    format!("{}.pdf", cleaned.trim())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use bank::{Bank, get_bank};

    use super::{FileQuery, attachment_name, get_branch, get_pyq, get_pyqs, get_semester};
    use crate::error::AppError;

    fn bank() -> Bank {
        get_bank(&PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data")).unwrap()
    }

    fn query(branch: &str, sem: &str, subject: &str, id: Option<&str>) -> FileQuery {
        FileQuery {
            branch: Some(branch.to_string()),
            sem: Some(sem.to_string()),
            subject: Some(subject.to_string()),
            id: id.map(str::to_string),
        }
    }

    #[test]
    fn test_get_branch() {
        let bank = bank();

        assert_eq!(get_branch(&bank, Some("CSN")).unwrap().slug, "csn");
        assert!(matches!(get_branch(&bank, None), Err(AppError::InvalidBranch)));
        assert!(matches!(get_branch(&bank, Some("mech")), Err(AppError::InvalidBranch)));
    }

    #[test]
    fn test_get_semester() {
        let bank = bank();
        let branch = get_branch(&bank, Some("civil")).unwrap();

        assert_eq!(get_semester(branch, Some("7")).unwrap(), "7");
        assert!(matches!(get_semester(branch, Some("9")), Err(AppError::InvalidSemester)));
        assert!(matches!(get_semester(branch, None), Err(AppError::InvalidSemester)));
    }

    #[test]
    fn test_get_pyq() {
        let bank = bank();

        let resolved = get_pyq(
            &bank,
            &query(
                "cse-ai-and-ml",
                "1",
                "Engineering Mathematics-I",
                Some("engineering-mathematics-i-2023"),
            ),
        )
        .unwrap();

        assert_eq!(resolved.branch.slug, "cse-ai-and-ml");
        assert_eq!(resolved.semester, "1");
        assert_eq!(resolved.subject_slug, "engineering-mathematics-i");
        assert_eq!(resolved.pyq.year, 2023);

        let first = get_pyq(
            &bank,
            &query("cse-ai-and-ml", "1", "engineering-mathematics-i", None),
        )
        .unwrap();
        assert_eq!(first.pyq.year, 2024);
    }

    #[test]
    fn test_get_pyq_failures() {
        let bank = bank();

        assert!(matches!(
            get_pyq(&bank, &query("nope", "1", "x", None)),
            Err(AppError::InvalidBranch)
        ));
        assert!(matches!(
            get_pyq(&bank, &query("csn", "12", "x", None)),
            Err(AppError::InvalidSemester)
        ));
        assert!(matches!(
            get_pyq(&bank, &query("cse-ai-and-ml", "2", "engineering-physics", None)),
            Err(AppError::SubjectNotFound)
        ));
        assert!(matches!(
            get_pyq(&bank, &query("cse-ai-and-ml", "2", "data-structures-through-c", None)),
            Err(AppError::PyqNotFound)
        ));
        assert!(matches!(
            get_pyq(
                &bank,
                &query("cse-ai-and-ml", "2", "data-structures-through-c", Some("x"))
            ),
            Err(AppError::PyqNotFound)
        ));
    }

    #[test]
    fn test_get_pyq_unmatched_id() {
        let bank = bank();

        let resolved = get_pyq(
            &bank,
            &query("cse-ai-and-ml", "1", "engineering-mathematics-i", Some("1999")),
        )
        .unwrap();

        assert_eq!(resolved.pyq.id, "engineering-mathematics-i-2024");
    }

    #[test]
    fn test_get_pyqs() {
        let bank = bank();
        let branch = get_branch(&bank, Some("cse-ai-and-ml")).unwrap();

        let maths = get_pyqs(&bank, branch, "1", Some("engineering-mathematics-i")).unwrap();
        assert_eq!(maths.len(), 2);

        let empty = get_pyqs(&bank, branch, "2", Some("data-structures-through-c")).unwrap();
        assert!(empty.is_empty());

        assert!(matches!(
            get_pyqs(&bank, branch, "2", Some("engineering-physics")),
            Err(AppError::NoPyqsYet)
        ));
    }

    #[test]
    fn test_attachment_name() {
        assert_eq!(attachment_name("Compiler Design PYQ 2024"), "Compiler Design PYQ 2024.pdf");
        assert_eq!(attachment_name("A \"quoted\" title"), "A 'quoted' title.pdf");
    }
}
