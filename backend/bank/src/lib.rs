//! # Question Bank
//!
//! Static curriculum and previous year question (PYQ) index, loaded once at startup.
//!
//! ## Files
//! - `subjects.json`: branch code -> semester -> subject names, in curriculum order
//! - `pyqs.json`: branch code -> semester -> subject slug -> papers
//!
//! Both are generated offline and never written at runtime. Declaration order in
//! `subjects.json` is meaningful (it is the order students see) so it is kept with
//! [`IndexMap`].
use std::{collections::HashMap, fs, io, path::Path};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub mod files;
pub mod lookup;
pub mod registry;
pub mod slug;

use lookup::PyqItem;
use registry::BranchRegistry;

pub const SUBJECTS_FILE: &str = "subjects.json";
pub const PYQS_FILE: &str = "pyqs.json";

pub type Curriculum = IndexMap<String, IndexMap<String, Vec<String>>>;
pub type PyqIndex = HashMap<String, HashMap<String, HashMap<String, Vec<PyqItem>>>>;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

pub struct Bank {
    pub registry: BranchRegistry,
    pyqs: PyqIndex,
}

impl Bank {
    pub fn from_parts(curriculum: &Curriculum, pyqs: PyqIndex) -> Self {
        Self {
            registry: BranchRegistry::build(curriculum),
            pyqs,
        }
    }
}

pub fn get_bank(data_dir: &Path) -> Result<Bank, BankError> {
    let curriculum: Curriculum = read_json(&data_dir.join(SUBJECTS_FILE))?;
    let pyqs: PyqIndex = read_json(&data_dir.join(PYQS_FILE))?;

    let bank = Bank::from_parts(&curriculum, pyqs);

    debug!(
        "Read {} branches and {} subjects from {}",
        bank.registry.len(),
        bank.registry.total_subjects(),
        data_dir.display()
    );

    Ok(bank)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, BankError> {
    let data = fs::read(path).map_err(|source| BankError::Read {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_slice(&data).map_err(|source| BankError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use tempfile::tempdir;

    use super::{BankError, PYQS_FILE, SUBJECTS_FILE, get_bank};

    fn sample_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data")
    }

    #[test]
    fn test_sample_dataset() {
        let bank = get_bank(&sample_dir()).unwrap();

        let codes: Vec<&str> = bank
            .registry
            .branches()
            .iter()
            .map(|branch| branch.code.as_str())
            .collect();
        assert_eq!(codes, ["CSE(AI&ML)", "CSN", "CSE", "CSE(DS)", "ECE", "Civil"]);

        for branch in bank.registry.branches() {
            let by_code = bank.resolve_branch(Some(branch.code.as_str())).unwrap();
            let by_slug = bank.resolve_branch(Some(branch.slug.as_str())).unwrap();
            assert!(std::ptr::eq(by_code, by_slug));

            for (semester, subjects) in &branch.semesters {
                assert_eq!(bank.list_subjects(branch, semester).len(), subjects.len());
            }
        }
    }

    #[test]
    fn test_sample_subjects() {
        let bank = get_bank(&sample_dir()).unwrap();
        let branch = bank.resolve_branch(Some("cse-ai-and-ml")).unwrap();

        let subjects = bank.list_subjects(branch, "1");
        assert_eq!(subjects.len(), 6);
        assert_eq!(subjects[0].slug, "engineering-mathematics-i");
        assert_eq!(subjects[0].total_pyqs, 2);
        assert_eq!(subjects[5].name, "Environmental Studies");

        let present_but_empty = bank.list_pyqs(branch, "2", Some("Data Structures Through C"));
        assert_eq!(present_but_empty.map(<[_]>::len), Some(0));

        let absent = bank.list_pyqs(branch, "2", Some("Engineering Physics"));
        assert!(absent.is_none());
    }

    #[test]
    fn test_missing_files() {
        let dir = tempdir().unwrap();

        assert!(matches!(get_bank(dir.path()), Err(BankError::Read { .. })));
    }

    #[test]
    fn test_malformed_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SUBJECTS_FILE), r#"{"CSE": {"1": ["OS"]}}"#).unwrap();
        fs::write(dir.path().join(PYQS_FILE), r#"{"CSE": {"1": {"os": [{"id": 1}]}}}"#).unwrap();

        assert!(matches!(get_bank(dir.path()), Err(BankError::Parse { .. })));
    }

    #[test]
    fn test_minimal_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SUBJECTS_FILE), r#"{"CSE": {"1": ["OS"]}}"#).unwrap();
        fs::write(dir.path().join(PYQS_FILE), "{}").unwrap();

        let bank = get_bank(dir.path()).unwrap();
        let branch = bank.resolve_branch(Some("cse")).unwrap();

        assert_eq!(branch.total_subjects, 1);
        assert_eq!(bank.list_subjects(branch, "1")[0].total_pyqs, 0);
        assert!(bank.list_pyqs(branch, "1", Some("OS")).is_none());
    }
}
