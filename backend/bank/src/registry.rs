//! # Branch Registry
//!
//! Built once from the curriculum dataset and immutable afterwards.
//!
//! Every branch is reachable through two keys, the lowercased dataset code and its slug.
//! Both keys point at the same entry, so `CSE(AI&ML)`, `cse(ai&ml)` and `cse-ai-and-ml`
//! all resolve to one [`Branch`].
use std::{collections::HashMap, sync::LazyLock};

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::{Curriculum, slug::SlugCache};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Branch {
    /// Key as written in the dataset, may contain punctuation.
    pub code: String,
    pub slug: String,
    pub name: String,
    /// Semester number (as a string) to subjects, in curriculum order.
    pub semesters: IndexMap<String, Vec<Subject>>,
    pub total_subjects: usize,
}

impl Branch {
    /// Exact membership check against the branch's semester keys. No range validation.
    pub fn resolve_semester(&self, semester: &str) -> Option<&str> {
        self.semesters
            .get_key_value(semester)
            .map(|(key, _)| key.as_str())
    }

    pub fn subjects(&self, semester: &str) -> Option<&[Subject]> {
        self.semesters.get(semester).map(Vec::as_slice)
    }
}

pub struct BranchRegistry {
    branches: Vec<Branch>,
    lookup: HashMap<String, usize>,
}

impl BranchRegistry {
    pub fn build(curriculum: &Curriculum) -> Self {
        let mut slugs = SlugCache::new();
        let mut branches = Vec::with_capacity(curriculum.len());
        let mut lookup = HashMap::with_capacity(curriculum.len() * 2);

        for (code, semesters) in curriculum {
            let semesters: IndexMap<String, Vec<Subject>> = semesters
                .iter()
                .map(|(semester, names)| {
                    let subjects = names
                        .iter()
                        .map(|name| Subject {
                            name: name.clone(),
                            slug: slugs.get(name),
                        })
                        .collect();

                    (semester.clone(), subjects)
                })
                .collect();

            let branch = Branch {
                code: code.clone(),
                slug: slugs.get(code),
                name: format_branch_label(code),
                total_subjects: semesters.values().map(Vec::len).sum(),
                semesters,
            };

            let index = branches.len();
            lookup.insert(branch.code.to_lowercase(), index);
            if !branch.slug.is_empty() {
                lookup.insert(branch.slug.clone(), index);
            }

            branches.push(branch);
        }

        Self { branches, lookup }
    }

    /// Case-insensitive, whitespace-trimmed exact match on code or slug.
    pub fn resolve(&self, input: Option<&str>) -> Option<&Branch> {
        let normalized = input?.trim().to_lowercase();

        if normalized.is_empty() {
            return None;
        }

        self.lookup
            .get(&normalized)
            .map(|&index| &self.branches[index])
    }

    /// Branches in dataset declaration order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn total_subjects(&self) -> usize {
        self.branches.iter().map(|branch| branch.total_subjects).sum()
    }
}

/// `CSE(AI&ML)` -> `CSE (AI & ML)`
pub fn format_branch_label(code: &str) -> String {
    let spaced = code.replace('(', " (").replace('&', " & ");

    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}
