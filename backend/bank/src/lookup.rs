//! # Lookups
//!
//! Pure reads against the startup bank. Nothing here mutates, so every function can be
//! called from any number of request handlers at once.
//!
//! A subject can be in three states:
//! - no entry in the PYQ index: [`Bank::list_pyqs`] returns `None`
//! - an entry with no papers: `Some(&[])`
//! - an entry with papers: `Some(items)`
//!
//! Callers must keep the first two apart, the first is a 404 and the second is an empty
//! success.
use serde::{Deserialize, Serialize};

use crate::{Bank, registry::Branch, slug::slugify};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyqItem {
    pub id: String,
    pub title: String,
    /// Relative to the public root, see [`crate::files::PdfRoot`].
    pub file: String,
    pub year: i32,
    pub size_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub name: String,
    pub slug: String,
    pub total_pyqs: usize,
}

impl Bank {
    pub fn resolve_branch(&self, input: Option<&str>) -> Option<&Branch> {
        self.registry.resolve(input)
    }

    /// Subjects of a semester in curriculum order. Unknown semesters list nothing.
    pub fn list_subjects(&self, branch: &Branch, semester: &str) -> Vec<SubjectSummary> {
        branch
            .subjects(semester)
            .unwrap_or_default()
            .iter()
            .map(|subject| SubjectSummary {
                name: subject.name.clone(),
                slug: subject.slug.clone(),
                total_pyqs: self
                    .pyq_entry(branch, semester, &subject.slug)
                    .map_or(0, <[PyqItem]>::len),
            })
            .collect()
    }

    /// `subject` may be a display name or a slug, it is slugified before the lookup.
    pub fn list_pyqs(
        &self,
        branch: &Branch,
        semester: &str,
        subject: Option<&str>,
    ) -> Option<&[PyqItem]> {
        let subject_slug = slugify(subject?);

        if subject_slug.is_empty() {
            return None;
        }

        self.pyq_entry(branch, semester, &subject_slug)
    }

    fn pyq_entry(
        &self,
        branch: &Branch,
        semester: &str,
        subject_slug: &str,
    ) -> Option<&[PyqItem]> {
        self.pyqs
            .get(&branch.code)?
            .get(semester)?
            .get(subject_slug)
            .map(Vec::as_slice)
    }
}

/// `id` picks the matching paper. A missing or unmatched `id` falls back to the subject's first
/// paper, so only an empty subject yields nothing.
pub fn select_pyq<'a>(items: &'a [PyqItem], id: Option<&str>) -> Option<&'a PyqItem> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .and_then(|id| items.iter().find(|item| item.id == id))
        .or_else(|| items.first())
}
