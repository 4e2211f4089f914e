//! # Client Specifications
//!
//! Structures the browser owns. The server never sees these.
//!
//! ## Bookmarks
//!
//! Kept in local storage under `course2_bookmarks` as a JSON array of [`Bookmark`].
//!
//! - Toggling an already saved paper removes it
//! - Order is insertion order
//! - Bookmarks page groups them by [`group_label`], groups in order of first appearance
//!
//! A bookmark is a snapshot, so a paper renamed on the server keeps its old title here.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "course2_bookmarks";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// See [`composite_id`].
    pub id: String,
    pub pyq_id: String,
    pub title: String,
    pub subject_name: String,
    pub subject_slug: String,
    pub branch_slug: String,
    pub semester: String,
    pub file: String,
    pub year: i32,
    pub size_bytes: u64,
}

/// Unique across branches and semesters, unlike the paper id alone.
pub fn composite_id(branch_slug: &str, semester: &str, pyq_id: &str) -> String {
    format!("{branch_slug}-{semester}-{pyq_id}")
}

pub fn group_label(branch_slug: &str, semester: &str) -> String {
    format!("{} • Sem {semester}", branch_slug.to_uppercase())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmarks(Vec<Bookmark>);

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unreadable storage starts empty rather than failing the page.
    pub fn load(persisted: Option<&str>) -> Self {
        persisted
            .and_then(|json| serde_json::from_str(json).ok())
            .unwrap_or_default()
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.0.iter().any(|bookmark| bookmark.id == id)
    }

    /// Returns whether the paper is bookmarked afterwards.
    pub fn toggle(&mut self, bookmark: Bookmark) -> bool {
        if self.is_bookmarked(&bookmark.id) {
            self.0.retain(|saved| saved.id != bookmark.id);
            false
        } else {
            self.0.push(bookmark);
            true
        }
    }

    pub fn grouped(&self) -> IndexMap<String, Vec<&Bookmark>> {
        let mut groups: IndexMap<String, Vec<&Bookmark>> = IndexMap::new();

        for bookmark in &self.0 {
            groups
                .entry(group_label(&bookmark.branch_slug, &bookmark.semester))
                .or_default()
                .push(bookmark);
        }

        groups
    }

    pub fn as_slice(&self) -> &[Bookmark] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
