//! # Slugs
//!
//! Canonical keys for branches and subjects.
//!
//! A slug is lowercase ASCII, hyphen separated and safe to drop into a URL path segment.
//! The same slug is used as the branch lookup key, the subject key of the PYQ index and the
//! directory names under `public/pdfs`, so the transform must never change once data has
//! been generated with it.
//!
//! ## Steps
//! 1. Lowercase.
//! 2. `&` becomes the word `and`.
//! 3. Decompose (NFD) and drop combining marks, so `é` becomes `e`.
//! 4. Every run of characters outside `[a-z0-9]` becomes a single `-`.
//! 5. Trim leading/trailing `-`.
//!
//! Empty or all-punctuation input produces an empty slug. Callers treat it as "no match".
use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"));

pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase().replace('&', " and ");

    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();

    NON_ALPHANUMERIC
        .replace_all(&stripped, "-")
        .trim_matches('-')
        .to_string()
}

/// Memoizes [`slugify`] while the registry is built.
///
/// Unbounded: only ever fed names from the startup dataset. User supplied strings go
/// through [`slugify`] directly.
#[derive(Default)]
pub struct SlugCache {
    slugs: HashMap<String, String>,
}

impl SlugCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, input: &str) -> String {
        if let Some(slug) = self.slugs.get(input) {
            return slug.clone();
        }

        let slug = slugify(input);
        self.slugs.insert(input.to_string(), slug.clone());

        slug
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}
