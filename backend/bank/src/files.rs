//! # PDF Paths
//!
//! The PYQ index stores file locations relative to the public root, e.g.
//! `/pdfs/cse-ai-and-ml/1/compiler-design/compiler-design-2024.pdf`.
//!
//! [`PdfRoot::resolve`] is the only place such a path turns into a filesystem path. It
//! normalizes separators, collapses `.` and `..` and then rejects anything that climbs above
//! the public root or does not live under `pdfs/`. Rejected paths are never clamped back
//! into the root.
use std::path::PathBuf;

use thiserror::Error;

pub const PDF_PREFIX: &str = "pdfs";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("Invalid file path: empty")]
    Empty,

    #[error("Invalid file path: {0} escapes the public root")]
    Traversal(String),

    #[error("Invalid file path: {0} is outside the pdf directory")]
    OutsideRoot(String),
}

#[derive(Clone, Debug)]
pub struct PdfRoot {
    public_dir: PathBuf,
}

impl PdfRoot {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    pub fn pdf_dir(&self) -> PathBuf {
        self.public_dir.join(PDF_PREFIX)
    }

    pub fn resolve(&self, relative_path: &str) -> Result<PathBuf, PathError> {
        let normalized = relative_path.replace('\\', "/");
        let mut segments: Vec<&str> = Vec::new();

        for segment in normalized.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(PathError::Traversal(relative_path.to_string()));
                    }
                }
                segment if segment.contains('\0') || segment.contains(':') => {
                    return Err(PathError::OutsideRoot(relative_path.to_string()));
                }
                segment => segments.push(segment),
            }
        }

        match segments.first() {
            None => return Err(PathError::Empty),
            Some(&first) if first != PDF_PREFIX || segments.len() < 2 => {
                return Err(PathError::OutsideRoot(relative_path.to_string()));
            }
            Some(_) => {}
        }

        let full = segments
            .iter()
            .fold(self.public_dir.clone(), |path, segment| path.join(segment));

        if !full.starts_with(self.pdf_dir()) {
            return Err(PathError::OutsideRoot(relative_path.to_string()));
        }

        Ok(full)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{PathError, PdfRoot};

    fn root() -> PdfRoot {
        PdfRoot::new("/srv/portal/public")
    }

    #[test]
    fn test_dataset_paths() {
        assert_eq!(
            root().resolve("/pdfs/cse-ai-and-ml/1/compiler-design/compiler-design-2024.pdf"),
            Ok(PathBuf::from(
                "/srv/portal/public/pdfs/cse-ai-and-ml/1/compiler-design/compiler-design-2024.pdf"
            ))
        );
        assert_eq!(
            root().resolve("pdfs/civil/7/a.pdf"),
            Ok(PathBuf::from("/srv/portal/public/pdfs/civil/7/a.pdf"))
        );
    }

    #[test]
    fn test_windows_separators() {
        assert_eq!(
            root().resolve("\\pdfs\\civil\\7\\a.pdf"),
            Ok(PathBuf::from("/srv/portal/public/pdfs/civil/7/a.pdf"))
        );
    }

    #[test]
    fn test_inner_dot_segments_collapse() {
        assert_eq!(
            root().resolve("/pdfs/civil/./7/../8/a.pdf"),
            Ok(PathBuf::from("/srv/portal/public/pdfs/civil/8/a.pdf"))
        );
    }

    #[test]
    fn test_traversal_rejected() {
        for path in [
            "../../etc/passwd",
            "/../etc/passwd",
            "pdfs/../../etc/passwd",
            "..\\..\\windows\\win.ini",
            "/pdfs/civil/../../../secret",
        ] {
            assert!(
                matches!(root().resolve(path), Err(PathError::Traversal(_))),
                "accepted {path}"
            );
        }
    }

    #[test]
    fn test_outside_pdf_dir_rejected() {
        for path in [
            "/data/pyqs.json",
            "pdfs/../index.html",
            "/pdfs",
            "/pdfs/",
            "/pdfsx/a.pdf",
            "/pdfs/c:/a.pdf",
        ] {
            assert!(
                matches!(root().resolve(path), Err(PathError::OutsideRoot(_))),
                "accepted {path}"
            );
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(root().resolve(""), Err(PathError::Empty));
        assert_eq!(root().resolve("/./"), Err(PathError::Empty));
    }
}
