//! Collision-free filenames within one output directory.

use crate::domain::{FileReference, type_tag};
use crate::infra::slug::sanitize_filename;
use std::collections::HashSet;

/// Names already handed out in one directory.
///
/// Registration is deterministic: the same sequence of candidates always
/// yields the same paths. Names are compared case-insensitively, since the
/// default macOS filesystem is. A registry belongs to exactly one directory
/// and one export; create a fresh one per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameRegistry {
    directory: String,
    used: HashSet<String>,
}

impl FilenameRegistry {
    /// Creates an empty registry for `directory` (relative, `/`-separated).
    ///
    /// An empty directory means names are returned bare.
    pub fn new(directory: impl Into<String>) -> Self {
        let directory = directory.into().trim_end_matches('/').to_string();
        Self {
            directory,
            used: HashSet::new(),
        }
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Returns true if `name` has been handed out.
    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(&name.to_lowercase())
    }

    /// Claims a free name derived from `candidate` and returns its path.
    ///
    /// A taken candidate gets `_1`, `_2`, ... inserted before its extension.
    ///
    /// ```
    /// use noteport::infra::FilenameRegistry;
    ///
    /// let mut registry = FilenameRegistry::new("attachments");
    /// assert_eq!(registry.register("photo.jpg"), "attachments/photo.jpg");
    /// assert_eq!(registry.register("photo.jpg"), "attachments/photo_1.jpg");
    /// ```
    pub fn register(&mut self, candidate: &str) -> String {
        let (stem, extension) = split_extension(candidate);
        let mut name = candidate.to_string();
        let mut suffix = 0u32;
        while !self.used.insert(name.to_lowercase()) {
            suffix += 1;
            name = match extension {
                Some(ext) => format!("{stem}_{suffix}.{ext}"),
                None => format!("{stem}_{suffix}"),
            };
        }
        self.path_of(&name)
    }

    fn path_of(&self, name: &str) -> String {
        if self.directory.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.directory, name)
        }
    }
}

/// Splits `name` into stem and extension at the last dot.
///
/// Leading dots (hidden files) and trailing dots do not start an extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < name.len() => (&name[..dot], Some(&name[dot + 1..])),
        _ => (name, None),
    }
}

/// Candidate filename for a file attachment.
///
/// Uses the original filename when it survives sanitizing; otherwise the
/// identifier plus the extension implied by the type tag.
pub fn attachment_candidate(file: &FileReference) -> String {
    if let Some(name) = file.suggested_filename.as_deref().and_then(sanitize_filename) {
        return name;
    }

    let stem = sanitize_filename(&file.identifier).unwrap_or_else(|| "attachment".to_string());
    match type_tag::extension(file.type_tag.as_deref()) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}
