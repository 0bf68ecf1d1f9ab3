//! Container image references.

use std::fmt;

/// Tag assumed when an image reference names none.
pub const DEFAULT_TAG: &str = "latest";

/// A parsed `repository[:tag][@digest]` image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub repository: String,
    pub tag: String,
    pub digest: Option<String>,
}

impl ImageRef {
    /// Split an image reference into its parts.
    ///
    /// The tag separator is the last `:` after the last `/`, so a registry
    /// port (`registry:5000/app`) is never mistaken for a tag.
    pub fn parse(reference: &str) -> Self {
        let reference = reference.trim();
        let (name, digest) = match reference.split_once('@') {
            Some((name, digest)) => (name, Some(digest.to_owned())),
            None => (reference, None),
        };

        let last_segment = name.rfind('/').map_or(0, |i| i + 1);
        let (repository, tag) = match name[last_segment..].rfind(':') {
            Some(i) => {
                let split = last_segment + i;
                (&name[..split], &name[split + 1..])
            }
            None => (name, ""),
        };

        Self {
            repository: repository.to_owned(),
            tag: if tag.is_empty() { DEFAULT_TAG } else { tag }.to_owned(),
            digest,
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)?;
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}
