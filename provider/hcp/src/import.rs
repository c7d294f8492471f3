//! Colon-delimited import IDs.
//!
//! Every resource accepts its child segments alone (the provider default
//! project is substituted) or prefixed by an explicit project ID.

use crate::error::ProviderError;

/// Accepted shapes of one resource's import ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportIdFormat {
    segments: Vec<&'static str>,
}

/// A parsed import ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    /// Present only when the project-prefixed form was used
    pub project_id: Option<String>,
    segments: Vec<(&'static str, String)>,
}

impl ImportId {
    /// Value of a named segment; empty if the format has no such segment
    pub fn get(&self, name: &str) -> &str {
        self.segments
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// Characters that would change the shape of an API path
const RESERVED: [char; 3] = ['/', '?', '#'];

impl ImportIdFormat {
    /// Format whose bare form has exactly the named `segments`, in order
    pub fn new(segments: &[&'static str]) -> Self {
        Self {
            segments: segments.to_vec(),
        }
    }

    /// Human-readable list of accepted formats
    pub fn describe(&self) -> String {
        let bare = self
            .segments
            .iter()
            .map(|s| format!("{{{}}}", s))
            .collect::<Vec<_>>()
            .join(":");
        format!("{} or {{project_id}}:{}", bare, bare)
    }

    /// Split `id` into its named segments.
    ///
    /// Blank segments, segments containing a path delimiter and the wrong
    /// number of segments are all `InvalidImportId`.
    pub fn parse(&self, id: &str) -> Result<ImportId, ProviderError> {
        let invalid = || ProviderError::InvalidImportId {
            id: id.to_string(),
            formats: self.describe(),
        };

        let parts: Vec<&str> = id.split(':').collect();
        if parts.iter().any(|p| p.trim().is_empty() || p.contains(RESERVED)) {
            return Err(invalid());
        }

        let (project_id, rest) = if parts.len() == self.segments.len() {
            (None, parts.as_slice())
        } else if parts.len() == self.segments.len() + 1 {
            (Some(parts[0].to_string()), &parts[1..])
        } else {
            return Err(invalid());
        };

        Ok(ImportId {
            project_id,
            segments: self
                .segments
                .iter()
                .zip(rest)
                .map(|(name, value)| (*name, value.to_string()))
                .collect(),
        })
    }
}
