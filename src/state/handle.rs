/// Display handles for the currently loaded image
///
/// A display handle is a short locator (`blob:photo-desk/<n>`) that a view
/// can resolve back to the file it was derived from. Handles stay live in
/// the registry until they are revoked.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::image::ImageFile;

/// Scheme prefix of every issued handle
const HANDLE_PREFIX: &str = "blob:photo-desk/";

/// What happens to the previous display handle when the image changes
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReleasePolicy {
    /// Leave old handles live (they are only logged)
    #[default]
    Retain,
    /// Revoke the old handle on replace and on clear
    Revoke,
}

/// An issued locator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayHandle(String);

impl DisplayHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Issues and revokes display handles
#[derive(Debug, Default)]
pub struct HandleRegistry {
    next_id: u64,
    live: HashMap<String, PathBuf>,
}

impl HandleRegistry {
    /// Derive a fresh handle for `file`. Every call yields a new locator,
    /// even for the same file.
    pub fn create(&mut self, file: &ImageFile) -> DisplayHandle {
        self.next_id += 1;
        let url = format!("{}{}", HANDLE_PREFIX, self.next_id);
        self.live.insert(url.clone(), file.path().to_path_buf());
        log::debug!("🔗 Created display handle {} for {}", url, file.path().display());
        DisplayHandle(url)
    }

    /// Release a handle. Returns false if it was unknown or already revoked.
    pub fn revoke(&mut self, url: &str) -> bool {
        let released = self.live.remove(url).is_some();
        if released {
            log::debug!("🧹 Revoked display handle {}", url);
        }
        released
    }

    /// Path behind a live handle
    pub fn resolve(&self, url: &str) -> Option<&Path> {
        self.live.get(url).map(PathBuf::as_path)
    }

    /// Number of handles that have not been revoked
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_issues_unique_handles() {
        let mut registry = HandleRegistry::default();
        let file = ImageFile::fixture("a.png");

        let first = registry.create(&file);
        let second = registry.create(&file);

        assert_ne!(first, second);
        assert!(first.as_str().starts_with("blob:photo-desk/"));
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn test_resolve_and_revoke() {
        let mut registry = HandleRegistry::default();
        let file = ImageFile::fixture("b.png");
        let handle = registry.create(&file);

        assert_eq!(registry.resolve(handle.as_str()), Some(file.path()));

        assert!(registry.revoke(handle.as_str()));
        assert!(!registry.revoke(handle.as_str()));
        assert_eq!(registry.resolve(handle.as_str()), None);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_release_policy_serializes_lowercase() {
        let json = serde_json::to_string(&ReleasePolicy::Revoke).unwrap();
        assert_eq!(json, "\"revoke\"");
        assert_eq!(ReleasePolicy::default(), ReleasePolicy::Retain);
    }
}
