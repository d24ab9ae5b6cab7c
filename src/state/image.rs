/// The currently loaded image, shared by every screen
///
/// `image_url` and `image_file` are kept in lockstep: the url is non-empty
/// exactly when a file is present. Only [`ImageState::set_image_file`] and
/// [`ImageState::clear_image`] change them.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::handle::{HandleRegistry, ReleasePolicy};
use crate::error::{Error, Result};

/// Shared, single-threaded reference to the image state.
/// Passed explicitly to whoever needs to read or mutate it.
pub type SharedImage = Rc<RefCell<ImageState>>;

/// An image file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    path: PathBuf,
    name: String,
    size: u64,
    dimensions: (u32, u32),
}

impl ImageFile {
    /// Open a file from disk and probe its header for dimensions
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let metadata = fs::metadata(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }

        let dimensions = ::image::image_dimensions(path).map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            dimensions,
        })
    }

    /// Probe a file without blocking the UI thread
    pub async fn load(path: PathBuf) -> Result<Self> {
        // Spawn blocking because header probing reads from disk
        tokio::task::spawn_blocking(move || Self::from_path(&path)).await?
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// (width, height) in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// In-memory handle for tests that never touch the disk
    #[cfg(test)]
    pub fn fixture(name: &str) -> Self {
        Self {
            path: PathBuf::from("/fixtures").join(name),
            name: name.to_string(),
            size: 1024,
            dimensions: (640, 480),
        }
    }
}

/// Display handle and file of the current image
#[derive(Debug, Default)]
pub struct ImageState {
    image_url: String,
    image_file: Option<ImageFile>,
    handles: HandleRegistry,
    policy: ReleasePolicy,
}

impl ImageState {
    /// Empty state: no url, no file
    pub fn new(policy: ReleasePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Wrap a fresh state for sharing between components
    pub fn shared(policy: ReleasePolicy) -> SharedImage {
        Rc::new(RefCell::new(Self::new(policy)))
    }

    /// Store `file` and derive a display handle for it.
    /// `None` leaves the state untouched.
    pub fn set_image_file(&mut self, file: Option<ImageFile>) {
        let Some(file) = file else {
            return;
        };

        let handle = self.handles.create(&file);
        log::info!("🖼️  Loaded {} as {}", file.name(), handle.as_str());
        let url = handle.into_string();

        let previous = std::mem::replace(&mut self.image_url, url);
        self.image_file = Some(file);
        self.release(previous);
    }

    /// Reset both fields to empty
    pub fn clear_image(&mut self) {
        let previous = std::mem::take(&mut self.image_url);
        self.image_file = None;
        self.release(previous);
    }

    fn release(&mut self, previous: String) {
        if previous.is_empty() {
            return;
        }
        match self.policy {
            ReleasePolicy::Retain => {
                log::debug!(
                    "⚠️  Display handle {} left live ({} live in total)",
                    previous,
                    self.handles.live_count()
                );
            }
            ReleasePolicy::Revoke => {
                self.handles.revoke(&previous);
            }
        }
    }

    /// Display handle of the current image, empty when none is loaded
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn image_file(&self) -> Option<&ImageFile> {
        self.image_file.as_ref()
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    /// Path behind the current display handle, for rendering
    pub fn display_path(&self) -> Option<&Path> {
        self.handles.resolve(&self.image_url)
    }

    pub fn handles(&self) -> &HandleRegistry {
        &self.handles
    }
}
