/// State management module
///
/// This module holds the application state shared between screens:
/// - The currently loaded image and its display handle (image.rs)
/// - Display handle issuing and release (handle.rs)

pub mod handle;
pub mod image;

pub use handle::ReleasePolicy;
pub use image::{ImageFile, ImageState, SharedImage};
