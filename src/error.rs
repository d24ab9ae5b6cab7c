/// Error types for the application
///
/// Every fallible operation in the crate returns [`Result`]. The navigation
/// guard itself never fails; errors only come from building route tables,
/// resolving unknown targets, opening files, and reading settings.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("unreadable image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("invalid settings file: {0}")]
    Config(#[from] serde_json::Error),

    #[error("route name `{0}` is defined more than once")]
    DuplicateRouteName(String),

    #[error("route path `{0}` is defined more than once")]
    DuplicatePath(String),

    #[error("route table has no `home` route to redirect to")]
    MissingHomeRoute,

    #[error("no route matches `{0}`")]
    UnknownRoute(String),

    #[error("navigation to `{0}` kept redirecting")]
    RedirectLoop(String),
}

pub type Result<T> = std::result::Result<T, Error>;
