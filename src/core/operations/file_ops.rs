use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result type for file operations
pub type FileOpResult<T> = Result<T, FileOpError>;

/// Error types for file operations
#[derive(Debug)]
pub enum FileOpError {
    CopyFailed(String),
    RemoveFailed(String),
    CreateFailed(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for FileOpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOpError::CopyFailed(msg) => write!(f, "Copy failed: {}", msg),
            FileOpError::RemoveFailed(msg) => write!(f, "Remove failed: {}", msg),
            FileOpError::CreateFailed(msg) => write!(f, "Create failed: {}", msg),
            FileOpError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FileOpError {}

impl From<std::io::Error> for FileOpError {
    fn from(error: std::io::Error) -> Self {
        FileOpError::IoError(error)
    }
}

impl From<walkdir::Error> for FileOpError {
    fn from(error: walkdir::Error) -> Self {
        FileOpError::IoError(error.into())
    }
}

/// Copy a single file, overwriting the destination. Failures are returned,
/// not logged; the caller reports them.
///
/// # Arguments
/// * `src` - Source file path
/// * `dest` - Destination file path
pub fn copy_file(src: &Path, dest: &Path) -> FileOpResult<()> {
    debug!("Copying file from {:?} to {:?}", src, dest);

    if let Err(e) = fs::copy(src, dest) {
        return Err(FileOpError::CopyFailed(format!(
            "Failed to copy from {:?} to {:?}: {}",
            src, dest, e
        )));
    }

    Ok(())
}

/// Create `path` and any missing parents.
pub fn create_dir(path: &Path) -> FileOpResult<()> {
    fs::create_dir_all(path)
        .map_err(|e| FileOpError::CreateFailed(format!("Failed to create {:?}: {}", path, e)))
}

/// Delete `path` recursively if it exists, then recreate it empty.
pub fn reset_directory(path: &Path) -> FileOpResult<()> {
    if path.exists() {
        warn!(
            "Directory {:?} already exists. Deleting and recreating it.",
            path
        );
        fs::remove_dir_all(path).map_err(|e| {
            FileOpError::RemoveFailed(format!("Failed to remove {:?}: {}", path, e))
        })?;
    }
    create_dir(path)
}

/// Label file for an image: `<labels_dir>/<image stem>.txt`.
///
/// # Returns
/// * `None` if the image path has no file stem
pub fn label_path_for_image(labels_dir: &Path, image_path: &Path) -> Option<PathBuf> {
    image_path.file_stem().map(|stem| {
        let mut name = stem.to_os_string();
        name.push(".txt");
        labels_dir.join(name)
    })
}
