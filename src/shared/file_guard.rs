use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Upper bound for configuration files and report templates (1 MB)
pub const MAX_TEXT_FILE_SIZE: u64 = 1024 * 1024;

/// Reads a UTF-8 text file after checking that it is a regular file within
/// `max_size` bytes.
///
/// Symbolic links are followed; mounted config maps are usually symlinks.
///
/// # Errors
/// Returns an error if the path doesn't exist, is not a regular file,
/// exceeds the size limit, or is not valid UTF-8
pub fn read_bounded_text(path: &Path, description: &str, max_size: u64) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata for {}: {}",
            description,
            path.display(),
            e
        )
    })?;

    if !metadata.is_file() {
        anyhow::bail!("{} {} is not a regular file", description, path.display());
    }

    if metadata.len() > max_size {
        anyhow::bail!(
            "{} {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            description,
            path.display(),
            metadata.len(),
            max_size
        );
    }

    fs::read_to_string(path).map_err(|e| {
        anyhow::anyhow!("Failed to read {} {}: {}", description, path.display(), e)
    })
}
