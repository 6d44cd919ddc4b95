use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Write `contents` to `dir/name`, creating `dir` on first use. Slashes in
/// `name` become underscores so titles like `AC/DC` stay a single file.
pub fn write_text_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    } else if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    let path = dir.join(name.replace('/', "_"));
    fs::write(&path, contents)?;
    Ok(path)
}
