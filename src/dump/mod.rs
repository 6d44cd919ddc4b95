pub mod cursor;
pub mod source;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use cursor::PageCursor;
pub use source::{LineRead, LineSource, ReaderLines};

use crate::error::{Error, Result};

const READ_BUFFER: usize = 1 << 20;

/// Open a dump file for a single forward pass.
pub fn open(path: &Path) -> Result<ReaderLines<BufReader<File>>> {
    let file = File::open(path).map_err(|source| Error::OpenDump {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ReaderLines::new(BufReader::with_capacity(READ_BUFFER, file)))
}
