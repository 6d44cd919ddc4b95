//! Streaming extraction of pages from Wikipedia XML dumps.
//!
//! A dump is read one line at a time and one page is buffered at a time, so
//! memory use does not grow with the size of the file. See [`Extractor`].

pub mod cache;
pub mod db;
pub mod dump;
pub mod error;
pub mod export;
pub mod extractor;
pub mod parser;
pub mod settings;

pub use error::{Error, Result};
pub use extractor::{Extractor, Separators};
pub use parser::extract::{ExtractedFields, PageType};
