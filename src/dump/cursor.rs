use tracing::{debug, warn};

use super::source::{LineRead, LineSource};

pub const PAGE_START: &str = "<page>";
pub const PAGE_END: &str = "</page>";

/// Holds exactly one page body at a time and moves strictly forward.
pub struct PageCursor<S> {
    source: S,
    body: String,
    line: String,
    exhausted: bool,
}

impl<S: LineSource> PageCursor<S> {
    pub fn new(source: S) -> Self {
        PageCursor {
            source,
            body: String::new(),
            line: String::new(),
            exhausted: false,
        }
    }

    /// Raw markup between the current page markers, empty when no page is
    /// loaded.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Loads the next page. Returns `false` at end of input, on a read
    /// failure, or when a page is left unterminated; after that it keeps
    /// returning `false`.
    pub fn advance(&mut self) -> bool {
        self.body.clear();
        if self.exhausted {
            return false;
        }
        if self.scan() {
            return true;
        }
        self.body.clear();
        self.exhausted = true;
        false
    }

    fn scan(&mut self) -> bool {
        // seek the start marker
        loop {
            if !self.read() {
                return false;
            }
            if self.line.contains(PAGE_START) {
                break;
            }
        }

        loop {
            if !self.read() {
                debug!(buffered = self.body.len(), "page left unterminated");
                return false;
            }
            if self.line.contains(PAGE_END) {
                return true;
            }
            self.body.push_str(&self.line);
        }
    }

    fn read(&mut self) -> bool {
        match self.source.next_line(&mut self.line) {
            LineRead::Line => true,
            LineRead::End => false,
            LineRead::Failed(e) => {
                warn!(error = %e, "dump read failed, stopping traversal");
                false
            }
        }
    }
}
