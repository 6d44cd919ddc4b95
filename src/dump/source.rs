use std::io::{self, BufRead};

/// Outcome of a single line read.
#[derive(Debug)]
pub enum LineRead {
    /// A line was written into the caller's buffer.
    Line,
    End,
    Failed(io::Error),
}

/// Forward-only, line-at-a-time view over a dump.
pub trait LineSource {
    /// Replaces `buf` with the next line, trailing `\n` / `\r\n` removed.
    fn next_line(&mut self, buf: &mut String) -> LineRead;
}

/// Line source over any buffered reader. Invalid UTF-8 is decoded lossily
/// so a single bad byte does not end the traversal.
pub struct ReaderLines<R> {
    reader: R,
    bytes: Vec<u8>,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        ReaderLines {
            reader,
            bytes: Vec::with_capacity(4096),
        }
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self, buf: &mut String) -> LineRead {
        self.bytes.clear();
        match self.reader.read_until(b'\n', &mut self.bytes) {
            Ok(0) => LineRead::End,
            Ok(_) => {
                if self.bytes.last() == Some(&b'\n') {
                    self.bytes.pop();
                    if self.bytes.last() == Some(&b'\r') {
                        self.bytes.pop();
                    }
                }
                buf.clear();
                buf.push_str(&String::from_utf8_lossy(&self.bytes));
                LineRead::Line
            }
            Err(e) => LineRead::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &[u8]) -> Vec<String> {
        let mut src = ReaderLines::new(Cursor::new(input.to_vec()));
        let mut buf = String::new();
        let mut out = Vec::new();
        while let LineRead::Line = src.next_line(&mut buf) {
            out.push(buf.clone());
        }
        out
    }

    #[test]
    fn strips_line_endings() {
        assert_eq!(collect(b"a\r\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_input_is_end() {
        let mut src = ReaderLines::new(Cursor::new(Vec::new()));
        let mut buf = String::new();
        assert!(matches!(src.next_line(&mut buf), LineRead::End));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let lines = collect(b"ok\n\xff\xfebad\n");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("bad"));
    }

    #[test]
    fn blank_lines_are_kept() {
        assert_eq!(collect(b"a\n\nb\n"), vec!["a", "", "b"]);
    }
}
