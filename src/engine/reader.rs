//! Logical line reader
//!
//! Reassembles lines that span several buffered reads and yields a final line
//! even when the input does not end with a line terminator.

use std::io::{self, BufRead};

/// Reads one logical line at a time from a buffered reader
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
        }
    }

    /// Read the next logical line without its `\n` or `\r\n` terminator.
    ///
    /// Returns `Ok(None)` once the input is exhausted. Invalid UTF-8 is
    /// replaced rather than rejected.
    ///
    /// # Errors
    /// Propagates read errors from the underlying reader.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
