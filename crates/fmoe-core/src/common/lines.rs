use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("unexpected end of input after line {line}")]
    UnexpectedEof { line: usize },
    #[error("failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Sequential, single-pass line source. Holds only the most recent line.
///
/// Lines are read as raw bytes. Skipped lines are never decoded and returned
/// lines are decoded lossily.
pub struct LineCursor<R> {
    reader: R,
    raw: Vec<u8>,
    text: String,
    line_number: usize,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            raw: Vec::new(),
            text: String::new(),
            line_number: 0,
        }
    }

    /// 1-based number of the line most recently returned.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_raw(&mut self) -> Result<bool, LineError> {
        self.raw.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.raw)
            .map_err(|source| LineError::Io {
                line: self.line_number + 1,
                source,
            })?;
        if read == 0 {
            return Ok(false);
        }

        self.line_number += 1;
        if self.raw.last() == Some(&b'\n') {
            self.raw.pop();
            if self.raw.last() == Some(&b'\r') {
                self.raw.pop();
            }
        }
        Ok(true)
    }

    /// Next line without its `\n` / `\r\n` terminator, or `None` at end of input.
    pub fn try_next_line(&mut self) -> Result<Option<&str>, LineError> {
        if !self.read_raw()? {
            return Ok(None);
        }
        self.text.clear();
        self.text.push_str(&String::from_utf8_lossy(&self.raw));
        Ok(Some(&self.text))
    }

    pub fn next_line(&mut self) -> Result<&str, LineError> {
        let line_number = self.line_number;
        self.try_next_line()?
            .ok_or(LineError::UnexpectedEof { line: line_number })
    }

    pub fn skip(&mut self, lines: usize) -> Result<(), LineError> {
        for _ in 0..lines {
            let line = self.line_number;
            if !self.read_raw()? {
                return Err(LineError::UnexpectedEof { line });
            }
        }
        Ok(())
    }
}
