//! Line-delimited record streams.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::types::Sample;

/// Reads one [`Sample`] per non-blank line.
///
/// Parsing is lazy: a malformed line surfaces as an error from `next()` at
/// the point it is reached, carrying its 1-based line number.
pub struct SampleReader<R> {
    inner: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> SampleReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for SampleReader<R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.inner.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    let text = self.buf.trim_end_matches(['\n', '\r']);
                    if text.trim().is_empty() {
                        continue;
                    }
                    return Some(Sample::from_json_line(self.line, text));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Writes one JSON line per sample and flushes after each, so the output
/// file is complete up to the last processed record at any moment.
pub struct SampleWriter<W: Write> {
    inner: W,
    written: usize,
}

impl<W: Write> SampleWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn write(&mut self, sample: &Sample) -> Result<()> {
        let line = sample.to_json_line()?;
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(b"\n")?;
        self.inner.flush()?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use std::io::Cursor;

    #[test]
    fn test_reader_skips_blank_lines_and_tracks_line_numbers() {
        let input = "{\"code\": \"a\"}\n\n{\"code\": \"b\"}\n";
        let samples: Vec<_> = SampleReader::new(Cursor::new(input))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].line(), 1);
        assert_eq!(samples[1].line(), 3);
    }

    #[test]
    fn test_reader_reports_malformed_line() {
        let input = "{\"code\": \"a\"}\nnot json\n";
        let mut reader = SampleReader::new(Cursor::new(input));

        assert!(reader.next().unwrap().is_ok());
        match reader.next().unwrap() {
            Err(EvalError::Record { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a record error, got {:?}", other),
        }
    }

    #[test]
    fn test_writer_keeps_unicode_unescaped() {
        let sample = Sample::from_json_line(1, r#"{"code": "x = 'é'", "time_complexity": "O(n²)"}"#).unwrap();
        let mut writer = SampleWriter::new(Vec::new());
        writer.write(&sample).unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "{\"code\":\"x = 'é'\",\"time_complexity\":\"O(n²)\"}\n");
    }
}
