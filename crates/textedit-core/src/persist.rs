//! Whole-buffer serialization.
//!
//! [`write_buffer`] writes every line verbatim (each already ends with a line break) to any
//! [`Write`]; [`read_buffer`] splits a byte stream on line breaks. Both are stream-based:
//! opening files, picking paths and the like belong to the caller.

use crate::buffer::TextBuffer;
use crate::line_ending::LineEnding;
use std::io::{self, Read, Write};
use std::string::FromUtf8Error;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a buffer.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading from the source failed.
    #[error("failed to read buffer contents: {0}")]
    Io(#[from] io::Error),
    /// The source is not valid UTF-8.
    #[error("buffer contents are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// Read a buffer from `reader`.
///
/// CRLF line breaks are normalized to LF and reported as the returned [`LineEnding`]. The last
/// line always ends with a line break, even if the stream does not.
pub fn read_buffer<R: Read>(mut reader: R) -> Result<(TextBuffer, LineEnding), LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)?;

    let line_ending = LineEnding::detect_in_text(&text);
    let buffer = match line_ending {
        LineEnding::Lf => TextBuffer::from_text(&text),
        LineEnding::Crlf => TextBuffer::from_text(&LineEnding::normalize(&text)),
    };
    debug!(
        lines = buffer.line_count(),
        ?line_ending,
        "loaded buffer"
    );
    Ok((buffer, line_ending))
}

/// Write `buffer` to `writer`, encoding line breaks as `line_ending`.
pub fn write_buffer<W: Write>(
    buffer: &TextBuffer,
    line_ending: LineEnding,
    mut writer: W,
) -> io::Result<()> {
    for line in buffer.lines() {
        let encoded = line_ending.apply_to_text(&line.to_string());
        writer.write_all(encoded.as_bytes())?;
    }
    writer.flush()?;
    debug!(lines = buffer.line_count(), ?line_ending, "saved buffer");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_guarantees_final_break() {
        let (buffer, ending) = read_buffer("one\ntwo".as_bytes()).unwrap();
        assert_eq!(ending, LineEnding::Lf);
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.text(), "one\ntwo\n");
    }

    #[test]
    fn test_read_empty_stream() {
        let (buffer, _) = read_buffer(io::empty()).unwrap();
        assert_eq!(buffer, TextBuffer::empty());
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let err = read_buffer(&[0xff, 0xfe, b'\n'][..]).unwrap_err();
        assert!(matches!(err, LoadError::InvalidUtf8(_)));
    }

    #[test]
    fn test_write_keeps_lone_cr() {
        let buffer = TextBuffer::from_text("a\rb\nc\n");
        let mut out = Vec::new();
        write_buffer(&buffer, LineEnding::Crlf, &mut out).unwrap();
        assert_eq!(out, b"a\rb\r\nc\r\n");
    }

    #[test]
    fn test_crlf_round_trip() {
        let source = "a\r\nb\r\n";
        let (buffer, ending) = read_buffer(source.as_bytes()).unwrap();
        assert_eq!(buffer.text(), "a\nb\n");

        let mut out = Vec::new();
        write_buffer(&buffer, ending, &mut out).unwrap();
        assert_eq!(out, source.as_bytes());
    }
}
