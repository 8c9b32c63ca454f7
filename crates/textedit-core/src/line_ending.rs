//! Line ending helpers.
//!
//! Buffers store text using LF (`'\n'`) line breaks only.
//! When loading content that uses CRLF (`"\r\n"`), it is normalized on load, and the
//! preferred line ending is remembered so saving can restore it.

/// The preferred newline sequence used when saving a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// Detect the dominant line ending from a source text.
    ///
    /// Policy: if the input contains any CRLF (`"\r\n"`), returns [`LineEnding::Crlf`],
    /// otherwise [`LineEnding::Lf`].
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Convert CRLF sequences in `text` to LF. Lone `'\r'` characters are kept.
    pub fn normalize(text: &str) -> String {
        text.replace("\r\n", "\n")
    }

    /// The byte sequence written for each line break.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// Convert an LF-normalized text to this line ending for saving.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', self.as_str()),
        }
    }
}
