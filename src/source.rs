use std::io;
use std::path::{Path, PathBuf};

/// Replaces every byte outside printable ASCII with a space.
///
/// Line feeds and carriage returns are replaced too, so the result is a single
/// line with exactly as many bytes as the input.
pub fn sanitize(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| match byte {
            32..=126 => byte as char,
            _ => ' ',
        })
        .collect()
}

/// A program read from disk.
///
/// The interpreter runs on the sanitized text. Diagnostics are rendered against
/// the file as written when it is plain ASCII, so line numbers survive.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    original: Option<String>,
}

impl SourceFile {
    pub fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read source file");
        Ok(Self::from_bytes(path, bytes))
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let text = sanitize(&bytes);
        let original = String::from_utf8(bytes).ok();
        Self {
            path: path.into(),
            text,
            original,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The sanitized text handed to the lexer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text to show in diagnostics. Byte offsets match `text`.
    pub fn display_text(&self) -> &str {
        match self.original {
            Some(ref original) if original.is_ascii() => original,
            _ => &self.text,
        }
    }
}
