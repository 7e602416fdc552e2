// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::cargo::container::SizeClass;
use std::num::{ParseFloatError, ParseIntError};

/// The manifest holds fewer containers of one size class than the run was
/// asked to load. Raised before any optimization starts; no partial run
/// is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientContainersError {
    size: SizeClass,
    requested: usize,
    available: usize,
}

impl InsufficientContainersError {
    pub fn new(size: SizeClass, requested: usize, available: usize) -> Self {
        Self {
            size,
            requested,
            available,
        }
    }

    pub fn size(&self) -> SizeClass {
        self.size
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn available(&self) -> usize {
        self.available
    }
}

impl std::fmt::Display for InsufficientContainersError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Not enough {} containers in the manifest: requested {}, available {}",
            self.size, self.requested, self.available
        )
    }
}

impl std::error::Error for InsufficientContainersError {}

#[derive(Debug)]
pub enum ManifestLoadError {
    Io(std::io::Error),
    EmptyManifest,
    MissingColumn(String),
    ParseInt {
        line: usize,
        source: ParseIntError,
    },
    ParseFloat {
        line: usize,
        source: ParseFloatError,
    },
    UnknownSize {
        line: usize,
        value: u32,
    },
    MissingField {
        line: usize,
        column: String,
    },
}

impl From<std::io::Error> for ManifestLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for ManifestLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ManifestLoadError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            EmptyManifest => write!(f, "manifest has no header line"),
            MissingColumn(name) => write!(f, "manifest header is missing column '{name}'"),
            ParseInt { line, source } => {
                write!(f, "line {line}: invalid integer: {source}")
            }
            ParseFloat { line, source } => {
                write!(f, "line {line}: invalid number: {source}")
            }
            UnknownSize { line, value } => {
                write!(f, "line {line}: unsupported container size {value} (expected 20 or 40)")
            }
            MissingField { line, column } => {
                write!(f, "line {line}: missing value for column '{column}'")
            }
        }
    }
}

impl std::error::Error for ManifestLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestLoadError::Io(e) => Some(e),
            ManifestLoadError::ParseInt { source, .. } => Some(source),
            ManifestLoadError::ParseFloat { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_containers_display() {
        let e = InsufficientContainersError::new(SizeClass::Twenty, 400, 120);
        assert_eq!(
            e.to_string(),
            "Not enough 20ft containers in the manifest: requested 400, available 120"
        );
        assert_eq!(e.requested(), 400);
        assert_eq!(e.available(), 120);
        assert_eq!(e.size(), SizeClass::Twenty);
    }

    #[test]
    fn test_manifest_error_display() {
        assert_eq!(
            ManifestLoadError::MissingColumn("Size".to_string()).to_string(),
            "manifest header is missing column 'Size'"
        );
        assert_eq!(
            ManifestLoadError::UnknownSize { line: 3, value: 45 }.to_string(),
            "line 3: unsupported container size 45 (expected 20 or 40)"
        );
    }
}
