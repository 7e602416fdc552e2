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

use crate::cargo::container::{Container, ContainerIdentifier, SizeClass};
use crate::cargo::err::ManifestLoadError;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use stowage_core::prelude::Weight;

const ID_COLUMN: &str = "container_id";
const WEIGHT_COLUMN: &str = "weight_ton";
const SIZE_COLUMN: &str = "size";

/// Loads the container manifest from CSV.
///
/// The expected columns are `Container_ID`, `Weight_ton` and `Size`
/// (header matching is case-insensitive, extra columns are ignored).
/// Weights arrive in metric tons and are converted to kilograms here, at
/// the ingestion boundary. Malformed rows are errors: sparse geometry is
/// tolerated elsewhere, a broken manifest is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManifestLoader {
    skip_blank_lines: bool,
}

impl ManifestLoader {
    #[inline]
    pub fn new() -> Self {
        Self {
            skip_blank_lines: true,
        }
    }

    #[inline]
    pub fn skip_blank_lines(mut self, yes: bool) -> Self {
        self.skip_blank_lines = yes;
        self
    }

    pub fn from_bufread<R: BufRead>(&self, br: R) -> Result<Vec<Container>, ManifestLoadError> {
        let mut lines = br.lines().enumerate();

        let header = loop {
            match lines.next() {
                Some((_, line)) => {
                    let line = line?;
                    if line.trim().is_empty() && self.skip_blank_lines {
                        continue;
                    }
                    break line;
                }
                None => return Err(ManifestLoadError::EmptyManifest),
            }
        };

        let columns: Vec<String> = header
            .split(',')
            .map(|c| c.trim().to_ascii_lowercase())
            .collect();
        let id_col = find_column(&columns, ID_COLUMN)?;
        let weight_col = find_column(&columns, WEIGHT_COLUMN)?;
        let size_col = find_column(&columns, SIZE_COLUMN)?;

        let mut containers = Vec::new();
        for (index, line) in lines {
            let line = line?;
            if line.trim().is_empty() && self.skip_blank_lines {
                continue;
            }
            let line_no = index + 1;
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();

            let id = field(&fields, id_col, line_no, ID_COLUMN)?;
            let weight_tons: f64 = field(&fields, weight_col, line_no, WEIGHT_COLUMN)?
                .parse()
                .map_err(|source| ManifestLoadError::ParseFloat {
                    line: line_no,
                    source,
                })?;
            let feet: u32 = field(&fields, size_col, line_no, SIZE_COLUMN)?
                .parse()
                .map_err(|source| ManifestLoadError::ParseInt {
                    line: line_no,
                    source,
                })?;
            let size = SizeClass::from_feet(feet).ok_or(ManifestLoadError::UnknownSize {
                line: line_no,
                value: feet,
            })?;

            containers.push(Container::new(
                ContainerIdentifier::new(id.to_string()),
                Weight::from_tons(weight_tons),
                size,
            ));
        }

        Ok(containers)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Vec<Container>, ManifestLoadError> {
        let file = File::open(path).map_err(ManifestLoadError::Io)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Vec<Container>, ManifestLoadError> {
        self.from_bufread(BufReader::new(r))
    }
}

fn find_column(columns: &[String], name: &str) -> Result<usize, ManifestLoadError> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| ManifestLoadError::MissingColumn(name.to_string()))
}

fn field<'a>(
    fields: &[&'a str],
    index: usize,
    line: usize,
    column: &str,
) -> Result<&'a str, ManifestLoadError> {
    match fields.get(index) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ManifestLoadError::MissingField {
            line,
            column: column.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Result<Vec<Container>, ManifestLoadError> {
        ManifestLoader::new().from_reader(text.as_bytes())
    }

    #[test]
    fn test_loads_well_formed_manifest() {
        let manifest = "\
Container_ID,Weight_ton,Size
CONT0001,24.5,20
CONT0002,30.0,40
";
        let containers = load(manifest).unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].id().value(), "CONT0001");
        assert_eq!(containers[0].weight().kilograms(), 24500.0);
        assert_eq!(containers[0].size(), SizeClass::Twenty);
        assert_eq!(containers[1].size(), SizeClass::Forty);
    }

    #[test]
    fn test_header_case_insensitive_and_extra_columns() {
        let manifest = "\
container_id,WEIGHT_TON,Load Port,SIZE
A,1.0,IDJKT,20
";
        let containers = load(manifest).unwrap();
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].weight().kilograms(), 1000.0);
    }

    #[test]
    fn test_missing_column_is_error() {
        let manifest = "Container_ID,Weight_ton\nA,1.0\n";
        match load(manifest) {
            Err(ManifestLoadError::MissingColumn(c)) => assert_eq!(c, "size"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(load(""), Err(ManifestLoadError::EmptyManifest)));
    }

    #[test]
    fn test_bad_weight_reports_line() {
        let manifest = "Container_ID,Weight_ton,Size\nA,heavy,20\n";
        match load(manifest) {
            Err(ManifestLoadError::ParseFloat { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected ParseFloat, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_size_is_error() {
        let manifest = "Container_ID,Weight_ton,Size\nA,1.0,45\n";
        match load(manifest) {
            Err(ManifestLoadError::UnknownSize { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, 45);
            }
            other => panic!("expected UnknownSize, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_lines_skipped() {
        let manifest = "\nContainer_ID,Weight_ton,Size\nA,1.0,20\n\nB,2.0,20\n";
        let containers = load(manifest).unwrap();
        assert_eq!(containers.len(), 2);
    }

    #[test]
    fn test_missing_field_is_error() {
        let manifest = "Container_ID,Weight_ton,Size\nA,1.0\n";
        assert!(matches!(
            load(manifest),
            Err(ManifestLoadError::MissingField { line: 2, .. })
        ));
    }
}
