//! Signal declaration parser
//!
//! Extracts `(name, type)` pairs from the `SIG=` lines of a `.SIG` file.
//! Lines that are not declarations, or that do not fit the extraction
//! pattern, are skipped without error.

use std::io::BufRead;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

/// Literal every declaration line starts with (after trimming)
pub const DECLARATION_PREFIX: &str = "SIG=";

/// Namespace of the global variables referenced by declarations
pub const NAMESPACE_PREFIX: &str = "@GV";

static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"SIG=@GV\.([A-Za-z0-9_]+)\s+TYPE=([A-Z]+)")
        .expect("declaration pattern is valid")
});

/// One point declaration as found in the signal file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointDeclaration {
    /// Bare variable name (without namespace)
    pub name: String,
    /// Raw type code, e.g. `AA`, `LA`, `REAL`, `AO`
    pub type_tag: String,
}

impl PointDeclaration {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
        }
    }

    /// Canonical namespaced reference, e.g. `@GV.FT041`
    pub fn reference(&self) -> String {
        format!("{}.{}", NAMESPACE_PREFIX, self.name)
    }
}

/// Parse a single line. Returns `None` for anything that is not a point
/// declaration.
pub fn parse_line(line: &str) -> Option<PointDeclaration> {
    let line = line.trim();
    if !line.starts_with(DECLARATION_PREFIX) {
        return None;
    }

    let caps = DECLARATION_RE.captures(line)?;
    Some(PointDeclaration::new(&caps[1], &caps[2]))
}

/// Iterator over the declarations of a reader, in file order. Lines are
/// decoded lossily, so non-UTF-8 bytes in descriptions never stop a scan.
pub struct Declarations<R> {
    reader: R,
    buf: Vec<u8>,
    lines_read: usize,
}

impl<R: BufRead> Declarations<R> {
    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

impl<R: BufRead> Iterator for Declarations<R> {
    type Item = Result<PointDeclaration>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.lines_read += 1;
                    if let Some(decl) = parse_line(&String::from_utf8_lossy(&self.buf)) {
                        return Some(Ok(decl));
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Scan a reader line by line
pub fn parse_declarations<R: BufRead>(reader: R) -> Declarations<R> {
    Declarations {
        reader,
        buf: Vec::new(),
        lines_read: 0,
    }
}
