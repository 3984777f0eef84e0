//! `__lists.ini` writer

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::classifier::Category;
use crate::error::{DnpGenError, Result};
use crate::lists::CategoryLists;

/// Default name of the generated list file
pub const LIST_FILE: &str = "__lists.ini";

/// Serialize all four sections in `Category::ALL` order
pub fn write_lists<W: Write>(lists: &CategoryLists, mut w: W) -> io::Result<()> {
    for category in Category::ALL {
        writeln!(w, "*LIST {}   '{}'", category.code(), category.title())?;
        for entry in lists.get(category) {
            writeln!(w, "{}", entry)?;
        }
        writeln!(w)?;
    }
    w.flush()
}

/// Render the list file to a string
pub fn render(lists: &CategoryLists) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail
    let _ = write_lists(lists, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the list file. The content goes to a sibling temp file first and
/// is renamed over `path` only once fully written.
pub fn write_lists_file(lists: &CategoryLists, path: &Path) -> Result<()> {
    let tmp_path = temp_path(path);
    let to_error = |source: io::Error| DnpGenError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let written = fs::File::create(&tmp_path)
        .and_then(|file| write_lists(lists, BufWriter::new(file)))
        .and_then(|()| fs::rename(&tmp_path, path));

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(to_error(e));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| LIST_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}
