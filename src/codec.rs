//! The `.param` line format.
//!
//! A parameter file holds one `name,value` pair per line. There is no
//! header and no quoting, so neither field may contain a comma. Blank lines
//! are ignored when reading and never written.

use std::path::Path;

use crate::{
    error::{Error, Result},
    param::Parameter,
};

/// Extension every parameter file must carry.
pub const PARAM_FILE_EXTENSION: &str = "param";

pub const DELIMITER: char = ',';

/// Accepts any path ending in `.param`, including a bare `.param` file name.
pub fn check_extension(path: &Path) -> Result<()> {
    let has_extension = path
        .as_os_str()
        .as_encoded_bytes()
        .strip_suffix(PARAM_FILE_EXTENSION.as_bytes())
        .is_some_and(|stem| stem.ends_with(b"."));

    if has_extension {
        Ok(())
    } else {
        Err(Error::BadExtension {
            path: path.to_path_buf(),
        })
    }
}

/// Serializes parameters to file contents, one line each, in iteration order.
pub fn encode<'a>(params: impl IntoIterator<Item = &'a Parameter>) -> String {
    params.into_iter().fold(String::new(), |mut out, p| {
        out.push_str(&p.name);
        out.push(DELIMITER);
        out.push_str(&p.value);
        out.push('\n');
        out
    })
}

/// A line of a parameter file, after blank lines have been skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// 1-based line number within the file.
    pub line_number: usize,
    pub line: &'a str,
    pub name: &'a str,
    pub value: &'a str,
}

/// Splits a single line into a trimmed `(name, value)` pair.
///
/// Returns `None` when the line does not hold exactly two fields.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split(DELIMITER);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(name), Some(value), None) => Some((name.trim(), value.trim())),
        _ => None,
    }
}

/// Walks the non-blank lines of `contents`.
///
/// Each item is either a parsed [`Entry`] or the [`Error::MalformedLine`]
/// for a line that does not split into two fields. `path` is only used for
/// error reporting.
pub fn entries<'a>(
    contents: &'a str,
    path: &'a Path,
) -> impl Iterator<Item = Result<Entry<'a>>> + 'a {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(move |(index, line)| {
            let line_number = index + 1;
            parse_line(line)
                .map(|(name, value)| Entry {
                    line_number,
                    line,
                    name,
                    value,
                })
                .ok_or_else(|| Error::MalformedLine {
                    path: path.to_path_buf(),
                    line_number,
                    line: line.to_string(),
                })
        })
}
