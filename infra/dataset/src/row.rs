use std::sync::Arc;

/// Column delimiter of the bundled datasets.
pub const DEFAULT_DELIMITER: char = ';';

/// One record of a dataset resource: its 1-based line number and its trimmed columns.
///
/// The row shape is never validated here; converters decide what a column means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: usize,
    columns: Vec<String>,
}

impl Row {
    pub fn new<I, S>(line: usize, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { line, columns: columns.into_iter().map(Into::into).collect() }
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// The first column parsed as an integer code, if it is one.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.get(0).and_then(|c| c.parse().ok())
    }
}

/// A lazy cursor over the rows of one resource.
///
/// Every call to [`crate::Dataset::rows`] returns a fresh cursor that starts from the
/// first line; cursors share the underlying text but never their position.
/// Blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct Rows {
    text: Arc<str>,
    offset: usize,
    line: usize,
    delimiter: char,
}

impl Rows {
    #[must_use]
    pub const fn new(text: Arc<str>, delimiter: char) -> Self {
        Self { text, offset: 0, line: 0, delimiter }
    }
}

impl Iterator for Rows {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset < self.text.len() {
            let rest = &self.text[self.offset..];
            let (raw, consumed) = rest.find('\n').map_or((rest, rest.len()), |i| (&rest[..i], i + 1));
            self.offset += consumed;
            self.line += 1;

            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            return Some(Row::new(self.line, trimmed.split(self.delimiter).map(str::trim)));
        }
        None
    }
}
