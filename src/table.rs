//! The serialized registry format: `type,ext ext,type,ext,...`.
//!
//! Commas separate a MIME type from its extension group and one pair from the next.
//! A single space separates the extensions inside a group.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub mime_type: String,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    entries: Vec<Entry>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("entry {index}: type \"{mime_type}\" has no extension group")]
    Unpaired { index: usize, mime_type: String },
    #[error("entry {index}: empty type")]
    EmptyType { index: usize },
    #[error("entry {index}: type \"{mime_type}\" lists no extensions")]
    NoExtensions { index: usize, mime_type: String },
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_static(data: &[(&str, &[&str])]) -> Self {
        let mut table = Self::new();
        for (mime_type, extensions) in data {
            table.push(*mime_type, extensions.iter().map(|it| it.to_string()).collect());
        }
        table
    }

    pub fn push(&mut self, mime_type: impl Into<String>, extensions: Vec<String>) {
        self.entries.push(Entry {
            mime_type: mime_type.into(),
            extensions,
        });
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{},{}", entry.mime_type, entry.extensions.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Table {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_strict(s)
    }
}

fn pairs(serialized: &str) -> (Vec<(&str, &str)>, Option<&str>) {
    let mut list = vec![];
    if serialized.is_empty() {
        return (list, None);
    }
    let mut tokens = serialized.split(',');
    while let Some(mime_type) = tokens.next() {
        match tokens.next() {
            Some(group) => list.push((mime_type, group)),
            None => return (list, Some(mime_type)),
        }
    }
    (list, None)
}

/// Parses without validation. Odd shapes produce odd entries (`a  b` yields an empty
/// extension between `a` and `b`); only an unpaired trailing type is dropped.
pub fn parse(serialized: &str) -> Table {
    let (list, unpaired) = pairs(serialized);
    if let Some(mime_type) = unpaired {
        warn!(mime_type, "dropping type without extension group");
    }
    let mut table = Table::new();
    for (mime_type, group) in list {
        table.push(mime_type, group.split(' ').map(str::to_string).collect());
    }
    table
}

/// Parses and rejects unpaired types, empty types and empty extension groups.
pub fn parse_strict(serialized: &str) -> Result<Table, TableError> {
    let (list, unpaired) = pairs(serialized);
    if let Some(mime_type) = unpaired {
        return Err(TableError::Unpaired {
            index: list.len(),
            mime_type: mime_type.to_string(),
        });
    }
    let mut table = Table::new();
    for (index, (mime_type, group)) in list.into_iter().enumerate() {
        let mime_type = mime_type.trim();
        if mime_type.is_empty() {
            return Err(TableError::EmptyType { index });
        }
        let extensions: Vec<String> = group.split_whitespace().map(str::to_string).collect();
        if extensions.is_empty() {
            return Err(TableError::NoExtensions {
                index,
                mime_type: mime_type.to_string(),
            });
        }
        table.push(mime_type, extensions);
    }
    Ok(table)
}
