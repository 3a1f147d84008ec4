use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Wildcard accepted in extension lists, MIME type lists and descriptor output.
pub const WILDCARD: &str = "*";

pub const FILES_TITLE: &str = "Files";

static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("static regex compile"));

pub(crate) fn split_list(list: &str) -> Vec<&str> {
    LIST_SEPARATOR.split(list).collect()
}

/// A named file selection constraint.
///
/// `extensions` is either [`WILDCARD`] or a comma separated extension list without
/// leading dots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    #[serde(default)]
    pub title: String,
    pub extensions: String,
}

impl FilterDescriptor {
    pub fn new(title: impl Into<String>, extensions: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            extensions: extensions.into(),
        }
    }

    pub fn untitled(extensions: impl Into<String>) -> Self {
        Self::new(String::new(), extensions)
    }

    pub fn accepts_all(&self) -> bool {
        self.extensions == WILDCARD
    }
}

/// MIME types given either as one comma separated string or as a list.
#[derive(Debug, Clone)]
pub enum MimeTypes<'a> {
    Joined(&'a str),
    List(Vec<&'a str>),
}

impl<'a> MimeTypes<'a> {
    pub fn to_list(&self) -> Vec<&'a str> {
        match *self {
            MimeTypes::Joined(joined) => split_list(joined.trim()),
            MimeTypes::List(ref list) => list.clone(),
        }
    }
}

impl<'a> From<&'a str> for MimeTypes<'a> {
    fn from(value: &'a str) -> Self {
        MimeTypes::Joined(value)
    }
}

impl<'a> From<&'a [&'a str]> for MimeTypes<'a> {
    fn from(value: &'a [&'a str]) -> Self {
        MimeTypes::List(value.to_vec())
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for MimeTypes<'a> {
    fn from(value: &'a [&'a str; N]) -> Self {
        MimeTypes::List(value.to_vec())
    }
}

impl<'a> From<&'a [String]> for MimeTypes<'a> {
    fn from(value: &'a [String]) -> Self {
        MimeTypes::List(value.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for MimeTypes<'a> {
    fn from(value: &'a Vec<String>) -> Self {
        MimeTypes::from(value.as_slice())
    }
}

pub trait Localizer {
    fn translate(&self, key: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Localizer for Untranslated {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}
