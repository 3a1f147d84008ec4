use crate::ext::extension_of;
use crate::filter::{
    FILES_TITLE, FilterDescriptor, Localizer, MimeTypes, Untranslated, WILDCARD, split_list,
};
use crate::hash::fingerprint;
use crate::op::Operation;
use crate::seed::SEED;
use crate::table::{Table, parse};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard};
use tracing::{debug, trace};

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("static regex compile"));

static MIME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)/(\*|[A-Za-z0-9_]+)$").expect("static regex compile")
});

#[derive(Debug, Default)]
struct Maps {
    by_extension: HashMap<String, String>,
    // first registration order, kept when a type is reassigned
    by_type: Vec<(String, Vec<String>)>,
    type_index: HashMap<String, usize>,
}

impl Maps {
    fn extensions(&self, mime_type: &str) -> Option<&[String]> {
        self.type_index
            .get(mime_type)
            .map(|&i| self.by_type[i].1.as_slice())
    }
}

/// Bidirectional MIME type / file extension registry.
///
/// Queries never modify the registry. Loads upsert: types and extensions mentioned
/// by the new table replace their previous mapping, everything else is kept.
#[derive(Debug)]
pub struct Registry {
    maps: RwLock<Maps>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::from_table(&Table::from_static(SEED))
    }

    pub fn empty() -> Self {
        Self {
            maps: RwLock::new(Maps::default()),
        }
    }

    pub fn from_table(table: &Table) -> Self {
        let registry = Self::empty();
        registry.load_table(table);
        registry
    }

    fn read(&self) -> RwLockReadGuard<'_, Maps> {
        self.maps.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Upserts the associations of a serialized `type,ext ext,type,ext` table.
    pub fn load(&self, serialized: &str) {
        self.load_with(serialized, |_, _| {});
    }

    pub fn load_with(&self, serialized: &str, callback: impl FnMut(&str, Operation)) {
        self.load_table_with(&parse(serialized), callback);
    }

    pub fn load_table(&self, table: &Table) {
        self.load_table_with(table, |_, _| {});
    }

    pub fn load_table_with(&self, table: &Table, mut callback: impl FnMut(&str, Operation)) {
        let mut operations = Vec::with_capacity(table.len());
        {
            let mut maps = self.maps.write().unwrap_or_else(PoisonError::into_inner);
            for entry in table.entries() {
                for extension in &entry.extensions {
                    maps.by_extension
                        .insert(extension.clone(), entry.mime_type.clone());
                }
                let operation = match maps.type_index.get(&entry.mime_type).copied() {
                    Some(i) => {
                        let extensions = &mut maps.by_type[i].1;
                        if *extensions == entry.extensions {
                            Operation::Noop
                        } else {
                            extensions.clone_from(&entry.extensions);
                            Operation::Update
                        }
                    }
                    None => {
                        let i = maps.by_type.len();
                        maps.by_type
                            .push((entry.mime_type.clone(), entry.extensions.clone()));
                        maps.type_index.insert(entry.mime_type.clone(), i);
                        Operation::Create
                    }
                };
                operations.push((entry.mime_type.as_str(), operation));
            }
            debug!(
                entries = table.len(),
                types = maps.by_type.len(),
                extensions = maps.by_extension.len(),
                "registry loaded"
            );
        }
        for (mime_type, operation) in operations {
            callback(mime_type, operation);
        }
    }

    /// Converts extension filters into accept-list entries.
    ///
    /// Returns an empty list, meaning "accept everything", as soon as an extension is
    /// the wildcard or is unknown. With `include_unknown_as_extension`, unknown
    /// word-like extensions are kept as a literal `.ext` entry instead.
    pub fn extension_filter_to_mime_types(
        &self,
        filters: &[FilterDescriptor],
        include_unknown_as_extension: bool,
    ) -> Vec<String> {
        let maps = self.read();
        let mut accept: Vec<String> = vec![];
        for filter in filters {
            let extensions = filter.extensions.to_lowercase();
            for extension in split_list(&extensions) {
                if extension == WILDCARD {
                    return vec![];
                }
                match maps.by_extension.get(extension) {
                    Some(mime_type) => {
                        if !accept.contains(mime_type) {
                            accept.push(mime_type.clone());
                        }
                    }
                    None if include_unknown_as_extension && WORD.is_match(extension) => {
                        let literal = format!(".{extension}");
                        if !accept.contains(&literal) {
                            accept.push(literal);
                        }
                    }
                    None => {
                        trace!(extension, "unknown extension, accepting everything");
                        return vec![];
                    }
                }
            }
        }
        accept
    }

    /// Extensions of the given MIME types, in registration order, duplicates kept.
    ///
    /// `type/*` collects every registered `type/...` entry. A bare `*` anywhere in the
    /// list clears the result and stops. Anything else that is not a registered
    /// `type/subtype` is ignored.
    pub fn mime_types_to_extensions<S: AsRef<str>>(&self, mime_types: &[S]) -> Vec<String> {
        let maps = self.read();
        let mut extensions = vec![];
        for mime_type in mime_types {
            let mime_type = mime_type.as_ref().to_lowercase();
            if mime_type == WILDCARD {
                return vec![];
            }
            let Some(captures) = MIME_SHAPE.captures(&mime_type) else {
                continue;
            };
            if &captures[2] == WILDCARD {
                let prefix = format!("{}/", &captures[1]);
                maps.by_type
                    .iter()
                    .filter(|(it, _)| it.starts_with(&prefix))
                    .for_each(|(_, it)| extensions.extend_from_slice(it));
            } else if let Some(it) = maps.extensions(&mime_type) {
                extensions.extend_from_slice(it);
            }
        }
        extensions
    }

    /// Single "Files" descriptor listing the extensions of `mime_types`, or the
    /// wildcard when there are none.
    pub fn mime_types_to_filter_descriptor<'a>(
        &self,
        mime_types: impl Into<MimeTypes<'a>>,
    ) -> Vec<FilterDescriptor> {
        self.mime_types_to_filter_descriptor_with(mime_types, &Untranslated)
    }

    pub fn mime_types_to_filter_descriptor_with<'a>(
        &self,
        mime_types: impl Into<MimeTypes<'a>>,
        localizer: &dyn Localizer,
    ) -> Vec<FilterDescriptor> {
        let mime_types: MimeTypes<'a> = mime_types.into();
        let extensions = self.mime_types_to_extensions(&mime_types.to_list()[..]);
        let extensions = if extensions.is_empty() {
            WILDCARD.to_string()
        } else {
            extensions.join(",")
        };
        vec![FilterDescriptor::new(
            localizer.translate(FILES_TITLE),
            extensions,
        )]
    }

    pub fn mime_type_of(&self, file_name: &str) -> String {
        self.read()
            .by_extension
            .get(&extension_of(file_name))
            .cloned()
            .unwrap_or_default()
    }

    pub fn extensions_of_type(&self, mime_type: &str) -> Vec<String> {
        self.read()
            .extensions(mime_type)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    /// Current associations in registration order.
    ///
    /// Loading the result into an empty registry rebuilds the extension lookups from
    /// that order, so an extension reassigned by an earlier load may resolve
    /// differently afterwards.
    pub fn to_table(&self) -> Table {
        let maps = self.read();
        let mut table = Table::new();
        for (mime_type, extensions) in &maps.by_type {
            table.push(mime_type.clone(), extensions.clone());
        }
        table
    }

    pub fn fingerprint(&self) -> String {
        fingerprint(self.to_table().to_string().as_bytes())
    }
}
