use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use ordered_multimap::list_ordered_multimap::ListOrderedMultimap;

use super::escape::escape;
use super::{parser, Record};

pub const BASE_LANGUAGE: &str = "Base";
const LANGUAGE_DIR_EXTENSION: &str = "lproj";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Parse(#[from] parser::ParseError),
}

/// The translations of one `.strings` file for one language, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct Localization {
    language: String,
    path: Option<PathBuf>,
    translations: ListOrderedMultimap<String, Record>,
}

impl Localization {
    pub fn new<S: Into<String>>(language: S) -> Self {
        Self {
            language: language.into(),
            path: None,
            translations: ListOrderedMultimap::new(),
        }
    }

    pub fn from_records<S, I>(language: S, records: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = Record>,
    {
        let mut localization = Self::new(language);
        for record in records {
            localization.translations.append(record.key.clone(), record);
        }
        localization
    }

    /// Parse the contents of a `.strings` file
    pub fn parse_str<S: Into<String>>(language: S, data: &str) -> Result<Self, parser::ParseError> {
        let records = parser::parse(data)?;
        Ok(Self::from_records(language, records))
    }

    /// Load a `.strings` file, taking the language from an enclosing
    /// `<language>.lproj` directory.
    pub fn load_from_path(path: &Path) -> Result<Self, IoError> {
        let buf = fs::read_to_string(path)?;
        let language = language_of(path);

        debug!("Loading {language:?} translations from {path:?}");

        let mut localization = Self::parse_str(language, buf.as_str())?;
        localization.path = Some(path.into());

        Ok(localization)
    }

    /// Like [`Localization::load_from_path`], but a file without any readable
    /// entry is treated as having no translations instead of failing.
    pub fn load_from_path_lenient(path: &Path) -> io::Result<Self> {
        match Self::load_from_path(path) {
            Ok(localization) => Ok(localization),
            Err(IoError::Io(e)) => Err(e),
            Err(IoError::Parse(e)) => {
                warn!("No entries in {path:?}, treating it as empty: {e}");
                let mut localization = Self::new(language_of(path));
                localization.path = Some(path.into());
                Ok(localization)
            }
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of records, duplicate keys included
    pub fn len(&self) -> usize {
        self.translations.values_len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// First record for `key`
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.translations.get(key)
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.translations.iter().map(|(_, record)| record)
    }

    /// Sets the value of the first record for `key`, or appends a new record
    /// if there is none. The message of an existing record is left alone.
    pub fn update(&mut self, key: &str, value: &str, message: Option<String>) {
        match self.translations.get_mut(key) {
            Some(record) => record.value = value.to_owned(),
            None => {
                self.translations
                    .append(key.to_owned(), Record::new(key, value, message));
            }
        }
    }

    /// Replaces all records for `key` with a single empty one at the end.
    pub fn add(&mut self, key: &str, message: Option<String>) -> &Record {
        self.translations.remove(key);
        self.translations
            .entry(key.to_owned())
            .or_insert_entry(Record::new(key, "", message))
            .into_mut()
    }

    /// Removes all records for `key`
    pub fn remove(&mut self, key: &str) {
        self.translations.remove(key);
    }

    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for record in self.records() {
            if let Some(message) = &record.message {
                writeln!(writer, "/* {message} */")?;
            }
            write!(writer, "\"{}\" = \"{}\";\n\n", record.key, escape(&record.value))?;
        }

        Ok(())
    }
}

fn language_of(path: &Path) -> String {
    path.parent()
        .filter(|dir| dir.extension().is_some_and(|ext| ext == LANGUAGE_DIR_EXTENSION))
        .and_then(|dir| dir.file_stem())
        .map_or_else(
            || BASE_LANGUAGE.to_owned(),
            |stem| stem.to_string_lossy().into_owned(),
        )
}
