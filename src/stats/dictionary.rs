//! Address dictionary: code address to `language:symbol:line:file`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parsed form of a dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub language: String,
    pub symbol: String,
    pub line: String,
    pub file: String,
}

impl Descriptor {
    /// Split a descriptor on its first three colons.
    ///
    /// Returns `None` when the string has fewer than four fields; well-formed
    /// input is the decoder's responsibility.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(4, ':');
        let language = parts.next()?;
        let symbol = parts.next()?;
        let line = parts.next()?;
        let file = parts.next()?;

        Some(Self {
            language: language.to_string(),
            symbol: symbol.to_string(),
            line: line.to_string(),
            file: file.to_string(),
        })
    }
}

/// Mapping from code address to descriptor string, in decoder order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressDictionary {
    entries: IndexMap<u64, String>,
}

impl AddressDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, addr: u64, descriptor: impl Into<String>) {
        self.entries.insert(addr, descriptor.into());
    }

    /// Raw descriptor string for an address
    pub fn get(&self, addr: u64) -> Option<&str> {
        self.entries.get(&addr).map(String::as_str)
    }

    /// Parsed descriptor for an address
    pub fn descriptor(&self, addr: u64) -> Option<Descriptor> {
        self.get(addr).and_then(Descriptor::parse)
    }

    pub fn contains(&self, addr: u64) -> bool {
        self.entries.contains_key(&addr)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.entries.iter().map(|(addr, desc)| (*addr, desc.as_str()))
    }
}

impl FromIterator<(u64, String)> for AddressDictionary {
    fn from_iter<I: IntoIterator<Item = (u64, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(u64, &'a str)> for AddressDictionary {
    fn from_iter<I: IntoIterator<Item = (u64, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(addr, desc)| (addr, desc.to_string()))
            .collect()
    }
}
