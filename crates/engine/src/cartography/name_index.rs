//! Lookup structures for fuzzy zone names.
//!
//! Both indexes are built once from the catalog's display names and shipped
//! as an artifact next to the graph.

use std::collections::{BTreeMap, BTreeSet};

use cortex_domain::ZoneCatalog;
use serde::{Deserialize, Serialize};

/// Lowercased words of a name, treating hyphens as spaces.
fn words(name: &str) -> Vec<String> {
    name.replace('-', " ")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// First `n` characters of every word, concatenated.
fn abbreviation(words: &[String], n: usize) -> String {
    words.iter().flat_map(|word| word.chars().take(n)).collect()
}

/// Maps short keys like `fsp` or `fostpo` to the names they abbreviate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbbreviationCache {
    keys: BTreeMap<String, Vec<String>>,
}

impl AbbreviationCache {
    /// Longest per-word prefix that forms a key.
    pub const MAX_PREFIX: usize = 3;

    pub fn build<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut keys: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for name in names {
            let words = words(name);
            if words.is_empty() {
                continue;
            }
            for n in 1..=Self::MAX_PREFIX {
                let entry = keys.entry(abbreviation(&words, n)).or_default();
                if !entry.iter().any(|existing| existing == name) {
                    entry.push(name.to_string());
                }
            }
        }
        Self { keys }
    }

    /// Names abbreviated by `key`, in catalog order.
    pub fn get(&self, key: &str) -> &[String] {
        self.keys.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Sorted suffix table answering "which names contain this substring".
///
/// Holds every suffix of every word of every name, plus the whole lowercased
/// name so that queries spanning a space still match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubstringIndex {
    names: Vec<String>,
    suffixes: Vec<(String, u32)>,
}

impl SubstringIndex {
    pub fn build<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<String> = names.into_iter().map(str::to_string).collect();
        let mut suffixes = Vec::new();

        for (idx, name) in names.iter().enumerate() {
            let Ok(idx) = u32::try_from(idx) else { break };
            suffixes.push((name.to_lowercase(), idx));
            for word in words(name) {
                for (start, _) in word.char_indices() {
                    suffixes.push((word[start..].to_string(), idx));
                }
            }
        }
        suffixes.sort();
        suffixes.dedup();

        Self { names, suffixes }
    }

    /// Names containing `query`, ignoring case, in catalog order.
    pub fn get(&self, query: &str) -> Vec<String> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let query = query.to_lowercase();
        let query = query.as_str();
        let start = self
            .suffixes
            .partition_point(|(suffix, _)| suffix.as_str() < query);
        let hits: BTreeSet<u32> = self.suffixes[start..]
            .iter()
            .take_while(|(suffix, _)| suffix.starts_with(query))
            .map(|(_, idx)| *idx)
            .collect();

        hits.into_iter()
            .filter_map(|idx| self.names.get(idx as usize).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

/// Both name indexes, built together from one catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameIndex {
    pub abbreviations: AbbreviationCache,
    pub substrings: SubstringIndex,
}

impl NameIndex {
    pub fn build(catalog: &ZoneCatalog) -> Self {
        let names = catalog.display_names();
        Self {
            abbreviations: AbbreviationCache::build(names.iter().copied()),
            substrings: SubstringIndex::build(names.iter().copied()),
        }
    }
}
