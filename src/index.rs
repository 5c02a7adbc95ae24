//! Immutable suffix index.
//!
//! Membership queries over the known, wildcard and exception rule sets.
//! Sets are keyed by owned `String`s and queried with `&str`, so lookups
//! against slices of the caller's domain never allocate.

use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::extract::extract;
use crate::loader::RuleSets;
use crate::parser::{parse_suffix_list, read_suffix_list};
use crate::types::{DomainParts, Extraction};
use crate::url::extract_from_url;
use crate::validate::is_valid_domain;

/// Public Suffix List snapshot compiled into the crate.
pub static BUNDLED_SUFFIX_LIST: &str = include_str!("public_suffix_list.dat");

/// Suffix index built once from suffix list text.
///
/// Never mutated after construction; share it across threads behind an
/// `Arc` and replace it wholesale to reload.
#[derive(Debug, Clone, Default)]
pub struct SuffixIndex {
    known: HashSet<String>,
    wildcard: HashSet<String>,
    blacklisted: HashSet<String>,
}

impl SuffixIndex {
    /// Build an index from suffix list text.
    pub fn from_text(text: &str) -> Self {
        let rules = parse_suffix_list(text);
        let index = Self::from_rule_sets(RuleSets::from_rules(&rules));
        log::debug!(
            "Built suffix index from {} rules: {} known, {} wildcard, {} exception entries",
            rules.len(),
            index.known.len(),
            index.wildcard.len(),
            index.blacklisted.len()
        );
        index
    }

    /// Build an index from suffix list text, using the bundled list when
    /// `text` is empty.
    pub fn load(text: &str) -> Self {
        if text.is_empty() {
            Self::bundled()
        } else {
            Self::from_text(text)
        }
    }

    /// Build an index from the bundled suffix list.
    pub fn bundled() -> Self {
        Self::from_text(BUNDLED_SUFFIX_LIST)
    }

    /// Build an index from a suffix list file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = read_suffix_list(path)?;
        Ok(Self::from_text(&text))
    }

    /// Wrap already classified rule sets.
    pub fn from_rule_sets(sets: RuleSets) -> Self {
        Self {
            known: sets.known,
            wildcard: sets.wildcard,
            blacklisted: sets.blacklisted,
        }
    }

    /// Check if `suffix` is eligible as a public suffix.
    #[inline]
    pub fn is_known(&self, suffix: &str) -> bool {
        self.known.contains(suffix)
    }

    /// Check if `suffix` is the base of a `*.` rule.
    #[inline]
    pub fn is_wildcard(&self, suffix: &str) -> bool {
        self.wildcard.contains(suffix)
    }

    /// Check if `suffix` is the body of a `!` rule.
    #[inline]
    pub fn is_blacklisted(&self, suffix: &str) -> bool {
        self.blacklisted.contains(suffix)
    }

    /// Iterate over all known suffixes, in no particular order.
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    /// All known suffixes, in no particular order.
    pub fn all_suffixes(&self) -> Vec<String> {
        self.known.iter().cloned().collect()
    }

    /// Number of known suffixes
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Check if the index holds no suffix at all
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Number of wildcard bases
    pub fn wildcard_count(&self) -> usize {
        self.wildcard.len()
    }

    /// Number of exception entries
    pub fn exception_count(&self) -> usize {
        self.blacklisted.len()
    }

    /// Split `domain` into subdomain, domain and suffix.
    pub fn extract<'a>(&self, domain: &'a str) -> Result<Extraction<'a>> {
        extract(self, domain)
    }

    /// Like [`SuffixIndex::extract`], returning owned parts.
    pub fn extract_parts(&self, domain: &str) -> Result<DomainParts> {
        Ok(self.extract(domain)?.to_parts())
    }

    /// Split the host of `url` into subdomain, domain and suffix.
    pub fn extract_from_url<'a>(&self, url: &'a str) -> Result<Extraction<'a>> {
        extract_from_url(self, url)
    }

    /// Check whether `domain` is a syntactically valid, registrable domain.
    pub fn is_valid_domain(&self, domain: &str) -> bool {
        is_valid_domain(self, domain)
    }
}
