//! Suffix list loader.
//!
//! Turns parsed rules into the three rule sets backing a
//! [`SuffixIndex`](crate::SuffixIndex). Every rule body is registered in its
//! written form and in its IDNA ASCII and Unicode forms, so queries in either
//! encoding hit the same rule without converting the query. Plain rules also
//! register each shorter right-aligned suffix (`a.b.c` adds `b.c` and `c`).
//!
//! Expanding at load time costs memory and build time in exchange for
//! conversion-free lookups. Converting each query with IDNA at extraction
//! time would keep the sets minimal at the cost of per-query work.

use std::collections::HashSet;

use crate::types::{RuleKind, SuffixRule};

/// Classified, normalized rule strings
#[derive(Debug, Clone, Default)]
pub struct RuleSets {
    /// Every suffix eligible for matching, including wildcard bases
    pub known: HashSet<String>,
    /// Bases of `*.` rules
    pub wildcard: HashSet<String>,
    /// Bases of `!` rules
    pub blacklisted: HashSet<String>,
}

impl RuleSets {
    /// Build rule sets from parsed rules.
    pub fn from_rules<'r>(rules: impl IntoIterator<Item = &'r SuffixRule>) -> Self {
        let mut sets = Self::default();
        for rule in rules {
            sets.insert(rule);
        }
        sets
    }

    /// Register one rule with all its permutations.
    ///
    /// Returns `false` when the rule body was already registered in its
    /// target set, either by an identical rule or as a sub-suffix of one.
    pub fn insert(&mut self, rule: &SuffixRule) -> bool {
        let is_new = match rule.kind {
            RuleKind::Plain => !self.known.contains(&rule.base),
            RuleKind::Wildcard => !self.wildcard.contains(&rule.base),
            RuleKind::Exception => !self.blacklisted.contains(&rule.base),
        };
        if !is_new {
            log::trace!(
                "suffix list line {}: {:?} rule {:?} already registered",
                rule.line_num,
                rule.kind,
                rule.base
            );
        }

        match rule.kind {
            RuleKind::Plain => {
                self.known.extend(permutations(&rule.base, true));
            }
            RuleKind::Wildcard => {
                for permutation in permutations(&rule.base, false) {
                    self.known.insert(permutation.clone());
                    self.wildcard.insert(permutation);
                }
            }
            RuleKind::Exception => {
                self.blacklisted.extend(permutations(&rule.base, false));
            }
        }
        is_new
    }
}

/// All spellings under which `base` is registered.
///
/// Failed IDNA conversions are skipped, the written form is always kept.
pub fn permutations(base: &str, with_sub_suffixes: bool) -> HashSet<String> {
    let mut translations = Vec::with_capacity(3);
    translations.push(base.to_string());

    if let Ok(ascii) = idna::domain_to_ascii(base) {
        translations.push(ascii);
    }
    let (unicode, result) = idna::domain_to_unicode(base);
    if result.is_ok() {
        translations.push(unicode);
    }

    let mut permutations = HashSet::with_capacity(translations.len() * 2);
    for translation in translations {
        if translation.is_empty() {
            continue;
        }
        if with_sub_suffixes {
            for (dot_pos, _) in translation.match_indices('.') {
                let sub_suffix = &translation[dot_pos + 1..];
                if !sub_suffix.is_empty() {
                    permutations.insert(sub_suffix.to_string());
                }
            }
        }
        permutations.insert(translation);
    }

    permutations
}
