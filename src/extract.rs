//! Longest-match suffix extraction with wildcard and exception handling.

use std::borrow::Cow;

use crate::error::{PslError, Result};
use crate::index::SuffixIndex;
use crate::types::Extraction;

/// Split `domain` into subdomain, domain and suffix using `index`.
///
/// Fails with [`PslError::InvalidDomain`] when `domain` is empty, starts or
/// ends with a dot, or contains an empty label.
pub fn extract<'a>(index: &SuffixIndex, domain: &'a str) -> Result<Extraction<'a>> {
    if domain.is_empty()
        || domain.starts_with('.')
        || domain.ends_with('.')
        || domain.contains("..")
    {
        return Err(PslError::InvalidDomain(domain.to_string()));
    }

    let host = fold_ascii_case(domain);
    let suffix_start = find_suffix_start(index, &host);
    Ok(split(host, suffix_start))
}

/// Lowercase ASCII letters, copying only when there is something to fold.
fn fold_ascii_case(domain: &str) -> Cow<'_, str> {
    if domain.bytes().any(|b| b.is_ascii_uppercase()) {
        let mut owned = domain.to_string();
        owned.make_ascii_lowercase();
        Cow::Owned(owned)
    } else {
        Cow::Borrowed(domain)
    }
}

/// Byte offset where the public suffix of `host` starts; `host.len()` when
/// no suffix matched.
fn find_suffix_start(index: &SuffixIndex, host: &str) -> usize {
    let mut matched = host.len();
    let mut search_end = host.len();

    // Grow the suffix one label at a time while it stays known.
    loop {
        match host[..search_end].rfind('.') {
            Some(dot) => {
                if !index.is_known(&host[dot + 1..]) {
                    break;
                }
                matched = dot + 1;
                search_end = dot;
            }
            None => {
                if index.is_known(host) {
                    matched = 0;
                }
                break;
            }
        }
    }

    if matched == host.len() || !index.is_wildcard(&host[matched..]) {
        return matched;
    }

    // Wildcard base: swallow one more label unless an exception names it.
    if matched == 0 {
        return matched;
    }
    let leftover = &host[..matched - 1];
    match leftover.rfind('.') {
        None => {
            if index.is_blacklisted(host) {
                matched
            } else {
                0
            }
        }
        // Only the immediate child label is checked against exceptions.
        Some(dot) => {
            if index.is_blacklisted(&host[dot + 1..]) {
                matched
            } else {
                dot + 1
            }
        }
    }
}

fn split(host: Cow<'_, str>, suffix_start: usize) -> Extraction<'_> {
    let len = host.len();
    let domain_end = if suffix_start == len || suffix_start == 0 {
        suffix_start
    } else {
        suffix_start - 1
    };

    let (subdomain, domain) = match host[..domain_end].rfind('.') {
        Some(dot) => (0..dot, dot + 1..domain_end),
        None => (0..0, 0..domain_end),
    };

    Extraction::new(host, subdomain, domain, suffix_start..len)
}
