use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Public suffix rule class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Plain suffix: "co.uk"
    Plain,
    /// Wildcard suffix: "*.ck" (base "ck")
    Wildcard,
    /// Exception to a wildcard: "!www.ck" (base "www.ck")
    Exception,
}

/// Parsed suffix list line before index construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixRule {
    /// Rule class
    pub kind: RuleKind,
    /// Lowercased rule body with the `*.` or `!` marker removed
    pub base: String,
    /// 1-based line number in the list text, reported in load diagnostics
    pub line_num: usize,
}

/// A domain split into subdomain, registrable label and public suffix.
///
/// The three parts are slices of the case-folded input. Input without ASCII
/// uppercase is borrowed as-is; anything else is folded into a private copy.
/// Joining the non-empty parts with `.` gives back [`Extraction::host`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<'a> {
    host: Cow<'a, str>,
    subdomain: Range<usize>,
    domain: Range<usize>,
    suffix: Range<usize>,
}

impl<'a> Extraction<'a> {
    pub(crate) fn new(
        host: Cow<'a, str>,
        subdomain: Range<usize>,
        domain: Range<usize>,
        suffix: Range<usize>,
    ) -> Self {
        Self {
            host,
            subdomain,
            domain,
            suffix,
        }
    }

    /// Labels left of the registrable domain, empty if none
    pub fn subdomain(&self) -> &str {
        &self.host[self.subdomain.clone()]
    }

    /// The label directly left of the public suffix
    pub fn domain(&self) -> &str {
        &self.host[self.domain.clone()]
    }

    /// The matched public suffix, empty if no rule matched
    pub fn suffix(&self) -> &str {
        &self.host[self.suffix.clone()]
    }

    /// The case-folded input
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The eTLD+1 (`domain.suffix`), if both parts are present.
    pub fn registrable_domain(&self) -> Option<&str> {
        if self.domain.is_empty() || self.suffix.is_empty() {
            return None;
        }
        Some(&self.host[self.domain.start..self.suffix.end])
    }

    /// The whole host, if it has a registrable domain under a known suffix.
    pub fn fqdn(&self) -> Option<&str> {
        self.registrable_domain().map(|_| self.host())
    }

    /// Copy the three parts into owned strings.
    pub fn to_parts(&self) -> DomainParts {
        DomainParts {
            subdomain: self.subdomain().to_string(),
            domain: self.domain().to_string(),
            suffix: self.suffix().to_string(),
        }
    }

    /// Detach from the input's lifetime.
    pub fn into_owned(self) -> Extraction<'static> {
        Extraction {
            host: Cow::Owned(self.host.into_owned()),
            subdomain: self.subdomain,
            domain: self.domain,
            suffix: self.suffix,
        }
    }
}

impl fmt::Display for Extraction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}

/// Owned extraction result, as handed to hosts
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

impl fmt::Display for DomainParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in [&self.subdomain, &self.domain, &self.suffix] {
            if part.is_empty() {
                continue;
            }
            if !first {
                f.write_str(".")?;
            }
            f.write_str(part)?;
            first = false;
        }
        Ok(())
    }
}

impl From<Extraction<'_>> for DomainParts {
    fn from(extraction: Extraction<'_>) -> Self {
        extraction.to_parts()
    }
}
