use crate::error::{PslError, Result};
use crate::extract::extract;
use crate::index::SuffixIndex;

/// Maximum length of a domain name in bytes
pub const MAX_DOMAIN_LENGTH: usize = 255;

/// Maximum length of a single label in bytes
pub const MAX_LABEL_LENGTH: usize = 63;

/// Check whether `domain` is a syntactically valid domain with a recognized
/// public suffix and a registrable label in front of it.
///
/// Never fails: every internal error maps to `false`.
pub fn is_valid_domain(index: &SuffixIndex, domain: &str) -> bool {
    match check_domain(index, domain) {
        Ok(()) => true,
        Err(e) => {
            log::trace!("{:?} rejected: {}", domain, e);
            false
        }
    }
}

fn check_domain(index: &SuffixIndex, domain: &str) -> Result<()> {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LENGTH {
        return Err(PslError::InvalidDomain(format!(
            "length {} outside 1..={}",
            domain.len(),
            MAX_DOMAIN_LENGTH
        )));
    }

    for label in domain.split('.') {
        check_label(label)?;
    }

    let extraction = extract(index, domain)?;
    if extraction.suffix().is_empty() || extraction.domain().is_empty() {
        return Err(PslError::InvalidDomain(
            "no registrable domain under a known suffix".to_string(),
        ));
    }

    idna::domain_to_ascii(domain).map_err(|e| PslError::Encoding(e.to_string()))?;
    let (_, result) = idna::domain_to_unicode(domain);
    result.map_err(|e| PslError::Encoding(e.to_string()))?;

    Ok(())
}

fn check_label(label: &str) -> Result<()> {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return Err(PslError::InvalidDomain(format!(
            "label length {} outside 1..={}",
            label.len(),
            MAX_LABEL_LENGTH
        )));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(PslError::InvalidDomain(format!(
            "label {:?} starts or ends with a hyphen",
            label
        )));
    }
    if let Some(ch) = label.chars().find(|&ch| !ch.is_alphanumeric() && ch != '-') {
        return Err(PslError::InvalidDomain(format!(
            "label {:?} contains {:?}",
            label, ch
        )));
    }
    Ok(())
}
