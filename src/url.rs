//! Minimal URL-to-host reduction.
//!
//! Only what is needed to hand a bare host to the extractor: no scheme
//! validation, no percent-decoding, no IPv6 literal handling.

use crate::error::{PslError, Result};
use crate::extract::extract;
use crate::index::SuffixIndex;
use crate::types::Extraction;

/// Reduce `url` to its host.
///
/// Keeps what follows the first `//`, cuts the path at the first `/`, drops
/// userinfo up to the last `@` and cuts the port at the first `:`.
pub fn host_from_url(url: &str) -> Result<&str> {
    let (_, rest) = url
        .split_once("//")
        .ok_or_else(|| PslError::InvalidUrl("no scheme".to_string()))?;

    let authority = match rest.find('/') {
        Some(path_pos) => &rest[..path_pos],
        None => rest,
    };
    let host_port = match authority.rfind('@') {
        Some(at_pos) => &authority[at_pos + 1..],
        None => authority,
    };
    let host = match host_port.find(':') {
        Some(port_pos) => &host_port[..port_pos],
        None => host_port,
    };

    if host.is_empty() {
        return Err(PslError::InvalidUrl(
            "url does not contain a domain".to_string(),
        ));
    }
    Ok(host)
}

/// Split the host of `url` into subdomain, domain and suffix.
pub fn extract_from_url<'a>(index: &SuffixIndex, url: &'a str) -> Result<Extraction<'a>> {
    let host = host_from_url(url)?;
    extract(index, host)
}
