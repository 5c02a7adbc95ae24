//! Name-based operation dispatch for embedding hosts.
//!
//! Mirrors what a language binding does on each call: check the argument
//! count, resolve the current index once, run the operation and hand back an
//! owned reply.

use crate::error::{PslError, Result};
use crate::shared::SharedIndex;
use crate::types::DomainParts;

/// Owned result of a dispatched operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `load` / `unload`
    Done,
    /// `extract` / `extract_from_url`
    Parts(DomainParts),
    /// `is_valid_domain`
    Valid(bool),
    /// `get_tld_list`
    Suffixes(Vec<String>),
}

/// Operations understood by [`dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Unload,
    Extract,
    ExtractFromUrl,
    IsValidDomain,
    GetTldList,
}

impl Operation {
    /// Resolve an operation by its host-facing name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "load" => Ok(Operation::Load),
            "unload" => Ok(Operation::Unload),
            "extract" => Ok(Operation::Extract),
            "extract_from_url" => Ok(Operation::ExtractFromUrl),
            "is_valid_domain" => Ok(Operation::IsValidDomain),
            "get_tld_list" => Ok(Operation::GetTldList),
            _ => Err(PslError::UnknownOperation(name.to_string())),
        }
    }

    /// Host-facing name
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Unload => "unload",
            Operation::Extract => "extract",
            Operation::ExtractFromUrl => "extract_from_url",
            Operation::IsValidDomain => "is_valid_domain",
            Operation::GetTldList => "get_tld_list",
        }
    }

    /// Accepted argument counts (inclusive)
    pub fn arity(&self) -> (usize, usize) {
        match self {
            Operation::Load => (0, 1),
            Operation::Unload | Operation::GetTldList => (0, 0),
            Operation::Extract | Operation::ExtractFromUrl | Operation::IsValidDomain => (1, 1),
        }
    }

    fn check_arity(&self, got: usize) -> Result<()> {
        let (min, max) = self.arity();
        if got < min || got > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{}..={}", min, max)
            };
            return Err(PslError::WrongArity {
                operation: self.name().to_string(),
                expected,
                got,
            });
        }
        Ok(())
    }
}

/// Run the operation called `name` with `args` against `shared`.
pub fn dispatch(shared: &SharedIndex, name: &str, args: &[&str]) -> Result<Reply> {
    let operation = Operation::from_name(name)?;
    operation.check_arity(args.len())?;

    match operation {
        Operation::Load => {
            shared.load(args.first().copied().unwrap_or(""));
            Ok(Reply::Done)
        }
        Operation::Unload => {
            shared.unload();
            Ok(Reply::Done)
        }
        Operation::Extract => shared.extract(args[0]).map(Reply::Parts),
        Operation::ExtractFromUrl => shared.extract_from_url(args[0]).map(Reply::Parts),
        Operation::IsValidDomain => shared.is_valid_domain(args[0]).map(Reply::Valid),
        Operation::GetTldList => shared.all_suffixes().map(Reply::Suffixes),
    }
}
