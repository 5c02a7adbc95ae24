use std::fs;
use std::path::Path;

use crate::error::{PslError, Result};
use crate::types::{RuleKind, SuffixRule};

/// Parse suffix list rules from text.
///
/// Lines containing `//` and blank lines are skipped. A leading `!` marks an
/// exception, a leading `*.` a wildcard; any other line is a plain suffix.
/// There is no further well-formedness check.
pub fn parse_suffix_list(text: &str) -> Vec<SuffixRule> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_rule_line(line, idx + 1))
        .collect()
}

/// Parse suffix list rules from a file.
pub fn parse_suffix_list_from_file(path: impl AsRef<Path>) -> Result<Vec<SuffixRule>> {
    let text = read_suffix_list(path)?;
    Ok(parse_suffix_list(&text))
}

pub(crate) fn read_suffix_list(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        PslError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read suffix list '{}': {}", path.display(), e),
        ))
    })
}

/// Parse a single line. Returns `None` for comments, blanks and rules whose
/// body is empty after removing the marker.
pub fn parse_rule_line(line: &str, line_num: usize) -> Option<SuffixRule> {
    let line = line.trim();
    if line.is_empty() || line.contains("//") {
        return None;
    }

    let (kind, base) = if let Some(base) = line.strip_prefix('!') {
        (RuleKind::Exception, base)
    } else if let Some(base) = line.strip_prefix("*.") {
        (RuleKind::Wildcard, base)
    } else {
        (RuleKind::Plain, line)
    };

    if base.is_empty() {
        return None;
    }

    Some(SuffixRule {
        kind,
        base: base.to_ascii_lowercase(),
        line_num,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_rule() {
        let rules = parse_suffix_list("com");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].kind, RuleKind::Plain);
        assert_eq!(rules[0].base, "com");
        assert_eq!(rules[0].line_num, 1);
    }

    #[test]
    fn test_parse_wildcard_and_exception() {
        let rules = parse_suffix_list("*.ck\n!www.ck\n");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].kind, RuleKind::Wildcard);
        assert_eq!(rules[0].base, "ck");
        assert_eq!(rules[1].kind, RuleKind::Exception);
        assert_eq!(rules[1].base, "www.ck");
    }

    #[test]
    fn test_skip_comments_and_blanks() {
        let text = r#"
// ===BEGIN ICANN DOMAINS===
// ac : http://nic.ac/rules.htm
ac
com.ac


co.uk // trailing comment makes the whole line a comment
"#;
        let rules = parse_suffix_list(text);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].base, "ac");
        assert_eq!(rules[0].line_num, 4);
        assert_eq!(rules[1].base, "com.ac");
    }

    #[test]
    fn test_lowercases_and_trims() {
        let rule = parse_rule_line("  Co.UK\r", 7).unwrap();
        assert_eq!(rule.base, "co.uk");
        assert_eq!(rule.line_num, 7);
    }

    #[test]
    fn test_lowercases_ascii_only() {
        let rule = parse_rule_line("ÄRZTE.DE", 1).unwrap();
        assert_eq!(rule.base, "Ärzte.de");
    }

    #[test]
    fn test_malformed_lines_are_plain() {
        let rule = parse_rule_line("foo*bar", 1).unwrap();
        assert_eq!(rule.kind, RuleKind::Plain);
        assert_eq!(rule.base, "foo*bar");

        let rule = parse_rule_line("*ck", 1).unwrap();
        assert_eq!(rule.kind, RuleKind::Plain);
    }

    #[test]
    fn test_empty_bodies_skipped() {
        assert!(parse_rule_line("!", 1).is_none());
        assert!(parse_rule_line("*.", 1).is_none());
    }

    #[test]
    fn test_parse_from_missing_file() {
        let err = parse_suffix_list_from_file("/nonexistent/public_suffix_list.dat").unwrap_err();
        assert!(matches!(err, PslError::Io(_)));
        assert!(err.to_string().contains("public_suffix_list.dat"));
    }

    #[test]
    fn test_parse_from_file() {
        let dir = std::env::temp_dir().join("domain_extractor_test_parser");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("list.dat");
        fs::write(&path, "// comment\ncom\n*.ck\n").unwrap();

        let rules = parse_suffix_list_from_file(&path).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].kind, RuleKind::Wildcard);

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(&dir);
    }
}
