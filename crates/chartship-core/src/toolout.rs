//! Parsers for external tool diagnostics
//!
//! The packaging and key-import tools are opaque subprocesses returning
//! line-oriented text; every field the pipeline needs out of that text is
//! extracted here, in pure functions, rather than inline at the call
//! sites.

use regex::Regex;
use std::sync::LazyLock;

static IMPORTED_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"key ([0-9A-Fa-f]+): secret key imported").expect("valid key-import pattern")
});

/// Version reported by the packaging tool's chart inspection
///
/// Scans for the first line starting with the `version:` label and
/// returns the trimmed remainder. Inspection output is YAML-shaped but
/// only this one field matters, so a line scan is deliberate.
pub fn parse_inspected_version(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim_start)
        .find(|line| line.starts_with("version:"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, rest)| rest.trim().to_string())
        .filter(|version| !version.is_empty())
}

/// Key identifier reported by the import tool's diagnostics
///
/// Matches the first `key <hex-id>: secret key imported` line in the
/// combined output. `None` on a nominally successful import means the
/// output was unparseable, which callers treat as fatal.
pub fn parse_imported_key_id(output: &str) -> Option<String> {
    IMPORTED_KEY
        .captures(output)
        .map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inspected_version() {
        let output = "apiVersion: v1\nname: app\nversion: 1.2.3\ndescription: demo\n";
        assert_eq!(parse_inspected_version(output).as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_parse_inspected_version_indented() {
        let output = "name: app\n  version: 0.4.1\n";
        assert_eq!(parse_inspected_version(output).as_deref(), Some("0.4.1"));
    }

    #[test]
    fn test_parse_inspected_version_ignores_app_version() {
        let output = "appVersion: 9.9.9\nname: app\nversion: 1.0.0\n";
        assert_eq!(parse_inspected_version(output).as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_parse_inspected_version_missing() {
        assert_eq!(parse_inspected_version("name: app\n"), None);
        assert_eq!(parse_inspected_version("version:\n"), None);
        assert_eq!(parse_inspected_version(""), None);
    }

    #[test]
    fn test_parse_imported_key_id() {
        let output = "gpg: keybox created\ngpg: key 9A8BCC533105F5D3: secret key imported\ngpg: Total number processed: 1\n";
        assert_eq!(
            parse_imported_key_id(output).as_deref(),
            Some("9A8BCC533105F5D3")
        );
    }

    #[test]
    fn test_parse_imported_key_id_first_match_wins() {
        let output = "gpg: key AAAA: secret key imported\ngpg: key BBBB: secret key imported\n";
        assert_eq!(parse_imported_key_id(output).as_deref(), Some("AAAA"));
    }

    #[test]
    fn test_parse_imported_key_id_missing() {
        let output = "gpg: key 9A8BCC533105F5D3: public key imported\n";
        assert_eq!(parse_imported_key_id(output), None);
        assert_eq!(parse_imported_key_id(""), None);
    }
}
