//! Secret redaction for raw history lines
//!
//! Best-effort pattern matching: catches the obvious leaks (credential
//! assignments, email addresses, long hex blobs) before a command ever
//! reaches the card pipeline. It does not parse shell syntax and makes no
//! guarantee of removing every sensitive value.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `NAME=value` where NAME smells like a credential.
    static ref SECRET_ASSIGN: Regex =
        Regex::new(r"(?i)(AWS|SECRET|TOKEN|KEY|PASSWORD|PASS|PWD)=\S+").unwrap();
    static ref EMAIL: Regex =
        Regex::new(r"\b[\w._%+-]+@[\w.-]+\.[A-Za-z]{2,}\b").unwrap();
    /// 32+ hex chars: API keys, session tokens, long digests.
    static ref LONG_HEX: Regex = Regex::new(r"\b[0-9a-fA-F]{32,}\b").unwrap();
}

/// Redact known-sensitive substrings from a raw line.
///
/// The passes run in a fixed order: keyword assignments first, so a long hex
/// secret assigned to a flagged variable collapses to `***` rather than
/// `<HEX>`. Pure and total; never fails.
pub fn scrub(line: &str) -> String {
    let line = SECRET_ASSIGN.replace_all(line, "${1}=***");
    let line = EMAIL.replace_all(&line, "***@***");
    let line = LONG_HEX.replace_all(&line, "<HEX>");
    line.into_owned()
}

pub(crate) fn email_pattern() -> &'static Regex {
    &EMAIL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrub_secret_assignment() {
        assert_eq!(
            scrub("export AWS_SECRET=abcd1234efgh5678"),
            "export AWS_SECRET=***"
        );
        assert_eq!(scrub("TOKEN=ghp_abc123 curl api"), "TOKEN=*** curl api");
        // case-insensitive keyword match
        assert_eq!(scrub("password=hunter2"), "password=***");
    }

    #[test]
    fn test_scrub_email() {
        assert_eq!(
            scrub("git config user.email alice@example.com"),
            "git config user.email ***@***"
        );
    }

    #[test]
    fn test_scrub_long_hex() {
        let line = "curl -H 'X-Auth: 0123456789abcdef0123456789abcdef'";
        assert!(scrub(line).contains("<HEX>"));
        // 31 chars: below the threshold, left alone
        let short = "echo 0123456789abcdef0123456789abcde";
        assert_eq!(scrub(short), short);
    }

    #[test]
    fn test_scrub_keyword_wins_over_hex() {
        // A 64-char hex secret assigned to a flagged NAME must become ***,
        // never <HEX>: the assignment pass runs first.
        let hex = "a".repeat(64);
        let line = format!("export API_KEY={}", hex);
        assert_eq!(scrub(&line), "export API_KEY=***");
    }

    #[test]
    fn test_scrub_plain_line_untouched() {
        assert_eq!(scrub("git status"), "git status");
    }
}
