//! Command canonicalization
//!
//! Collapses invocations that differ only in incidental values (a timestamp,
//! a path, a branch hash) into one representative string. The canonical text
//! doubles as the card's display text and, hashed, as its identity key.
//!
//! The masking passes are a stateless ordered list of pure substitution
//! rules applied sequentially; there is no shared pattern registry. Order
//! matters (URLs are masked before the numbers inside them, for example) and
//! is fixed to keep identities stable across runs.

use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::scrub::email_pattern;

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r#"'[^']+'|"[^"]+""#).unwrap();
    static ref URL: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref UUID: Regex = Regex::new(
        r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b"
    )
    .unwrap();
    /// 7-40 lowercase hex chars: git short/long hashes. False positives on
    /// other hex-like tokens are an accepted heuristic cost.
    static ref SHA: Regex = Regex::new(r"\b[0-9a-f]{7,40}\b").unwrap();
    static ref IP: Regex = Regex::new(r"\b\d{1,3}(\.\d{1,3}){3}\b").unwrap();
    static ref BIG_NUM: Regex = Regex::new(r"\b\d{3,}\b").unwrap();
    static ref VAR_ASSIGN: Regex =
        Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*=([^ \t]+)").unwrap();
    static ref PATH_LIKE: Regex =
        Regex::new(r"(~|\.{1,2}|/)[\w@./\-+:%]+").unwrap();
    static ref WS: Regex = Regex::new(r"\s+").unwrap();
}

/// Flags whose following token is a value, and the placeholder that value
/// collapses to. Extend by adding entries, not by branching logic.
const VALUE_FLAGS: &[(&str, &str)] = &[
    ("-o", "<PATH>"),
    ("--output", "<PATH>"),
    ("-i", "<PATH>"),
    ("--input", "<PATH>"),
    ("-f", "<FILE>"),
    ("--file", "<FILE>"),
    ("-n", "<NS>"),
    ("--namespace", "<NS>"),
    ("--context", "<CTX>"),
    ("-r", "<REPO>"),
    ("--repo", "<REPO>"),
    ("--kubeconfig", "<PATH>"),
    ("--config", "<PATH>"),
];

fn value_flag_placeholder(flag: &str) -> Option<&'static str> {
    VALUE_FLAGS
        .iter()
        .find(|(name, _)| *name == flag)
        .map(|(_, ph)| *ph)
}

/// Canonicalize a scrubbed command line.
///
/// Idempotent: `canonicalize(canonicalize(x)) == canonicalize(x)`. Two raw
/// commands differing only in a numeric ID, a quoted string, or a path
/// produce the same canonical text.
pub fn canonicalize(line: &str) -> String {
    // Ordered substitution rules. Quotes first so their contents never leak
    // into the later passes; URLs before numbers so an ID inside a URL is
    // covered by <URL>, not <NUM>.
    let s = QUOTED.replace_all(line, "<STR>");
    let s = URL.replace_all(&s, "<URL>");
    let s = email_pattern().replace_all(&s, "***@***");
    let s = UUID.replace_all(&s, "<UUID>");
    let s = SHA.replace_all(&s, "<SHA>");
    let s = IP.replace_all(&s, "<IP>");
    let s = BIG_NUM.replace_all(&s, "<NUM>");
    let s = VAR_ASSIGN.replace_all(&s, "$${VAR}=<VAL>");
    let s = PATH_LIKE.replace_all(&s, "<PATH>");

    // Token-level pass: values following known flags.
    let mut tokens: Vec<String> = s.split_whitespace().map(str::to_string).collect();
    for i in 0..tokens.len() {
        if let Some(ph) = value_flag_placeholder(&tokens[i]) {
            if i + 1 < tokens.len() && !tokens[i + 1].starts_with('-') {
                tokens[i + 1] = ph.to_string();
            }
        }
    }

    let tokens = stable_flag_order(tokens);

    let out = tokens.join(" ");
    WS.replace_all(&out, " ").trim().to_string()
}

/// Hex-encoded SHA-256 of the canonical text; the card's stable identity.
pub fn command_id(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sort bare `--long` flags lexicographically so that flag order never
/// splits one command into two identities. The flags are sorted within the
/// slots they already occupy: every other token (the command name, value
/// flags with their paired value, positional arguments) keeps its position.
fn stable_flag_order(tokens: Vec<String>) -> Vec<String> {
    let mut out = tokens;

    // Value-taking flags are exactly the ones unsafe to move: they stay
    // glued to their value wherever they appear.
    let slots: Vec<usize> = out
        .iter()
        .enumerate()
        .filter(|(_, t)| t.starts_with("--") && value_flag_placeholder(t).is_none())
        .map(|(i, _)| i)
        .collect();

    let mut flags: Vec<String> = slots.iter().map(|&s| out[s].clone()).collect();
    flags.sort();
    for (slot, flag) in slots.into_iter().zip(flags) {
        out[slot] = flag;
    }
    out
}

/// Token classifiers shared with the cloze generator.
pub(crate) fn looks_like_url(token: &str) -> bool {
    URL.is_match(token)
}

pub(crate) fn looks_like_path(token: &str) -> bool {
    PATH_LIKE.is_match(token)
}

pub(crate) fn looks_like_hash(token: &str) -> bool {
    SHA.is_match(token) || UUID.is_match(token)
}

pub(crate) fn looks_like_big_number(token: &str) -> bool {
    BIG_NUM.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_quoted_spans_masked() {
        assert_eq!(
            canonicalize(r#"git commit -m "fix the thing""#),
            "git commit -m <STR>"
        );
        assert_eq!(canonicalize("echo 'hello world'"), "echo <STR>");
    }

    #[test]
    fn test_url_masks_before_numbers() {
        let a = canonicalize("curl https://api.example.com/v1/users/12345");
        let b = canonicalize("curl https://api.example.com/v1/users/67890");
        assert_eq!(a, "curl <URL>");
        assert_eq!(a, b);
        assert_eq!(command_id(&a), command_id(&b));
    }

    #[test]
    fn test_volatile_atoms() {
        assert_eq!(
            canonicalize("git checkout 3f2a9bc"),
            "git checkout <SHA>"
        );
        assert_eq!(
            canonicalize("kubectl logs pod-a1 --context=prod 550e8400-e29b-41d4-a716-446655440000"),
            canonicalize("kubectl logs pod-a1 --context=prod 123e4567-e89b-12d3-a456-426614174000")
        );
        assert_eq!(canonicalize("ping 10.0.12.7"), "ping <IP>");
        assert_eq!(canonicalize("kill 48213"), "kill <NUM>");
        // short numbers survive
        assert_eq!(canonicalize("sleep 20"), "sleep 20");
    }

    #[test]
    fn test_env_assignment() {
        assert_eq!(
            canonicalize("RUST_LOG=debug cargo run"),
            "${VAR}=<VAL> cargo run"
        );
    }

    #[test]
    fn test_paths_masked() {
        assert_eq!(canonicalize("cat ./notes/today.md"), "cat <PATH>");
        assert_eq!(canonicalize("cat ~/notes/today.md"), "cat <PATH>");
        assert_eq!(
            canonicalize("tar xzf /tmp/build-artifacts.tgz"),
            "tar xzf <PATH>"
        );
    }

    #[test]
    fn test_value_flag_substitution() {
        assert_eq!(
            canonicalize("kubectl apply -f deploy.yaml --namespace production"),
            "kubectl apply -f <FILE> --namespace <NS>"
        );
        // a flag following a value flag is never stomped
        assert_eq!(
            canonicalize("kubectl get pods -n --context prod"),
            "kubectl get pods -n --context <CTX>"
        );
    }

    #[test]
    fn test_stable_flag_order() {
        assert_eq!(
            canonicalize("tool --b-flag --a-flag x"),
            canonicalize("tool --a-flag --b-flag x")
        );
        assert_eq!(
            canonicalize("tool --b-flag --a-flag x"),
            "tool --a-flag --b-flag x"
        );
    }

    #[test]
    fn test_flag_order_all_flags_no_command() {
        // degenerate input: every token is a bare long flag
        assert_eq!(canonicalize("--zeta --alpha"), "--alpha --zeta");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(canonicalize("  git   status  "), "git status");
    }

    #[test]
    fn test_idempotent_examples() {
        for cmd in [
            "git rebase -i HEAD~5 --autosquash",
            "kubectl apply -f ./deploy/prod.yaml --namespace production",
            "docker run -it --rm -v /data:/data img:latest",
            "curl https://api.example.com/v1/users/12345",
            "FOO=bar make -j8 all",
        ] {
            let once = canonicalize(cmd);
            assert_eq!(canonicalize(&once), once, "not a fixpoint: {}", cmd);
        }
    }

    #[test]
    fn test_command_id_deterministic() {
        let id = command_id("git rebase -i <PATH>");
        assert_eq!(id.len(), 64);
        assert_eq!(id, command_id("git rebase -i <PATH>"));
        assert_ne!(id, command_id("git rebase -i <NUM>"));
    }

    proptest! {
        // Command-shaped input. Quote chars are excluded: an unpaired quote
        // can pair up with another leftover after masking, so idempotence
        // only holds once quoting is well-formed.
        #[test]
        fn prop_canonicalize_idempotent(line in "[a-zA-Z0-9 ./~_=:|&<>-]{0,100}") {
            let once = canonicalize(&line);
            prop_assert_eq!(canonicalize(&once), once);
        }
    }
}
