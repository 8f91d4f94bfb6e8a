//! Cleanup of raw model output before it becomes a commit message.

/// Markdown fence delimiter.
const CODE_FENCE: &str = "```";

/// Markdown horizontal rule delimiter.
const RULE: &str = "---";

/// Remove code fences and horizontal rules the model wraps its answer in.
pub fn strip_markdown_artifacts(raw: &str) -> String {
    raw.replace(CODE_FENCE, "").replace(RULE, "")
}

/// Backslash-escape `"`, `` ` `` and `'`, in that order.
///
/// Single pass: escaping already-escaped text doubles the backslashes.
pub fn escape_for_shell(text: &str) -> String {
    text.replace('"', "\\\"")
        .replace('`', "\\`")
        .replace('\'', "\\'")
}

/// Strip markdown artifacts, then escape quotes and backticks.
///
/// Backslashes and `$` are left alone, so the result is not a shell-safe
/// literal on its own.
pub fn sanitize(raw: &str) -> String {
    escape_for_shell(&strip_markdown_artifacts(raw))
}

/// Render a copy-pasteable `git commit` command line for an already cleaned
/// `message`, quoted for POSIX shells.
pub fn commit_command_line(message: &str) -> String {
    // NUL cannot appear in a shell word
    let message = message.replace('\0', "");
    let quoted = shlex::try_quote(&message).unwrap_or_default();
    format!("git commit -m {quoted}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_fences_and_rules() {
        let raw = "```\n✨ feat(cli): add flag\n---\nBody text.\n```";
        assert_eq!(
            strip_markdown_artifacts(raw),
            "\n✨ feat(cli): add flag\n\nBody text.\n"
        );
    }

    #[test]
    fn test_strip_is_idempotent() {
        let raw = "---\n```rust\nfn x() {}\n```\n----";
        let once = strip_markdown_artifacts(raw);
        assert_eq!(strip_markdown_artifacts(&once), once);
    }

    #[test]
    fn test_escapes_each_quote_once() {
        let out = sanitize(r#"say "hi" to `x` and 'y'"#);
        assert_eq!(out, r#"say \"hi\" to \`x\` and \'y\'"#);
    }

    #[test]
    fn test_sanitize_removes_delimiters_before_escaping() {
        let out = sanitize("```\"quoted\"```---");
        assert_eq!(out, "\\\"quoted\\\"");
        assert!(!out.contains("```"));
        assert!(!out.contains("---"));
    }

    #[test]
    fn test_four_backticks_leave_one_escaped() {
        // first three are a fence, the fourth is a literal backtick
        assert_eq!(sanitize("````"), "\\`");
    }

    #[test]
    fn test_newlines_and_emoji_pass_through() {
        let raw = "🐛 fix(parser): handle empty input\n\nTerjemahan: perbaiki 🎉";
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn test_single_pass_only() {
        let once = sanitize("it's");
        assert_eq!(once, "it\\'s");
        // a second pass is not a no-op
        assert_eq!(escape_for_shell(&once), r"it\\'s");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
    }

    /// Undo the quoting the way a POSIX shell would.
    fn shell_words(line: &str) -> Vec<String> {
        shlex::split(line).expect("command line does not parse")
    }

    #[test]
    fn test_commit_command_line_round_trips_quotes() {
        let message = "📝 docs: fix \"typo\" in `README` it's";
        let words = shell_words(&commit_command_line(message));
        assert_eq!(words, vec!["git", "commit", "-m", message]);
    }

    #[test]
    fn test_commit_command_line_keeps_injection_inside_one_word() {
        for message in [
            "fix \\\"; touch /tmp/pwned #",
            "feat: $(rm -rf /) and `id`",
            "multi\nline 'body' \\",
        ] {
            let line = commit_command_line(message);
            let words = shell_words(&line);
            assert_eq!(words.len(), 4, "{line} split into {words:?}");
            assert_eq!(words[3], message);
        }
    }

    #[test]
    fn test_commit_command_line_does_not_strip_again() {
        // cleaning already happened; a second strip would eat the fence here
        let message = "`---``";
        let words = shell_words(&commit_command_line(message));
        assert_eq!(words[3], message);
    }

    #[cfg(unix)]
    #[test]
    fn test_commit_command_line_survives_a_real_shell() {
        let message = "fix \\\"; touch /tmp/commitsmith_quoting_check #$(id)`id`'";
        let line = commit_command_line(message);
        let arg = line.strip_prefix("git commit -m ").unwrap();

        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("printf %s {arg}"))
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), message);
    }
}
