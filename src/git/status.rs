//! Parsing of `git status --porcelain -z` output.

/// One record from porcelain status output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Two-letter `XY` status code (index, worktree).
    pub code: String,
    /// Path in the working tree. For renames and copies this is the destination.
    pub path: String,
    /// Source path for renames and copies.
    pub orig_path: Option<String>,
}

/// Parse NUL-separated porcelain v1 records.
///
/// Each record is `XY <path>`; rename and copy records are followed by an
/// extra NUL-terminated field holding the source path.
pub fn parse_porcelain_z(output: &str) -> Vec<StatusEntry> {
    let mut entries = Vec::new();
    let mut fields = output.split('\0').filter(|f| !f.is_empty());

    while let Some(record) = fields.next() {
        // "XY " prefix is exactly three bytes
        if record.len() < 4 || !record.is_char_boundary(3) {
            continue;
        }
        let code = record[..2].to_string();
        let path = record[3..].to_string();

        let orig_path = if code.starts_with('R') || code.starts_with('C') {
            fields.next().map(str::to_string)
        } else {
            None
        };

        entries.push(StatusEntry {
            code,
            path,
            orig_path,
        });
    }

    entries
}

/// Path of the first changed entry, or `None` for a clean tree.
pub fn first_changed_path(output: &str) -> Option<String> {
    parse_porcelain_z(output).into_iter().next().map(|e| e.path)
}
