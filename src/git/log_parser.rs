use crate::error::{CreditError, Result};
use crate::git::command::run_git;
use crate::types::{CommitAttribution, Identity};
use std::path::Path;

/// Raw-style header lines with `.mailmap` applied, as blame applies it.
const ENTRY_FORMAT: &str = "--format=commit %H%nauthor %aN <%aE>%ncommitter %cN <%cE>";

/// Most recent commit touching `file` as of `revision`, as a zero-line attribution.
///
/// Used for files that exist but are empty: blame has nothing to report, yet the
/// file still belongs to someone's footprint.
pub fn last_commit(repo: &Path, revision: &str, file: &str, identity: Identity) -> Result<CommitAttribution> {
    let output = run_git(
        repo,
        &["log", revision, "-n", "1", "--no-decorate", ENTRY_FORMAT, "--", file],
    )?;
    parse_raw_entry(file, &output, identity)
}

/// Reads the `commit` line and the identity line out of one log entry in
/// `--format=raw` layout.
///
/// Header lines are matched by key, so root commits (no `parent`) and merges
/// (several `parent` lines) both work.
pub fn parse_raw_entry(file: &str, output: &str, identity: Identity) -> Result<CommitAttribution> {
    let mut commit: Option<&str> = None;
    let mut name: Option<&str> = None;

    for (idx, line) in output.lines().enumerate() {
        // The header ends at the first blank line; the message follows indented.
        if line.is_empty() {
            break;
        }
        let (key, value) = line.split_once(' ').unwrap_or((line, ""));
        if key == "commit" {
            let hash = value.split_whitespace().next().unwrap_or_default();
            if hash.len() != 40 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(CreditError::parse(file, idx + 1, format!("malformed commit line '{line}'")));
            }
            commit = Some(hash);
        } else if key == identity.key() {
            let person = value.split_once(" <").map_or(value, |(person, _)| person);
            name = Some(person);
        }
    }

    let commit = commit.ok_or_else(|| CreditError::parse(file, 1, "no commit found in history"))?;
    let author = name.ok_or_else(|| {
        CreditError::parse(file, 1, format!("missing '{}' line for commit {commit}", identity.key()))
    })?;

    Ok(CommitAttribution {
        commit: commit.to_string(),
        author: author.to_string(),
        line_count: 0,
    })
}
