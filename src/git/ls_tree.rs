use crate::error::Result;
use crate::git::command::run_git;
use std::path::Path;

/// Every tracked path at `revision`, repository-relative.
///
/// `-z` keeps paths with spaces or non-ASCII bytes unquoted, exactly as blame
/// expects them back.
pub fn list_files(repo: &Path, revision: &str) -> Result<Vec<String>> {
    let output = run_git(repo, &["ls-tree", "-r", "-z", "--name-only", revision])?;
    Ok(split_nul(&output))
}

fn split_nul(output: &str) -> Vec<String> {
    output
        .split('\0')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
