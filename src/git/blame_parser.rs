use crate::aggregate::BlameSource;
use crate::error::{CreditError, Result};
use crate::git::{command::run_git, log_parser};
use crate::types::{AttributionMap, CommitAttribution, Identity};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

/// `<sha> <orig-line> <final-line>[ <lines-in-group>]`
static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9a-f]{40}) \d+ \d+(?: \d+)?$").unwrap());

/// Blame of a single file at a fixed revision, through the `git` binary.
#[derive(Debug, Clone)]
pub struct GitBlame {
    pub repo: PathBuf,
    pub revision: String,
    pub identity: Identity,
}

impl GitBlame {
    pub fn new(repo: impl Into<PathBuf>, revision: impl Into<String>, identity: Identity) -> Self {
        GitBlame { repo: repo.into(), revision: revision.into(), identity }
    }

    /// Per-commit line counts for `file`. A file with no lines falls back to
    /// the last commit that touched it, credited with zero lines.
    pub fn analyze(&self, file: &str) -> Result<AttributionMap> {
        let output = run_git(
            &self.repo,
            &["blame", "--porcelain", self.revision.as_str(), "--", file],
        )?;

        let commits = parse_porcelain(file, &output, self.identity)?;
        if !commits.is_empty() {
            return Ok(commits);
        }

        let fallback = log_parser::last_commit(&self.repo, &self.revision, file, self.identity)?;
        Ok(AttributionMap::from([(fallback.commit.clone(), fallback)]))
    }
}

impl BlameSource for GitBlame {
    fn analyze(&self, file: &str) -> Result<AttributionMap> {
        GitBlame::analyze(self, file)
    }
}

// ─── Porcelain parsing ────────────────────────────────────────────────────────

/// Metadata keys git prints after the first header of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Author,
    AuthorMail,
    AuthorTime,
    AuthorTz,
    Committer,
    CommitterMail,
    CommitterTime,
    CommitterTz,
    Summary,
    Previous,
    Boundary,
    Filename,
    Unrecognized,
}

impl Field {
    fn from_key(key: &str) -> Self {
        match key {
            "author" => Field::Author,
            "author-mail" => Field::AuthorMail,
            "author-time" => Field::AuthorTime,
            "author-tz" => Field::AuthorTz,
            "committer" => Field::Committer,
            "committer-mail" => Field::CommitterMail,
            "committer-time" => Field::CommitterTime,
            "committer-tz" => Field::CommitterTz,
            "summary" => Field::Summary,
            "previous" => Field::Previous,
            "boundary" => Field::Boundary,
            "filename" => Field::Filename,
            _ => Field::Unrecognized,
        }
    }

    fn is_identity(self, identity: Identity) -> bool {
        matches!(
            (self, identity),
            (Field::Author, Identity::Author) | (Field::Committer, Identity::Committer)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Header { commit: &'a str },
    Field { field: Field, value: &'a str },
    Content,
}

fn classify(raw: &str) -> Option<Line<'_>> {
    if raw.starts_with('\t') {
        return Some(Line::Content);
    }
    if let Some(caps) = HEADER_RE.captures(raw) {
        let commit = caps.get(1)?.as_str();
        return Some(Line::Header { commit });
    }
    if raw.is_empty() {
        return None;
    }
    let (key, value) = raw.split_once(' ').unwrap_or((raw, ""));
    Some(Line::Field { field: Field::from_key(key), value })
}

enum State<'a> {
    ExpectHeader,
    Metadata {
        commit: &'a str,
        name: Option<&'a str>,
        has_filename: bool,
    },
    ExpectContent { commit: &'a str },
}

/// Parses `git blame --porcelain` output into per-commit line counts.
///
/// Lines are classified by their leading token rather than by position, so
/// optional fields (`previous`, `boundary`, or keys added by newer git
/// releases) never shift the parse. A commit's metadata is only printed the
/// first time it appears; later groups go straight from header to content,
/// except for the path lines of a commit that touched several paths.
pub fn parse_porcelain(file: &str, output: &str, identity: Identity) -> Result<AttributionMap> {
    let mut commits = AttributionMap::new();
    let mut state = State::ExpectHeader;
    let mut last_line = 0;

    for (idx, raw) in output.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = classify(raw)
            .ok_or_else(|| CreditError::parse(file, line_no, "unexpected blank line"))?;

        state = match (state, line) {
            (State::ExpectHeader, Line::Header { commit }) => {
                if commits.contains_key(commit) {
                    State::ExpectContent { commit }
                } else {
                    State::Metadata { commit, name: None, has_filename: false }
                }
            }
            (State::ExpectHeader, _) => {
                return Err(CreditError::parse(file, line_no, "expected a commit header line"));
            }

            (State::Metadata { commit, name, has_filename }, Line::Field { field, value }) => {
                if field.is_identity(identity) {
                    State::Metadata { commit, name: Some(value), has_filename }
                } else {
                    let has_filename = has_filename || field == Field::Filename;
                    State::Metadata { commit, name, has_filename }
                }
            }
            (State::Metadata { commit, name, has_filename }, Line::Content) => {
                let author = name.ok_or_else(|| {
                    CreditError::parse(
                        file,
                        line_no,
                        format!("missing '{}' line for commit {commit}", identity.key()),
                    )
                })?;
                if !has_filename {
                    return Err(CreditError::parse(
                        file,
                        line_no,
                        format!("missing 'filename' line for commit {commit}"),
                    ));
                }
                commits.insert(
                    commit.to_string(),
                    CommitAttribution {
                        commit: commit.to_string(),
                        author: author.to_string(),
                        line_count: 1,
                    },
                );
                State::ExpectHeader
            }
            (State::Metadata { commit, .. }, Line::Header { .. }) => {
                return Err(CreditError::parse(
                    file,
                    line_no,
                    format!("block for commit {commit} ends before its content line"),
                ));
            }

            (State::ExpectContent { commit }, Line::Content) => {
                if let Some(entry) = commits.get_mut(commit) {
                    entry.line_count += 1;
                }
                State::ExpectHeader
            }
            // A commit reached through more than one path repeats its
            // `previous`/`filename` lines on every group.
            (State::ExpectContent { commit }, Line::Field { .. }) => State::ExpectContent { commit },
            (State::ExpectContent { commit }, Line::Header { .. }) => {
                return Err(CreditError::parse(
                    file,
                    line_no,
                    format!("expected content line for commit {commit}"),
                ));
            }
        };
    }

    if !matches!(state, State::ExpectHeader) {
        return Err(CreditError::parse(file, last_line, "output ends in the middle of a block"));
    }

    Ok(commits)
}
