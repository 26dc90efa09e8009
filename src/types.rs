use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ─── Per-file attribution ─────────────────────────────────────────────────────

/// Lines of one file that blame assigns to a single commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAttribution {
    pub commit: String,
    pub author: String,
    pub line_count: usize,
}

/// commit hash → attribution, for exactly one file.
pub type AttributionMap = HashMap<String, CommitAttribution>;

/// Which recorded identity of a commit receives the credit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Author,
    Committer,
}

impl Identity {
    pub fn from_use_committer(use_committer: bool) -> Self {
        if use_committer { Identity::Committer } else { Identity::Author }
    }

    /// Header key carrying the name in both blame porcelain and raw log output.
    pub fn key(self) -> &'static str {
        match self {
            Identity::Author => "author",
            Identity::Committer => "committer",
        }
    }
}

// ─── Aggregation ──────────────────────────────────────────────────────────────

/// Running tally for one author name.
#[derive(Debug, Clone, Default)]
pub struct AuthorAccumulator {
    pub files: HashSet<String>,
    pub commits: HashSet<String>,
    pub lines: usize,
}

/// Final per-author numbers handed to the reporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    pub name: String,
    pub lines: usize,
    pub commits: usize,
    pub files: usize,
}

// ─── Run options ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Lines,
    Commits,
    Files,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Tabular,
    Csv,
    Json,
    JsonLines,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProgressMode {
    #[default]
    Bar,
    Lines,
    Off,
}
