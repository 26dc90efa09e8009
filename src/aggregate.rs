use crate::error::Result;
use crate::types::{AttributionMap, AuthorAccumulator, AuthorRecord};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Produces the per-commit attribution of one file.
pub trait BlameSource: Sync {
    fn analyze(&self, file: &str) -> Result<AttributionMap>;
}

/// Receives a tick after every merged file. Best effort only.
pub trait Progress: Sync {
    fn file_done(&self, completed: usize, total: usize);
}

fn percent(completed: usize, total: usize) -> usize {
    if total == 0 { 100 } else { completed * 100 / total }
}

impl Progress for ProgressBar {
    fn file_done(&self, completed: usize, total: usize) {
        self.set_length(total as u64);
        self.set_position(completed as u64);
        self.set_message(format!("analysis done by {} percent", percent(completed, total)));
    }
}

/// Plain `analysis done by N percent` lines on stderr.
pub struct LineProgress;

impl Progress for LineProgress {
    fn file_done(&self, completed: usize, total: usize) {
        eprintln!("analysis done by {} percent", percent(completed, total));
    }
}

pub struct NoProgress;

impl Progress for NoProgress {
    fn file_done(&self, _completed: usize, _total: usize) {}
}

// ─── Ledger ───────────────────────────────────────────────────────────────────

/// author name → running tally. Merging is set union plus a sum, so the
/// outcome does not depend on the order files arrive in.
#[derive(Debug, Default)]
pub struct Ledger {
    authors: HashMap<String, AuthorAccumulator>,
    files_done: usize,
}

impl Ledger {
    pub fn merge(&mut self, file: &str, commits: &AttributionMap) {
        for ci in commits.values() {
            let acc = self.authors.entry(ci.author.clone()).or_default();
            acc.files.insert(file.to_string());
            acc.commits.insert(ci.commit.clone());
            acc.lines += ci.line_count;
        }
        self.files_done += 1;
    }

    pub fn files_done(&self) -> usize {
        self.files_done
    }

    /// Snapshot in name order; ranking happens later.
    pub fn into_records(self) -> Vec<AuthorRecord> {
        let mut records: Vec<AuthorRecord> = self
            .authors
            .into_iter()
            .map(|(name, acc)| AuthorRecord {
                name,
                lines: acc.lines,
                commits: acc.commits.len(),
                files: acc.files.len(),
            })
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// Blames every file on a pool of `jobs` workers (`None` = one per core) and
/// folds the results into per-author records.
///
/// Each file yields a `Result`; the first error stops the remaining work and is
/// returned once in-flight tasks have drained. No partial totals escape.
pub fn collect<S, P>(source: &S, files: &[String], jobs: Option<usize>, progress: &P) -> Result<Vec<AuthorRecord>>
where
    S: BlameSource + ?Sized,
    P: Progress + ?Sized,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()?;

    let total = files.len();
    let ledger = Mutex::new(Ledger::default());

    pool.install(|| {
        files.par_iter().try_for_each(|file| -> Result<()> {
            let commits = source.analyze(file)?;

            let completed = {
                let mut ledger = ledger.lock().unwrap_or_else(PoisonError::into_inner);
                ledger.merge(file, &commits);
                ledger.files_done()
            };
            progress.file_done(completed, total);
            Ok(())
        })
    })?;

    Ok(ledger.into_inner().unwrap_or_else(PoisonError::into_inner).into_records())
}
