use crate::error::{CreditError, Result};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;

/// Decides which tracked files are blamed: extension and language lists first,
/// then exclude globs, then restrict-to globs.
#[derive(Debug, Default)]
pub struct FileFilter {
    extensions: Option<HashSet<String>>,
    language_extensions: Option<HashSet<String>>,
    exclude: Option<GlobSet>,
    restrict_to: Option<GlobSet>,
}

impl FileFilter {
    /// Empty lists mean "no constraint". Every glob is compiled up front so a
    /// bad pattern stops the run before any file is touched.
    pub fn new(
        extensions: &[String],
        language_extensions: Option<HashSet<String>>,
        exclude: &[String],
        restrict_to: &[String],
    ) -> Result<Self> {
        let extensions = if extensions.is_empty() {
            None
        } else {
            Some(extensions.iter().map(|e| normalize_extension(e)).collect())
        };

        Ok(FileFilter {
            extensions,
            language_extensions,
            exclude: build_globset(exclude)?,
            restrict_to: build_globset(restrict_to)?,
        })
    }

    pub fn allows(&self, file: &str) -> bool {
        let ext = extension(file);

        if let Some(allowed) = &self.extensions {
            if !allowed.contains(ext) { return false; }
        }
        if let Some(allowed) = &self.language_extensions {
            if !allowed.contains(ext) { return false; }
        }
        if self.exclude.as_ref().is_some_and(|set| set.is_match(file)) {
            return false;
        }

        self.restrict_to.as_ref().map_or(true, |set| set.is_match(file))
    }

    pub fn select(&self, files: Vec<String>) -> Vec<String> {
        files.into_iter().filter(|f| self.allows(f)).collect()
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') { ext.to_string() } else { format!(".{ext}") }
}

/// Suffix of the last path element from its final `.`, or "" when there is none.
fn extension(file: &str) -> &str {
    let name = file.rsplit('/').next().unwrap_or(file);
    name.rfind('.').map_or("", |i| &name[i..])
}

/// Compiles one shell-style glob. `*` and `?` never cross a `/`; `**`
/// spans directories.
pub fn compile_glob(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map_err(|e| CreditError::Pattern {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })
}

/// `None` for an empty list, so "no patterns" stays distinct from "matches nothing".
fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    let set = builder.build().map_err(|e| CreditError::Pattern {
        pattern: patterns.join(","),
        reason: e.kind().to_string(),
    })?;
    Ok(Some(set))
}
