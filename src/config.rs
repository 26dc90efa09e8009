use crate::error::{CreditError, Result};
use crate::filters::compile_glob;
use crate::types::{OutputFormat, ProgressMode, SortKey};
use serde::Deserialize;
use std::path::Path;

/// All settings that can be placed in a .git-credit.yml config file.
/// Every field is optional — omitted fields fall back to CLI defaults.
/// CLI flags always take precedence over values set here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreditConfig {
    // What to analyze
    pub repository: Option<String>,
    pub revision: Option<String>,

    // How to credit and rank
    pub order_by: Option<SortKey>,
    pub use_committer: Option<bool>,

    // Output
    pub format: Option<OutputFormat>,
    pub output: Option<String>,
    pub progress: Option<ProgressMode>,

    // File selection
    pub extensions: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub restrict_to: Option<Vec<String>>,

    // Worker pool size
    pub jobs: Option<usize>,
}

impl CreditConfig {
    /// Validates semantic constraints that serde cannot enforce.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(0) = self.jobs {
            return Err("Invalid 'jobs' value: 0. \
                 Must be 1 or greater (omit it to use one worker per CPU)"
                .to_string());
        }

        if let Some(rev) = &self.revision {
            if rev.trim().is_empty() {
                return Err("Invalid 'revision' value: empty string. \
                     Use a branch, tag or commit, e.g. \"HEAD\""
                    .to_string());
            }
        }

        let globs: &[(&str, &Option<Vec<String>>)] =
            &[("exclude", &self.exclude), ("restrict_to", &self.restrict_to)];
        for (name, patterns) in globs {
            for p in patterns.iter().flatten() {
                if let Err(e) = compile_glob(p) {
                    return Err(format!("Invalid '{name}' entry: {e}"));
                }
            }
        }

        Ok(())
    }
}

/// Reads, parses, and validates a YAML config file from `path`.
pub fn load_config(path: &Path) -> Result<CreditConfig> {
    let config_err = |message: String| CreditError::Config {
        path: path.display().to_string(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| config_err(format!("cannot read file: {e}")))?;
    let cfg: CreditConfig = serde_yaml::from_str(&content).map_err(|e| config_err(format!("invalid YAML: {e}")))?;
    cfg.validate().map_err(config_err)?;
    Ok(cfg)
}

/// Annotated YAML template — printed by `--generate-config`.
pub static TEMPLATE: &str = r#"# git-credit configuration file
# Generated by: git-credit --generate-config
#
# All settings are optional. Omit any field to use the built-in default.
# CLI flags always take precedence over values in this file.
#
#   git-credit --config .git-credit.yml

# ── What to analyze ────────────────────────────────────────────────────────────

# Repository to analyze.
# repository: "."

# Branch, tag or commit whose tree is blamed.
# revision: "HEAD"

# ── Credit and ranking ─────────────────────────────────────────────────────────

# Sort key: lines, commits, files
# order_by: "lines"

# Credit the committer instead of the author of each commit.
# use_committer: false    # --use-author on the CLI overrides true

# ── Output ─────────────────────────────────────────────────────────────────────

# Output format: tabular, csv, json, json-lines
# format: "tabular"

# Write the report to this file instead of stdout.
# output: "authors.json"

# Progress on stderr: bar, lines, off
# progress: "bar"

# ── File selection ─────────────────────────────────────────────────────────────

# Only blame files with these extensions (leading dot optional).
# extensions:
#   - ".rs"
#   - ".toml"

# Only blame files belonging to these languages (case-insensitive).
# languages:
#   - "rust"
#   - "python"

# Skip files matching any of these globs. '*' and '?' do not cross '/'.
# exclude:
#   - "vendor/*"
#   - "*.lock"

# Keep only files matching at least one of these globs.
# restrict_to:
#   - "src/*"

# ── Performance ────────────────────────────────────────────────────────────────

# Number of files blamed at once. Defaults to one per CPU.
# jobs: 8
"#;

/// Prints the config template to stdout, or writes it to `output_path` if given.
pub fn print_template(output_path: Option<&Path>) -> Result<()> {
    match output_path {
        Some(path) => std::fs::write(path, TEMPLATE).map_err(|e| CreditError::Config {
            path: path.display().to_string(),
            message: format!("cannot write config template: {e}"),
        }),
        None => {
            print!("{TEMPLATE}");
            Ok(())
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_template_is_valid_yaml() {
        let result: std::result::Result<CreditConfig, _> = serde_yaml::from_str(TEMPLATE);
        assert!(result.is_ok(), "TEMPLATE must parse as valid CreditConfig: {:?}", result.err());
        let cfg = result.unwrap();
        // Everything is commented out in the template
        assert!(cfg.revision.is_none());
        assert!(cfg.order_by.is_none());
        assert!(cfg.jobs.is_none());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let cfg: CreditConfig = serde_yaml::from_str("{}").expect("empty map should parse");
        assert!(cfg.repository.is_none());
        assert!(cfg.format.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_enums_parsed() {
        let yaml = "order_by: commits\nformat: json-lines\nprogress: \"off\"\n";
        let cfg: CreditConfig = serde_yaml::from_str(yaml).expect("should parse");
        assert_eq!(cfg.order_by, Some(SortKey::Commits));
        assert_eq!(cfg.format, Some(OutputFormat::JsonLines));
        assert_eq!(cfg.progress, Some(ProgressMode::Off));
    }

    #[test]
    fn test_unknown_order_by_rejected() {
        let result: std::result::Result<CreditConfig, _> = serde_yaml::from_str("order_by: age\n");
        assert!(result.is_err(), "unknown sort key must not parse");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: std::result::Result<CreditConfig, _> = serde_yaml::from_str("format: html\n");
        assert!(result.is_err(), "unknown format must not parse");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<CreditConfig, _> = serde_yaml::from_str("unknown_setting: true\n");
        assert!(result.is_err(), "Unknown fields should be rejected by deny_unknown_fields");
    }

    #[test]
    fn test_lists_parsed() {
        let yaml = "extensions:\n  - .rs\nlanguages:\n  - go\nexclude:\n  - \"vendor/*\"\nrestrict_to:\n  - \"src/*\"\n";
        let cfg: CreditConfig = serde_yaml::from_str(yaml).expect("should parse");
        assert_eq!(cfg.extensions, Some(vec![".rs".to_string()]));
        assert_eq!(cfg.languages, Some(vec!["go".to_string()]));
        assert_eq!(cfg.exclude, Some(vec!["vendor/*".to_string()]));
        assert_eq!(cfg.restrict_to, Some(vec!["src/*".to_string()]));
    }

    // ── validate() tests ──────────────────────────────────────────────────────

    #[test]
    fn test_validate_zero_jobs_rejected() {
        let cfg: CreditConfig = serde_yaml::from_str("jobs: 0\n").expect("should parse");
        let msg = cfg.validate().unwrap_err();
        assert!(msg.contains("jobs"), "Error should mention 'jobs': {msg}");
    }

    #[test]
    fn test_validate_empty_revision_rejected() {
        let cfg: CreditConfig = serde_yaml::from_str("revision: \"  \"\n").expect("should parse");
        let msg = cfg.validate().unwrap_err();
        assert!(msg.contains("revision"), "Error should mention 'revision': {msg}");
    }

    #[test]
    fn test_validate_bad_glob_rejected() {
        let cfg: CreditConfig = serde_yaml::from_str("exclude:\n  - \"[abc\"\n").expect("should parse");
        let msg = cfg.validate().unwrap_err();
        assert!(msg.contains("exclude"), "Error should name the field: {msg}");
        assert!(msg.contains("[abc"), "Error should quote the pattern: {msg}");
    }

    #[test]
    fn test_load_config_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.yml");
        std::fs::write(&path, "jobs: 0\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, CreditError::Config { .. }));
        assert!(err.to_string().contains("bad.yml"), "got: {err}");
    }

    #[test]
    fn test_print_template_to_file_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".git-credit.yml");
        print_template(Some(&path)).expect("write template");
        let cfg = load_config(&path).expect("template must load");
        assert!(cfg.format.is_none());
    }

    // ── Example file test ─────────────────────────────────────────────────────

    #[test]
    fn test_load_example_file() {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let example_path = manifest_dir.join(".git-credit.example.yml");

        let cfg = load_config(&example_path).unwrap_or_else(|e| {
            panic!("Example config file should parse and validate successfully: {e}")
        });

        assert_eq!(cfg.revision.as_deref(), Some("HEAD"));
        assert_eq!(cfg.order_by, Some(SortKey::Lines));
        assert_eq!(cfg.use_committer, Some(false));
        assert_eq!(cfg.format, Some(OutputFormat::Tabular));
        assert_eq!(cfg.progress, Some(ProgressMode::Bar));
        assert_eq!(cfg.jobs, Some(8));

        let langs = cfg.languages.as_ref().expect("languages should be set in example file");
        assert!(langs.contains(&"rust".to_string()));

        let exclude = cfg.exclude.as_ref().expect("exclude should be set in example file");
        assert!(exclude.contains(&"vendor/*".to_string()));
        assert!(exclude.contains(&"*.lock".to_string()));
    }
}
