mod aggregate;
mod config;
mod error;
mod filters;
mod git;
mod languages;
mod ranking;
mod reporters;
mod types;

use aggregate::{LineProgress, NoProgress, Progress};
use clap::Parser;
use colored::Colorize;
use config::CreditConfig;
use error::Result;
use git::blame_parser::GitBlame;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use types::*;

#[derive(Parser, Debug)]
#[command(
    name = "git-credit",
    about = "Attribute the lines, commits and files of a git tree to their authors",
    version,
    long_about = "Blames every tracked file at a revision and totals, per author,\n\
                  the lines they own, the commits those lines come from, and the\n\
                  files they appear in."
)]
struct Args {
    /// Repository to analyze [default: .]
    #[arg(long, value_name = "PATH")]
    repository: Option<PathBuf>,

    /// Branch, tag or commit to blame [default: HEAD]
    #[arg(long, value_name = "REV")]
    revision: Option<String>,

    /// Sort key [default: lines]
    #[arg(long, value_enum)]
    order_by: Option<SortKey>,

    /// Credit the committer instead of the author
    #[arg(long, overrides_with = "use_author")]
    use_committer: bool,

    /// Credit the author even if the config file says use_committer
    #[arg(long, overrides_with = "use_committer")]
    use_author: bool,

    /// Output format [default: tabular]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Comma-separated extensions to keep, e.g. rs,toml
    #[arg(long, value_delimiter = ',')]
    extensions: Vec<String>,

    /// Comma-separated languages to keep, e.g. rust,go
    #[arg(long, value_delimiter = ',')]
    languages: Vec<String>,

    /// Comma-separated globs of files to skip
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Comma-separated globs; only matching files are analyzed
    #[arg(long, value_delimiter = ',')]
    restrict_to: Vec<String>,

    /// Files blamed in parallel [default: one per CPU]
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    jobs: Option<usize>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Progress on stderr [default: bar]
    #[arg(long, value_enum)]
    progress: Option<ProgressMode>,

    /// YAML config file; CLI flags take precedence over its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print an annotated config template (or write it to FILE) and exit
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    generate_config: Option<Option<PathBuf>>,
}

/// Effective options after layering CLI flags over the config file over defaults.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    repository: PathBuf,
    revision: String,
    order_by: SortKey,
    identity: Identity,
    format: OutputFormat,
    extensions: Vec<String>,
    languages: Vec<String>,
    exclude: Vec<String>,
    restrict_to: Vec<String>,
    jobs: Option<usize>,
    output: Option<PathBuf>,
    progress: ProgressMode,
}

impl Settings {
    fn resolve(args: Args, cfg: CreditConfig) -> Self {
        fn pick(cli: Vec<String>, file: Option<Vec<String>>) -> Vec<String> {
            if cli.is_empty() { file.unwrap_or_default() } else { cli }
        }

        let use_committer = match (args.use_committer, args.use_author) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        Settings {
            repository: args.repository
                .or(cfg.repository.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(".")),
            revision: args.revision.or(cfg.revision).unwrap_or_else(|| "HEAD".to_string()),
            order_by: args.order_by.or(cfg.order_by).unwrap_or_default(),
            identity: Identity::from_use_committer(
                use_committer.or(cfg.use_committer).unwrap_or(false),
            ),
            format: args.format.or(cfg.format).unwrap_or_default(),
            extensions: pick(args.extensions, cfg.extensions),
            languages: pick(args.languages, cfg.languages),
            exclude: pick(args.exclude, cfg.exclude),
            restrict_to: pick(args.restrict_to, cfg.restrict_to),
            jobs: args.jobs.or(cfg.jobs),
            output: args.output.or(cfg.output.map(PathBuf::from)),
            progress: args.progress.or(cfg.progress).unwrap_or_default(),
        }
    }
}

fn main() {
    let mut args = Args::parse();

    if let Some(target) = args.generate_config.take() {
        if let Err(e) = config::print_template(target.as_deref()) {
            fail(&e.to_string());
        }
        return;
    }

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(path).unwrap_or_else(|e| fail(&e.to_string())),
        None => CreditConfig::default(),
    };
    let settings = Settings::resolve(args, cfg);

    if let Err(e) = run_analysis(&settings) {
        fail(&e.to_string());
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{} {message}", "Error:".red().bold());
    std::process::exit(1);
}

// ── Analysis pipeline ──────────────────────────────────────────────────────────

fn run_analysis(settings: &Settings) -> Result<()> {
    let pb = match settings.progress {
        ProgressMode::Bar => ProgressBar::new_spinner(),
        ProgressMode::Lines | ProgressMode::Off => ProgressBar::hidden(),
    };
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.enable_steady_tick(Duration::from_millis(80));

    let total_start = Instant::now();
    let mut step_start = Instant::now();

    pb.set_message("[1/3] Selecting files...");
    let files = match select_files(settings) {
        Ok(files) => files,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    let t1 = fmt_dur(step_start.elapsed()); step_start = Instant::now();
    pb.println(format!("  ✓ [1/3] Selecting files ({})           {t1}", files.len()));

    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [2/3] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_length(files.len() as u64);
    pb.set_message("blaming...");

    let source = GitBlame::new(&settings.repository, &settings.revision, settings.identity);
    let progress: &dyn Progress = match settings.progress {
        ProgressMode::Bar => &pb,
        ProgressMode::Lines => &LineProgress,
        ProgressMode::Off => &NoProgress,
    };
    let records = match aggregate::collect(&source, &files, settings.jobs, progress) {
        Ok(records) => records,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    let t2 = fmt_dur(step_start.elapsed()); step_start = Instant::now();
    pb.println(format!("  ✓ [2/3] Blaming files                   {t2}"));

    pb.set_message("[3/3] Ranking authors...");
    let ranked = ranking::rank(records, settings.order_by);
    let t3 = fmt_dur(step_start.elapsed());
    pb.println(format!("  ✓ [3/3] Ranking authors                 {t3}"));

    pb.finish_and_clear();
    if settings.progress != ProgressMode::Off {
        eprintln!(
            "{} {} authors, {} files — ⏱ {}",
            "✔".green(),
            ranked.len(),
            files.len(),
            fmt_dur(total_start.elapsed())
        );
    }

    reporters::write_report(&ranked, settings.format, settings.output.as_deref())
}

/// Tracked files at the revision, narrowed by extensions, languages and globs.
fn select_files(settings: &Settings) -> Result<Vec<String>> {
    let language_extensions = if settings.languages.is_empty() {
        None
    } else {
        let (exts, unknown) = languages::extensions_for(&settings.languages);
        for name in unknown {
            eprintln!("{} unknown language '{name}' ignored", "warning:".yellow());
        }
        Some(exts)
    };

    let filter = filters::FileFilter::new(
        &settings.extensions,
        language_extensions,
        &settings.exclude,
        &settings.restrict_to,
    )?;

    let tracked = git::ls_tree::list_files(&settings.repository, &settings.revision)?;
    Ok(filter.select(tracked))
}

// ── Duration formatting ────────────────────────────────────────────────────────

fn fmt_dur(d: Duration) -> String {
    let ms = d.as_millis();
    if ms >= 1000 { format!("{:.1}s", d.as_secs_f64()) } else { format!("{ms}ms") }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
