use thiserror::Error;

pub type Result<T> = std::result::Result<T, CreditError>;

#[derive(Error, Debug)]
pub enum CreditError {
    #[error("Failed to run git {command}: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("git {command} failed: {stderr}")]
    GitExit { command: String, stderr: String },
    #[error("Malformed git output for '{file}' (line {line}): {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },
    #[error("Invalid pattern \"{pattern}\": {reason}")]
    Pattern { pattern: String, reason: String },
    #[error("Config file '{path}': {message}")]
    Config { path: String, message: String },
    #[error("Cannot start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CreditError {
    pub fn parse(file: &str, line: usize, reason: impl Into<String>) -> Self {
        CreditError::Parse {
            file: file.to_string(),
            line,
            reason: reason.into(),
        }
    }
}
