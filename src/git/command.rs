use crate::error::{CreditError, Result};
use std::io::{BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

/// Runs `git <args>` inside `cwd` and returns its stdout.
///
/// stderr is drained on a side thread so a chatty git cannot deadlock on a
/// full pipe while we are still reading stdout. A non-zero exit becomes
/// [`CreditError::GitExit`] carrying whatever git printed to stderr.
pub fn run_git(cwd: &Path, args: &[&str]) -> Result<String> {
    let command = args.first().copied().unwrap_or_default().to_string();

    let mut child = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| CreditError::Io { command: command.clone(), source })?;

    let stdout = child.stdout.take().ok_or_else(|| CreditError::Io {
        command: command.clone(),
        source: std::io::Error::other("stdout was not captured"),
    })?;
    let stderr = child.stderr.take().ok_or_else(|| CreditError::Io {
        command: command.clone(),
        source: std::io::Error::other("stderr was not captured"),
    })?;

    let stderr_reader = thread::spawn(move || {
        let mut stderr_text = String::new();
        let mut reader = BufReader::new(stderr);
        let _ = reader.read_to_string(&mut stderr_text);
        stderr_text
    });

    let mut output = Vec::new();
    let read_result = BufReader::new(stdout).read_to_end(&mut output);

    let status = child
        .wait()
        .map_err(|source| CreditError::Io { command: command.clone(), source })?;
    let stderr_text = stderr_reader.join().unwrap_or_default();

    read_result.map_err(|source| CreditError::Io { command: command.clone(), source })?;

    if !status.success() {
        return Err(CreditError::GitExit {
            command,
            stderr: stderr_text.trim().to_string(),
        });
    }

    // Blame content lines are raw file bytes; non-UTF-8 sources must not abort the run.
    Ok(String::from_utf8_lossy(&output).into_owned())
}
