//! Canonical layout through an external `gofmt`.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use thiserror::Error;

use super::syntax::SyntaxError;

const STDIN_NAME: &str = "<standard input>:";

#[derive(Debug, Error)]
pub(crate) enum GofmtError {
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Rejected(#[from] SyntaxError),
}

/// Pipe `src` through `program` and return its output.
pub(crate) fn run(program: &Path, src: &str) -> Result<String, GofmtError> {
    let spawn_error = |source: io::Error| GofmtError::Spawn {
        program: program.display().to_string(),
        source,
    };

    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| spawn_error(io::Error::other("stdin is not piped")))?;
    let input = src.to_string();
    let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

    let output = child.wait_with_output().map_err(spawn_error)?;
    let written = writer
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::debug!(status = %output.status, %stderr, "gofmt rejected source");
        return Err(rejection(src, &stderr).into());
    }
    written.map_err(spawn_error)?;

    String::from_utf8(output.stdout)
        .map_err(|err| spawn_error(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// First `<standard input>:line:column: message` diagnostic in `stderr`.
fn rejection(src: &str, stderr: &str) -> SyntaxError {
    let first = stderr.lines().next().unwrap_or_default().trim();
    let located = first.strip_prefix(STDIN_NAME).and_then(|rest| {
        let mut parts = rest.splitn(3, ':');
        let line = parts.next()?.parse::<usize>().ok()?;
        let column = parts.next()?.parse::<usize>().ok()?;
        Some((line, column, parts.next()?.trim()))
    });

    match located {
        Some((line, column, message)) => SyntaxError::new(message, offset_of(src, line, column)),
        None if first.is_empty() => SyntaxError::new("gofmt failed", 0),
        None => SyntaxError::new(first, 0),
    }
}

/// Byte offset of a 1-based `line` and byte `column`.
fn offset_of(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}
