use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::FoggoError;

/// Formatter used when nothing else is configured
pub const DEFAULT_FORMATTER: &[&str] = &["goimports"];

/// Environment variable replacing the formatter command (whitespace separated)
pub const FORMATTER_ENV: &str = "FOGGO_FORMATTER";

/// Canonicalises generated Go source
pub trait Formatter: Send + Sync {
    /// Return the formatted form of `source`
    ///
    /// # Errors
    ///
    /// Returns `FoggoError::Format` when the source is rejected.
    fn format(&self, source: &str) -> Result<String, FoggoError>;
}

impl<F> Formatter for F
where
    F: Fn(&str) -> Result<String, FoggoError> + Send + Sync,
{
    fn format(&self, source: &str) -> Result<String, FoggoError> {
        self(source)
    }
}

/// Pipes source through an external command such as `goimports` or `gofmt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    command: Vec<String>,
}

impl Default for CommandFormatter {
    fn default() -> Self {
        CommandFormatter {
            command: DEFAULT_FORMATTER.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CommandFormatter {
    /// Formatter running `command[0]` with the remaining elements as arguments
    pub fn new(command: Vec<String>) -> Self {
        CommandFormatter { command }
    }

    /// Formatter from `FOGGO_FORMATTER` if set, `command` otherwise
    pub fn from_env_or(command: Vec<String>) -> Self {
        match std::env::var(FORMATTER_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                CommandFormatter::new(value.split_whitespace().map(String::from).collect())
            }
            _ => CommandFormatter::new(command),
        }
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, source: &str) -> Result<String, FoggoError> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(FoggoError::Format("formatter command is empty".into()));
        };
        debug!(program = %program, "formatting generated code");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| FoggoError::Format(format!("cannot run {program}: {e}")))?;

        // stdin is fed from its own thread so output can drain concurrently
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(source.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (written, output)
        });
        let output =
            output.map_err(|e| FoggoError::Format(format!("{program} did not finish: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FoggoError::Format(format!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        written.map_err(|e| FoggoError::Format(format!("cannot write to {program}: {e}")))?;
        String::from_utf8(output.stdout)
            .map_err(|e| FoggoError::Format(format!("{program} produced invalid UTF-8: {e}")))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    fn stub(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fmt-stub");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn formatter_for(path: &Path) -> CommandFormatter {
        CommandFormatter::new(vec![path.to_string_lossy().into_owned()])
    }

    #[test]
    fn test_command_formatter_passes_source_through() {
        let dir = tempfile::tempdir().unwrap();
        let fmt = formatter_for(&stub(dir.path(), "cat"));
        assert_eq!(fmt.format("package a\n").unwrap(), "package a\n");
    }

    #[test]
    fn test_command_formatter_streams_large_sources() {
        let dir = tempfile::tempdir().unwrap();
        let fmt = formatter_for(&stub(dir.path(), "cat"));
        let source: String = (0..20_000)
            .map(|i| format!("\tF{i} string // padding\n"))
            .collect();
        assert!(source.len() > 400_000);
        assert_eq!(fmt.format(&source).unwrap(), source);
    }

    #[test]
    fn test_command_formatter_returns_command_output() {
        let dir = tempfile::tempdir().unwrap();
        let fmt = formatter_for(&stub(dir.path(), "cat >/dev/null\nprintf 'formatted\\n'"));
        assert_eq!(fmt.format("package a\n").unwrap(), "formatted\n");
    }

    #[test]
    fn test_command_formatter_failure_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let fmt = formatter_for(&stub(
            dir.path(),
            "cat >/dev/null\necho 'expected declaration' >&2\nexit 2",
        ));
        match fmt.format("package a\nfunc {") {
            Err(FoggoError::Format(msg)) => assert!(msg.contains("expected declaration")),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_program_is_format_error() {
        let fmt = CommandFormatter::new(vec!["/nonexistent/foggo-formatter".into()]);
        assert!(matches!(fmt.format("package a\n"), Err(FoggoError::Format(_))));
    }

    #[test]
    fn test_empty_command_is_format_error() {
        let fmt = CommandFormatter::new(Vec::new());
        assert!(matches!(fmt.format(""), Err(FoggoError::Format(_))));
    }
}
