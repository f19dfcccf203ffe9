//! Persists generated code next to the file that declared the struct.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::FoggoError;
use crate::generator::GENERATED_HEADER;

/// Suffix appended to the declaring file's stem: `server.go` → `server_gen.go`
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_gen";

/// Writes generated code to a sibling of the declaring file
///
/// The declaring file itself is never touched; the sibling is created or
/// fully replaced. All structs of one declaring file share a destination, so
/// generating for a second struct replaces the first one's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Writer {
    suffix: String,
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new(DEFAULT_OUTPUT_SUFFIX)
    }
}

impl Writer {
    pub fn new(suffix: impl Into<String>) -> Self {
        Writer {
            suffix: suffix.into(),
        }
    }

    /// Destination for code generated from a struct declared in `source`
    pub fn destination(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        source.with_file_name(format!("{stem}{}.go", self.suffix))
    }

    /// Write `code` generated for `struct_name` declared in `source`,
    /// returning the path written
    ///
    /// Replacing options generated for a different struct is logged as a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns `FoggoError::Io` if the file cannot be written, and
    /// `FoggoError::Config` if the destination would be `source` itself.
    pub fn write(
        &self,
        code: &str,
        source: &Path,
        struct_name: &str,
    ) -> Result<PathBuf, FoggoError> {
        let dest = self.destination(source);
        if dest == source {
            return Err(FoggoError::Config(format!(
                "output suffix is empty; refusing to overwrite {}",
                source.display()
            )));
        }
        if let Ok(existing) = fs::read_to_string(&dest) {
            if let Some(previous) = generated_struct(&existing).filter(|p| *p != struct_name) {
                warn!(
                    path = %dest.display(),
                    previous,
                    struct_name,
                    "replacing options generated for another struct"
                );
            }
        }
        fs::write(&dest, code)?;
        info!(path = %dest.display(), bytes = code.len(), "wrote generated options");
        Ok(dest)
    }
}

/// Struct a foggo-generated file was produced for, read from its option type
pub fn generated_struct(code: &str) -> Option<&str> {
    if !code.starts_with(GENERATED_HEADER) {
        return None;
    }
    code.lines()
        .find_map(|line| line.strip_prefix("type "))
        .and_then(|decl| decl.split_whitespace().next())
        .and_then(|name| name.strip_suffix("Option"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_is_sibling_with_suffix() {
        let writer = Writer::default();
        assert_eq!(
            writer.destination(Path::new("pkg/server/server.go")),
            PathBuf::from("pkg/server/server_gen.go")
        );
        assert_eq!(
            Writer::new("_options").destination(Path::new("a.go")),
            PathBuf::from("a_options.go")
        );
    }

    #[test]
    fn test_write_creates_and_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("model.go");
        fs::write(&source, "package model\n").unwrap();

        let writer = Writer::default();
        let dest = writer.write("first\n", &source, "Model").unwrap();
        assert_eq!(dest, dir.path().join("model_gen.go"));
        let dest = writer.write("second\n", &source, "Model").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "second\n");
        assert_eq!(fs::read_to_string(&source).unwrap(), "package model\n");
    }

    #[test]
    fn test_empty_suffix_never_overwrites_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("model.go");
        fs::write(&source, "package model\n").unwrap();

        let result = Writer::new("").write("generated\n", &source, "Model");
        assert!(matches!(result, Err(FoggoError::Config(_))));
        assert_eq!(fs::read_to_string(&source).unwrap(), "package model\n");
    }

    #[test]
    fn test_generated_struct_reads_option_type() {
        let closure = format!("{GENERATED_HEADER}\n\npackage m\n\ntype ServerOption func(*Server)\n");
        assert_eq!(generated_struct(&closure), Some("Server"));
        let interface =
            format!("{GENERATED_HEADER}\n\npackage m\n\ntype ClientOption interface {{\n\tapply(*Client)\n}}\n");
        assert_eq!(generated_struct(&interface), Some("Client"));
        assert_eq!(generated_struct("package m\n\ntype ServerOption func(*Server)\n"), None);
    }

    #[test]
    fn test_second_struct_replaces_shared_destination() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("model.go");
        fs::write(&source, "package model\n").unwrap();

        let writer = Writer::default();
        let first = format!("{GENERATED_HEADER}\n\npackage model\n\ntype AOption func(*A)\n");
        let second = format!("{GENERATED_HEADER}\n\npackage model\n\ntype BOption func(*B)\n");
        let dest = writer.write(&first, &source, "A").unwrap();
        assert_eq!(generated_struct(&fs::read_to_string(&dest).unwrap()), Some("A"));
        writer.write(&second, &source, "B").unwrap();
        assert_eq!(generated_struct(&fs::read_to_string(&dest).unwrap()), Some("B"));
    }
}
