use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use tree_sitter::{Node, Parser, Tree};

use crate::error::FoggoError;

/// A parsed Go source file
pub struct GoFile {
    source: String,
    tree: Tree,
}

impl fmt::Debug for GoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoFile")
            .field("bytes", &self.source.len())
            .field("has_error", &self.tree.root_node().has_error())
            .finish()
    }
}

impl GoFile {
    /// Parse Go source text
    ///
    /// # Errors
    ///
    /// Returns `FoggoError::PackageLoad` if the Go grammar cannot be loaded
    /// or tree-sitter produces no tree.
    pub fn parse(source: impl Into<String>) -> Result<Self, FoggoError> {
        let source = source.into();
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| FoggoError::PackageLoad(format!("cannot load Go grammar: {e}")))?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| FoggoError::PackageLoad("parser returned no syntax tree".into()))?;
        Ok(GoFile { source, tree })
    }

    /// Root `source_file` node
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text spanned by `node`
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// Whether tree-sitter had to recover from syntax errors
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Name from the `package` clause
    pub fn package_name(&self) -> Option<&str> {
        let root = self.root();
        let mut cursor = root.walk();
        let clause = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_clause")?;
        let mut cursor = clause.walk();
        let ident = clause
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_identifier")?;
        Some(self.text(ident))
    }
}

/// A loaded Go package: its name, parsed files, and their paths
///
/// `files` and `paths` are index-aligned.
#[derive(Debug)]
pub struct PackageInfo {
    pub name: String,
    pub files: Vec<GoFile>,
    pub paths: Vec<PathBuf>,
}

/// Load and parse every non-test `.go` file in `dir`
///
/// Files are parsed in path order so struct lookup is deterministic.
///
/// # Errors
///
/// Returns `FoggoError::PackageLoad` when the directory holds no Go files,
/// a file has no package clause, or the files disagree on the package name.
/// Directory and file read failures surface as `FoggoError::Io`.
pub fn parse_package_info(dir: &Path) -> Result<PackageInfo, FoggoError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_package_source(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(FoggoError::PackageLoad(format!(
            "no Go files in {}",
            dir.display()
        )));
    }

    let mut files = Vec::with_capacity(paths.len());
    let mut names = BTreeSet::new();
    for path in &paths {
        let file = GoFile::parse(fs::read_to_string(path)?)?;
        if file.has_errors() {
            warn!(path = %path.display(), "Go source contains syntax errors");
        }
        let name = file.package_name().ok_or_else(|| {
            FoggoError::PackageLoad(format!("{} has no package clause", path.display()))
        })?;
        names.insert(name.to_string());
        debug!(path = %path.display(), package = name, "parsed Go file");
        files.push(file);
    }

    let mut names = names.into_iter();
    match (names.next(), names.next()) {
        (Some(name), None) => Ok(PackageInfo { name, files, paths }),
        _ => Err(FoggoError::PackageLoad(format!(
            "{} packages found in {}",
            names.len() + 2,
            dir.display()
        ))),
    }
}

fn is_package_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    path.is_file() && name.ends_with(".go") && !name.ends_with("_test.go")
}
