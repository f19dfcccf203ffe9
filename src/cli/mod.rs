//! # CLI Module
//!
//! Command-line surface of the `foggo` binary.
//!
//! ## Commands
//!
//! ### `fop`
//!
//! Closure-based options:
//!
//! ```bash
//! foggo fop --struct Server --package ./internal/server
//! ```
//!
//! ### `afop`
//!
//! Interface-based options, one type per field:
//!
//! ```bash
//! foggo afop --struct Server --package ./internal/server --no-instance
//! ```
//!
//! Options shared by both:
//! - `-s, --struct <NAME>` - Target struct (required)
//! - `-p, --package <DIR>` - Package directory (default: `.`)
//! - `--no-instance` - Do not generate `New<Struct>`
//! - `--no-format` - Skip `goimports`
//! - `--exclude-tag <KEY>` / `--exclude-comment <DIRECTIVE>` - Exclusion marker
//! - `--config <FILE>` - Configuration file (default: `foggo.toml` in the package)
//! - `--stdout` - Print instead of writing `<file>_gen.go`
//!
//! Structs declared in the same file share `<file>_gen.go`; generating for
//! a second one replaces the first one's options (a warning is logged).

mod commands;


pub use commands::{run, run_cli, Cli, Commands, FopArgs};
